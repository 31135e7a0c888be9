pub mod use_api;
pub mod use_dashboard;
pub mod use_mutation;
pub mod use_periodic_refresh;
pub mod use_query;
pub mod use_resources;
