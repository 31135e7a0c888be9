use yew::prelude::*;

use crate::config::AppConfig;
use crate::services::api::ApiClient;
use crate::services::cache::QueryCache;
use crate::services::session::SessionContext;

/// API client for the configured base URL, carrying the session token.
#[hook]
pub fn use_api() -> ApiClient {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let token = use_context::<SessionContext>().and_then(|session| session.token());
    ApiClient::new(config.api_url, token)
}

#[hook]
pub fn use_query_cache() -> QueryCache {
    use_context::<QueryCache>().unwrap_or_default()
}

#[hook]
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}
