pub mod bucket_chart;

pub use bucket_chart::BucketChart;
