//! Build-time configuration.
//!
//! Values come from environment variables read when the WASM bundle is
//! compiled (`CARECONNECT_API_URL=https://... trunk build`), falling back to
//! defaults that work with the Trunk development proxy.

use crate::services::logging::LogLevel;

pub const DEFAULT_API_URL: &str = "/api/v1";
pub const TOAST_DURATION_MS: u32 = 4_000;
pub const PAGE_SIZE: u32 = 50;
pub const DASHBOARD_REFRESH_MS: u32 = 5 * 60 * 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL without a trailing slash.
    pub api_url: String,
    pub log_level: LogLevel,
    pub toast_duration_ms: u32,
    pub page_size: u32,
    /// Background refresh of the dashboard figures; 0 disables it.
    pub dashboard_refresh_ms: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("CARECONNECT_API_URL"),
            option_env!("CARECONNECT_LOG_LEVEL"),
        )
    }

    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_url,
            log_level: log_level.and_then(LogLevel::parse).unwrap_or_default(),
            toast_duration_ms: TOAST_DURATION_MS,
            page_size: PAGE_SIZE,
            dashboard_refresh_ms: DASHBOARD_REFRESH_MS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "/api/v1");
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.page_size, PAGE_SIZE);
    }

    #[test]
    fn test_overrides_are_normalised() {
        let config = AppConfig::from_values(Some("https://api.tavonga.org/api/v1/ "), Some("DEBUG"));
        assert_eq!(config.api_url, "https://api.tavonga.org/api/v1");
        assert_eq!(config.log_level, LogLevel::Debug);

        let blank = AppConfig::from_values(Some("  "), Some("chatty"));
        assert_eq!(blank.api_url, DEFAULT_API_URL);
        assert_eq!(blank.log_level, LogLevel::Info);
    }
}
