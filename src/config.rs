//! Client Configuration
//!
//! Compile-time defaults, optionally overridden by a
//! `window.__CLOUD_CONFIG__` object injected by the host page.

use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TOAST_DURATION_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudConfig {
    /// Origin of the cloud API, without trailing slash
    pub base_url: String,
    pub api_token: Option<String>,
    /// In-flight requests are released with a timeout error after this long
    pub request_timeout_ms: Option<u32>,
    pub toast_duration_ms: u32,
    pub log_level: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            request_timeout_ms: Some(30_000),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            log_level: "info".to_string(),
        }
    }
}

impl CloudConfig {
    /// Build from compile-time environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("BOOST_HUB_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        config.api_token = option_env!("CLOUD_API_TOKEN").map(str::to_string);
        if let Some(timeout) = option_env!("CLOUD_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = parse_timeout(timeout);
        }
        if let Some(level) = option_env!("CLOUD_LOG_LEVEL") {
            config.log_level = level.to_string();
        }
        config
    }

    /// Environment defaults, replaced by `window.__CLOUD_CONFIG__` when present
    pub fn load() -> Self {
        #[cfg(target_arch = "wasm32")]
        if let Some(config) = Self::from_window() {
            return config;
        }
        Self::from_env()
    }

    #[cfg(target_arch = "wasm32")]
    fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &"__CLOUD_CONFIG__".into()).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        match serde_wasm_bindgen::from_value::<CloudConfig>(value) {
            Ok(mut config) => {
                config.base_url = config.base_url.trim_end_matches('/').to_string();
                Some(config)
            }
            Err(e) => {
                log::warn!("[config] ignoring invalid __CLOUD_CONFIG__: {}", e);
                None
            }
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Absolute URL for an API path such as `/api/teams`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn build_icon_url(&self, location: &str) -> String {
        self.api_url(&format!("/api/files/icons/{}", location))
    }
}

/// `0` disables the timeout
fn parse_timeout(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) => None,
        Ok(ms) => Some(ms),
        Err(_) => Some(30_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_base() {
        let config = CloudConfig {
            base_url: "https://boosthub.io".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_url("/api/teams"), "https://boosthub.io/api/teams");
        assert_eq!(
            config.build_icon_url("abc.png"),
            "https://boosthub.io/api/files/icons/abc.png"
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CloudConfig =
            serde_json::from_str(r#"{"baseUrl":"https://example.com","logLevel":"debug"}"#).unwrap();
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.toast_duration_ms, DEFAULT_TOAST_DURATION_MS);
        assert_eq!(config.log_level(), log::Level::Debug);
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("0"), None);
        assert_eq!(parse_timeout("1500"), Some(1500));
        assert_eq!(parse_timeout("soon"), Some(30_000));
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = CloudConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
