// ============================================================================
// CONFIGURATION
// ============================================================================
// Built once at startup from compile-time environment (see build.rs) and
// handed down explicitly: root props -> App -> AppContext.
// ============================================================================

use log::Level;

use crate::router::history::normalize_base;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_MS: u32 = 5000;
pub const DEFAULT_BASE_PATH: &str = "/";
pub const DEFAULT_LOG_LEVEL: Level = Level::Info;

/// Backend address and per-request timeout. `timeout_ms == 0` disables the
/// timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    /// Absolute URL for an endpoint path such as `/borrow`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Path prefix the app is served under (always `/`-terminated)
    pub base_path: String,
    pub api: ApiConfig,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            api: ApiConfig::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppConfig {
    /// Load configuration from variables captured at compile time
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("BASE_URL"),
            option_env!("API_BASE_URL"),
            option_env!("API_TIMEOUT_MS"),
            option_env!("LOG_LEVEL"),
        )
    }

    /// Unset or unparsable values fall back to the defaults
    pub fn from_values(
        base_path: Option<&str>,
        api_base_url: Option<&str>,
        timeout_ms: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let base_url = api_base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);

        Self {
            base_path: normalize_base(base_path.unwrap_or(DEFAULT_BASE_PATH)),
            api: ApiConfig::new(base_url, parse_or(timeout_ms, DEFAULT_TIMEOUT_MS)),
            log_level: parse_or(log_level, DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let config = AppConfig::from_values(None, None, None, None);
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_ms, 5000);
        assert_eq!(config.base_path, "/");
        assert_eq!(config.log_level, Level::Info);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn values_override_defaults() {
        let config = AppConfig::from_values(
            Some("/library"),
            Some("http://10.0.0.5:8000/"),
            Some("2500"),
            Some("debug"),
        );
        assert_eq!(config.base_path, "/library/");
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.log_level, Level::Debug);
        assert_eq!(config.api.endpoint("/borrow"), "http://10.0.0.5:8000/borrow");
    }

    #[test]
    fn garbage_falls_back() {
        let config = AppConfig::from_values(None, Some("  "), Some("soon"), Some("loud"));
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }
}
