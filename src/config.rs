//! Application Configuration
//!
//! Build-time settings. The WASM bundle has no process environment, so
//! overridable values are read with `option_env!` when the crate is compiled.

use std::sync::OnceLock;

const DEFAULT_API_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

/// Inline SVG used wherever a product image is missing or fails to load
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='200' height='200'><rect width='100%25' height='100%25' fill='%23e5e7eb'/><text x='50%25' y='50%25' fill='%239ca3af' font-family='sans-serif' font-size='16' text-anchor='middle' dominant-baseline='middle'>No image</text></svg>";

#[derive(Debug, Clone)]
pub struct TestCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// Prefilled login (debug builds only)
    pub test_credentials: Option<TestCredentials>,
    pub is_production: bool,
    /// How long a cached query is served without refetching
    pub stale_time_ms: i64,
    /// How long an unused cache entry is kept at all
    pub gc_time_ms: i64,
    pub debounce_delay_ms: u32,
    pub default_page_limit: u32,
    pub toast_duration_ms: u32,
}

impl Config {
    pub fn load() -> Self {
        let is_production = cfg!(not(debug_assertions));
        let test_credentials = if is_production {
            None
        } else {
            Some(TestCredentials {
                email: try_load("CATALOG_TEST_EMAIL", option_env!("CATALOG_TEST_EMAIL"), ""),
                password: try_load("CATALOG_TEST_PASSWORD", option_env!("CATALOG_TEST_PASSWORD"), ""),
            })
        };

        Self {
            api_base_url: try_load(
                "CATALOG_API_BASE_URL",
                option_env!("CATALOG_API_BASE_URL"),
                DEFAULT_API_BASE_URL,
            )
            .trim_end_matches('/')
            .to_string(),
            test_credentials,
            is_production,
            stale_time_ms: 10_000,
            gc_time_ms: 10_000,
            debounce_delay_ms: 300,
            default_page_limit: 10,
            toast_duration_ms: 3_000,
        }
    }
}

/// Resolved once per page load
pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(Config::load)
}

fn try_load(key: &str, value: Option<&'static str>, default: &str) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => {
            log::debug!("[CONFIG] {key} not set at build time, using default");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_falls_back_on_missing_or_empty() {
        assert_eq!(try_load("K", None, "fallback"), "fallback");
        assert_eq!(try_load("K", Some(""), "fallback"), "fallback");
        assert_eq!(try_load("K", Some("set"), "fallback"), "set");
    }

    #[test]
    fn test_api_base_url_has_no_trailing_slash() {
        assert!(!Config::load().api_base_url.ends_with('/'));
    }
}
