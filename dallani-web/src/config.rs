//! Browser configuration
//!
//! The dashboard has no file system or environment at runtime, so the API
//! root and search delay are fixed when the bundle is built.

use once_cell::unsync::OnceCell;
use shared::config::ClientConfig;

thread_local! {
    static WEB_CONFIG: OnceCell<ClientConfig> = OnceCell::new();
}

/// Builds the configuration from build-time environment values.
///
/// Invalid values are reported on the console and replaced by the defaults.
pub fn from_build_env(api_url: Option<&str>, debounce_ms: Option<&str>) -> ClientConfig {
    let mut config = ClientConfig::with_defaults();
    if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
        config.api_url = url.trim().to_string();
    }
    if let Some(ms) = debounce_ms.and_then(|value| value.trim().parse().ok()) {
        config.search_debounce_ms = ms;
    }
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            web_sys::console::warn_1(&format!("Ignoring build configuration: {err}").into());
            ClientConfig::with_defaults()
        }
    }
}

/// Process-wide configuration of the dashboard.
pub fn web_config() -> ClientConfig {
    WEB_CONFIG.with(|cell| {
        cell.get_or_init(|| {
            from_build_env(
                option_env!("DALLANI_API_URL"),
                option_env!("DALLANI_SEARCH_DEBOUNCE_MS"),
            )
        })
        .clone()
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use shared::config::DEFAULT_API_URL;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_defaults_without_build_env() {
        let config = from_build_env(None, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.search_debounce_ms, 500);
    }

    #[wasm_bindgen_test]
    fn test_build_env_overrides() {
        let config = from_build_env(Some("https://api.dallani.app/api"), Some("800"));
        assert_eq!(config.api_url, "https://api.dallani.app/api");
        assert_eq!(config.search_debounce_ms, 800);
    }

    #[wasm_bindgen_test]
    fn test_invalid_build_env_falls_back() {
        let config = from_build_env(Some("ftp://files"), Some("100"));
        assert_eq!(config, ClientConfig::with_defaults());

        let config = from_build_env(None, Some("soon"));
        assert_eq!(config.search_debounce_ms, 500);
    }
}
