//! Front-end configuration resolved at build time.
//!
//! The WASM bundle has no process environment, so settings are baked in from
//! the build environment:
//! - `BACKOFFICE_API_URL`: REST API base URL (default `/api`)
//! - `BACKOFFICE_STORAGE_PREFIX`: `localStorage` key prefix (default `backoffice`)

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_STORAGE_PREFIX: &str = "backoffice";

/// `localStorage` keys holding the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub identity: String,
}

impl StorageKeys {
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self { token: format!("{prefix}.token"), identity: format!("{prefix}.user") }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_STORAGE_PREFIX)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub storage: StorageKeys,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

impl ClientConfig {
    /// Config baked in from the build environment.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("BACKOFFICE_API_URL"), option_env!("BACKOFFICE_STORAGE_PREFIX"))
    }

    /// Apply defaults and normalization to raw settings.
    #[must_use]
    pub fn resolve(api_base_url: Option<&str>, storage_prefix: Option<&str>) -> Self {
        let api_base_url = non_blank(api_base_url)
            .map_or(DEFAULT_API_BASE_URL, |url| url.trim_end_matches('/'))
            .to_owned();
        let api_base_url = if api_base_url.is_empty() { "/".to_owned() } else { api_base_url };
        let prefix = non_blank(storage_prefix)
            .map_or(DEFAULT_STORAGE_PREFIX, |p| p.trim_end_matches('.'));
        Self { api_base_url, storage: StorageKeys::with_prefix(prefix) }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
