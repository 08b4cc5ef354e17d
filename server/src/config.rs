//! Host configuration parsed from environment variables.
//!
//! Optional:
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: listen port (default 3000)
//! - `SITE_ROOT`: directory holding the built `pkg/` bundle; overrides the
//!   Leptos `site-root` setting

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub site_root: Option<PathBuf>,
}

impl ServerConfig {
    /// Build typed host config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("HOST").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
            std::env::var("SITE_ROOT").ok().as_deref(),
        )
    }

    pub(crate) fn from_vars(host: Option<&str>, port: Option<&str>, site_root: Option<&str>) -> Result<Self, ConfigError> {
        let host = non_blank(host).unwrap_or(DEFAULT_HOST).to_owned();
        let port = match non_blank(port) {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.to_owned() })?,
        };
        let site_root = non_blank(site_root).map(PathBuf::from);
        Ok(Self { host, port, site_root })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
