//! Process configuration, read once from the environment at startup.

use persistence::file::DEFAULT_DATA_FILE;
use persistence::select::{KvSettings, StoreSettings};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreSettings,
    pub session_secret: Option<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("LEDGER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "LEDGER_BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let data_file = lookup("LEDGER_DATA_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let kv = KvSettings::from_parts(
            lookup("KV_REST_API_URL"),
            lookup("KV_REST_API_TOKEN"),
            lookup("LEDGER_KV_KEY"),
        );

        Ok(Self {
            bind_addr,
            store: StoreSettings { kv, data_file },
            session_secret: lookup("SESSION_SECRET").filter(|v| !v.is_empty()),
        })
    }
}
