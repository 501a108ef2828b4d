//! Server settings from environment variables.
//!
//! - `HOST` (default `0.0.0.0`)
//! - `PORT` (default `8080`)
//! - `DATA_DIR`: directory for saved tournaments; unset keeps everything in memory
//! - `INACTIVITY_HOURS` (default 12): idle tournaments are dropped from memory after this long

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_INACTIVITY_HOURS: u64 = 12;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub inactivity_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: None,
            inactivity_timeout: Duration::from_secs(DEFAULT_INACTIVITY_HOURS * 3600),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable values fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let data_dir = lookup("DATA_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);
        let inactivity_timeout = lookup("INACTIVITY_HOURS")
            .and_then(|h| h.trim().parse::<u64>().ok())
            .filter(|&h| h > 0)
            .and_then(|h| h.checked_mul(3600))
            .map(Duration::from_secs)
            .unwrap_or(defaults.inactivity_timeout);
        Self {
            host,
            port,
            data_dir,
            inactivity_timeout,
        }
    }
}
