//! Server configuration from the environment

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const BIND_VAR: &str = "FORECAST_BIND";
pub const WORKERS_VAR: &str = "FORECAST_WORKERS";
pub const TIMEOUT_VAR: &str = "FORECAST_TIMEOUT_SECS";
pub const ACCESS_LOG_VAR: &str = "FORECAST_ACCESS_LOG";

/// Access log used when a bind address is configured but no log path is.
pub const DEFAULT_ACCESS_LOG: &str = "./logs/access.log";

/// Errors reading the server configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{var} is invalid: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Maximum concurrent forecast computations
    pub workers: usize,
    pub timeout: Duration,
    pub access_log: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            workers: 4,
            timeout: Duration::from_secs(120),
            access_log: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let bind = lookup(BIND_VAR);
        if let Some(value) = &bind {
            config.bind = value
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(BIND_VAR, value, e))?;
        }

        if let Some(value) = lookup(WORKERS_VAR) {
            let workers: usize = value
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(WORKERS_VAR, &value, e))?;
            if workers == 0 {
                return Err(ConfigError::invalid(WORKERS_VAR, &value, "must be at least 1"));
            }
            config.workers = workers;
        }

        if let Some(value) = lookup(TIMEOUT_VAR) {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(TIMEOUT_VAR, &value, e))?;
            config.timeout = Duration::from_secs(secs);
        }

        config.access_log = match lookup(ACCESS_LOG_VAR) {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path.trim())),
            _ if bind.is_some() => Some(PathBuf::from(DEFAULT_ACCESS_LOG)),
            _ => None,
        };

        Ok(config)
    }
}
