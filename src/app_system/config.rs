use std::net::{IpAddr, SocketAddr};

use super::error::ConfigError;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Capacity of the store actor's request channel (default: `32`).
    pub store_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            store_channel_capacity: 32,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default   |
    /// |--------------------------|-----------|
    /// | `HOST`                   | `0.0.0.0` |
    /// | `PORT`                   | `3000`    |
    /// | `CORS_ORIGINS`           | (any)     |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`      |
    /// | `STORE_CHANNEL_CAPACITY` | `32`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var: &str| std::env::var(var).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", "u16", defaults.port)?;
        let request_timeout_secs =
            parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64", defaults.request_timeout_secs)?;
        let store_channel_capacity =
            parse_var(&lookup, "STORE_CHANNEL_CAPACITY", "usize", defaults.store_channel_capacity)?;
        if store_channel_capacity == 0 {
            return Err(ConfigError::InvalidVar {
                var: "STORE_CHANNEL_CAPACITY",
                expected: "non-zero usize",
                value: "0".to_string(),
            });
        }

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_channel_capacity,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self.host.parse::<IpAddr>().map_err(|_| ConfigError::InvalidVar {
            var: "HOST",
            expected: "IP address",
            value: self.host.clone(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, expected, value }),
    }
}
