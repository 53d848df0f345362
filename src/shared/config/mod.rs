//! Application configuration module
//!
//! Provides the server configuration, read from environment variables with
//! defaults suitable for local development.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Default per-subscriber buffer on the item update stream
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 256;

/// Default interval between SSE keep-alive comments
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 15;

const DEFAULT_PORT: u16 = 3000;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface the HTTP server binds to
    pub host: IpAddr,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Postgres connection string; the in-memory store is used when unset
    pub database_url: Option<String>,
    /// How many undelivered items each stream subscriber may hold before
    /// the oldest ones are dropped
    pub subscriber_buffer: usize,
    /// Seconds between keep-alive comments on idle event streams
    pub keep_alive_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_url: None,
            subscriber_buffer: DEFAULT_SUBSCRIBER_BUFFER,
            keep_alive_secs: DEFAULT_KEEP_ALIVE_SECS,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Recognised variables: `SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`,
    /// `SUBSCRIBER_BUFFER`, `SSE_KEEP_ALIVE_SECS`. Unset variables keep
    /// their defaults; set but unparseable ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(host) = lookup("SERVER_HOST") {
            builder = builder.host(parse_var("SERVER_HOST", &host)?);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_var("SERVER_PORT", &port)?);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(buffer) = lookup("SUBSCRIBER_BUFFER") {
            builder = builder.subscriber_buffer(parse_var("SUBSCRIBER_BUFFER", &buffer)?);
        }
        if let Some(secs) = lookup("SSE_KEEP_ALIVE_SECS") {
            builder = builder.keep_alive_secs(parse_var("SSE_KEEP_ALIVE_SECS", &secs)?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subscriber_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SUBSCRIBER_BUFFER",
                value: "0".to_string(),
            });
        }
        if self.keep_alive_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SSE_KEEP_ALIVE_SECS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Socket address the server listens on
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Keep-alive interval as a `Duration`
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    host: Option<IpAddr>,
    port: Option<u16>,
    database_url: Option<String>,
    subscriber_buffer: Option<usize>,
    keep_alive_secs: Option<u64>,
}

impl AppConfigBuilder {
    /// Set the bind interface
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the bind port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the Postgres connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the per-subscriber buffer size
    pub fn subscriber_buffer(mut self, buffer: usize) -> Self {
        self.subscriber_buffer = Some(buffer);
        self
    }

    /// Set the keep-alive interval in seconds
    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive_secs = Some(secs);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url,
            subscriber_buffer: self.subscriber_buffer.unwrap_or(defaults.subscriber_buffer),
            keep_alive_secs: self.keep_alive_secs.unwrap_or(defaults.keep_alive_secs),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
