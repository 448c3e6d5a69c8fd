//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use chrono::FixedOffset;
use std::net::SocketAddr;

/// Default bind address when neither CLI nor environment sets one
pub const DEFAULT_BIND: &str = "127.0.0.1:6970";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Prometheus scrape address; metrics are off when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Venue UTC offset in minutes; every instant is read on this wall clock
    pub venue_utc_offset_minutes: i32,
    /// Largest player list accepted by batch endpoints
    pub max_batch_players: usize,
    /// Largest table list accepted by batch endpoints
    pub max_batch_tables: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 6970)),
            metrics_bind: None,
            venue_utc_offset_minutes: 0,
            max_batch_players: 1000,
            max_batch_tables: 200,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `metrics_bind_override` - Optional metrics address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        metrics_bind_override: Option<SocketAddr>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind = match bind_override {
            Some(addr) => addr,
            None => parse_env_strict("SERVER_BIND")?.unwrap_or(defaults.bind),
        };

        let metrics_bind = match metrics_bind_override {
            Some(addr) => Some(addr),
            None => parse_env_strict("METRICS_BIND")?,
        };

        Ok(ServerConfig {
            bind,
            metrics_bind,
            venue_utc_offset_minutes: parse_env_strict("VENUE_UTC_OFFSET_MINUTES")?
                .unwrap_or(defaults.venue_utc_offset_minutes),
            max_batch_players: parse_env_strict("MAX_BATCH_PLAYERS")?.unwrap_or(defaults.max_batch_players),
            max_batch_tables: parse_env_strict("MAX_BATCH_TABLES")?.unwrap_or(defaults.max_batch_tables),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.venue_offset().is_none() {
            return Err(ConfigError::Invalid {
                var: "VENUE_UTC_OFFSET_MINUTES".to_string(),
                reason: "Must be within -1439..=1439 minutes".to_string(),
            });
        }

        if self.max_batch_players == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_BATCH_PLAYERS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.max_batch_tables == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_BATCH_TABLES".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from server bind address ({})", self.bind),
            });
        }

        Ok(())
    }

    /// Venue wall-clock offset, `None` when out of range
    pub fn venue_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.venue_utc_offset_minutes.checked_mul(60)?)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional variable, rejecting values that are set but malformed
fn parse_env_strict<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value.trim().parse().map(Some).map_err(|e| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{}': {}", value, e),
        }),
        Err(_) => Ok(None),
    }
}
