//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use chrono::FixedOffset;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which store backs the footprint ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerBackend {
    /// PostgreSQL at the given connection string.
    Postgres { database_url: String },
    /// A process-local ledger; contents are lost on restart.
    Memory,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub ledger: LedgerBackend,
    pub database_max_connections: u32,
    pub log_level: Level,
    /// Upper bound on any single ledger call.
    pub ledger_timeout: Duration,
    /// How many records `GET /api/history` returns at most.
    pub history_limit: usize,
    /// Timezone used to date history chart labels.
    pub display_offset: FixedOffset,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Ledger Settings ---
        let backend = lookup("LEDGER_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let ledger = match backend.to_lowercase().as_str() {
            "postgres" => LedgerBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?,
            },
            "memory" => LedgerBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue(
                    "LEDGER_BACKEND".to_string(),
                    format!("'{}' is not one of 'postgres' or 'memory'", other),
                ))
            }
        };

        let database_max_connections = parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        let ledger_timeout =
            Duration::from_millis(parse_positive(&lookup, "LEDGER_TIMEOUT_MS", 5000)?);
        let history_limit = parse_positive(&lookup, "HISTORY_LIMIT", 5)?;

        // Chart dates default to Indian Standard Time (UTC+05:30).
        let offset_str =
            lookup("HISTORY_UTC_OFFSET_MINUTES").unwrap_or_else(|| "330".to_string());
        let display_offset = offset_str
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "HISTORY_UTC_OFFSET_MINUTES".to_string(),
                    format!("'{}' is not a UTC offset in minutes", offset_str),
                )
            })?;

        Ok(Self {
            bind_address,
            ledger,
            database_max_connections,
            log_level,
            ledger_timeout,
            history_limit,
            display_offset,
        })
    }
}

/// Parses an optional numeric variable that must be greater than zero.
fn parse_positive<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("'{}' must be a positive integer", raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/footprints")]).unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(
            config.ledger,
            LedgerBackend::Postgres {
                database_url: "postgres://localhost/footprints".to_string()
            }
        );
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.ledger_timeout, Duration::from_millis(5000));
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.display_offset.local_minus_utc(), 330 * 60);
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(var) if var == "DATABASE_URL"));
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let config = load(&[
            ("LEDGER_BACKEND", "memory"),
            ("HISTORY_LIMIT", "10"),
            ("LEDGER_TIMEOUT_MS", "250"),
            ("HISTORY_UTC_OFFSET_MINUTES", "-300"),
        ])
        .unwrap();

        assert_eq!(config.display_offset.local_minus_utc(), -300 * 60);
        assert_eq!(config.ledger, LedgerBackend::Memory);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.ledger_timeout, Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("LEDGER_BACKEND", "mongo")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "LEDGER_BACKEND"
        ));
        assert!(matches!(
            load(&[("LEDGER_BACKEND", "memory"), ("HISTORY_LIMIT", "0")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "HISTORY_LIMIT"
        ));
        assert!(matches!(
            load(&[("LEDGER_BACKEND", "memory"), ("BIND_ADDRESS", "nowhere")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "BIND_ADDRESS"
        ));
        assert!(matches!(
            load(&[("LEDGER_BACKEND", "memory"), ("HISTORY_UTC_OFFSET_MINUTES", "1440")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "HISTORY_UTC_OFFSET_MINUTES"
        ));
        assert!(matches!(
            load(&[("LEDGER_BACKEND", "memory"), ("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "RUST_LOG"
        ));
    }
}
