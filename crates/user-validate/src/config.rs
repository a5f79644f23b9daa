//! Server configuration from CLI arguments and environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use clap::Parser;
use tracing::Level;
use user_validate_core::ValidatorConfig;

/// `user-validate-server` configuration.
///
/// All values can be set via environment variables or CLI arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-validate-server",
    about = "CreateUser service with structured validation errors",
    version
)]
pub struct Config {
    /// Listen address (Connect JSON + REST on a single port)
    #[arg(long, env = "ADDRESS", default_value = "0.0.0.0:8080")]
    pub address: String,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    /// Use JSON log format
    #[arg(long, env = "JSON_LOGS", default_value = "false")]
    pub json_logs: bool,

    /// Stop validating a request at its first violation
    #[arg(long, env = "VALIDATE_FAIL_FAST", default_value = "false")]
    pub fail_fast: bool,
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `--address` is not a `host:port` socket address.
    #[error("invalid listen address {address:?}: {source}")]
    InvalidAddress {
        /// The rejected value.
        address: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
    /// `--log-level` is not a known level.
    #[error("invalid log level {0:?} (expected TRACE, DEBUG, INFO, WARN or ERROR)")]
    InvalidLogLevel(String),
}

impl Config {
    /// Parse and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a parsed value is invalid. Argument parse
    /// failures exit the process through clap.
    pub fn init() -> Result<Self, ConfigError> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        self.level()?;
        Ok(())
    }

    /// The listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] if `address` does not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.address
            .parse()
            .map_err(|source| ConfigError::InvalidAddress {
                address: self.address.clone(),
                source,
            })
    }

    /// The log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for unknown level names.
    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(self.log_level.trim())
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Validator settings derived from this configuration.
    #[must_use]
    pub const fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            fail_fast: self.fail_fast,
        }
    }
}
