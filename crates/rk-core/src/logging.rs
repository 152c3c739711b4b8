//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber writing to stderr. The filter comes
//! from `ROWKIT_LOG` when set, otherwise from the configured level.

use rk_common::{Error, Result};
use rk_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "ROWKIT_LOG";

/// Filter from `ROWKIT_LOG`, falling back to `config.level`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let directive = std::env::var(LOG_ENV_VAR)
        .ok()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| config.level.clone());
    EnvFilter::try_new(&directive)
        .map_err(|e| Error::Config(format!("invalid log filter '{}': {}", directive, e)))
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    Ok(installed.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        };
        init(&config).unwrap();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_filter_from_config_level() {
        if std::env::var_os(LOG_ENV_VAR).is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "rk_core=debug".to_string(),
            format: LogFormat::Json,
        };
        let filter = env_filter(&config).unwrap();
        assert!(filter.to_string().contains("rk_core=debug"));
    }
}
