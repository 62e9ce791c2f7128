//! # Configuration
//!
//! Runtime settings for the ledger binary.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. `paper-ledger.toml` in the working directory (optional), or the file
//!    passed explicitly (required)
//! 3. `LEDGER__*` environment variables, `__` separating nested keys
//!    (`LEDGER__LOG__FORMAT=json`)
//!
//! # Examples
//!
//! ```
//! use paper_ledger::config::{LedgerConfig, LogFormat};
//!
//! let config = LedgerConfig::default();
//! assert_eq!(config.log.format, LogFormat::Pretty);
//! assert_eq!(config.store_path.to_str(), Some("ledger.json"));
//! ```

use crate::domain::entities::DEFAULT_INITIAL_BALANCE;
use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "paper-ledger.toml";

/// Snapshot file used when none is configured.
pub const DEFAULT_STORE_PATH: &str = "ledger.json";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "LEDGER";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Ledger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Snapshot file of the file-backed store.
    pub store_path: PathBuf,
    /// Cash balance of newly created accounts.
    pub initial_cash_balance: Decimal,
    /// Logging.
    pub log: LogConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            initial_cash_balance: DEFAULT_INITIAL_BALANCE,
            log: LogConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Loads settings from the default file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed, an explicit file is
    /// missing, or a value fails validation.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(file, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn from_sources(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let builder = Config::builder()
            .set_default("store_path", DEFAULT_STORE_PATH)?
            .set_default("initial_cash_balance", defaults.initial_cash_balance.to_string())?
            .set_default("log.level", defaults.log.level)?
            .set_default("log.format", "pretty")?;
        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };
        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` for a negative initial balance or an
    /// empty store path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_cash_balance.is_sign_negative() && !self.initial_cash_balance.is_zero() {
            return Err(ConfigError::Message(format!(
                "initial_cash_balance must not be negative, got {}",
                self.initial_cash_balance
            )));
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Message("store_path must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(Some(source))
    }

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("paper-ledger-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_without_sources() {
        let config = LedgerConfig::from_sources(None, env(&[])).unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn file_values_apply() {
        let path = scratch_file(
            "file_values.toml",
            "store_path = \"/var/lib/ledger.json\"\ninitial_cash_balance = 500\n[log]\nformat = \"json\"\n",
        );
        let config = LedgerConfig::from_sources(Some(&path), env(&[])).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/var/lib/ledger.json"));
        assert_eq!(config.initial_cash_balance, Decimal::new(500, 0));
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn environment_overrides_file() {
        let path = scratch_file("env_override.toml", "[log]\nlevel = \"warn\"\n");
        let config = LedgerConfig::from_sources(
            Some(&path),
            env(&[("LEDGER__LOG__LEVEL", "debug"), ("LEDGER__INITIAL_CASH_BALANCE", "12.5")]),
        )
        .unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.initial_cash_balance, Decimal::new(125, 1));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("paper-ledger-definitely-missing.toml");
        assert!(LedgerConfig::from_sources(Some(&missing), env(&[])).is_err());
    }

    #[test]
    fn negative_balance_is_rejected() {
        let err = LedgerConfig::from_sources(
            None,
            env(&[("LEDGER__INITIAL_CASH_BALANCE", "-1")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("initial_cash_balance"));
    }
}
