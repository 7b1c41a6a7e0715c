//! Runtime configuration for the ledger shell.

use crate::snapshot::SnapshotFormat;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use thiserror::Error;

/// Environment variable that overrides [`LedgerConfig::log_filter`].
pub const LOG_ENV_VAR: &str = "BANKING_LEDGER_LOG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Serde(String),
}

/// Settings for logging, snapshot encoding and restore behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    #[serde(default = "LedgerConfig::default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub snapshot_format: SnapshotFormat,
    /// Audit snapshots before restoring them.
    #[serde(default = "LedgerConfig::default_audit_on_restore")]
    pub audit_on_restore: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            log_filter: Self::default_log_filter(),
            snapshot_format: SnapshotFormat::default(),
            audit_on_restore: Self::default_audit_on_restore(),
        }
    }
}

impl LedgerConfig {
    pub fn default_log_filter() -> String {
        "banking_ledger=info".into()
    }

    pub fn default_audit_on_restore() -> bool {
        true
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Serde(e.to_string()))?;
        Ok(config.with_env_overrides())
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Apply [`LOG_ENV_VAR`] if it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(filter) = env::var(LOG_ENV_VAR) {
            if !filter.trim().is_empty() {
                self.log_filter = filter;
            }
        }
        self
    }
}
