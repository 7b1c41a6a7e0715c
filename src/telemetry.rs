//! Tracing subscriber setup.

use crate::config::LedgerConfig;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Installs a global fmt subscriber filtered by `config.log_filter`.
///
/// Only the first call has any effect. If another subscriber is already
/// installed the call is a no-op.
pub fn init_tracing(config: &LedgerConfig) {
    TRACING_INIT.call_once(|| {
        if fmt().with_env_filter(filter_for(config)).try_init().is_ok() {
            tracing::info!(filter = %config.log_filter, "banking ledger tracing initialized");
        }
    });
}

/// The configured filter, or the default one if the directive does not parse.
fn filter_for(config: &LedgerConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(LedgerConfig::default_log_filter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn init_is_idempotent() {
        let config = LedgerConfig::default();
        init_tracing(&config);
        init_tracing(&config);
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn configured_filter_is_used() {
        let config = LedgerConfig {
            log_filter: "banking_ledger=debug".into(),
            ..LedgerConfig::default()
        };
        assert_eq!(
            filter_for(&config).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn bad_filter_falls_back_to_default() {
        assert!(EnvFilter::try_new("[[[").is_err());

        let config = LedgerConfig {
            log_filter: "[[[".into(),
            ..LedgerConfig::default()
        };
        assert_eq!(
            filter_for(&config).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
