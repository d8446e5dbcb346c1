//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and to `tower_http`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directive derived from the configured level. Anything that already
/// looks like a directive is used as-is.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    let level = config.log_level.trim();
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("cors_relay={level},tower_http={level}")
    }
}

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(config).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_level_is_scoped_to_relay() {
        let config = ObservabilityConfig {
            log_level: "debug".to_string(),
        };
        assert_eq!(default_directive(&config), "cors_relay=debug,tower_http=debug");
    }

    #[test]
    fn full_directive_passes_through() {
        let config = ObservabilityConfig {
            log_level: "warn,cors_relay=trace".to_string(),
        };
        assert_eq!(default_directive(&config), "warn,cors_relay=trace");
    }
}
