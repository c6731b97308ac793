//! Structured logging.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a configured level, e.g. `"info"`.
pub fn default_filter(log_level: &str) -> String {
    format!("token_gate={log_level},tower_http={log_level}")
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "token_gate=debug,tower_http=debug");
        assert!(EnvFilter::try_new(default_filter("warn")).is_ok());
    }
}
