//! Tracing initialization.
//!
//! Structured logging through `tracing` with an environment filter:
//! `RUST_LOG` wins when set, otherwise the configured level applies to the
//! engine's own spans.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter directives applied when `RUST_LOG` is unset.
fn default_directives(level: &str) -> String {
    format!("sales_engine={level},tower=warn")
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup; later calls are ignored so tests can share a
/// process with the binary harness.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&logging.level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
