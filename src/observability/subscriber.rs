//! Process-wide `tracing` subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Builds the filter from `RUST_LOG`, falling back to `default_filter`.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs a fmt subscriber writing to stderr.
///
/// Stdout carries only the model reply, so logs never go there. Calling this
/// twice is harmless: the second install is ignored.
pub fn init_tracing(default_filter: &str) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter(default_filter));

    // Fails only if a global subscriber is already set.
    let _ = tracing_subscriber::registry().with(layer).try_init();
}
