use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Used when neither `RUST_LOG` nor the config gives a filter.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global `tracing` subscriber: console output with uptime
/// timestamps and module paths. `RUST_LOG` takes precedence over `filter`.
///
/// Only the first call has any effect.
pub fn init_logging(filter: &str) {
    let filter = if filter.is_empty() {
        DEFAULT_FILTER
    } else {
        filter
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    // A subscriber may already be set, e.g. by a test harness
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
