//! Tracing subscriber setup for the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "server=info,access=info,forecast_core=info,tower_http=info";

/// Install the global subscriber with [`DEFAULT_FILTER`].
pub fn init() {
    init_with(DEFAULT_FILTER);
}

/// Install the global subscriber; `RUST_LOG` takes precedence over
/// `default_filter`.
pub fn init_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
