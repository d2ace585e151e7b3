pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod stream;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Note: This function can only be called once per process. Commands that
/// take over the terminal (the stats dashboard) rely on the default "info"
/// filter staying quiet unless RUST_LOG raises it.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
