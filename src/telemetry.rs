//! Tracing setup for the docbot binary

use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter, Layer};

/// Initialize the tracing subscriber with a stderr console layer.
///
/// The filter honors `RUST_LOG` and defaults to `info`.
pub fn init_tracing_subscriber() {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry().with(console_layer).init();
}
