// * Telemetry - Structured Logging
// * JSON logs for machine consumption, pretty logs for local debugging.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// * Default filter when RUST_LOG is unset
const DEFAULT_FILTER: &str = "publico_feed=info,warn";

/// Initializes the tracing subscriber with JSON formatting
///
/// # Example
/// ```ignore
/// use publico_feed::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(url = "https://www.publico.pt", "Opening article");
/// ```
pub fn init_tracing() {
    init_tracing_with_level(DEFAULT_FILTER);
}

/// Initializes tracing with custom log level
pub fn init_tracing_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("publico_feed=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .init();
}
