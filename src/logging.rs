// src/logging.rs

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging to stderr.
///
/// The level can be controlled via the `level` parameter or the `RUST_LOG`
/// environment variable, which takes precedence. Stdout stays free for the
/// run output.
pub fn init_logging(level: &str) {
    let default_filter = format!("inventory_sim={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();

    tracing::debug!("logging initialized (level={level})");
}
