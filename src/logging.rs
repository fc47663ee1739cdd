//! Log output for the command line tools.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stdout at `default_level`, unless overridden by the `RUST_LOG` environment variable.
///
/// `default_level` is a filter directive such as `"info"` or `"career_finance_dashboard=debug"`.
/// Calling this more than once has no effect after the first call.
pub fn setup_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .try_init();

    if let Err(error) = result {
        tracing::debug!("Logging was already set up: {error}");
    }
}
