//! Diagnostic logging for facad.
//!
//! Events go to stderr through a `tracing-subscriber` fmt layer. Output is off unless
//! `FACAD_LOG` holds a filter directive such as `debug` or `facad::core=trace`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FACAD_LOG";

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
}
