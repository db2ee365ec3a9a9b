//! Tracing setup: structured JSON logging, span definitions and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "PALATE_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber with JSON output.
///
/// Filter comes from `PALATE_LOG`, falling back to `info` when unset or
/// unparsable. Safe to call more than once; only the first call installs.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

        // Another subscriber may already be installed by an embedding host.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init();
    });
}

/// Install with an explicit filter string (tests, embedding).
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(true)
            .json()
            .try_init();
    });
}
