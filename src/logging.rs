//! Logging setup
//!
//! Installs a `tracing` subscriber that writes to stderr, keeping stdout free
//! for the balance CSV. `RUST_LOG` takes precedence over the CLI level.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `default_level` is any `EnvFilter` directive (`"warn"`,
/// `"concurrent_ledger=debug"`, ...). An unparsable directive falls back to
/// `warn`. Calling this more than once is harmless: later calls leave the
/// first subscriber in place.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init();
}
