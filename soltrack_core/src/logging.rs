//! Tracing setup shared by the soltrack binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Fallback filter when RUST_LOG is unset. Warnings only, so the status
/// and live-session displays stay clean: slot and journal problems still
/// surface, routine load/save chatter does not.
const DEFAULT_FILTER: &str = "warn";

/// Initialize logging for the CLI.
///
/// RUST_LOG takes precedence when set (e.g. `RUST_LOG=soltrack_core=debug`
/// to watch persistence activity).
pub fn init() {
    init_with_filter(DEFAULT_FILTER)
}

/// Initialize logging with an explicit fallback filter directive.
pub fn init_with_filter(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .init();
}
