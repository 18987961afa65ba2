//! Tracing setup for the CLI. Library consumers wire their own subscriber;
//! the binary calls `init_tracing` once at startup.

use tracing_subscriber::EnvFilter;

/// Initializes a stderr `tracing` subscriber honouring `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already set by the host.
#[must_use]
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .is_ok()
}
