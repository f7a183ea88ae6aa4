//! Log output setup for the binary.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Installs a stderr subscriber at `level`, unless `RUST_LOG` is set.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(level: LogLevel) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
