//! Logging setup for the service binary.

use tracing::Level;

/// Install a global fmt subscriber capped at `level`.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init()
        .is_ok()
}
