//! Subscriber setup for the crate's `tracing` output.
//!
//! Library code only emits events (targets under `atomese_instantiator::`);
//! installing a subscriber is left to the embedding program, which may call
//! [`init`] once at startup.

use crate::config::{ConfigError, LogConfig};

/// Install a `fmt` subscriber at the configured level.
///
/// Returns `Ok(false)` if a global subscriber was already installed, in
/// which case the existing one is left in place.
pub fn init(config: &LogConfig) -> Result<bool, ConfigError> {
    let level = config.level_filter()?;
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(config.ansi)
        .with_target(true)
        .try_init()
        .is_ok();
    Ok(installed)
}
