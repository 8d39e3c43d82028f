//! Configuration loading from the environment

use tracing::warn;

use super::defaults::{ENV_DEBUG, MAX_VERBOSITY};
use super::types::Config;

/// Load configuration from the process environment.
///
/// Only `ROFI_DEBUG` is read here; history namespaces are chosen by the
/// application via `Config::with_history`.
pub fn load_config() -> Config {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration using an arbitrary variable lookup.
///
/// Returns Config::default() for anything that is missing or unparseable.
pub fn load_config_from<F>(lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();

    if let Some(raw) = lookup(ENV_DEBUG) {
        let raw = raw.trim();
        if !raw.is_empty() {
            match raw.parse::<i64>() {
                Ok(level) if level <= 0 => {}
                Ok(level) => {
                    config.verbosity = level.min(MAX_VERBOSITY as i64) as u8;
                }
                Err(e) => {
                    warn!(value = %raw, error = %e, "Ignoring non-numeric {}", ENV_DEBUG);
                }
            }
        }
    }

    config
}
