//! Configuration module - settings threaded through every component
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - The `Config` struct
//! - `loader` - Environment loading

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_LOG_FILE, DEFAULT_VERBOSITY, ENV_DEBUG, ENV_INFO, ENV_RETV, HISTORY_DIR_NAME,
    MAX_HISTORY_COUNT, MAX_VERBOSITY,
};

pub use types::Config;

pub use loader::{load_config, load_config_from};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
