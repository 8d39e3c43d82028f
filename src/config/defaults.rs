//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Verbosity 0 disables diagnostics entirely
pub const DEFAULT_VERBOSITY: u8 = 0;
pub const MAX_VERBOSITY: u8 = 5;

/// Debug log written relative to the working directory when verbosity > 0
pub const DEFAULT_LOG_FILE: &str = "rofi-debug.log";

/// Number of remembered selections per history namespace
pub const MAX_HISTORY_COUNT: usize = 5;

/// Sub-directory of the user cache dir that holds history files
pub const HISTORY_DIR_NAME: &str = "rofi";

/// Environment variables set by rofi (or by the user for debugging)
pub const ENV_DEBUG: &str = "ROFI_DEBUG";
pub const ENV_RETV: &str = "ROFI_RETV";
pub const ENV_INFO: &str = "ROFI_INFO";
