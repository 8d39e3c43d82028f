//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

/// Settings shared by the encoders, the history store and logging.
///
/// Built once at startup and passed by reference; nothing in the crate keeps
/// process-wide mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Diagnostic detail, 0 (off) to 5 (everything)
    #[serde(default = "default_verbosity")]
    pub verbosity: u8,
    /// History namespace; `None` disables history-based ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    /// Override for the user cache dir (supports `~`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Where diagnostics go when verbosity > 0
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_verbosity() -> u8 {
    DEFAULT_VERBOSITY
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbosity: DEFAULT_VERBOSITY,
            history: None,
            cache_dir: None,
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity.min(MAX_VERBOSITY);
        self
    }

    pub fn with_history(mut self, namespace: impl Into<String>) -> Self {
        self.history = Some(namespace.into());
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Whether diagnostics are enabled at all
    pub fn is_debug(&self) -> bool {
        self.verbosity > 0
    }

    /// Directory holding one `<namespace>.json` file per history namespace.
    ///
    /// Returns None when no cache dir can be resolved for this user.
    pub fn history_root(&self) -> Option<PathBuf> {
        let base = match &self.cache_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).as_ref()),
            None => dirs::cache_dir()?,
        };
        Some(base.join(HISTORY_DIR_NAME))
    }
}
