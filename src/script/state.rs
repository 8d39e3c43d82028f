use tracing::{debug, warn};

use crate::config::{ENV_INFO, ENV_RETV};
use crate::option::{Selection, SCRIPT_PAYLOAD_SEPARATOR};

/// Signals above this are shifted invocations of commands 1-8
const SHIFTED_HOTKEY_OFFSET: usize = 8;

/// Launcher state handed to a script mode invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptState {
    /// `ROFI_RETV`: 0 = first call, otherwise the 1-based command index
    pub retv: usize,
    /// `ROFI_INFO`: `value|cmd1|cmd2...` of the selected row
    pub info: String,
}

impl ScriptState {
    pub fn new(retv: usize, info: impl Into<String>) -> Self {
        ScriptState {
            retv,
            info: info.into(),
        }
    }

    /// Read `ROFI_RETV` and `ROFI_INFO` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read state through an arbitrary variable lookup. Unparseable
    /// signals count as 0.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let retv = lookup(ENV_RETV)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let info = lookup(ENV_INFO).unwrap_or_default();
        ScriptState { retv, info }
    }

    /// Zero-based command index encoded in the signal, if any
    pub fn command_index(&self) -> Option<usize> {
        match self.retv {
            0 => None,
            n if n > SHIFTED_HOTKEY_OFFSET => Some(n - SHIFTED_HOTKEY_OFFSET - 1),
            n => Some(n - 1),
        }
    }

    /// The selection rofi reported for this invocation.
    ///
    /// None on the first call, or when the selected row carried no payload.
    pub fn selection(&self) -> Option<Selection> {
        let index = self.command_index()?;
        if self.info.is_empty() {
            debug!(retv = self.retv, "Signal without row info");
            return None;
        }

        let selection = Selection::from_payload(&self.info, SCRIPT_PAYLOAD_SEPARATOR, index);
        if selection.is_none() {
            warn!(info = %self.info, "Selected row has no commands");
        }
        selection
    }
}
