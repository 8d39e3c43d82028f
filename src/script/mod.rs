//! Script mode: rofi re-runs the host once per user action.
//!
//! The host prints directive and option lines on stdout (`encoder`) and reads
//! the previous selection back from `ROFI_RETV` / `ROFI_INFO` (`state`).
//!
//! ```text
//! \0prompt\x1fLaunch
//! Firefox web\0info\x1ffirefox|open|private
//! ```

mod encoder;
mod state;

pub use encoder::{encode_directive, encode_option, Directive, LineEncoder};
pub use state::ScriptState;
