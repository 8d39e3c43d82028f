//! Rofi Kit - drive rofi from a host program
//!
//! This library speaks rofi's two scripting dialects:
//! - script mode: directive and option lines on stdout, selection state read
//!   back from the environment on the next invocation
//! - blocks mode: one JSON render per screen on stdout and a JSON event
//!   stream on stdin, decoded on a background thread
//!
//! Both dialects can promote recently chosen options using a small
//! per-namespace history kept in the user cache directory.

pub mod blocks;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod option;
pub mod script;

pub use config::Config;
pub use error::{Result, RofiError};
pub use option::{sort_by_name, MenuOption, Selection};
