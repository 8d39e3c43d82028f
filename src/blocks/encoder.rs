use std::io::{self, Stdout, Write};
use tracing::trace;

use super::model::{BlockLine, BlockModel, Model};
use crate::error::{exit_fatal, Result, RofiError};

/// Template rofi-blocks fills in for every event it writes to our stdin
pub const EVENT_FORMAT: &str =
    r#"{"index":"{{value_escaped}}","name":"{{name_enum}}","value":"{{data}}"}"#;

/// Serialize one render of `model` as a single JSON line (no newline).
///
/// `active_entry` overrides `model.active_entry` when given.
pub fn render_line(model: &Model, active_entry: Option<usize>) -> Result<String> {
    let data = BlockModel {
        message: &model.message,
        overlay: &model.overlay,
        prompt: &model.prompt,
        input: &model.input,
        input_action: &model.input_action,
        event_format: EVENT_FORMAT,
        active_entry: active_entry.unwrap_or(model.active_entry),
        lines: model
            .options
            .iter()
            .filter_map(BlockLine::from_option)
            .collect(),
    };

    serde_json::to_string(&data).map_err(RofiError::Render)
}

/// Writes block renders, one flushed line per call
pub struct BlockEncoder<W: Write> {
    out: W,
}

impl BlockEncoder<Stdout> {
    pub fn stdout() -> Self {
        BlockEncoder::new(io::stdout())
    }
}

impl<W: Write> BlockEncoder<W> {
    pub fn new(out: W) -> Self {
        BlockEncoder { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, model: &Model, active_entry: Option<usize>) -> Result<()> {
        let line = render_line(model, active_entry)?;
        trace!(bytes = line.len(), lines = model.options.len(), "Render");
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    /// Render, terminating the process if the model cannot be marshalled.
    ///
    /// Write failures on stdout are returned; rofi closing the pipe is not a
    /// programming error.
    pub fn render_or_exit(&mut self, model: &Model, active_entry: Option<usize>) -> io::Result<()> {
        match self.render(model, active_entry) {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => exit_fatal("rofi_kit::blocks::render", &e),
            Err(RofiError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e)),
        }
    }
}
