//! Blocks mode: a persistent JSON conversation with rofi-blocks.
//!
//! The host writes one JSON object per screen render (`encoder`, `model`)
//! and rofi writes events back on our stdin (`event`, `decoder`). The
//! decoder runs on a dedicated thread (`listener`) and hands resolved
//! selections to the host one at a time.

mod decoder;
mod encoder;
mod event;
mod listener;
mod model;

pub use decoder::EventDecoder;
pub use encoder::{render_line, BlockEncoder, EVENT_FORMAT};
pub use event::{Event, EventName};
pub use listener::{
    run_decode_loop, serve_event_stream, spawn_event_listener, start_event_listener,
    wait_for_drain,
};
pub use model::Model;
