//! Background decoding of rofi's event stream.
//!
//! # Protocol
//!
//! Rofi-blocks writes events to our stdin, shaped by `EVENT_FORMAT`:
//!
//! ```json
//! {"index":"","name":"SELECT_ENTRY","value":"firefox||open||private"}
//! {"index":"","name":"ACTIVE_ENTRY","value":"firefox||open||private"}
//! {"index":"2","name":"CUSTOM_KEY","value":"firefox||open||private"}
//! ```
//!
//! # Example Usage
//!
//! ```rust,ignore
//! let selections = rofi_kit::blocks::start_event_listener();
//! while let Ok(selection) = selections.recv_blocking() {
//!     run(&selection.cmd, &selection.value);
//! }
//! ```

use std::io::Read;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info};

use super::decoder::EventDecoder;
use crate::error::{exit_fatal, Result};
use crate::option::Selection;

/// How often to check whether the host has taken the last selection
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Decode selections from `decoder` into `tx` until the stream ends.
///
/// Returns Ok at end of stream or when the receiver is dropped; any error is
/// a fatal protocol error.
pub fn run_decode_loop<R: Read>(
    mut decoder: EventDecoder<R>,
    tx: &async_channel::Sender<Selection>,
) -> Result<()> {
    while let Some(selection) = decoder.next_selection()? {
        debug!(value = %selection.value, cmd = %selection.cmd, "Resolved selection");
        // send_blocking is used since we're in a sync thread
        if tx.send_blocking(selection).is_err() {
            info!("Selection channel closed, exiting");
            return Ok(());
        }
    }
    info!("Reached end of event stream");
    Ok(())
}

/// Start a thread decoding events from `reader`.
///
/// The channel holds a single selection: the thread waits for the host to
/// take each one before decoding the next, so selections arrive strictly in
/// input order.
pub fn spawn_event_listener<R>(
    reader: R,
) -> (async_channel::Receiver<Selection>, JoinHandle<Result<()>>)
where
    R: Read + Send + 'static,
{
    let (tx, rx) = async_channel::bounded(1);

    let handle = std::thread::spawn(move || {
        info!("Event listener started");
        let result = run_decode_loop(EventDecoder::new(reader), &tx);
        info!(ok = result.is_ok(), "Event listener exiting");
        result
    });

    (rx, handle)
}

/// Block until the host has taken every queued selection or dropped the
/// receiver.
///
/// `send_blocking` returns once a selection is in the channel slot, not once
/// it has been received.
pub fn wait_for_drain(tx: &async_channel::Sender<Selection>) {
    while !tx.is_empty() && !tx.is_closed() {
        std::thread::sleep(DRAIN_POLL_INTERVAL);
    }
}

/// Decode `reader` into `tx`, then wait for the host to take the last
/// selection before reporting how the stream ended.
pub fn serve_event_stream<R: Read>(
    reader: R,
    tx: &async_channel::Sender<Selection>,
) -> Result<()> {
    let result = run_decode_loop(EventDecoder::new(reader), tx);
    wait_for_drain(tx);
    result
}

/// Start decoding rofi events from stdin for the lifetime of the process.
///
/// End of stream and fatal decode errors both terminate the process, since
/// rofi is gone or the stream is desynchronized. Selections already decoded
/// are handed to the host first.
pub fn start_event_listener() -> async_channel::Receiver<Selection> {
    let (tx, rx) = async_channel::bounded(1);

    std::thread::spawn(move || {
        info!("Event listener started on stdin");
        match serve_event_stream(std::io::stdin(), &tx) {
            Ok(()) if tx.is_closed() => {}
            Ok(()) => {
                info!("Stdin closed, exiting");
                std::process::exit(0);
            }
            Err(e) if e.is_fatal() => exit_fatal("rofi_kit::blocks::start_event_listener", &e),
            Err(e) => {
                info!(error = %e, "Event listener stopped");
                std::process::exit(0);
            }
        }
    });

    rx
}
