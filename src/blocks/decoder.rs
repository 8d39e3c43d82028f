use std::io::{BufReader, Read};

use serde_json::de::IoRead;
use serde_json::StreamDeserializer;
use tracing::{debug, warn};

use super::event::{Event, EventName};
use crate::error::{Result, RofiError};
use crate::option::{Selection, BLOCK_PAYLOAD_SEPARATOR};

/// Turns rofi's event stream into resolved selections.
///
/// Events are whitespace-delimited JSON objects. A plain `SELECT_ENTRY`
/// resolves to the row's first command; an `ACTIVE_ENTRY` is held until the
/// `CUSTOM_KEY` event that immediately follows it names the command.
pub struct EventDecoder<R: Read> {
    stream: StreamDeserializer<'static, IoRead<BufReader<R>>, Event>,
}

impl<R: Read> EventDecoder<R> {
    pub fn new(reader: R) -> Self {
        EventDecoder {
            stream: serde_json::Deserializer::from_reader(BufReader::new(reader)).into_iter(),
        }
    }

    /// Next raw event, or None at end of stream.
    ///
    /// Malformed JSON is fatal: the stream cannot be resynchronized.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        match self.stream.next() {
            None => Ok(None),
            Some(Ok(event)) => {
                debug!(name = %event.name, index = %event.index, "Received event");
                Ok(Some(event))
            }
            Some(Err(e)) => Err(RofiError::StreamDecode(e)),
        }
    }

    /// Block until the next selection resolves, or None at end of stream.
    ///
    /// Invalid events are logged and dropped. Errors are always fatal.
    pub fn next_selection(&mut self) -> Result<Option<Selection>> {
        loop {
            let Some(event) = self.next_event()? else {
                return Ok(None);
            };

            if !event.is_valid() {
                warn!(event = ?event, "Event was not valid");
                continue;
            }

            match event.kind() {
                Some(EventName::SelectEntry) => return resolve(&event.value, 0).map(Some),
                Some(EventName::ActiveEntry) => {
                    let Some(key_event) = self.next_event()? else {
                        return Ok(None);
                    };

                    let key_index = match (key_event.kind(), key_event.key_index()) {
                        (Some(EventName::CustomKey), Some(index)) => index,
                        _ => {
                            warn!(
                                entry = ?event,
                                key_event = ?key_event,
                                "Event with index was not valid, dropping selection"
                            );
                            continue;
                        }
                    };

                    return resolve(&event.value, key_index - 1).map(Some);
                }
                Some(EventName::CustomKey) | None => {
                    warn!(event = ?event, "Custom key without a pending entry");
                }
            }
        }
    }
}

impl<R: Read> Iterator for EventDecoder<R> {
    type Item = Result<Selection>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_selection().transpose()
    }
}

/// Split `value||cmd...` and pick the command at `index`.
///
/// A payload without any command contradicts what the encoder emits and is
/// fatal.
fn resolve(event_value: &str, index: usize) -> Result<Selection> {
    Selection::from_payload(event_value, BLOCK_PAYLOAD_SEPARATOR, index)
        .ok_or_else(|| RofiError::InvalidEventPayload(event_value.to_string()))
}
