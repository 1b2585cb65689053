//! Server-Sent Events (SSE) decoder for search result streams
//!
//! This module provides a buffered SSE parser that handles:
//! - Multi-line data fields
//! - Event type prefixes
//! - Incomplete records across network chunk boundaries
//! - Incomplete UTF-8 sequences across chunk boundaries
//! - A trailing record that the server did not terminate

mod event;
mod stream;

#[cfg(test)]
mod tests;

pub use event::SseEvent;
pub use stream::event_stream;

const RECORD_SEPARATOR: &str = "\n\n";
const EVENT_PREFIX: &str = "event: ";
const DATA_PREFIX: &str = "data: ";

/// Buffered SSE decoder that handles partial chunks
///
/// Record format:
/// ```text
/// event: matches\n
/// data: [{"type": "content", ...}]\n
/// data: continued_data\n
/// \n
/// ```
///
/// Records are separated by a blank line (`\n\n`). A record without an
/// event type or without any data line is dropped silently.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Buffer for incomplete record text (valid UTF-8)
    buffer: String,
    /// Buffer for incomplete UTF-8 byte sequences at chunk boundaries
    incomplete_utf8: Vec<u8>,
}

impl SseDecoder {
    /// Create a new SSE decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes into the decoder and extract complete records
    ///
    /// Incomplete records are buffered for the next call. Bytes that can
    /// never form valid UTF-8 are replaced with U+FFFD rather than failing.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut bytes = std::mem::take(&mut self.incomplete_utf8);
        bytes.extend_from_slice(chunk);

        let (text, remainder) = decode_utf8_lossy_with_remainder(&bytes);
        self.incomplete_utf8 = remainder;
        self.buffer.push_str(&text);

        self.drain_records()
    }

    /// Flush whatever is left once the underlying stream has ended
    ///
    /// A non-blank remainder is parsed once more as a final record.
    pub fn finish(&mut self) -> Vec<SseEvent> {
        if !self.incomplete_utf8.is_empty() {
            let tail = std::mem::take(&mut self.incomplete_utf8);
            self.buffer.push_str(&String::from_utf8_lossy(&tail));
        }

        let mut events = self.drain_records();

        let remainder = std::mem::take(&mut self.buffer);
        if !remainder.trim().is_empty() {
            if let Some(event) = parse_record(&remainder) {
                events.push(event);
            }
        }

        events
    }

    /// Check if there's remaining data in the buffer
    pub fn has_remaining(&self) -> bool {
        !self.buffer.is_empty() || !self.incomplete_utf8.is_empty()
    }

    fn drain_records(&mut self) -> Vec<SseEvent> {
        let mut events = Vec::new();

        while let Some(end) = self.buffer.find(RECORD_SEPARATOR) {
            let record: String = self.buffer.drain(..end).collect();
            self.buffer.drain(..RECORD_SEPARATOR.len());

            if let Some(event) = parse_record(&record) {
                events.push(event);
            }
        }

        events
    }
}

/// Parse a single record; `None` when the event type or data is missing
///
/// A blank `event: ` value counts as missing, even after a real one.
fn parse_record(text: &str) -> Option<SseEvent> {
    let mut event_type: Option<&str> = None;
    let mut data_lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if let Some(value) = line.strip_prefix(EVENT_PREFIX) {
            // Last occurrence wins
            event_type = Some(value.trim());
        } else if let Some(value) = line.strip_prefix(DATA_PREFIX) {
            data_lines.push(value);
        }
    }

    let event_type = event_type.filter(|t| !t.is_empty())?;
    if data_lines.is_empty() {
        return None;
    }

    Some(SseEvent::new(event_type, data_lines.join("\n")))
}

/// Decode bytes as UTF-8, keeping a trailing incomplete sequence aside
///
/// Invalid sequences in the middle of the input are replaced with U+FFFD.
/// A truncated multi-byte sequence at the very end is returned as the
/// remainder so the next chunk can complete it.
fn decode_utf8_lossy_with_remainder(bytes: &[u8]) -> (String, Vec<u8>) {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return (out, Vec::new());
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                // `valid_up_to` guarantees this prefix is valid UTF-8
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());

                match e.error_len() {
                    Some(bad) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        rest = &after[bad..];
                    }
                    // Unexpected end of input: sequence may complete in the next chunk
                    None => return (out, after.to_vec()),
                }
            }
        }
    }
}
