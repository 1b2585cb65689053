//! SSE event types

/// A parsed record from a search event stream
///
/// Only records carrying both an `event:` line and at least one `data:`
/// line are ever produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event type (e.g., "matches", "filters", "done")
    pub event_type: String,
    /// Event data, multi-line payloads joined with `\n`
    pub data: String,
}

impl SseEvent {
    /// Create an SSE event with event type and data
    pub fn new(event_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: data.into(),
        }
    }

    /// Check if this is the terminal `done` event
    pub fn is_done(&self) -> bool {
        self.event_type == "done"
    }
}
