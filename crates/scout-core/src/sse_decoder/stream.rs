//! Lazy event stream over an incoming byte stream

use super::{SseDecoder, SseEvent};
use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

struct StreamState<S> {
    inner: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<SseEvent>,
    finished: bool,
}

/// Turn a chunked byte stream into a lazy, finite stream of records
///
/// The inner stream is polled once per inbound chunk and only when no
/// decoded record is waiting. A read error is logged and ends the
/// sequence after the buffered data has been flushed; it is never
/// surfaced to the consumer.
pub fn event_stream<S, B, E>(byte_stream: S) -> impl Stream<Item = SseEvent>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let state = StreamState {
        inner: Box::pin(byte_stream),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.pending.pop_front() {
                return Some((event, state));
            }
            if state.finished {
                return None;
            }

            match state.inner.next().await {
                Some(Ok(chunk)) => {
                    let events = state.decoder.feed(chunk.as_ref());
                    state.pending.extend(events);
                }
                Some(Err(e)) => {
                    tracing::error!("Error reading event stream: {}", e);
                    state.finished = true;
                    let events = state.decoder.finish();
                    state.pending.extend(events);
                }
                None => {
                    state.finished = true;
                    let events = state.decoder.finish();
                    state.pending.extend(events);
                }
            }
        }
    })
}
