//! Tests for SSE decoder

use super::*;
use futures::StreamExt;

const SAMPLE: &str = "event: progress\ndata: {\"done\": false}\n\n\
    event: matches\ndata: [{\"type\": \"repo\",\n\
    data:  \"repository\": \"github.com/a/b\"}]\n\n\
    : keepalive comment\n\n\
    event: filters\ndata: []\n\n\
    event: done\ndata: {}\n\n";

fn decode_in_chunks(input: &[u8], boundaries: &[usize]) -> Vec<SseEvent> {
    let mut decoder = SseDecoder::new();
    let mut events = Vec::new();
    let mut start = 0;
    for &end in boundaries {
        events.extend(decoder.feed(&input[start..end]));
        start = end;
    }
    events.extend(decoder.feed(&input[start..]));
    events.extend(decoder.finish());
    events
}

#[test]
fn test_event_with_type() {
    let mut decoder = SseDecoder::new();
    let events = decoder.feed(b"event: matches\ndata: [1, 2]\n\n");

    assert_eq!(events, vec![SseEvent::new("matches", "[1, 2]")]);
    assert!(!decoder.has_remaining());
}

#[test]
fn test_multi_line_data() {
    let mut decoder = SseDecoder::new();
    let events = decoder.feed(b"event: alert\ndata: line1\ndata: line2\ndata: line3\n\n");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data, "line1\nline2\nline3");
}

#[test]
fn test_last_event_line_wins() {
    let mut decoder = SseDecoder::new();
    let events = decoder.feed(b"event: progress\nevent: matches\ndata: []\n\n");

    assert_eq!(events[0].event_type, "matches");
}

#[test]
fn test_record_without_event_is_dropped() {
    let mut decoder = SseDecoder::new();
    let events = decoder.feed(b"data: orphan\n\nevent: done\ndata: {}\n\n");

    assert_eq!(events, vec![SseEvent::new("done", "{}")]);
}

#[test]
fn test_blank_event_type_is_dropped() {
    let mut decoder = SseDecoder::new();
    let events = decoder.feed(b"event: \ndata: x\n\nevent: matches\nevent:  \ndata: y\n\n");

    assert!(events.is_empty());
    assert!(decoder.finish().is_empty());
}

#[test]
fn test_record_without_data_is_dropped() {
    let mut decoder = SseDecoder::new();
    let events = decoder.feed(b"event: matches\n\nevent: matches\ndata: []\n\n");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data, "[]");
}

#[test]
fn test_prefix_requires_space() {
    let mut decoder = SseDecoder::new();
    let events = decoder.feed(b"event:matches\ndata: []\n\nevent: matches\ndata:[]\n\n");

    assert!(events.is_empty());
}

#[test]
fn test_partial_chunks() {
    let mut decoder = SseDecoder::new();

    let first = decoder.feed(b"event: matches\ndata: [{\"ty");
    assert!(first.is_empty());
    assert!(decoder.has_remaining());

    let second = decoder.feed(b"pe\": \"repo\"}]\n\n");
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].data, "[{\"type\": \"repo\"}]");
}

#[test]
fn test_separator_split_across_chunks() {
    let mut decoder = SseDecoder::new();

    assert!(decoder.feed(b"event: done\ndata: {}\n").is_empty());
    let events = decoder.feed(b"\n");
    assert_eq!(events, vec![SseEvent::new("done", "{}")]);
}

#[test]
fn test_finish_flushes_unterminated_record() {
    let mut decoder = SseDecoder::new();
    assert!(decoder.feed(b"event: matches\ndata: [1]").is_empty());

    let events = decoder.finish();
    assert_eq!(events, vec![SseEvent::new("matches", "[1]")]);
    assert!(!decoder.has_remaining());
}

#[test]
fn test_finish_ignores_blank_remainder() {
    let mut decoder = SseDecoder::new();
    decoder.feed(b"event: done\ndata: {}\n\n\n");

    assert!(decoder.finish().is_empty());
}

#[test]
fn test_finish_drops_incomplete_trailing_record() {
    let mut decoder = SseDecoder::new();
    decoder.feed(b"event: matches\n");

    assert!(decoder.finish().is_empty());
}

#[test]
fn test_utf8_split_across_chunks() {
    let mut decoder = SseDecoder::new();
    let input = "event: matches\ndata: \"caf\u{e9} \u{1f980}\"\n\n".as_bytes();

    // Split inside the 4-byte crab emoji
    let split = input.len() - 5;
    assert!(decoder.feed(&input[..split]).is_empty());
    let events = decoder.feed(&input[split..]);

    assert_eq!(events[0].data, "\"caf\u{e9} \u{1f980}\"");
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let mut decoder = SseDecoder::new();
    let events = decoder.feed(b"event: alert\ndata: bad \xff byte\n\n");

    assert_eq!(events[0].data, "bad \u{fffd} byte");
}

#[test]
fn test_chunk_boundary_invariance() {
    let input = SAMPLE.as_bytes();
    let expected = decode_in_chunks(input, &[]);
    assert_eq!(expected.len(), 4);
    assert_eq!(expected[1].data, "[{\"type\": \"repo\",\n \"repository\": \"github.com/a/b\"}]");

    for split in 0..=input.len() {
        assert_eq!(decode_in_chunks(input, &[split]), expected, "split at {}", split);
    }

    let every_byte: Vec<usize> = (1..input.len()).collect();
    assert_eq!(decode_in_chunks(input, &every_byte), expected);
}

#[test]
fn test_chunk_boundary_invariance_multibyte() {
    let input = "event: matches\ndata: [\"\u{4e2d}\u{6587}\"]\n\nevent: done\ndata: {}".as_bytes();
    let expected = decode_in_chunks(input, &[]);
    assert_eq!(expected.len(), 2);

    let every_byte: Vec<usize> = (1..input.len()).collect();
    assert_eq!(decode_in_chunks(input, &every_byte), expected);
}

#[tokio::test]
async fn test_event_stream_yields_in_order() {
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
        Ok(b"event: matches\nda".to_vec()),
        Ok(b"ta: [1]\n\nevent: progress\ndata: {}\n\n".to_vec()),
        Ok(b"event: done\ndata: {}".to_vec()),
    ];

    let events: Vec<SseEvent> = event_stream(futures::stream::iter(chunks)).collect().await;

    let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(types, vec!["matches", "progress", "done"]);
}

#[tokio::test]
async fn test_event_stream_read_error_flushes_then_stops() {
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
        Ok(b"event: matches\ndata: [1]\n\nevent: alert\ndata: {}".to_vec()),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        Ok(b"event: matches\ndata: [2]\n\n".to_vec()),
    ];

    let events: Vec<SseEvent> = event_stream(futures::stream::iter(chunks)).collect().await;

    assert_eq!(
        events,
        vec![SseEvent::new("matches", "[1]"), SseEvent::new("alert", "{}")]
    );
}

#[tokio::test]
async fn test_event_stream_empty_input() {
    let chunks: Vec<Result<&[u8], std::io::Error>> = Vec::new();
    let events: Vec<SseEvent> = event_stream(futures::stream::iter(chunks)).collect().await;
    assert!(events.is_empty());
}
