//! Stream decoding through to formatted results
//!
//! The same response body split at different chunk sizes must decode to the
//! same records and format to the same results.

use futures::StreamExt;
use scout_core::backends::sourcegraph::format_stream_results;
use scout_core::search::StreamResults;
use scout_core::sse_decoder::{SseEvent, event_stream};
use serde_json::{Value, json};

fn response_body() -> String {
    let first = json!([{
        "type": "content",
        "repository": "github.com/acme/api",
        "path": "src/ünïcode.rs",
        "lineMatches": [{ "line": "let café = \"naïve\";", "lineNumber": 2 }]
    }]);
    let second = json!([{
        "type": "symbol",
        "repository": "github.com/acme/api",
        "path": "src/lib.rs",
        "symbols": [{ "name": "Router", "kind": "STRUCT", "line": 7 }]
    }]);

    format!(
        "event: matches\ndata: {}\n\n: keep-alive\n\nevent: matches\ndata: {}\n\nevent: alert\ndata: {}\n\nevent: done\ndata: {{}}\n\n",
        first,
        second,
        json!({ "title": "partial", "message": "Some repositories timed out", "severity": "warning" })
    )
}

async fn decode_in_chunks(body: &[u8], chunk_size: usize) -> Vec<SseEvent> {
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
        body.chunks(chunk_size).map(|c| Ok(c.to_vec())).collect();
    event_stream(futures::stream::iter(chunks))
        .collect::<Vec<_>>()
        .await
}

fn bucket(events: &[SseEvent]) -> StreamResults {
    let mut results = StreamResults::default();
    for event in events {
        if event.is_done() {
            break;
        }
        let data: Value = serde_json::from_str(&event.data).expect("valid payload");
        match (event.event_type.as_str(), data) {
            ("matches", Value::Array(items)) => results.matches.extend(items),
            ("alert", data) => results.alerts.push(data),
            _ => {}
        }
    }
    results
}

#[tokio::test]
async fn test_chunk_size_does_not_change_results() {
    let body = response_body();
    let reference = decode_in_chunks(body.as_bytes(), body.len()).await;
    assert_eq!(reference.len(), 4);

    for chunk_size in [1, 2, 3, 7, 64, 333] {
        let events = decode_in_chunks(body.as_bytes(), chunk_size).await;
        assert_eq!(events, reference, "chunk size {}", chunk_size);
    }

    let formatted = format_stream_results(&bucket(&reference), 30, 300);
    assert_eq!(formatted.len(), 2);
    assert_eq!(formatted[0].filename, "src/ünïcode.rs");
    assert_eq!(formatted[0].matches[0].line_number, 3);
    assert_eq!(formatted[0].matches[0].text, "let café = \"naïve\";");
    assert_eq!(formatted[1].matches[0].text, "Symbol: Router | Kind: STRUCT");
}
