//! Cooperative cancellation of a running part stream

use futures::channel::mpsc;
use futures_util::StreamExt;
use serde_json::{Value, json};
use std::time::Duration;
use unistream::{CancelHandle, GeminiProtocol, NormalizerConfig, NormalizerError, StreamDriver, StreamPart};

type Input = Result<Value, NormalizerError>;

fn text(text: &str) -> Input {
    Ok(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
}

#[tokio::test]
async fn cancel_mid_block_closes_it_and_aborts() {
    let (tx, rx) = mpsc::unbounded::<Input>();
    let cancel = CancelHandle::new();
    let mut parts = StreamDriver::new(GeminiProtocol::new(), NormalizerConfig::default())
        .with_cancel_handle(cancel.clone())
        .run(rx);

    tx.unbounded_send(text("Hel")).unwrap();
    assert_eq!(parts.next().await.map(|p| p.kind()), Some("stream-start"));
    assert_eq!(parts.next().await.map(|p| p.kind()), Some("text-start"));
    assert_eq!(parts.next().await.map(|p| p.kind()), Some("text-delta"));

    cancel.cancel();
    // Already queued input is not consumed after cancellation.
    tx.unbounded_send(text("lo")).unwrap();

    let rest: Vec<StreamPart> = parts.collect().await;
    assert_eq!(
        rest.iter().map(|p| p.kind()).collect::<Vec<_>>(),
        ["text-end", "abort"]
    );
}

#[tokio::test]
async fn cancel_before_first_chunk_still_starts() {
    let cancel = CancelHandle::new();
    cancel.cancel();
    let parts: Vec<StreamPart> = StreamDriver::new(GeminiProtocol::new(), NormalizerConfig::default())
        .with_cancel_handle(cancel)
        .run(futures::stream::iter(vec![text("never")]))
        .collect()
        .await;

    assert_eq!(parts, [StreamPart::StreamStart { warnings: vec![] }, StreamPart::Abort]);
}

#[tokio::test(start_paused = true)]
async fn cancel_while_waiting_for_input() {
    let driver = StreamDriver::new(GeminiProtocol::new(), NormalizerConfig::default());
    let cancel = driver.cancel_handle();
    let input = futures::stream::iter(vec![text("waiting")]).chain(futures::stream::pending());
    let parts = driver.run(input);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(30)).await;
        cancel.cancel();
    });

    let parts: Vec<StreamPart> = parts.collect().await;
    assert_eq!(
        parts.iter().map(|p| p.kind()).collect::<Vec<_>>(),
        ["stream-start", "text-start", "text-delta", "text-end", "abort"]
    );
    assert!(!parts.iter().any(|p| p.kind() == "finish"));
}

#[tokio::test]
async fn child_handle_follows_its_parent() {
    let parent = CancelHandle::new();
    let child = parent.child();
    parent.cancel();

    let parts: Vec<StreamPart> = StreamDriver::new(GeminiProtocol::new(), NormalizerConfig::default())
        .with_cancel_handle(child)
        .run(futures::stream::pending::<Input>())
        .collect()
        .await;
    assert_eq!(parts.last(), Some(&StreamPart::Abort));
}

#[cfg(feature = "openai")]
#[tokio::test]
async fn cancel_closes_open_tool_input_without_error() {
    use unistream::OpenAiCompatibleProtocol;

    let (tx, rx) = mpsc::unbounded::<Input>();
    let cancel = CancelHandle::new();
    let mut parts = StreamDriver::new(OpenAiCompatibleProtocol::new("openai"), NormalizerConfig::default())
        .with_cancel_handle(cancel.clone())
        .run(rx);

    tx.unbounded_send(Ok(json!({"choices": [{"index": 0, "delta": {"tool_calls": [
        {"index": 0, "id": "call_s", "function": {"name": "search", "arguments": "{\"q\":"}}
    ]}}]})))
    .unwrap();
    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(parts.next().await.expect("part"));
    }
    assert_eq!(
        seen.iter().map(|p| p.kind()).collect::<Vec<_>>(),
        ["stream-start", "tool-input-start", "tool-input-delta"]
    );

    cancel.cancel();
    let rest: Vec<StreamPart> = parts.collect().await;
    assert_eq!(
        rest,
        [StreamPart::ToolInputEnd { id: "call_s".into() }, StreamPart::Abort]
    );
}
