//! OpenAI-compatible SSE fixtures driven through `normalize_sse_stream`

use serde_json::json;
use std::io;
use unistream::{
    FinishReason, NormalizerConfig, NormalizerError, OpenAiCompatibleProtocol, StreamPart,
    collapse_parts, normalize_sse_stream,
};

#[path = "../support/stream_fixture.rs"]
mod support;

async fn openai_parts(name: &str) -> Vec<StreamPart> {
    support::collect_fixture_parts(OpenAiCompatibleProtocol::new("openai"), "openai", name, NormalizerConfig::default())
        .await
}

#[tokio::test]
async fn openai_chat_text_fixture() {
    let parts = openai_parts("chat_text.sse").await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
            "text-start",
            "text-delta",
            "text-delta",
            "text-delta",
            "text-end",
            "finish"
        ]
    );
    let Some(StreamPart::Finish { usage, .. }) = parts.last() else {
        panic!("expected finish");
    };
    assert_eq!(usage.input_tokens, Some(14));
    assert_eq!(usage.output_tokens, Some(5));
    assert_eq!(usage.total_tokens, Some(19));
    assert_eq!(support::finish_reason(&parts), FinishReason::Stop);

    let result = collapse_parts(parts);
    assert_eq!(result.text(), "Hello, world!");
    assert_eq!(
        result.response.and_then(|r| r.model_id).as_deref(),
        Some("gpt-4o-mini")
    );
}

#[tokio::test]
async fn openai_chat_text_fixture_can_stop_at_finish_reason() {
    let parts = support::collect_fixture_parts(
        OpenAiCompatibleProtocol::new("openai"),
        "openai",
        "chat_text.sse",
        NormalizerConfig::default().with_finish_on_terminal_chunk(true),
    )
    .await;

    // The usage trailer is never decoded when the stream finishes on `finish_reason`.
    let Some(StreamPart::Finish { usage, .. }) = parts.last() else {
        panic!("expected finish");
    };
    assert_eq!(usage.input_tokens, None);
    assert_eq!(parts.iter().filter(|p| p.kind() == "finish").count(), 1);
}

#[tokio::test]
async fn openai_tool_calls_fixture() {
    let parts = openai_parts("tool_calls.sse").await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
            "tool-input-start",
            "tool-input-delta",
            "tool-input-delta",
            "tool-input-delta",
            "tool-input-end",
            "tool-call",
            "finish"
        ]
    );
    let StreamPart::ToolInputStart { id, tool_name, .. } = &parts[2] else {
        panic!("expected tool input start");
    };
    assert_eq!(id, "call_q1");
    assert_eq!(tool_name, "search_docs");

    let StreamPart::ToolCall(call) = &parts[7] else {
        panic!("expected tool call");
    };
    assert_eq!(call.tool_call_id, "call_q1");
    assert_eq!(
        call.input_json().unwrap(),
        json!({"query": "tokio select", "limit": 3})
    );
    assert_eq!(support::finish_reason(&parts), FinishReason::ToolCalls);
}

#[tokio::test]
async fn openai_malformed_line_fixture() {
    let parts = openai_parts("malformed_line.sse").await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
            "text-start",
            "text-delta",
            "error",
            "text-delta",
            "text-end",
            "finish"
        ]
    );
    let StreamPart::Error { error } = &parts[4] else {
        panic!("expected error");
    };
    assert!(matches!(error, NormalizerError::ParseError(_)));
    assert_eq!(support::finish_reason(&parts), FinishReason::Stop);
    assert_eq!(collapse_parts(parts).text(), "Before after");
}

#[tokio::test]
async fn openai_mid_stream_error_fixture() {
    let parts = openai_parts("mid_stream_error.sse").await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
            "text-start",
            "text-delta",
            "error",
            "text-end",
            "finish"
        ]
    );
    let StreamPart::Error { error } = &parts[4] else {
        panic!("expected error");
    };
    assert!(matches!(
        error,
        NormalizerError::ProviderError { code: Some(code), .. } if code == "server_error"
    ));
    assert_eq!(support::finish_reason(&parts), FinishReason::Error);
}

#[tokio::test]
async fn transport_failure_ends_the_turn_with_error() {
    let mut bytes = support::load_sse_fixture_as_bytes(&support::fixture_path(
        "openai",
        "chat_text.sse",
    ))
    .expect("load fixture");
    bytes.truncate(3);
    bytes.push(Err(io::Error::new(
        io::ErrorKind::ConnectionReset,
        "connection reset by peer",
    )));

    let parts: Vec<StreamPart> = futures_util::StreamExt::collect(normalize_sse_stream(
        OpenAiCompatibleProtocol::new("openai"),
        futures_util::stream::iter(bytes),
        NormalizerConfig::default(),
    ))
    .await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
            "text-start",
            "text-delta",
            "text-delta",
            "error",
            "text-end",
            "finish"
        ]
    );
    let StreamPart::Error { error } = &parts[5] else {
        panic!("expected error");
    };
    assert!(matches!(error, NormalizerError::TransportError(_)));
    assert_eq!(support::finish_reason(&parts), FinishReason::Error);
}
