//! Canonical stream scenarios over in-memory Gemini chunks

use futures_util::StreamExt;
use serde_json::{Value, json};
use unistream::{
    FinishReason, GeminiProtocol, NormalizerConfig, NormalizerError, StreamPart, Warning,
    normalize_json_stream, reasoning_stream, text_stream,
};

fn chunk(parts: Value) -> Value {
    json!({"candidates": [{"content": {"role": "model", "parts": parts}}]})
}

fn terminal(reason: &str) -> Value {
    json!({"candidates": [{"content": {"role": "model", "parts": []}, "finishReason": reason}]})
}

fn input(chunks: Vec<Value>) -> impl futures::Stream<Item = Result<Value, NormalizerError>> + Send {
    futures::stream::iter(chunks.into_iter().map(Ok))
}

async fn run_with(config: NormalizerConfig, chunks: Vec<Value>) -> Vec<StreamPart> {
    normalize_json_stream(GeminiProtocol::new(), input(chunks), config)
        .collect()
        .await
}

async fn run(chunks: Vec<Value>) -> Vec<StreamPart> {
    run_with(NormalizerConfig::default(), chunks).await
}

fn kinds(parts: &[StreamPart]) -> Vec<&'static str> {
    parts.iter().map(|p| p.kind()).collect()
}

fn finish_reason(parts: &[StreamPart]) -> FinishReason {
    match parts.last() {
        Some(StreamPart::Finish { finish_reason, .. }) => *finish_reason,
        other => panic!("expected finish, got {other:?}"),
    }
}

fn finish_warnings(parts: &[StreamPart]) -> &[Warning] {
    match parts.last() {
        Some(StreamPart::Finish { warnings, .. }) => warnings,
        other => panic!("expected finish, got {other:?}"),
    }
}

#[tokio::test]
async fn interleaved_reasoning_and_text() {
    let parts = run(vec![
        chunk(json!([{"text": "A", "thought": true}])),
        chunk(json!([{"text": "B"}])),
        chunk(json!([{"text": "C", "thought": true}])),
        terminal("STOP"),
    ])
    .await;

    assert_eq!(
        kinds(&parts[1..]),
        [
            "reasoning-start",
            "reasoning-delta",
            "reasoning-end",
            "text-start",
            "text-delta",
            "text-end",
            "reasoning-start",
            "reasoning-delta",
            "reasoning-end",
            "finish"
        ]
    );
    assert_eq!(finish_reason(&parts), FinishReason::Stop);
}

#[tokio::test]
async fn code_execution_call_and_result_pair() {
    let parts = run(vec![
        chunk(json!([{"executableCode": {"language": "PYTHON", "code": "print(1)"}}])),
        chunk(json!([{"codeExecutionResult": {"outcome": "OUTCOME_OK", "output": "1"}}])),
        terminal("STOP"),
    ])
    .await;

    assert_eq!(kinds(&parts[1..]), ["tool-call", "tool-result", "finish"]);
    let (StreamPart::ToolCall(call), StreamPart::ToolResult(result)) = (&parts[1], &parts[2]) else {
        panic!("expected call then result");
    };
    assert_eq!(call.tool_name, "code_execution");
    assert_eq!(result.tool_call_id, call.tool_call_id);
    assert_eq!(finish_reason(&parts), FinishReason::Stop);
    // No pending correlation is left behind.
    assert!(finish_warnings(&parts).is_empty());
}

#[tokio::test]
async fn result_without_call_is_an_error_event() {
    let parts = run(vec![
        chunk(json!([{"codeExecutionResult": {"outcome": "OUTCOME_OK", "output": "1"}}])),
        chunk(json!([{"text": "done"}])),
        terminal("STOP"),
    ])
    .await;

    let StreamPart::Error { error } = &parts[1] else {
        panic!("expected error, got {:?}", parts[1]);
    };
    assert!(matches!(error, NormalizerError::OrphanedToolResult { kind } if kind == "code_execution"));
    assert!(!parts.iter().any(|p| matches!(p, StreamPart::ToolResult(_))));
    assert_eq!(finish_reason(&parts), FinishReason::Stop);
}

#[tokio::test]
async fn second_call_before_result_supersedes_the_first() {
    let parts = run(vec![
        chunk(json!([{"executableCode": {"code": "a = 1"}}])),
        chunk(json!([{"executableCode": {"code": "print(a)"}}])),
        chunk(json!([{"codeExecutionResult": {"outcome": "OUTCOME_OK", "output": "1"}}])),
        terminal("STOP"),
    ])
    .await;

    assert_eq!(
        kinds(&parts[1..]),
        ["tool-call", "error", "tool-call", "tool-result", "finish"]
    );
    let StreamPart::Error { error } = &parts[2] else {
        panic!("expected error");
    };
    assert!(matches!(
        error,
        NormalizerError::OverlappingToolCall { pending_id, .. } if pending_id == "call_0"
    ));
    let StreamPart::ToolResult(result) = &parts[4] else {
        panic!("expected result");
    };
    assert_eq!(result.tool_call_id, "call_1");
}

#[tokio::test]
async fn call_without_result_is_reported_at_finish() {
    let parts = run(vec![
        chunk(json!([{"executableCode": {"code": "while True: pass"}}])),
        terminal("MAX_TOKENS"),
    ])
    .await;

    assert_eq!(finish_reason(&parts), FinishReason::Length);
    assert_eq!(
        finish_warnings(&parts),
        [Warning::other("code_execution call `call_0` never received its result")]
    );
}

#[tokio::test]
async fn duplicate_sources_emit_once() {
    let grounding = json!({"groundingChunks": [{"web": {"uri": "https://docs.rs/tokio", "title": "tokio"}}]});
    let parts = run(vec![
        json!({"candidates": [{"content": {"parts": [{"text": "Tokio"}]}, "groundingMetadata": grounding}]}),
        json!({"candidates": [{"content": {"parts": [{"text": " is async."}]}, "groundingMetadata": grounding,
                               "finishReason": "STOP"}]}),
    ])
    .await;

    let sources = parts
        .iter()
        .filter(|p| matches!(p, StreamPart::Source(_)))
        .count();
    assert_eq!(sources, 1);
}

#[tokio::test]
async fn stop_with_function_call_maps_to_tool_calls() {
    let with_call = run(vec![
        chunk(json!([{"functionCall": {"name": "lookup", "args": {"id": 7}}}])),
        terminal("STOP"),
    ])
    .await;
    assert_eq!(finish_reason(&with_call), FinishReason::ToolCalls);

    let without_call = run(vec![chunk(json!([{"text": "hi"}])), terminal("STOP")]).await;
    assert_eq!(finish_reason(&without_call), FinishReason::Stop);
}

#[tokio::test]
async fn unmapped_status_is_other() {
    let parts = run(vec![chunk(json!([{"text": "hi"}])), terminal("LANGUAGE")]).await;
    let Some(StreamPart::Finish {
        finish_reason,
        raw_finish_reason,
        ..
    }) = parts.last()
    else {
        panic!("expected finish");
    };
    assert_eq!(*finish_reason, FinishReason::Other);
    assert_eq!(raw_finish_reason.as_deref(), Some("LANGUAGE"));
}

#[tokio::test]
async fn missing_terminal_still_finishes() {
    let parts = run(vec![chunk(json!([{"text": "partial"}]))]).await;
    assert_eq!(
        kinds(&parts),
        ["stream-start", "text-start", "text-delta", "text-end", "finish"]
    );
    assert_eq!(finish_reason(&parts), FinishReason::Unknown);
}

#[tokio::test]
async fn empty_input_still_starts_and_finishes() {
    let parts = run(Vec::new()).await;
    assert_eq!(kinds(&parts), ["stream-start", "finish"]);
    assert_eq!(finish_reason(&parts), FinishReason::Unknown);
}

#[tokio::test]
async fn chunks_after_terminal_are_not_decoded() {
    let parts = run(vec![
        chunk(json!([{"text": "one"}])),
        terminal("STOP"),
        chunk(json!([{"text": "two"}])),
    ])
    .await;
    assert_eq!(parts.iter().filter(|p| p.kind() == "text-delta").count(), 1);
    assert_eq!(parts.last().map(|p| p.kind()), Some("finish"));
}

#[tokio::test]
async fn call_warnings_and_raw_chunks() {
    let warning = Warning::Unsupported {
        feature: "seed".into(),
        details: None,
    };
    let first = chunk(json!([{"text": "x"}]));
    let parts = run_with(
        NormalizerConfig::default()
            .with_warning(warning.clone())
            .with_raw_chunks(true),
        vec![first.clone(), terminal("STOP")],
    )
    .await;

    assert_eq!(
        parts[0],
        StreamPart::StreamStart {
            warnings: vec![warning]
        }
    );
    assert_eq!(parts[1], StreamPart::Raw { raw_value: first });
    assert_eq!(parts[2].kind(), "text-start");
}

#[tokio::test]
async fn projections_keep_only_their_deltas() {
    let chunks = vec![
        chunk(json!([{"text": "think ", "thought": true}])),
        chunk(json!([{"text": "Hello"}])),
        chunk(json!([{"text": "again", "thought": true}])),
        chunk(json!([{"text": " there"}])),
        terminal("STOP"),
    ];

    let text: Vec<String> = text_stream(normalize_json_stream(
        GeminiProtocol::new(),
        input(chunks.clone()),
        NormalizerConfig::default(),
    ))
    .collect()
    .await;
    assert_eq!(text, ["Hello", " there"]);

    let reasoning: Vec<String> = reasoning_stream(normalize_json_stream(
        GeminiProtocol::new(),
        input(chunks),
        NormalizerConfig::default(),
    ))
    .collect()
    .await;
    assert_eq!(reasoning.concat(), "think again");
}
