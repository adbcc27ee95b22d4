//! Gemini SSE fixtures driven through `normalize_sse_stream`

use serde_json::json;
use unistream::{FinishReason, GeminiProtocol, NormalizerConfig, Source, StreamPart, Warning};

#[path = "../support/stream_fixture.rs"]
mod support;

async fn gemini_parts(name: &str) -> Vec<StreamPart> {
    support::collect_fixture_parts(GeminiProtocol::new(), "gemini", name, NormalizerConfig::default())
        .await
}

#[tokio::test]
async fn gemini_interleaved_reasoning_fixture() {
    let parts = gemini_parts("interleaved_reasoning.sse").await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
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

    let deltas: Vec<(&str, &str)> = parts
        .iter()
        .filter_map(|p| match p {
            StreamPart::ReasoningDelta { id, delta, .. } | StreamPart::TextDelta { id, delta, .. } => {
                Some((id.as_str(), delta.as_str()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(deltas, [("0", "A"), ("1", "B"), ("2", "C")]);

    let StreamPart::ResponseMetadata(meta) = &parts[1] else {
        panic!("expected response metadata");
    };
    assert_eq!(meta.id.as_deref(), Some("resp-7d1c"));
    assert_eq!(meta.model_id.as_deref(), Some("gemini-2.5-flash"));

    let Some(StreamPart::Finish {
        finish_reason,
        raw_finish_reason,
        usage,
        warnings,
        ..
    }) = parts.last()
    else {
        panic!("expected finish");
    };
    assert_eq!(*finish_reason, FinishReason::Stop);
    assert_eq!(raw_finish_reason.as_deref(), Some("STOP"));
    assert_eq!(usage.input_tokens, Some(11));
    assert_eq!(usage.reasoning_tokens, Some(4));
    assert_eq!(usage.total_tokens, Some(18));
    assert!(warnings.is_empty());
}

#[tokio::test]
async fn gemini_code_execution_fixture() {
    let parts = gemini_parts("code_execution.sse").await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
            "tool-call",
            "tool-result",
            "text-start",
            "text-delta",
            "text-end",
            "finish"
        ]
    );

    let StreamPart::ToolCall(call) = &parts[2] else {
        panic!("expected tool call");
    };
    assert_eq!(call.tool_name, "code_execution");
    assert!(call.provider_executed);
    assert_eq!(
        call.input_json().unwrap(),
        json!({"language": "PYTHON", "code": "print(1)"})
    );

    let StreamPart::ToolResult(result) = &parts[3] else {
        panic!("expected tool result");
    };
    assert_eq!(result.tool_call_id, call.tool_call_id);
    assert!(!result.is_error);
    assert_eq!(result.result["output"], "1\n");

    // Provider-executed calls do not turn `STOP` into `tool-calls`.
    assert_eq!(support::finish_reason(&parts), FinishReason::Stop);
    let Some(StreamPart::Finish { warnings, .. }) = parts.last() else {
        panic!("expected finish");
    };
    assert!(warnings.is_empty());
}

#[tokio::test]
async fn gemini_grounded_search_fixture() {
    let parts = gemini_parts("grounded_search.sse").await;

    let sources: Vec<&Source> = parts
        .iter()
        .filter_map(|p| match p {
            StreamPart::Source(src) => Some(src),
            _ => None,
        })
        .collect();
    assert_eq!(
        sources.iter().map(|s| (s.id(), s.url())).collect::<Vec<_>>(),
        [
            ("src_0", Some("https://www.rust-lang.org/")),
            ("src_1", Some("https://blog.rust-lang.org/"))
        ]
    );

    let Some(StreamPart::Finish {
        finish_reason,
        provider_metadata,
        ..
    }) = parts.last()
    else {
        panic!("expected finish");
    };
    assert_eq!(*finish_reason, FinishReason::Stop);
    let google = &provider_metadata.as_ref().expect("finish metadata")["google"];
    assert_eq!(
        google["groundingMetadata"]["webSearchQueries"],
        json!(["latest rust release"])
    );
    assert_eq!(google["usageMetadata"]["totalTokenCount"], 23);
}

#[tokio::test]
async fn gemini_function_call_fixture() {
    let parts = gemini_parts("function_call.sse").await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
            "text-start",
            "text-delta",
            "tool-input-start",
            "tool-input-delta",
            "tool-input-end",
            "tool-call",
            "text-end",
            "finish"
        ]
    );
    let StreamPart::ToolCall(call) = &parts[7] else {
        panic!("expected tool call");
    };
    assert_eq!(call.tool_call_id, "call_0");
    assert_eq!(call.tool_name, "get_forecast");
    assert!(!call.provider_executed);
    assert_eq!(call.input_json().unwrap(), json!({"city": "Lisbon", "days": 2}));
    assert_eq!(support::finish_reason(&parts), FinishReason::ToolCalls);
}

#[tokio::test]
async fn gemini_unterminated_fixture() {
    let parts = gemini_parts("unterminated.sse").await;

    assert_eq!(
        support::kinds(&parts),
        [
            "stream-start",
            "response-metadata",
            "text-start",
            "text-delta",
            "text-end",
            "finish"
        ]
    );
    let Some(StreamPart::Finish {
        finish_reason,
        raw_finish_reason,
        warnings,
        ..
    }) = parts.last()
    else {
        panic!("expected finish");
    };
    assert_eq!(*finish_reason, FinishReason::Unknown);
    assert!(raw_finish_reason.is_none());
    assert_eq!(warnings.len(), 1);
    assert!(matches!(&warnings[0], Warning::Other { message } if message.contains("terminal")));
}

#[tokio::test]
async fn gemini_unterminated_fixture_without_warning() {
    let parts = support::collect_fixture_parts(
        GeminiProtocol::new(),
        "gemini",
        "unterminated.sse",
        NormalizerConfig::default().with_warn_on_unterminated(false),
    )
    .await;
    let Some(StreamPart::Finish { warnings, .. }) = parts.last() else {
        panic!("expected finish");
    };
    assert!(warnings.is_empty());
    assert_eq!(support::finish_reason(&parts), FinishReason::Unknown);
}
