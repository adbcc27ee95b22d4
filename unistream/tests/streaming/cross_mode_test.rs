//! Draining a stream and collapsing it matches the non-streaming parser

use unistream::{
    GeminiProtocol, GenerateResult, NormalizerConfig, OpenAiCompatibleProtocol, ProviderProtocol,
    generate_from_sse,
};

#[path = "../support/stream_fixture.rs"]
mod support;

async fn streamed<P>(protocol: P, provider: &str, name: &str, config: NormalizerConfig) -> GenerateResult
where
    P: ProviderProtocol + 'static,
{
    let bytes = support::load_sse_fixture_as_bytes(&support::fixture_path(provider, name))
        .expect("load fixture");
    generate_from_sse(protocol, futures_util::stream::iter(bytes), config).await
}

fn complete<P: ProviderProtocol>(protocol: &P, provider: &str, name: &str) -> GenerateResult {
    let body = support::load_json_fixture(&support::fixture_path(provider, name));
    protocol.parse_response(&body).expect("parse complete response")
}

#[tokio::test]
async fn gemini_function_call_modes_agree() {
    let protocol = GeminiProtocol::new();
    let streamed = streamed(
        protocol.clone(),
        "gemini",
        "function_call.sse",
        NormalizerConfig::default(),
    )
    .await;
    let complete = complete(&protocol, "gemini", "function_call.json");

    assert_eq!(streamed.content, complete.content);
    assert_eq!(streamed.tool_calls(), complete.tool_calls());
    assert_eq!(streamed.usage, complete.usage);
    assert_eq!(streamed.finish_reason, complete.finish_reason);
    assert_eq!(streamed.raw_finish_reason, complete.raw_finish_reason);
    assert_eq!(streamed.response, complete.response);
}

#[tokio::test]
async fn gemini_grounded_search_modes_agree() {
    let protocol = GeminiProtocol::new();
    let streamed = streamed(
        protocol.clone(),
        "gemini",
        "grounded_search.sse",
        NormalizerConfig::default(),
    )
    .await;
    let complete = complete(&protocol, "gemini", "grounded_search.json");

    assert_eq!(streamed.text(), complete.text());
    assert_eq!(streamed.sources(), complete.sources());
    assert_eq!(streamed.usage, complete.usage);
    assert_eq!(streamed.finish_reason, complete.finish_reason);
}

#[tokio::test]
async fn openai_tool_call_modes_agree() {
    let protocol = OpenAiCompatibleProtocol::new("openai");
    let streamed = streamed(
        protocol.clone(),
        "openai",
        "tool_calls.sse",
        NormalizerConfig::default(),
    )
    .await;
    let complete = complete(&protocol, "openai", "tool_calls.json");

    assert_eq!(streamed, complete);
}
