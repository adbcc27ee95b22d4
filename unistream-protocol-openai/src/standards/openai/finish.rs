use unistream_core::spec::FinishReason;

/// Map an OpenAI `finish_reason` to the canonical reason.
///
/// Some compatible vendors answer `stop` after emitting tool calls; the
/// caller's `has_tool_calls` upgrades that to `tool-calls`.
pub fn map_openai_finish_reason(raw: &str, has_tool_calls: bool) -> FinishReason {
    match raw {
        "stop" if has_tool_calls => FinishReason::ToolCalls,
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        "tool_calls" | "function_call" => FinishReason::ToolCalls,
        _ => FinishReason::Other,
    }
}
