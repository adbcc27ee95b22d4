//! Gemini finish-reason vocabulary.

use unistream_core::spec::FinishReason;

/// Map a Gemini `finishReason` (or prompt `blockReason`) to the canonical reason.
///
/// Gemini reports `STOP` even when the turn ended in function calls, so the
/// caller's `has_tool_calls` decides between `stop` and `tool-calls`.
pub fn map_gemini_finish_reason(raw: &str, has_tool_calls: bool) -> FinishReason {
    match raw {
        "STOP" if has_tool_calls => FinishReason::ToolCalls,
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::Length,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" | "IMAGE_SAFETY" => {
            FinishReason::ContentFilter
        }
        "MALFORMED_FUNCTION_CALL" => FinishReason::Error,
        _ => FinishReason::Other,
    }
}
