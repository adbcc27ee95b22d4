use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical reason why generation stopped.
///
/// Every provider vocabulary maps onto exactly one of these values.
///
/// # Example
///
/// ```rust,ignore
/// use unistream_spec::FinishReason;
///
/// match reason {
///     FinishReason::Stop => println!("Completed successfully"),
///     FinishReason::ToolCalls => println!("Model wants tool results"),
///     FinishReason::Unknown => println!("Stream ended without a terminal chunk"),
///     _ => println!("Other reason"),
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    /// Model completed naturally.
    ///
    /// Maps to:
    /// - OpenAI: `stop`
    /// - Gemini: `STOP` (without client tool calls)
    Stop,

    /// Model reached the output token limit.
    ///
    /// Maps to:
    /// - OpenAI: `length`
    /// - Gemini: `MAX_TOKENS`
    Length,

    /// Output was blocked or truncated by a safety or policy filter.
    ///
    /// Maps to:
    /// - OpenAI: `content_filter`
    /// - Gemini: `SAFETY`, `RECITATION`, `BLOCKLIST`, `PROHIBITED_CONTENT`, `SPII`, `IMAGE_SAFETY`
    ContentFilter,

    /// Model requested client-side tool calls.
    ///
    /// Maps to:
    /// - OpenAI: `tool_calls`, `function_call`
    /// - Gemini: `STOP` when the turn contained a client tool call
    ToolCalls,

    /// Generation failed (malformed output or an in-stream provider error).
    Error,

    /// The provider reported a status with no canonical equivalent.
    Other,

    /// The stream ended without any terminal status.
    Unknown,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content-filter",
            FinishReason::ToolCalls => "tool-calls",
            FinishReason::Error => "error",
            FinishReason::Other => "other",
            FinishReason::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
