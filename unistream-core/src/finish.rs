//! Finish reason resolution.

use crate::part::TerminalStatus;
use unistream_spec::FinishReason;

/// Resolve the canonical finish reason for a stream.
///
/// - no terminal status: `Unknown` (the stream never reached its end)
/// - a terminal error: `Error`
/// - a terminal status without a raw reason: `Other`
/// - otherwise the protocol's vocabulary mapping decides
///
/// `map` must itself be total; it receives the raw reason and whether the
/// turn produced a client-side tool call.
pub fn resolve_finish_reason<F>(
    terminal: Option<&TerminalStatus>,
    has_tool_calls: bool,
    map: F,
) -> FinishReason
where
    F: FnOnce(&str, bool) -> FinishReason,
{
    let Some(terminal) = terminal else {
        return FinishReason::Unknown;
    };
    if terminal.error.is_some() {
        return FinishReason::Error;
    }
    match terminal.raw_reason.as_deref() {
        Some(raw) => map(raw, has_tool_calls),
        None => FinishReason::Other,
    }
}
