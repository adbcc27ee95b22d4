//! Delta collapsing and narrowed projections.
//!
//! [`collapse_parts`] folds a drained part sequence into a [`GenerateResult`],
//! the same shape a protocol's non-streaming parser returns. Consecutive text
//! (or reasoning) deltas coalesce into one content item, in emission order.

use futures::Stream;
use futures_util::StreamExt;
use std::pin::Pin;
use unistream_spec::{ContentPart, GenerateResult, StreamPart};

/// Fold parts into a complete result.
pub fn collapse_parts<I>(parts: I) -> GenerateResult
where
    I: IntoIterator<Item = StreamPart>,
{
    let mut result = GenerateResult::default();
    let mut finish_warnings = Vec::new();

    for part in parts {
        match part {
            StreamPart::StreamStart { warnings } => result.warnings.extend(warnings),
            StreamPart::ResponseMetadata(meta) => result.response = Some(meta),
            StreamPart::TextDelta {
                delta,
                provider_metadata,
                ..
            } => result.push_text(&delta, provider_metadata),
            StreamPart::ReasoningDelta {
                delta,
                provider_metadata,
                ..
            } => result.push_reasoning(&delta, provider_metadata),
            StreamPart::ToolCall(call) => result.content.push(ContentPart::ToolCall(call)),
            StreamPart::ToolResult(res) => result.content.push(ContentPart::ToolResult(res)),
            StreamPart::File(file) => result.content.push(ContentPart::File(file)),
            StreamPart::Source(src) => result.content.push(ContentPart::Source(src)),
            StreamPart::Finish {
                finish_reason,
                raw_finish_reason,
                usage,
                provider_metadata,
                warnings,
            } => {
                result.finish_reason = finish_reason;
                result.raw_finish_reason = raw_finish_reason;
                result.usage = usage;
                result.provider_metadata = provider_metadata;
                finish_warnings = warnings;
            }
            StreamPart::Raw { .. }
            | StreamPart::TextStart { .. }
            | StreamPart::TextEnd { .. }
            | StreamPart::ReasoningStart { .. }
            | StreamPart::ReasoningEnd { .. }
            | StreamPart::ToolInputStart { .. }
            | StreamPart::ToolInputDelta { .. }
            | StreamPart::ToolInputEnd { .. }
            | StreamPart::Error { .. }
            | StreamPart::Abort => {}
        }
    }

    result.warnings.extend(finish_warnings);
    result
}

/// Drain a part stream and collapse it.
pub async fn collapse_stream<S>(stream: S) -> GenerateResult
where
    S: Stream<Item = StreamPart>,
{
    let parts: Vec<StreamPart> = stream.collect().await;
    collapse_parts(parts)
}

/// Only the text deltas of a part stream.
pub fn text_stream<S>(stream: S) -> Pin<Box<dyn Stream<Item = String> + Send>>
where
    S: Stream<Item = StreamPart> + Send + 'static,
{
    Box::pin(stream.filter_map(|part| async move {
        match part {
            StreamPart::TextDelta { delta, .. } => Some(delta),
            _ => None,
        }
    }))
}

/// Only the reasoning deltas of a part stream.
pub fn reasoning_stream<S>(stream: S) -> Pin<Box<dyn Stream<Item = String> + Send>>
where
    S: Stream<Item = StreamPart> + Send + 'static,
{
    Box::pin(stream.filter_map(|part| async move {
        match part {
            StreamPart::ReasoningDelta { delta, .. } => Some(delta),
            _ => None,
        }
    }))
}
