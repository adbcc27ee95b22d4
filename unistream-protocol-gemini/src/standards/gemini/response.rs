//! Non-streaming `generateContent` parsing.
//!
//! The body is narrowed with the same code as a stream chunk, decoded by a
//! [`StreamNormalizer`] and collapsed, so both paths share text coalescing,
//! tool-call ids, source dedup and finish resolution.

use super::streaming::{GeminiProtocol, parse_body, provider_error};
use serde_json::Value;
use unistream_core::spec::{GenerateResult, NormalizerError, StreamPart};
use unistream_core::{NormalizerConfig, StreamNormalizer, collapse_parts};

pub(crate) fn parse_generate_response(
    protocol: &GeminiProtocol,
    body: &Value,
) -> Result<GenerateResult, NormalizerError> {
    if let Some(error) = body.get("error") {
        return Err(provider_error(error));
    }
    let chunk = protocol.narrow_response(parse_body(body)?);

    // A complete body is its own terminal; no trailer can follow.
    let config = NormalizerConfig::default()
        .with_id_generator(protocol.id_generator())
        .with_finish_on_terminal_chunk(true)
        .with_warn_on_unterminated(false);
    let mut normalizer = StreamNormalizer::new(protocol.clone(), config);
    let mut parts = normalizer.push_chunk(chunk);
    parts.extend(normalizer.finish());

    // Decode errors (orphan results, bad inline data) are already logged by
    // the decoder and have no place in a complete result.
    Ok(collapse_parts(
        parts
            .into_iter()
            .filter(|part| !matches!(part, StreamPart::Error { .. })),
    ))
}
