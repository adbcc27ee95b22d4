//! One-call helpers over [`StreamDriver`].
//!
//! Transport stays with the caller: hand over the response body as a byte
//! stream (or already-decoded JSON chunks) and get canonical parts back.

use futures::Stream;
use std::fmt::Display;
use unistream_core::{
    NormalizerConfig, PartStream, ProviderProtocol, SseJsonStreamConfig, StreamDriver,
    collapse_stream, sse_json_values,
};
use unistream_spec::{GenerateResult, NormalizerError};

/// Normalize a stream of provider JSON chunks.
pub fn normalize_json_stream<P, S>(protocol: P, values: S, config: NormalizerConfig) -> PartStream
where
    P: ProviderProtocol + 'static,
    S: Stream<Item = Result<serde_json::Value, NormalizerError>> + Send + 'static,
{
    StreamDriver::new(protocol, config).run(values)
}

/// Normalize a raw SSE response body.
///
/// Each SSE `data:` payload is parsed as one provider chunk; `[DONE]` is
/// skipped. A payload that is not JSON becomes an `error` part and the stream
/// continues. A transport failure ends the turn with finish reason `error`.
pub fn normalize_sse_stream<P, S, B, E>(protocol: P, bytes: S, config: NormalizerConfig) -> PartStream
where
    P: ProviderProtocol + 'static,
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let values = sse_json_values(bytes, SseJsonStreamConfig::new(protocol.provider_id()));
    tracing::debug!(provider = %protocol.provider_id(), "normalizing SSE stream");
    normalize_json_stream(protocol, values, config)
}

/// Drain an SSE response body into a complete [`GenerateResult`].
pub async fn generate_from_sse<P, S, B, E>(
    protocol: P,
    bytes: S,
    config: NormalizerConfig,
) -> GenerateResult
where
    P: ProviderProtocol + 'static,
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    collapse_stream(normalize_sse_stream(protocol, bytes, config)).await
}
