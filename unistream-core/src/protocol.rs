//! Provider protocol seam.

use crate::part::RawChunk;
use std::sync::Arc;
use unistream_spec::{FinishReason, GenerateResult, NormalizerError};

/// Everything vendor-specific about a streaming chat protocol.
///
/// Implementations narrow one already-parsed provider chunk into a
/// [`RawChunk`] and own the provider's finish-reason vocabulary. The shared
/// decoder and normalizer never look at vendor JSON.
///
/// # Example
/// ```rust,ignore
/// struct MyProtocol;
///
/// impl ProviderProtocol for MyProtocol {
///     fn provider_id(&self) -> &str { "my-provider" }
///
///     fn narrow(&self, chunk: &serde_json::Value) -> Result<RawChunk, NormalizerError> {
///         let text = chunk["delta"].as_str().unwrap_or_default();
///         Ok(RawChunk::text(text))
///     }
///
///     fn map_finish_reason(&self, raw: &str, has_tool_calls: bool) -> FinishReason {
///         match raw {
///             "done" if has_tool_calls => FinishReason::ToolCalls,
///             "done" => FinishReason::Stop,
///             _ => FinishReason::Other,
///         }
///     }
/// }
/// ```
pub trait ProviderProtocol: Send + Sync {
    /// Identifier used in logs and as the default provider-metadata key.
    fn provider_id(&self) -> &str;

    /// Narrow one provider chunk.
    ///
    /// An `Err` is surfaced as an `error` part; the stream keeps going.
    fn narrow(&self, chunk: &serde_json::Value) -> Result<RawChunk, NormalizerError>;

    /// Map a raw terminal status to the canonical finish reason.
    ///
    /// Must be total: unrecognized values map to [`FinishReason::Other`].
    fn map_finish_reason(&self, raw: &str, has_tool_calls: bool) -> FinishReason;

    /// Whether chunks can still arrive after the terminal status.
    ///
    /// `true` for protocols that report usage in a trailer after the finish
    /// reason. The normalizer then keeps decoding until input ends unless
    /// [`NormalizerConfig::finish_on_terminal_chunk`](crate::NormalizerConfig)
    /// says otherwise.
    fn has_trailing_chunks(&self) -> bool {
        false
    }

    /// Parse a non-streaming response body for the same generation.
    ///
    /// Default implementation returns `UnsupportedOperation`.
    fn parse_response(&self, _body: &serde_json::Value) -> Result<GenerateResult, NormalizerError> {
        Err(NormalizerError::UnsupportedOperation(format!(
            "parse_response is not supported by the {} protocol",
            self.provider_id()
        )))
    }
}

impl<P: ProviderProtocol + ?Sized> ProviderProtocol for Arc<P> {
    fn provider_id(&self) -> &str {
        (**self).provider_id()
    }

    fn narrow(&self, chunk: &serde_json::Value) -> Result<RawChunk, NormalizerError> {
        (**self).narrow(chunk)
    }

    fn map_finish_reason(&self, raw: &str, has_tool_calls: bool) -> FinishReason {
        (**self).map_finish_reason(raw, has_tool_calls)
    }

    fn has_trailing_chunks(&self) -> bool {
        (**self).has_trailing_chunks()
    }

    fn parse_response(&self, body: &serde_json::Value) -> Result<GenerateResult, NormalizerError> {
        (**self).parse_response(body)
    }
}

impl<P: ProviderProtocol + ?Sized> ProviderProtocol for Box<P> {
    fn provider_id(&self) -> &str {
        (**self).provider_id()
    }

    fn narrow(&self, chunk: &serde_json::Value) -> Result<RawChunk, NormalizerError> {
        (**self).narrow(chunk)
    }

    fn map_finish_reason(&self, raw: &str, has_tool_calls: bool) -> FinishReason {
        (**self).map_finish_reason(raw, has_tool_calls)
    }

    fn has_trailing_chunks(&self) -> bool {
        (**self).has_trailing_chunks()
    }

    fn parse_response(&self, body: &serde_json::Value) -> Result<GenerateResult, NormalizerError> {
        (**self).parse_response(body)
    }
}
