//! SSE JSON streaming helpers
//!
//! Turns a byte stream of SSE frames into provider JSON values, one per SSE
//! `data:` payload. Protocol-agnostic: the values are handed to a
//! `ProviderProtocol` afterwards.

use eventsource_stream::Eventsource;
use futures::Stream;
use futures_util::StreamExt;
use std::fmt::Display;
use std::pin::Pin;
use unistream_spec::NormalizerError;

#[derive(Debug, Clone)]
pub struct SseJsonStreamConfig {
    /// Label used in error messages (e.g. "gemini" / "openai").
    pub label: String,
    /// SSE `data` payloads that indicate end-of-stream and should be ignored.
    pub done_markers: Vec<String>,
}

impl SseJsonStreamConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            done_markers: vec!["[DONE]".to_string()],
        }
    }

    pub fn with_done_marker(mut self, marker: impl Into<String>) -> Self {
        self.done_markers.push(marker.into());
        self
    }
}

impl Default for SseJsonStreamConfig {
    fn default() -> Self {
        Self::new("sse")
    }
}

pub type JsonValueStream =
    Pin<Box<dyn Stream<Item = Result<serde_json::Value, NormalizerError>> + Send>>;

/// Convert a bytes stream into a JSON stream by parsing SSE `data:` payloads.
///
/// - Ignores empty payloads and the configured done markers.
/// - A payload that is not valid JSON yields `Err(ParseError)` and the stream
///   continues with the next event.
/// - A transport failure yields `Err(TransportError)` and ends the stream.
pub fn sse_json_values<S, B, E>(byte_stream: S, cfg: SseJsonStreamConfig) -> JsonValueStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let SseJsonStreamConfig {
        label,
        done_markers,
    } = cfg;

    let out = async_stream::stream! {
        let mut sse_stream = Box::pin(byte_stream.eventsource());

        while let Some(item) = sse_stream.next().await {
            let event = match item {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(NormalizerError::TransportError(format!(
                        "SSE stream error ({label}): {e}"
                    )));
                    return;
                }
            };

            let data = event.data.trim();
            if data.is_empty() || done_markers.iter().any(|m| m == data) {
                continue;
            }

            match serde_json::from_str::<serde_json::Value>(data) {
                Ok(v) => yield Ok(v),
                Err(e) => {
                    tracing::debug!(label = %label, error = %e, "invalid SSE JSON payload");
                    yield Err(NormalizerError::ParseError(format!(
                        "Failed to parse SSE JSON ({label}): {e}"
                    )));
                }
            }
        }
    };

    Box::pin(out)
}
