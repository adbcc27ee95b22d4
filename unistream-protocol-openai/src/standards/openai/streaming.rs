//! Chat-completions chunk narrowing.
//!
//! Usage arrives in a trailing chunk with empty `choices` when the request set
//! `stream_options.include_usage`, after the chunk carrying `finish_reason`.
//! The protocol reports trailing chunks, so a default `NormalizerConfig`
//! keeps decoding until input ends and the trailer lands in `finish`.

use super::errors::provider_error_from_envelope;
use super::finish::map_openai_finish_reason;
use super::types::{ChatCompletionChunk, OpenAiUsage};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use unistream_core::spec::{
    FinishReason, GenerateResult, NormalizerError, ProviderMetadata, ResponseMetadata, Usage,
};
use unistream_core::{IdGenerator, Part, ProviderProtocol, RawChunk, SequentialIds, TerminalStatus};

/// OpenAI-compatible chat-completions protocol.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProtocol {
    provider_id: String,
    ids: Arc<dyn IdGenerator>,
}

impl OpenAiCompatibleProtocol {
    /// `provider_id` names the vendor in logs and in `providerMetadata`.
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            ids: Arc::new(SequentialIds),
        }
    }

    /// Id source for [`ProviderProtocol::parse_response`].
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub(crate) fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    pub(crate) fn response_metadata(
        id: Option<String>,
        model: Option<String>,
        created: Option<i64>,
    ) -> Option<ResponseMetadata> {
        let meta = ResponseMetadata {
            id,
            model_id: model,
            timestamp: created.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        };
        (!meta.is_empty()).then_some(meta)
    }

    /// `{provider: {acceptedPredictionTokens, rejectedPredictionTokens}}`, when reported.
    pub(crate) fn usage_metadata(&self, usage: &OpenAiUsage) -> Option<ProviderMetadata> {
        let details = usage.completion_tokens_details.as_ref()?;
        let mut fields = serde_json::Map::new();
        if let Some(n) = details.accepted_prediction_tokens {
            fields.insert("acceptedPredictionTokens".to_string(), Value::from(n));
        }
        if let Some(n) = details.rejected_prediction_tokens {
            fields.insert("rejectedPredictionTokens".to_string(), Value::from(n));
        }
        if fields.is_empty() {
            return None;
        }
        let mut meta = ProviderMetadata::new();
        meta.insert(self.provider_id.clone(), Value::Object(fields));
        Some(meta)
    }
}

pub(crate) fn convert_usage(usage: &OpenAiUsage) -> Usage {
    Usage {
        input_tokens: usage.prompt_tokens,
        output_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
        reasoning_tokens: usage
            .completion_tokens_details
            .as_ref()
            .and_then(|d| d.reasoning_tokens),
        cached_input_tokens: usage
            .prompt_tokens_details
            .as_ref()
            .and_then(|d| d.cached_tokens),
    }
}

impl ProviderProtocol for OpenAiCompatibleProtocol {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    fn narrow(&self, chunk: &Value) -> Result<RawChunk, NormalizerError> {
        if let Some(error) = chunk.get("error") {
            let error = provider_error_from_envelope(error);
            tracing::debug!(provider = %self.provider_id, error = %error, "error envelope in stream");
            return Ok(RawChunk::new().with_terminal(TerminalStatus::error(error)));
        }

        let parsed: ChatCompletionChunk = serde_json::from_value(chunk.clone()).map_err(|e| {
            NormalizerError::ParseError(format!("invalid {} chunk: {e}", self.provider_id))
        })?;

        let mut raw = RawChunk::new();
        raw.response_metadata = Self::response_metadata(parsed.id, parsed.model, parsed.created);

        if let Some(usage) = &parsed.usage {
            raw.usage = Some(convert_usage(usage));
            raw.provider_metadata = self.usage_metadata(usage);
        }

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Ok(raw);
        };

        if let Some(mut delta) = choice.delta {
            if let Some(text) = delta.reasoning_text() {
                raw.parts.push(Part::Reasoning {
                    text,
                    provider_metadata: None,
                });
            }
            if let Some(text) = delta.content {
                raw.parts.push(Part::Text {
                    text,
                    provider_metadata: None,
                });
            }
            for call in delta.tool_calls.unwrap_or_default() {
                let (name, arguments_delta) = match call.function {
                    Some(f) => (f.name, f.arguments),
                    None => (None, None),
                };
                raw.parts.push(Part::FunctionCallDelta {
                    index: call.index,
                    id: call.id.filter(|id| !id.is_empty()),
                    name,
                    arguments_delta,
                });
            }
        }

        if let Some(reason) = choice.finish_reason {
            raw.terminal = Some(TerminalStatus::reason(reason));
        }
        Ok(raw)
    }

    fn map_finish_reason(&self, raw: &str, has_tool_calls: bool) -> FinishReason {
        map_openai_finish_reason(raw, has_tool_calls)
    }

    fn has_trailing_chunks(&self) -> bool {
        true
    }

    fn parse_response(&self, body: &Value) -> Result<GenerateResult, NormalizerError> {
        super::json_response::parse_chat_completion(self, body)
    }
}
