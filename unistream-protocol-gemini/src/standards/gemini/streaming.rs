//! Gemini `streamGenerateContent` protocol.
//!
//! Each SSE `data:` payload is a full `GenerateContentResponse` carrying only
//! the new parts. Only the first candidate is streamed.

use super::finish::map_gemini_finish_reason;
use super::sources::extract_sources;
use super::types::{GeminiPart, GenerateContentResponse, UsageMetadata};
use serde_json::{Value, json};
use std::sync::Arc;
use unistream_core::part::CODE_EXECUTION;
use unistream_core::spec::{
    FinishReason, GenerateResult, NormalizerError, ProviderMetadata, ResponseMetadata, Usage,
};
use unistream_core::{IdGenerator, Part, ProviderProtocol, RawChunk, SequentialIds, TerminalStatus};

/// Google Gemini protocol.
///
/// ```rust,ignore
/// let protocol = GeminiProtocol::new();
/// let parts = StreamDriver::new(protocol, NormalizerConfig::default()).run(values);
/// ```
#[derive(Debug, Clone)]
pub struct GeminiProtocol {
    provider_id: String,
    metadata_key: String,
    ids: Arc<dyn IdGenerator>,
}

impl Default for GeminiProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiProtocol {
    /// Gemini API (`generativelanguage.googleapis.com`), metadata under `google`.
    pub fn new() -> Self {
        Self {
            provider_id: "gemini".to_string(),
            metadata_key: "google".to_string(),
            ids: Arc::new(SequentialIds),
        }
    }

    /// Vertex AI, metadata under `vertex`.
    pub fn vertex() -> Self {
        Self {
            provider_id: "vertex".to_string(),
            metadata_key: "vertex".to_string(),
            ids: Arc::new(SequentialIds),
        }
    }

    pub fn with_provider_metadata_key(mut self, key: impl Into<String>) -> Self {
        self.metadata_key = key.into();
        self
    }

    /// Id source for [`ProviderProtocol::parse_response`].
    ///
    /// Streams take their ids from `NormalizerConfig`; use the same generator
    /// on both sides when comparing results.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn provider_metadata_key(&self) -> &str {
        &self.metadata_key
    }

    pub(crate) fn id_generator(&self) -> Arc<dyn IdGenerator> {
        self.ids.clone()
    }

    fn keyed(&self, fields: serde_json::Map<String, Value>) -> ProviderMetadata {
        let mut meta = ProviderMetadata::new();
        meta.insert(self.metadata_key.clone(), Value::Object(fields));
        meta
    }

    fn signature_metadata(&self, signature: Option<String>) -> Option<ProviderMetadata> {
        let signature = signature?;
        let mut fields = serde_json::Map::new();
        fields.insert("thoughtSignature".to_string(), Value::String(signature));
        Some(self.keyed(fields))
    }

    fn narrow_part(&self, part: GeminiPart, out: &mut Vec<Part>) {
        let GeminiPart {
            text,
            thought,
            thought_signature,
            executable_code,
            code_execution_result,
            function_call,
            inline_data,
        } = part;

        if let Some(call) = function_call {
            let arguments = call
                .args
                .map(|args| args.to_string())
                .unwrap_or_else(|| "{}".to_string());
            out.push(Part::FunctionCall {
                id: call.id.filter(|id| !id.is_empty()),
                name: call.name,
                arguments,
                provider_metadata: self.signature_metadata(thought_signature),
            });
            return;
        }

        if let Some(code) = executable_code {
            out.push(Part::ProviderToolCall {
                kind: CODE_EXECUTION.to_string(),
                tool_name: CODE_EXECUTION.to_string(),
                input: json!({
                    "language": code.language.unwrap_or_else(|| "PYTHON".to_string()),
                    "code": code.code.unwrap_or_default(),
                }),
            });
            return;
        }

        if let Some(result) = code_execution_result {
            let outcome = result.outcome.unwrap_or_else(|| "OUTCOME_OK".to_string());
            out.push(Part::ProviderToolResult {
                kind: CODE_EXECUTION.to_string(),
                is_error: outcome != "OUTCOME_OK",
                result: json!({
                    "outcome": outcome,
                    "output": result.output.unwrap_or_default(),
                }),
            });
            return;
        }

        if let Some(inline) = inline_data {
            out.push(Part::InlineData {
                media_type: inline.mime_type,
                data: inline.data,
            });
            return;
        }

        if let Some(text) = text {
            let provider_metadata = self.signature_metadata(thought_signature);
            if thought.unwrap_or(false) {
                out.push(Part::Reasoning {
                    text,
                    provider_metadata,
                });
            } else {
                out.push(Part::Text {
                    text,
                    provider_metadata,
                });
            }
        }
    }

    /// Narrow a parsed response. Shared by streaming and non-streaming paths.
    pub(crate) fn narrow_response(&self, response: GenerateContentResponse) -> RawChunk {
        let GenerateContentResponse {
            candidates,
            usage_metadata,
            prompt_feedback,
            model_version,
            response_id,
        } = response;

        let mut chunk = RawChunk::new();
        let response_meta = ResponseMetadata {
            id: response_id,
            model_id: model_version,
            timestamp: None,
        };
        if !response_meta.is_empty() {
            chunk.response_metadata = Some(response_meta);
        }

        let mut fields = serde_json::Map::new();

        if let Some(candidate) = candidates.into_iter().next() {
            if let Some(content) = candidate.content {
                for part in content.parts {
                    self.narrow_part(part, &mut chunk.parts);
                }
            }
            chunk.sources = extract_sources(candidate.grounding_metadata.as_ref());
            if let Some(grounding) = candidate.grounding_metadata
                && let Ok(value) = serde_json::to_value(grounding)
            {
                fields.insert("groundingMetadata".to_string(), value);
            }
            if let Some(url_context) = candidate.url_context_metadata {
                fields.insert("urlContextMetadata".to_string(), url_context);
            }
            if let Some(ratings) = candidate.safety_ratings {
                fields.insert("safetyRatings".to_string(), ratings);
            }
            if let Some(reason) = candidate.finish_reason {
                chunk.terminal = Some(TerminalStatus::reason(reason));
            }
        } else if let Some(reason) = prompt_feedback.as_ref().and_then(|f| f.block_reason.clone()) {
            // Blocked prompts carry no candidates at all.
            chunk.terminal = Some(TerminalStatus::reason(reason));
        }

        if let Some(feedback) = prompt_feedback
            && let Ok(value) = serde_json::to_value(feedback)
        {
            fields.insert("promptFeedback".to_string(), value);
        }

        if let Some(usage) = usage_metadata {
            chunk.usage = Some(convert_usage(&usage));
            if let Ok(value) = serde_json::to_value(usage) {
                fields.insert("usageMetadata".to_string(), value);
            }
        }

        if !fields.is_empty() {
            chunk.provider_metadata = Some(self.keyed(fields));
        }
        chunk
    }
}

pub(crate) fn convert_usage(usage: &UsageMetadata) -> Usage {
    Usage {
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
        total_tokens: usage.total_token_count,
        reasoning_tokens: usage.thoughts_token_count,
        cached_input_tokens: usage.cached_content_token_count,
    }
}

/// `{"error": {"code": 429, "message": "...", "status": "RESOURCE_EXHAUSTED"}}`
pub(crate) fn provider_error(error: &Value) -> NormalizerError {
    let code = error
        .get("status")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| error.get("code").map(|c| c.to_string()));
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());
    NormalizerError::provider_error(code, message)
}

pub(crate) fn parse_body(value: &Value) -> Result<GenerateContentResponse, NormalizerError> {
    serde_json::from_value(value.clone())
        .map_err(|e| NormalizerError::ParseError(format!("invalid Gemini response chunk: {e}")))
}

impl ProviderProtocol for GeminiProtocol {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    fn narrow(&self, chunk: &Value) -> Result<RawChunk, NormalizerError> {
        if let Some(error) = chunk.get("error") {
            return Ok(RawChunk::new().with_terminal(TerminalStatus::error(provider_error(error))));
        }
        Ok(self.narrow_response(parse_body(chunk)?))
    }

    fn map_finish_reason(&self, raw: &str, has_tool_calls: bool) -> FinishReason {
        map_gemini_finish_reason(raw, has_tool_calls)
    }

    fn parse_response(&self, body: &Value) -> Result<GenerateResult, NormalizerError> {
        super::response::parse_generate_response(self, body)
    }
}
