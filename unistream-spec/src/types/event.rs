//! The canonical stream part union.
//!
//! Block-scoped parts (`text-*`, `reasoning-*`, `tool-input-*`) carry a block
//! id assigned by the normalizer. Within one stream:
//! - at most one text block and one reasoning block are open at a time, and
//!   opening one kind closes the other;
//! - every `*-start` is matched by exactly one `*-end` with the same id;
//! - exactly one terminal part (`finish`, or `abort` on cancellation) is
//!   emitted, and it is the last part.

use super::{File, FinishReason, ProviderMetadata, Source, ToolCall, ToolResult, Usage, Warning};
use crate::error::NormalizerError;
use serde::{Deserialize, Serialize};

/// Response-level metadata (id, model, creation time).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl ResponseMetadata {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.model_id.is_none() && self.timestamp.is_none()
    }
}

/// Typed stream part union.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamPart {
    StreamStart {
        warnings: Vec<Warning>,
    },

    ResponseMetadata(ResponseMetadata),

    Raw {
        #[serde(rename = "rawValue")]
        raw_value: serde_json::Value,
    },

    TextStart {
        id: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
    TextDelta {
        id: String,
        delta: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
    TextEnd {
        id: String,
    },

    ReasoningStart {
        id: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
    ReasoningDelta {
        id: String,
        delta: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
    ReasoningEnd {
        id: String,
    },

    ToolInputStart {
        id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        #[serde(default, rename = "providerExecuted")]
        provider_executed: bool,
    },
    ToolInputDelta {
        id: String,
        delta: String,
    },
    ToolInputEnd {
        id: String,
    },

    ToolCall(ToolCall),
    ToolResult(ToolResult),
    File(File),
    Source(Source),

    Error {
        error: NormalizerError,
    },

    Finish {
        #[serde(rename = "finishReason")]
        finish_reason: FinishReason,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "rawFinishReason"
        )]
        raw_finish_reason: Option<String>,
        usage: Usage,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<Warning>,
    },

    /// Terminal part emitted instead of `finish` when the consumer cancels.
    Abort,
}

impl StreamPart {
    /// The wire `type` tag of this part.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamPart::StreamStart { .. } => "stream-start",
            StreamPart::ResponseMetadata(_) => "response-metadata",
            StreamPart::Raw { .. } => "raw",
            StreamPart::TextStart { .. } => "text-start",
            StreamPart::TextDelta { .. } => "text-delta",
            StreamPart::TextEnd { .. } => "text-end",
            StreamPart::ReasoningStart { .. } => "reasoning-start",
            StreamPart::ReasoningDelta { .. } => "reasoning-delta",
            StreamPart::ReasoningEnd { .. } => "reasoning-end",
            StreamPart::ToolInputStart { .. } => "tool-input-start",
            StreamPart::ToolInputDelta { .. } => "tool-input-delta",
            StreamPart::ToolInputEnd { .. } => "tool-input-end",
            StreamPart::ToolCall(_) => "tool-call",
            StreamPart::ToolResult(_) => "tool-result",
            StreamPart::File(_) => "file",
            StreamPart::Source(_) => "source",
            StreamPart::Error { .. } => "error",
            StreamPart::Finish { .. } => "finish",
            StreamPart::Abort => "abort",
        }
    }

    /// Block id for block-scoped parts.
    pub fn block_id(&self) -> Option<&str> {
        match self {
            StreamPart::TextStart { id, .. }
            | StreamPart::TextDelta { id, .. }
            | StreamPart::TextEnd { id }
            | StreamPart::ReasoningStart { id, .. }
            | StreamPart::ReasoningDelta { id, .. }
            | StreamPart::ReasoningEnd { id }
            | StreamPart::ToolInputStart { id, .. }
            | StreamPart::ToolInputDelta { id, .. }
            | StreamPart::ToolInputEnd { id } => Some(id),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamPart::Finish { .. } | StreamPart::Abort)
    }

    pub fn error(error: NormalizerError) -> Self {
        StreamPart::Error { error }
    }

    /// Encode this part as an SSE `data: ...\n\n` frame.
    pub fn to_data_sse_bytes(&self) -> Result<Vec<u8>, NormalizerError> {
        let json = serde_json::to_string(self).map_err(|e| {
            NormalizerError::ParseError(format!("Failed to serialize stream part JSON: {e}"))
        })?;
        Ok(format!("data: {json}\n\n").into_bytes())
    }
}
