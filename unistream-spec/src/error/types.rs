use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of a [`NormalizerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// A chunk (or a part inside it) could not be decoded or paired.
    Decode,
    /// The provider reported an error inside the stream.
    Provider,
    /// The transport collaborator reported a failure.
    Transport,
    /// The caller used the API incorrectly (configuration, unsupported operation).
    Usage,
}

/// Errors produced while normalizing a provider stream.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NormalizerError {
    /// A raw chunk did not match the provider's chunk shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A provider-executed tool result arrived while no call of its kind was pending.
    #[error("Orphaned tool result: no pending `{kind}` call")]
    OrphanedToolResult { kind: String },

    /// A second call of the same kind arrived before the pending one received its result.
    #[error("Overlapping `{kind}` call: pending call `{pending_id}` never received its result")]
    OverlappingToolCall { kind: String, pending_id: String },

    /// A client tool call could not be assembled.
    #[error("Invalid tool call: {0}")]
    InvalidToolCall(String),

    /// Inline binary data could not be decoded.
    #[error("Invalid file data: {0}")]
    InvalidFileData(String),

    /// The provider reported an error inside the stream.
    #[error("Provider error{}: {message}", code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
    ProviderError {
        code: Option<String>,
        message: String,
    },

    /// The transport collaborator failed (connection drop, non-2xx, malformed frames).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The operation is not supported by this protocol.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl NormalizerError {
    /// Create a provider error with an optional provider code.
    pub fn provider_error(code: Option<impl Into<String>>, message: impl Into<String>) -> Self {
        Self::ProviderError {
            code: code.map(Into::into),
            message: message.into(),
        }
    }

    /// Classify the error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ParseError(_)
            | Self::JsonError(_)
            | Self::OrphanedToolResult { .. }
            | Self::OverlappingToolCall { .. }
            | Self::InvalidToolCall(_)
            | Self::InvalidFileData(_) => ErrorCategory::Decode,
            Self::ProviderError { .. } => ErrorCategory::Provider,
            Self::TransportError(_) => ErrorCategory::Transport,
            Self::UnsupportedOperation(_) | Self::ConfigurationError(_) => ErrorCategory::Usage,
        }
    }

    /// Whether the stream can keep going after this error.
    ///
    /// Decode errors only affect the part that produced them; provider and
    /// transport errors usually mean no more useful content will arrive.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Decode)
    }
}
