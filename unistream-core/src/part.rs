//! Internal chunk representation.
//!
//! Every provider protocol narrows its vendor JSON into a [`RawChunk`] before
//! the shared decoder sees it. Parts keep the order the provider emitted them
//! in, since that order decides how text, reasoning and tool calls interleave.

use unistream_spec::{NormalizerError, ProviderMetadata, ResponseMetadata, Usage};

/// Tool kind used for provider-executed code execution.
pub const CODE_EXECUTION: &str = "code_execution";

/// One semantic fragment of a chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Plain text.
    Text {
        text: String,
        provider_metadata: Option<ProviderMetadata>,
    },
    /// Text flagged as internal reasoning.
    Reasoning {
        text: String,
        provider_metadata: Option<ProviderMetadata>,
    },
    /// A server-side tool invocation (e.g. code execution).
    ///
    /// Paired with the next [`Part::ProviderToolResult`] of the same `kind`.
    ProviderToolCall {
        kind: String,
        tool_name: String,
        input: serde_json::Value,
    },
    /// Result of the pending server-side call of `kind`.
    ProviderToolResult {
        kind: String,
        result: serde_json::Value,
        is_error: bool,
    },
    /// A client-side function call delivered atomically.
    FunctionCall {
        id: Option<String>,
        name: String,
        /// Stringified JSON arguments.
        arguments: String,
        provider_metadata: Option<ProviderMetadata>,
    },
    /// One fragment of an incrementally streamed client-side function call.
    FunctionCallDelta {
        index: u32,
        id: Option<String>,
        name: Option<String>,
        arguments_delta: Option<String>,
    },
    /// Inline binary data (base64 on the wire).
    InlineData { media_type: String, data: String },
}

/// Grounding/citation entity attached to a chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePart {
    Url {
        url: String,
        title: Option<String>,
        provider_metadata: Option<ProviderMetadata>,
    },
    Document {
        media_type: String,
        title: String,
        filename: Option<String>,
        /// Provider-assigned identity, when the provider has one.
        provider_key: Option<String>,
        provider_metadata: Option<ProviderMetadata>,
    },
}

impl SourcePart {
    /// Key used to emit each source at most once per stream.
    pub fn dedup_key(&self) -> String {
        match self {
            SourcePart::Url { url, .. } => format!("url:{url}"),
            SourcePart::Document {
                provider_key: Some(key),
                ..
            } => key.clone(),
            SourcePart::Document {
                media_type,
                title,
                filename,
                ..
            } => format!(
                "doc:{media_type}:{}:{title}",
                filename.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Terminal status carried by the last chunk of a turn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerminalStatus {
    /// The provider's raw finish reason, verbatim.
    pub raw_reason: Option<String>,
    /// In-stream provider error, if the turn ended with one.
    pub error: Option<NormalizerError>,
}

impl TerminalStatus {
    pub fn reason(raw: impl Into<String>) -> Self {
        Self {
            raw_reason: Some(raw.into()),
            error: None,
        }
    }

    pub fn error(error: NormalizerError) -> Self {
        Self {
            raw_reason: None,
            error: Some(error),
        }
    }
}

/// One provider chunk, narrowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawChunk {
    pub parts: Vec<Part>,
    pub sources: Vec<SourcePart>,
    pub usage: Option<Usage>,
    /// Provider-level metadata to merge into the `finish` part.
    pub provider_metadata: Option<ProviderMetadata>,
    pub response_metadata: Option<ResponseMetadata>,
    pub terminal: Option<TerminalStatus>,
}

impl RawChunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    pub fn with_source(mut self, source: SourcePart) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_terminal(mut self, terminal: TerminalStatus) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Shorthand for a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with_part(Part::Text {
            text: text.into(),
            provider_metadata: None,
        })
    }

    /// Shorthand for a reasoning part.
    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::new().with_part(Part::Reasoning {
            text: text.into(),
            provider_metadata: None,
        })
    }

    /// Shorthand for a content-free terminal chunk.
    pub fn terminal(raw: impl Into<String>) -> Self {
        Self::new().with_terminal(TerminalStatus::reason(raw))
    }
}
