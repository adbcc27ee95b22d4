use super::{
    File, FinishReason, ProviderMetadata, ResponseMetadata, Source, ToolCall, ToolResult, Usage,
    Warning,
};
use serde::{Deserialize, Serialize};

/// One item of a fully materialized response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentPart {
    Text {
        text: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
    Reasoning {
        text: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
    ToolCall(ToolCall),
    ToolResult(ToolResult),
    File(File),
    Source(Source),
}

/// A complete (non-streaming) generation result.
///
/// Produced either by a protocol's non-streaming parser or by collapsing a
/// drained part stream; both must agree for the same generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    pub content: Vec<ContentPart>,
    pub finish_reason: FinishReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_finish_reason: Option<String>,
    pub usage: Usage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_metadata: Option<ProviderMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl Default for GenerateResult {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            finish_reason: FinishReason::Unknown,
            raw_finish_reason: None,
            usage: Usage::default(),
            provider_metadata: None,
            response: None,
            warnings: Vec::new(),
        }
    }
}

impl GenerateResult {
    /// Append text, extending the trailing text item if there is one.
    ///
    /// A stream delivers consecutive text parts as one block, so the
    /// non-streaming side coalesces them the same way.
    pub fn push_text(&mut self, delta: &str, provider_metadata: Option<ProviderMetadata>) {
        if let Some(ContentPart::Text {
            text,
            provider_metadata: meta,
        }) = self.content.last_mut()
        {
            text.push_str(delta);
            if provider_metadata.is_some() {
                *meta = provider_metadata;
            }
            return;
        }
        self.content.push(ContentPart::Text {
            text: delta.to_string(),
            provider_metadata,
        });
    }

    /// Reasoning counterpart of [`GenerateResult::push_text`].
    pub fn push_reasoning(&mut self, delta: &str, provider_metadata: Option<ProviderMetadata>) {
        if let Some(ContentPart::Reasoning {
            text,
            provider_metadata: meta,
        }) = self.content.last_mut()
        {
            text.push_str(delta);
            if provider_metadata.is_some() {
                *meta = provider_metadata;
            }
            return;
        }
        self.content.push(ContentPart::Reasoning {
            text: delta.to_string(),
            provider_metadata,
        });
    }

    /// All text items concatenated.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                ContentPart::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All reasoning items concatenated.
    pub fn reasoning_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                ContentPart::Reasoning { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.content
            .iter()
            .filter_map(|c| match c {
                ContentPart::ToolCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn sources(&self) -> Vec<&Source> {
        self.content
            .iter()
            .filter_map(|c| match c {
                ContentPart::Source(src) => Some(src),
                _ => None,
            })
            .collect()
    }
}
