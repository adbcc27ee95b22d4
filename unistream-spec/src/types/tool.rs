use super::ProviderMetadata;
use serde::{Deserialize, Serialize};

/// A complete tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    pub tool_call_id: String,
    pub tool_name: String,
    /// Stringified JSON tool arguments.
    pub input: String,
    /// `true` when the tool runs inside the provider's infrastructure.
    #[serde(default)]
    pub provider_executed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_metadata: Option<ProviderMetadata>,
}

impl ToolCall {
    /// Parse `input` as JSON.
    pub fn input_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.input)
    }
}

/// Result of a provider-executed tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_call_id: String,
    pub tool_name: String,
    pub result: serde_json::Value,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub provider_executed: bool,
}
