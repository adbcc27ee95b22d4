use serde::{Deserialize, Serialize};

/// Token usage reported by a provider.
///
/// Every field is optional: providers report different subsets, and streams
/// often deliver usage piecemeal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_input_tokens: Option<u64>,
}

impl Usage {
    /// Overwrite fields that are present in `fresher`, keeping the rest.
    ///
    /// Providers resend cumulative totals, so values are replaced, never summed.
    pub fn merge_from(&mut self, fresher: &Usage) {
        fn take(slot: &mut Option<u64>, value: Option<u64>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.input_tokens, fresher.input_tokens);
        take(&mut self.output_tokens, fresher.output_tokens);
        take(&mut self.total_tokens, fresher.total_tokens);
        take(&mut self.reasoning_tokens, fresher.reasoning_tokens);
        take(&mut self.cached_input_tokens, fresher.cached_input_tokens);
    }

    pub fn is_empty(&self) -> bool {
        self == &Usage::default()
    }
}
