use serde::{Deserialize, Serialize};

/// Non-fatal diagnostic attached to `stream-start` or `finish`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Warning {
    Unsupported {
        feature: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Compatibility {
        feature: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Other {
        message: String,
    },
}

impl Warning {
    pub fn other(message: impl Into<String>) -> Self {
        Warning::Other {
            message: message.into(),
        }
    }
}
