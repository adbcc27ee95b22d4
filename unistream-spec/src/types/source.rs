use super::ProviderMetadata;
use serde::{Deserialize, Serialize};

/// A citation emitted at most once per stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "sourceType", rename_all = "lowercase")]
pub enum Source {
    Url {
        id: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
    Document {
        id: String,
        #[serde(rename = "mediaType")]
        media_type: String,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            rename = "providerMetadata"
        )]
        provider_metadata: Option<ProviderMetadata>,
    },
}

impl Source {
    pub fn id(&self) -> &str {
        match self {
            Source::Url { id, .. } | Source::Document { id, .. } => id,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Source::Url { url, .. } => Some(url),
            Source::Document { .. } => None,
        }
    }
}
