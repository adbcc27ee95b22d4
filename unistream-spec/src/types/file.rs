use base64::Engine;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::error::NormalizerError;

/// Inline binary content produced by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub media_type: String,
    pub data: FileData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FileData {
    Base64(String),
    Bytes(Vec<u8>),
}

impl File {
    pub fn from_bytes(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            data: FileData::Bytes(bytes),
        }
    }

    /// Decode inline base64 into a byte-backed file.
    pub fn from_base64(media_type: impl Into<String>, b64: &str) -> Result<Self, NormalizerError> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(b64)?;
        Ok(Self::from_bytes(media_type, bytes))
    }
}

impl FileData {
    pub fn bytes(&self) -> Result<Cow<'_, [u8]>, NormalizerError> {
        match self {
            FileData::Bytes(b) => Ok(Cow::Borrowed(b)),
            FileData::Base64(s) => Ok(Cow::Owned(
                base64::engine::general_purpose::STANDARD.decode(s)?,
            )),
        }
    }
}
