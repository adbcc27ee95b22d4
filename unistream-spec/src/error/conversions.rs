//! Type Conversions for NormalizerError
//!
//! This module contains From trait implementations for converting
//! common error types into NormalizerError.

use super::types::NormalizerError;

impl From<serde_json::Error> for NormalizerError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<base64::DecodeError> for NormalizerError {
    fn from(err: base64::DecodeError) -> Self {
        Self::InvalidFileData(err.to_string())
    }
}
