//! Canonical stream vocabulary.

mod content;
mod event;
mod file;
mod finish;
mod source;
mod tool;
mod usage;
mod warning;

pub use content::{ContentPart, GenerateResult};
pub use event::{ResponseMetadata, StreamPart};
pub use file::{File, FileData};
pub use finish::FinishReason;
pub use source::Source;
pub use tool::{ToolCall, ToolResult};
pub use usage::Usage;
pub use warning::Warning;

/// Provider metadata object keyed by provider name (`{"google": {...}}`).
///
/// Kept permissive to preserve vendor fields for forward compatibility.
pub type ProviderMetadata = serde_json::Map<String, serde_json::Value>;
