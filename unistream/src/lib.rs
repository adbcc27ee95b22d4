//! # Unistream - one event stream for every LLM provider
//!
//! Unistream turns the streaming output of heterogeneous chat-completion
//! providers into a single canonical sequence of [`StreamPart`] events: text
//! and reasoning blocks with a balanced lifecycle, tool calls and results
//! paired by id, de-duplicated citations, accumulated usage, and exactly one
//! terminal `finish` (or `abort`).
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,ignore
//! use unistream::prelude::*;
//! use futures::StreamExt;
//!
//! # async fn run(body: impl futures::Stream<Item = Result<Vec<u8>, std::io::Error>> + Send + 'static) {
//! let mut parts = normalize_sse_stream(
//!     GeminiProtocol::new(),
//!     body,
//!     NormalizerConfig::default(),
//! );
//! while let Some(part) = parts.next().await {
//!     if let StreamPart::TextDelta { delta, .. } = &part {
//!         print!("{delta}");
//!     }
//! }
//! # }
//! ```
//!
//! ## Crate layout
//!
//! - `unistream-spec`: canonical vocabulary and the error type
//! - `unistream-core`: provider-agnostic runtime
//! - `unistream-protocol-*`: per-vendor chunk narrowing
//! - `unistream` (this crate): re-exports, helpers and telemetry setup

pub mod stream;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use unistream_core as core;
pub use unistream_spec as spec;

pub use stream::{generate_from_sse, normalize_json_stream, normalize_sse_stream};
pub use unistream_core::{
    CancelHandle, IdGenerator, NormalizerConfig, PartStream, ProviderProtocol, SequentialIds,
    SseJsonStreamConfig, StreamDriver, StreamNormalizer, UuidIds, collapse_parts,
    collapse_stream, new_cancel_handle, reasoning_stream, text_stream,
};
pub use unistream_spec::{
    ContentPart, ErrorCategory, File, FileData, FinishReason, GenerateResult, NormalizerError,
    ResponseMetadata, Source, StreamPart, ToolCall, ToolResult, Usage, Warning,
};

/// Provider protocols enabled at compile time.
pub mod protocol {
    #[cfg(feature = "google")]
    pub mod gemini {
        pub use unistream_protocol_gemini::standards::gemini::*;
    }

    #[cfg(feature = "openai")]
    pub mod openai {
        pub use unistream_protocol_openai::standards::openai::*;
    }
}

#[cfg(feature = "google")]
pub use unistream_protocol_gemini::GeminiProtocol;
#[cfg(feature = "openai")]
pub use unistream_protocol_openai::OpenAiCompatibleProtocol;

/// Commonly used items.
pub mod prelude {
    pub use crate::stream::{generate_from_sse, normalize_json_stream, normalize_sse_stream};
    pub use unistream_core::{
        CancelHandle, NormalizerConfig, PartStream, ProviderProtocol, StreamDriver,
        collapse_stream, reasoning_stream, text_stream,
    };
    pub use unistream_spec::{
        FinishReason, GenerateResult, NormalizerError, Source, StreamPart, ToolCall, ToolResult,
        Usage, Warning,
    };

    #[cfg(feature = "google")]
    pub use unistream_protocol_gemini::GeminiProtocol;
    #[cfg(feature = "openai")]
    pub use unistream_protocol_openai::OpenAiCompatibleProtocol;
}
