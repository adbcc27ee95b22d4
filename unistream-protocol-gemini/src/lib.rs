//! unistream-protocol-gemini
//!
//! Google Gemini protocol standard for unistream: `streamGenerateContent`
//! chunk narrowing, the Gemini finish-reason vocabulary, grounding sources,
//! and the non-streaming `generateContent` parser.
#![deny(unsafe_code)]

// Re-export the provider-agnostic core modules required by the protocol implementation.
pub use unistream_core::{self as core, spec};

pub mod standards;

pub use standards::gemini::GeminiProtocol;
