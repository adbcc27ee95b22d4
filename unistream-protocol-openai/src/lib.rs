//! unistream-protocol-openai
//!
//! OpenAI(-compatible) chat-completions protocol for unistream.
//!
//! Covers the `chat.completion.chunk` stream (including truly incremental
//! tool-call arguments), the OpenAI finish vocabulary, the error envelope, and
//! the non-streaming `chat.completion` parser. Vendors that speak the same
//! wire format (DeepSeek, Groq, xAI, OpenRouter, ...) only differ in their
//! provider id, which also names their provider-metadata namespace.
#![deny(unsafe_code)]

// Re-export the provider-agnostic core modules required by the protocol implementation.
pub use unistream_core::{self as core, spec};

pub mod standards;

pub use standards::openai::OpenAiCompatibleProtocol;
