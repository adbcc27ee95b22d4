//! unistream-spec
//!
//! Canonical, provider-agnostic stream vocabulary for unistream.
//!
//! This crate intentionally contains only *spec-level* types: the stream part
//! union, finish reasons, usage, sources, tool calls and the shared error type.
//! Decoding, block tracking and stream driving live in `unistream-core`, and
//! vendor wire formats live in the `unistream-protocol-*` crates.
#![deny(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{ErrorCategory, NormalizerError};
pub use types::*;
