//! Error handling types for unistream.
//!
//! This module is intentionally dependency-light and shared across crates.
//! Errors raised while normalizing a stream are never thrown out of the
//! normalizer; they travel in-band as `StreamPart::Error`, which is why the
//! type is `Clone` and serializable.

mod conversions;
mod types;

pub use types::*;
