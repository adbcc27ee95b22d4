//! unistream-core
//!
//! Provider-agnostic runtime that turns a provider's raw chunk stream into the
//! canonical [`StreamPart`](unistream_spec::StreamPart) sequence.
//!
//! Data flows one way:
//!
//! ```text
//! transport -> ProviderProtocol::narrow -> ChunkDecoder -> StreamNormalizer -> StreamDriver -> caller
//! ```
//!
//! Vendor JSON shapes are handled entirely inside `ProviderProtocol`
//! implementations (see the `unistream-protocol-*` crates); everything in this
//! crate works on the internal [`RawChunk`] / [`Part`] union.
#![deny(unsafe_code)]

pub mod accumulator;
pub mod block;
pub mod cancel;
pub mod collapse;
pub mod config;
pub mod correlation;
pub mod decoder;
pub mod driver;
pub mod finish;
pub mod ids;
pub mod normalizer;
pub mod part;
pub mod protocol;
pub mod sse;
pub mod tool_input;

pub use accumulator::{UsageAccumulator, UsageSnapshot};
pub use block::{BlockKind, BlockTracker};
pub use cancel::{CancelHandle, new_cancel_handle};
pub use collapse::{collapse_parts, collapse_stream, reasoning_stream, text_stream};
pub use config::NormalizerConfig;
pub use correlation::{CorrelationStore, PendingCall};
pub use decoder::{ChunkDecoder, SessionState};
pub use driver::{PartStream, StreamDriver};
pub use finish::resolve_finish_reason;
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use normalizer::{NormalizerState, StreamNormalizer};
pub use part::{Part, RawChunk, SourcePart, TerminalStatus};
pub use protocol::ProviderProtocol;
pub use sse::{JsonValueStream, SseJsonStreamConfig, sse_json_values};
pub use tool_input::ToolInputAssembler;

/// Re-export of the canonical vocabulary.
pub use unistream_spec as spec;
