//! Id generation for tool calls and sources.
//!
//! Generators are shared between streams, so they never hold counters: the
//! per-stream sequence number is passed in by the session.

use std::fmt;

pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Id for a tool call the provider did not name.
    fn tool_call_id(&self, seq: u64) -> String;
    /// Id for an emitted source.
    fn source_id(&self, seq: u64) -> String;
}

/// `call_0`, `call_1`, ... and `src_0`, `src_1`, ...
///
/// Deterministic, which keeps fixtures and snapshot tests stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIds;

impl IdGenerator for SequentialIds {
    fn tool_call_id(&self, seq: u64) -> String {
        format!("call_{seq}")
    }

    fn source_id(&self, seq: u64) -> String {
        format!("src_{seq}")
    }
}

/// `call_<uuid v4>` and `src_<uuid v4>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn tool_call_id(&self, _seq: u64) -> String {
        format!("call_{}", uuid::Uuid::new_v4())
    }

    fn source_id(&self, _seq: u64) -> String {
        format!("src_{}", uuid::Uuid::new_v4())
    }
}
