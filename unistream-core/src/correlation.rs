//! Call/result pairing and source deduplication.
//!
//! Provider-executed tools (code execution, for instance) report their
//! invocation and their result as separate parts with no shared id. The store
//! keeps at most one pending call per tool kind; the next result of that
//! kind consumes it.

use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCall {
    pub id: String,
    pub tool_name: String,
}

#[derive(Debug, Default)]
pub struct CorrelationStore {
    pending: BTreeMap<String, PendingCall>,
    seen_sources: HashSet<String>,
}

impl CorrelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `call` as the pending call of `kind`.
    ///
    /// Returns the call it replaced, if one was still waiting for its result.
    pub fn register_call(&mut self, kind: &str, call: PendingCall) -> Option<PendingCall> {
        self.pending.insert(kind.to_string(), call)
    }

    /// Consume the pending call of `kind`.
    pub fn take_result(&mut self, kind: &str) -> Option<PendingCall> {
        self.pending.remove(kind)
    }

    pub fn pending(&self, kind: &str) -> Option<&PendingCall> {
        self.pending.get(kind)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Remove and return every pending call, ordered by kind.
    pub fn drain_pending(&mut self) -> Vec<(String, PendingCall)> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Record a source key. Returns `true` the first time a key is seen.
    pub fn mark_source(&mut self, key: String) -> bool {
        self.seen_sources.insert(key)
    }

    pub fn seen_source_count(&self) -> usize {
        self.seen_sources.len()
    }
}
