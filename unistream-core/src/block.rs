//! Text/reasoning block lifecycle.
//!
//! The tracker exposes only two ways to change block state,
//! [`BlockTracker::ensure_open`] and [`BlockTracker::close_if_open`], so the
//! "one open block at a time" rule cannot be bypassed by callers.

use unistream_spec::{ProviderMetadata, StreamPart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Text,
    Reasoning,
}

impl BlockKind {
    pub fn other(self) -> Self {
        match self {
            BlockKind::Text => BlockKind::Reasoning,
            BlockKind::Reasoning => BlockKind::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Reasoning => "reasoning",
        }
    }
}

#[derive(Debug, Default)]
pub struct BlockTracker {
    text: Option<String>,
    reasoning: Option<String>,
    next_block_id: u64,
}

impl BlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: BlockKind) -> &mut Option<String> {
        match kind {
            BlockKind::Text => &mut self.text,
            BlockKind::Reasoning => &mut self.reasoning,
        }
    }

    /// Id of the open block of `kind`, if any.
    pub fn open_id(&self, kind: BlockKind) -> Option<&str> {
        match kind {
            BlockKind::Text => self.text.as_deref(),
            BlockKind::Reasoning => self.reasoning.as_deref(),
        }
    }

    pub fn is_open(&self, kind: BlockKind) -> bool {
        self.open_id(kind).is_some()
    }

    /// Make sure a block of `kind` is open and return its id.
    ///
    /// Closes the competing kind first. `provider_metadata` is attached to the
    /// `*-start` part when a new block is opened.
    pub fn ensure_open(
        &mut self,
        kind: BlockKind,
        provider_metadata: Option<ProviderMetadata>,
        out: &mut Vec<StreamPart>,
    ) -> String {
        self.close_if_open(kind.other(), out);

        if let Some(id) = self.open_id(kind) {
            return id.to_string();
        }

        let id = self.next_block_id.to_string();
        self.next_block_id += 1;
        tracing::trace!(block_id = %id, kind = kind.as_str(), "open block");

        out.push(match kind {
            BlockKind::Text => StreamPart::TextStart {
                id: id.clone(),
                provider_metadata,
            },
            BlockKind::Reasoning => StreamPart::ReasoningStart {
                id: id.clone(),
                provider_metadata,
            },
        });
        *self.slot(kind) = Some(id.clone());
        id
    }

    /// Emit `*-end` for the open block of `kind`, if there is one.
    pub fn close_if_open(&mut self, kind: BlockKind, out: &mut Vec<StreamPart>) {
        let Some(id) = self.slot(kind).take() else {
            return;
        };
        tracing::trace!(block_id = %id, kind = kind.as_str(), "close block");
        out.push(match kind {
            BlockKind::Text => StreamPart::TextEnd { id },
            BlockKind::Reasoning => StreamPart::ReasoningEnd { id },
        });
    }

    /// Close text, then reasoning.
    pub fn close_all(&mut self, out: &mut Vec<StreamPart>) {
        self.close_if_open(BlockKind::Text, out);
        self.close_if_open(BlockKind::Reasoning, out);
    }
}
