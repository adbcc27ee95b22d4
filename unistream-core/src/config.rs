//! Normalizer configuration.

use crate::ids::{IdGenerator, SequentialIds};
use crate::protocol::ProviderProtocol;
use std::sync::Arc;
use unistream_spec::Warning;

/// Per-stream normalizer options.
///
/// # Example
///
/// ```rust,ignore
/// let config = NormalizerConfig::default()
///     .with_raw_chunks(true)
///     .with_finish_on_terminal_chunk(true);
/// ```
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Echo each provider chunk as a `raw` part before its decoded parts.
    pub include_raw_chunks: bool,
    /// Emit `finish` as soon as a terminal chunk is decoded.
    ///
    /// When `false`, the terminal status is recorded (last one wins), chunks
    /// that follow it are still decoded (usage-only trailers), and `finish`
    /// is emitted when the input is exhausted. `None` follows
    /// [`ProviderProtocol::has_trailing_chunks`](crate::ProviderProtocol::has_trailing_chunks).
    pub finish_on_terminal_chunk: Option<bool>,
    /// Attach a warning to `finish` when the input ended without a terminal chunk.
    pub warn_on_unterminated: bool,
    /// Request-level warnings carried by `stream-start`.
    pub warnings: Vec<Warning>,
    /// Source of tool-call and source ids.
    pub id_generator: Arc<dyn IdGenerator>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            include_raw_chunks: false,
            finish_on_terminal_chunk: None,
            warn_on_unterminated: true,
            warnings: Vec::new(),
            id_generator: Arc::new(SequentialIds),
        }
    }
}

impl NormalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw_chunks(mut self, include: bool) -> Self {
        self.include_raw_chunks = include;
        self
    }

    pub fn with_finish_on_terminal_chunk(mut self, finish: bool) -> Self {
        self.finish_on_terminal_chunk = Some(finish);
        self
    }

    /// Resolved early-finish flag for a protocol.
    pub fn finishes_on_terminal_chunk<P: ProviderProtocol + ?Sized>(&self, protocol: &P) -> bool {
        self.finish_on_terminal_chunk
            .unwrap_or_else(|| !protocol.has_trailing_chunks())
    }

    pub fn with_warn_on_unterminated(mut self, warn: bool) -> Self {
        self.warn_on_unterminated = warn;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_warning(mut self, warning: Warning) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn with_id_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = generator;
        self
    }
}
