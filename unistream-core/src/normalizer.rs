//! Synchronous stream state machine.
//!
//! `NotStarted -> Streaming -> Finished`. The first input of any kind emits
//! `stream-start`; a terminal chunk (or the end of input) closes every open
//! block and emits exactly one `finish`. Nothing is emitted after that.

use crate::config::NormalizerConfig;
use crate::decoder::{ChunkDecoder, SessionState};
use crate::finish::resolve_finish_reason;
use crate::part::{RawChunk, TerminalStatus};
use crate::protocol::ProviderProtocol;
use unistream_spec::{NormalizerError, StreamPart, Warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizerState {
    NotStarted,
    Streaming,
    Finished,
}

/// Drives one stream through [`ChunkDecoder`].
///
/// Never panics and never returns an error: every failure is emitted as an
/// `error` part in the same output.
#[derive(Debug)]
pub struct StreamNormalizer<P> {
    protocol: P,
    config: NormalizerConfig,
    state: NormalizerState,
    session: SessionState,
    terminal: Option<TerminalStatus>,
    decoder: ChunkDecoder,
}

impl<P: ProviderProtocol> StreamNormalizer<P> {
    pub fn new(protocol: P, config: NormalizerConfig) -> Self {
        let session = SessionState::new(config.id_generator.clone());
        Self {
            protocol,
            config,
            state: NormalizerState::NotStarted,
            session,
            terminal: None,
            decoder: ChunkDecoder,
        }
    }

    pub fn state(&self) -> NormalizerState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == NormalizerState::Finished
    }

    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    fn start(&mut self, out: &mut Vec<StreamPart>) {
        if self.state == NormalizerState::NotStarted {
            self.state = NormalizerState::Streaming;
            out.push(StreamPart::StreamStart {
                warnings: self.config.warnings.clone(),
            });
        }
    }

    /// Narrow and decode one provider JSON chunk.
    pub fn push_value(&mut self, value: serde_json::Value) -> Vec<StreamPart> {
        if self.is_finished() {
            tracing::trace!(provider = self.protocol.provider_id(), "chunk after finish dropped");
            return Vec::new();
        }
        let mut out = Vec::new();
        self.start(&mut out);

        let narrowed = self.protocol.narrow(&value);
        if self.config.include_raw_chunks {
            out.push(StreamPart::Raw { raw_value: value });
        }
        match narrowed {
            Ok(chunk) => self.decode_into(chunk, &mut out),
            Err(err) => {
                tracing::warn!(provider = self.protocol.provider_id(), error = %err, "chunk could not be narrowed");
                out.push(StreamPart::error(err));
            }
        }
        out
    }

    /// Decode an already narrowed chunk.
    pub fn push_chunk(&mut self, chunk: RawChunk) -> Vec<StreamPart> {
        if self.is_finished() {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.start(&mut out);
        self.decode_into(chunk, &mut out);
        out
    }

    /// Report a failure delivered by the input instead of a chunk.
    ///
    /// Decode-level errors only produce an `error` part. Transport and
    /// provider errors also end the turn with finish reason `error`.
    pub fn push_error(&mut self, error: NormalizerError) -> Vec<StreamPart> {
        if self.is_finished() {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.start(&mut out);
        tracing::warn!(provider = self.protocol.provider_id(), error = %error, "input error");
        if error.is_recoverable() {
            out.push(StreamPart::error(error));
            return out;
        }
        self.decode_into(
            RawChunk::new().with_terminal(TerminalStatus::error(error)),
            &mut out,
        );
        out
    }

    fn decode_into(&mut self, chunk: RawChunk, out: &mut Vec<StreamPart>) {
        tracing::trace!(
            provider = self.protocol.provider_id(),
            parts = chunk.parts.len(),
            sources = chunk.sources.len(),
            "decode chunk"
        );
        let Some(terminal) = self.decoder.decode(chunk, &mut self.session, out) else {
            return;
        };
        // An earlier terminal error keeps the turn failed.
        let failed_before =
            self.terminal.as_ref().is_some_and(|t| t.error.is_some()) && terminal.error.is_none();
        if !failed_before {
            self.terminal = Some(terminal);
        }
        if self.config.finishes_on_terminal_chunk(&self.protocol) {
            self.finalize(out);
        }
    }

    /// Input exhausted: close everything and emit `finish`.
    pub fn finish(&mut self) -> Vec<StreamPart> {
        if self.is_finished() {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.start(&mut out);
        self.finalize(&mut out);
        out
    }

    /// Consumer cancelled: close everything and emit `abort` instead of `finish`.
    pub fn abort(&mut self) -> Vec<StreamPart> {
        if self.is_finished() {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.start(&mut out);
        self.session.blocks.close_all(&mut out);
        self.session.tool_inputs.close_unfinished(false, &mut out);
        self.state = NormalizerState::Finished;
        tracing::debug!(provider = self.protocol.provider_id(), "stream aborted");
        out.push(StreamPart::Abort);
        out
    }

    fn finalize(&mut self, out: &mut Vec<StreamPart>) {
        self.session.blocks.close_all(out);
        self.session.tool_inputs.close_unfinished(true, out);

        let snapshot = self.session.accumulator.snapshot();
        let has_tool_calls = self.session.has_tool_calls;
        let protocol = &self.protocol;
        let finish_reason = resolve_finish_reason(self.terminal.as_ref(), has_tool_calls, |raw, tools| {
            protocol.map_finish_reason(raw, tools)
        });

        let mut warnings = Vec::new();
        if self.terminal.is_none() {
            tracing::warn!(provider = protocol.provider_id(), "stream ended without a terminal chunk");
            if self.config.warn_on_unterminated {
                warnings.push(Warning::other(
                    "stream ended without a terminal status; finish reason is unknown",
                ));
            }
        }
        for (kind, call) in self.session.correlation.drain_pending() {
            tracing::warn!(
                provider = protocol.provider_id(),
                kind = %kind,
                call_id = %call.id,
                "provider tool call never received its result"
            );
            warnings.push(Warning::other(format!(
                "{kind} call `{}` never received its result",
                call.id
            )));
        }

        tracing::debug!(
            provider = protocol.provider_id(),
            finish_reason = %finish_reason,
            raw_status = ?self.terminal.as_ref().and_then(|t| t.raw_reason.as_deref()),
            "finish"
        );
        out.push(StreamPart::Finish {
            finish_reason,
            raw_finish_reason: self.terminal.as_ref().and_then(|t| t.raw_reason.clone()),
            usage: snapshot.usage,
            provider_metadata: snapshot.provider_metadata,
            warnings,
        });
        self.state = NormalizerState::Finished;
    }
}
