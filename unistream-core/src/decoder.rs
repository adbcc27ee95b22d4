//! Chunk decoding.
//!
//! [`ChunkDecoder::decode`] maps one narrowed chunk to canonical parts. All
//! state it needs lives in [`SessionState`], which the normalizer owns and
//! passes in explicitly.

use crate::accumulator::UsageAccumulator;
use crate::block::{BlockKind, BlockTracker};
use crate::correlation::{CorrelationStore, PendingCall};
use crate::ids::IdGenerator;
use crate::part::{Part, RawChunk, SourcePart, TerminalStatus};
use crate::tool_input::ToolInputAssembler;
use std::sync::Arc;
use unistream_spec::{File, NormalizerError, Source, StreamPart, ToolCall, ToolResult};

/// Mutable per-stream state consulted by the decoder.
#[derive(Debug)]
pub struct SessionState {
    pub blocks: BlockTracker,
    pub correlation: CorrelationStore,
    pub accumulator: UsageAccumulator,
    pub tool_inputs: ToolInputAssembler,
    /// Whether a client-side tool call was emitted.
    pub has_tool_calls: bool,
    response_metadata_sent: bool,
    tool_seq: u64,
    source_seq: u64,
    ids: Arc<dyn IdGenerator>,
}

impl SessionState {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            blocks: BlockTracker::new(),
            correlation: CorrelationStore::new(),
            accumulator: UsageAccumulator::new(),
            tool_inputs: ToolInputAssembler::new(),
            has_tool_calls: false,
            response_metadata_sent: false,
            tool_seq: 0,
            source_seq: 0,
            ids,
        }
    }

    pub fn next_tool_call_id(&mut self) -> String {
        let id = self.ids.tool_call_id(self.tool_seq);
        self.tool_seq += 1;
        id
    }

    fn next_source_id(&mut self) -> String {
        let id = self.ids.source_id(self.source_seq);
        self.source_seq += 1;
        id
    }
}

/// Stateless decoder over [`SessionState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkDecoder;

impl ChunkDecoder {
    /// Decode one chunk, appending canonical parts to `out`.
    ///
    /// Returns the chunk's terminal status, if it carried one. `finish` is
    /// never emitted here.
    pub fn decode(
        &self,
        chunk: RawChunk,
        state: &mut SessionState,
        out: &mut Vec<StreamPart>,
    ) -> Option<TerminalStatus> {
        let RawChunk {
            parts,
            sources,
            usage,
            provider_metadata,
            response_metadata,
            terminal,
        } = chunk;

        if let Some(meta) = response_metadata
            && !state.response_metadata_sent
            && !meta.is_empty()
        {
            state.response_metadata_sent = true;
            out.push(StreamPart::ResponseMetadata(meta));
        }

        for part in parts {
            self.decode_part(part, state, out);
        }

        for source in sources {
            self.decode_source(source, state, out);
        }

        if let Some(usage) = usage {
            state.accumulator.merge_usage(&usage);
        }
        if let Some(meta) = provider_metadata {
            state.accumulator.merge_provider_metadata(meta);
        }

        if let Some(terminal) = &terminal
            && let Some(error) = &terminal.error
        {
            tracing::debug!(error = %error, "terminal chunk carried an error");
            out.push(StreamPart::error(error.clone()));
        }

        terminal
    }

    fn decode_part(&self, part: Part, state: &mut SessionState, out: &mut Vec<StreamPart>) {
        match part {
            Part::Text {
                text,
                provider_metadata,
            } => {
                if text.is_empty() {
                    return;
                }
                let id = state
                    .blocks
                    .ensure_open(BlockKind::Text, provider_metadata.clone(), out);
                out.push(StreamPart::TextDelta {
                    id,
                    delta: text,
                    provider_metadata,
                });
            }
            Part::Reasoning {
                text,
                provider_metadata,
            } => {
                if text.is_empty() {
                    return;
                }
                let id =
                    state
                        .blocks
                        .ensure_open(BlockKind::Reasoning, provider_metadata.clone(), out);
                out.push(StreamPart::ReasoningDelta {
                    id,
                    delta: text,
                    provider_metadata,
                });
            }
            Part::ProviderToolCall {
                kind,
                tool_name,
                input,
            } => {
                let id = state.next_tool_call_id();
                let superseded = state.correlation.register_call(
                    &kind,
                    PendingCall {
                        id: id.clone(),
                        tool_name: tool_name.clone(),
                    },
                );
                if let Some(old) = superseded {
                    tracing::warn!(
                        kind = %kind,
                        call_id = %old.id,
                        "provider tool call superseded before its result arrived"
                    );
                    out.push(StreamPart::error(NormalizerError::OverlappingToolCall {
                        kind: kind.clone(),
                        pending_id: old.id,
                    }));
                }
                let input = match input {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                out.push(StreamPart::ToolCall(ToolCall {
                    tool_call_id: id,
                    tool_name,
                    input,
                    provider_executed: true,
                    provider_metadata: None,
                }));
            }
            Part::ProviderToolResult {
                kind,
                result,
                is_error,
            } => match state.correlation.take_result(&kind) {
                Some(call) => out.push(StreamPart::ToolResult(ToolResult {
                    tool_call_id: call.id,
                    tool_name: call.tool_name,
                    result,
                    is_error,
                    provider_executed: true,
                })),
                None => {
                    tracing::warn!(kind = %kind, "tool result without a pending call");
                    out.push(StreamPart::error(NormalizerError::OrphanedToolResult {
                        kind,
                    }));
                }
            },
            Part::FunctionCall {
                id,
                name,
                arguments,
                provider_metadata,
            } => {
                let id = id.unwrap_or_else(|| state.next_tool_call_id());
                ToolInputAssembler::emit_atomic(id, name, arguments, provider_metadata, out);
                state.has_tool_calls = true;
            }
            Part::FunctionCallDelta {
                index,
                id,
                name,
                arguments_delta,
            } => {
                let SessionState {
                    tool_inputs,
                    tool_seq,
                    ids,
                    ..
                } = state;
                let mut next_id = || {
                    let id = ids.tool_call_id(*tool_seq);
                    *tool_seq += 1;
                    id
                };
                if tool_inputs.push_delta(index, id, name, arguments_delta, &mut next_id, out) {
                    state.has_tool_calls = true;
                }
            }
            Part::InlineData { media_type, data } => {
                match File::from_base64(media_type.clone(), &data) {
                    Ok(file) => out.push(StreamPart::File(file)),
                    Err(err) => {
                        tracing::warn!(media_type = %media_type, error = %err, "undecodable inline data");
                        out.push(StreamPart::error(err));
                    }
                }
            }
        }
    }

    fn decode_source(&self, source: SourcePart, state: &mut SessionState, out: &mut Vec<StreamPart>) {
        if !state.correlation.mark_source(source.dedup_key()) {
            return;
        }
        let id = state.next_source_id();
        out.push(StreamPart::Source(match source {
            SourcePart::Url {
                url,
                title,
                provider_metadata,
            } => Source::Url {
                id,
                url,
                title,
                provider_metadata,
            },
            SourcePart::Document {
                media_type,
                title,
                filename,
                provider_metadata,
                ..
            } => Source::Document {
                id,
                media_type,
                title,
                filename,
                provider_metadata,
            },
        }));
    }
}
