//! Client tool-call input assembly.
//!
//! Two delivery styles are supported:
//! - atomic calls (the whole call arrives in one part): the
//!   `tool-input-start/-delta/-end` triad is synthesized around the input;
//! - incremental calls (argument fragments keyed by `index`): fragments are
//!   accumulated until the text parses as JSON, at which point the input is
//!   closed and a `tool-call` is emitted. Later fragments for that index are
//!   ignored.

use std::collections::BTreeMap;
use unistream_spec::{NormalizerError, ProviderMetadata, StreamPart, ToolCall};

#[derive(Debug)]
enum Slot {
    Active { id: String, name: String, arguments: String },
    Finished,
    Invalid,
}

#[derive(Debug, Default)]
pub struct ToolInputAssembler {
    slots: BTreeMap<u32, Slot>,
}

fn is_parsable_json(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}

impl ToolInputAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a complete call delivered in one piece.
    pub fn emit_atomic(
        id: String,
        name: String,
        arguments: String,
        provider_metadata: Option<ProviderMetadata>,
        out: &mut Vec<StreamPart>,
    ) {
        out.push(StreamPart::ToolInputStart {
            id: id.clone(),
            tool_name: name.clone(),
            provider_executed: false,
        });
        out.push(StreamPart::ToolInputDelta {
            id: id.clone(),
            delta: arguments.clone(),
        });
        out.push(StreamPart::ToolInputEnd { id: id.clone() });
        out.push(StreamPart::ToolCall(ToolCall {
            tool_call_id: id,
            tool_name: name,
            input: arguments,
            provider_executed: false,
            provider_metadata,
        }));
    }

    /// Feed one argument fragment. Returns `true` when a `tool-call` was emitted.
    pub fn push_delta(
        &mut self,
        index: u32,
        id: Option<String>,
        name: Option<String>,
        arguments_delta: Option<String>,
        next_id: &mut dyn FnMut() -> String,
        out: &mut Vec<StreamPart>,
    ) -> bool {
        if !self.slots.contains_key(&index) {
            let Some(name) = name.filter(|n| !n.is_empty()) else {
                tracing::warn!(index, "tool call fragment without a function name");
                out.push(StreamPart::error(NormalizerError::InvalidToolCall(format!(
                    "tool call at index {index}: expected 'function.name' to be a string"
                ))));
                self.slots.insert(index, Slot::Invalid);
                return false;
            };
            let id = id.unwrap_or_else(|| next_id());
            out.push(StreamPart::ToolInputStart {
                id: id.clone(),
                tool_name: name.clone(),
                provider_executed: false,
            });
            self.slots.insert(
                index,
                Slot::Active {
                    id,
                    name,
                    arguments: String::new(),
                },
            );
        }

        let Some(slot) = self.slots.get_mut(&index) else {
            return false;
        };
        let Slot::Active {
            id,
            name,
            arguments,
        } = slot
        else {
            tracing::trace!(index, "ignoring fragment for closed tool call");
            return false;
        };

        if let Some(delta) = arguments_delta.filter(|d| !d.is_empty()) {
            arguments.push_str(&delta);
            out.push(StreamPart::ToolInputDelta {
                id: id.clone(),
                delta,
            });
        }

        if !is_parsable_json(arguments) {
            return false;
        }

        out.push(StreamPart::ToolInputEnd { id: id.clone() });
        let call = ToolCall {
            tool_call_id: std::mem::take(id),
            tool_name: std::mem::take(name),
            input: std::mem::take(arguments),
            provider_executed: false,
            provider_metadata: None,
        };
        tracing::debug!(call_id = %call.tool_call_id, tool = %call.tool_name, "tool call assembled");
        out.push(StreamPart::ToolCall(call));
        *slot = Slot::Finished;
        true
    }

    pub fn has_unfinished(&self) -> bool {
        self.slots.values().any(|s| matches!(s, Slot::Active { .. }))
    }

    /// Close inputs that never became valid JSON.
    ///
    /// Each gets `tool-input-end` followed by an `InvalidToolCall` error when
    /// `report` is set; no `tool-call` is fabricated.
    pub fn close_unfinished(&mut self, report: bool, out: &mut Vec<StreamPart>) {
        for (index, slot) in std::mem::take(&mut self.slots) {
            let Slot::Active {
                id,
                name,
                arguments,
            } = slot
            else {
                continue;
            };
            tracing::warn!(index, call_id = %id, tool = %name, "tool input never completed");
            out.push(StreamPart::ToolInputEnd { id: id.clone() });
            if report {
                out.push(StreamPart::error(NormalizerError::InvalidToolCall(format!(
                    "tool call `{id}` ({name}) ended with unparsable input: {arguments:?}"
                ))));
            }
        }
    }
}
