//! Non-streaming `chat.completion` parsing.

use super::errors::provider_error_from_envelope;
use super::streaming::{OpenAiCompatibleProtocol, convert_usage};
use super::types::ChatCompletion;
use serde_json::Value;
use unistream_core::spec::{ContentPart, GenerateResult, NormalizerError, ToolCall};
use unistream_core::{ProviderProtocol, TerminalStatus, resolve_finish_reason};

/// Content order follows the stream: reasoning, then text, then tool calls.
pub(crate) fn parse_chat_completion(
    protocol: &OpenAiCompatibleProtocol,
    body: &Value,
) -> Result<GenerateResult, NormalizerError> {
    if let Some(error) = body.get("error") {
        return Err(provider_error_from_envelope(error));
    }
    let completion: ChatCompletion = serde_json::from_value(body.clone()).map_err(|e| {
        NormalizerError::ParseError(format!(
            "invalid {} completion: {e}",
            protocol.provider_id()
        ))
    })?;

    let mut result = GenerateResult {
        response: OpenAiCompatibleProtocol::response_metadata(
            completion.id,
            completion.model,
            completion.created,
        ),
        ..Default::default()
    };

    let choice = completion.choices.into_iter().next();
    let mut has_tool_calls = false;
    let mut terminal = None;

    if let Some(choice) = choice {
        let message = choice.message;
        if let Some(reasoning) = message
            .reasoning_content
            .or(message.reasoning)
            .filter(|r| !r.is_empty())
        {
            result.push_reasoning(&reasoning, None);
        }
        if let Some(text) = message.content.filter(|t| !t.is_empty()) {
            result.push_text(&text, None);
        }
        let mut tool_seq = 0u64;
        for call in message.tool_calls.unwrap_or_default() {
            has_tool_calls = true;
            let id = match call.id.filter(|id| !id.is_empty()) {
                Some(id) => id,
                None => {
                    let id = protocol.ids().tool_call_id(tool_seq);
                    tool_seq += 1;
                    id
                }
            };
            result.content.push(ContentPart::ToolCall(ToolCall {
                tool_call_id: id,
                tool_name: call.function.name,
                input: call.function.arguments.unwrap_or_default(),
                provider_executed: false,
                provider_metadata: None,
            }));
        }
        terminal = choice.finish_reason.map(TerminalStatus::reason);
    }

    result.finish_reason = resolve_finish_reason(terminal.as_ref(), has_tool_calls, |raw, tc| {
        protocol.map_finish_reason(raw, tc)
    });
    result.raw_finish_reason = terminal.and_then(|t| t.raw_reason);

    if let Some(usage) = &completion.usage {
        result.usage = convert_usage(usage);
        result.provider_metadata = protocol.usage_metadata(usage);
    }
    Ok(result)
}
