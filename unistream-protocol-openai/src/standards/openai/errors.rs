use serde_json::Value;
use unistream_core::spec::NormalizerError;

/// Build a provider error from the OpenAI error envelope.
///
/// OpenAI-style APIs send `{ "error": { "message": "...", "type": "...", "code": "..." } }`,
/// both as an HTTP body and, for some vendors, as an in-stream chunk. `code`
/// wins over `type`; numeric codes are stringified.
pub fn provider_error_from_envelope(error: &Value) -> NormalizerError {
    let Some(obj) = error.as_object() else {
        return NormalizerError::provider_error(None::<String>, error.to_string());
    };

    let message = obj
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown error");
    let code = obj
        .get("code")
        .and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .or_else(|| obj.get("type").and_then(|v| v.as_str()).map(str::to_string));

    NormalizerError::provider_error(code, message)
}
