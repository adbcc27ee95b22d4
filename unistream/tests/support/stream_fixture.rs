//! Test fixture utilities: load SSE fixtures and drive them through the facade
#![allow(dead_code)]

use futures_util::StreamExt;
use std::io;
use std::path::{Path, PathBuf};
use unistream::{NormalizerConfig, ProviderProtocol, StreamPart, normalize_sse_stream};

pub type ByteChunks = Vec<Result<Vec<u8>, io::Error>>;

pub fn fixture_path(provider: &str, name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(provider)
        .join(name)
}

/// Load an `.sse` fixture and split it into one byte chunk per SSE event
pub fn load_sse_fixture_as_bytes(path: &Path) -> io::Result<ByteChunks> {
    let raw = std::fs::read_to_string(path)?;
    let normalized = raw.replace("\r\n", "\n");
    let mut out = Vec::new();
    for chunk in normalized.split("\n\n") {
        let s = chunk.trim_end_matches('\n');
        if s.is_empty() {
            continue;
        }
        // Restore the blank line that terminates an SSE event
        let mut owned = String::from(s);
        owned.push_str("\n\n");
        out.push(Ok(owned.into_bytes()));
    }
    Ok(out)
}

pub fn load_json_fixture(path: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(path).expect("read json fixture");
    serde_json::from_str(&raw).expect("valid json fixture")
}

/// Drain a fixture through `normalize_sse_stream`.
pub async fn collect_fixture_parts<P>(
    protocol: P,
    provider: &str,
    name: &str,
    config: NormalizerConfig,
) -> Vec<StreamPart>
where
    P: ProviderProtocol + 'static,
{
    let bytes = load_sse_fixture_as_bytes(&fixture_path(provider, name)).expect("load fixture");
    normalize_sse_stream(protocol, futures_util::stream::iter(bytes), config)
        .collect()
        .await
}

pub fn kinds(parts: &[StreamPart]) -> Vec<&'static str> {
    parts.iter().map(|p| p.kind()).collect()
}

pub fn finish_reason(parts: &[StreamPart]) -> unistream::FinishReason {
    match parts.last() {
        Some(StreamPart::Finish { finish_reason, .. }) => *finish_reason,
        other => panic!("expected finish as the last part, got {other:?}"),
    }
}
