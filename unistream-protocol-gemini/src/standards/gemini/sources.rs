//! Gemini grounding chunks to source parts.
//!
//! - `web` chunks become url sources
//! - `retrievedContext` with an http(s) `uri` becomes a url source; any other
//!   `uri` becomes a document whose media type is guessed from the extension
//! - `retrievedContext` carrying only a `fileSearchStore` becomes an
//!   `application/octet-stream` document
//! - `maps` chunks become url sources
//!
//! Duplicates are left in place; the decoder emits each source once per stream.

use super::types::{GroundingChunk, GroundingMetadata};
use unistream_core::SourcePart;

const UNKNOWN_DOCUMENT: &str = "Unknown Document";
const OCTET_STREAM: &str = "application/octet-stream";

fn filename_from_path(path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    path.split('/')
        .rfind(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn guess_media_type(filename: Option<&str>) -> String {
    filename
        .and_then(|name| mime_guess::from_path(name).first_raw())
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

fn is_http(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

fn url_source(uri: Option<&str>, title: Option<&String>) -> Option<SourcePart> {
    let uri = uri.filter(|u| !u.is_empty())?;
    Some(SourcePart::Url {
        url: uri.to_string(),
        title: title.cloned(),
        provider_metadata: None,
    })
}

/// Narrow the grounding chunks of one candidate.
pub fn extract_sources(grounding_metadata: Option<&GroundingMetadata>) -> Vec<SourcePart> {
    let Some(chunks) = grounding_metadata.and_then(|m| m.grounding_chunks.as_ref()) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for chunk in chunks {
        match chunk {
            GroundingChunk::Web { web } => {
                out.extend(url_source(web.uri.as_deref(), web.title.as_ref()));
            }
            GroundingChunk::Maps { maps } => {
                out.extend(url_source(maps.uri.as_deref(), maps.title.as_ref()));
            }
            GroundingChunk::RetrievedContext { retrieved_context: ctx } => {
                let title = || {
                    ctx.title
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_DOCUMENT.to_string())
                };
                match ctx.uri.as_deref().filter(|u| !u.is_empty()) {
                    Some(uri) if is_http(uri) => {
                        out.extend(url_source(Some(uri), ctx.title.as_ref()));
                    }
                    Some(uri) => {
                        let filename = filename_from_path(uri);
                        out.push(SourcePart::Document {
                            media_type: guess_media_type(filename.as_deref()),
                            title: title(),
                            filename,
                            provider_key: None,
                            provider_metadata: None,
                        });
                    }
                    None => {
                        if let Some(store) = ctx.file_search_store.as_deref().filter(|s| !s.is_empty())
                        {
                            out.push(SourcePart::Document {
                                media_type: OCTET_STREAM.to_string(),
                                title: title(),
                                filename: filename_from_path(store),
                                provider_key: None,
                                provider_metadata: None,
                            });
                        }
                    }
                }
            }
            GroundingChunk::Other(value) => {
                tracing::debug!(chunk = %value, "skipping unrecognized grounding chunk");
            }
        }
    }
    out
}
