//! Google Gemini (`generativelanguage` / Vertex AI) protocol.

pub mod finish;
pub mod response;
pub mod sources;
pub mod streaming;
pub mod types;

pub use finish::map_gemini_finish_reason;
pub use streaming::GeminiProtocol;
