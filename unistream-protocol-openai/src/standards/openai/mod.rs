//! OpenAI chat-completions standard.

pub mod errors;
pub mod finish;
pub mod json_response;
pub mod streaming;
pub mod types;

pub use errors::provider_error_from_envelope;
pub use finish::map_openai_finish_reason;
pub use streaming::OpenAiCompatibleProtocol;
