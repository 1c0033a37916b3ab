//! Gemini access for letter generation.
//!
//! Handlers and the generator only see `GenerationBackend`. `GeminiClient`
//! is the production implementation; tests swap in `testing::StubBackend`.
use async_trait::async_trait;
use thiserror::Error;

use crate::application::{Credential, ResumeFile};

pub mod gemini;
#[cfg(test)]
pub mod testing;

pub use gemini::GeminiClient;

/// The model used for every generation call.
pub const MODEL: &str = "models/gemini-1.5-flash";
pub const TEMPERATURE: f32 = 1.5;
pub const TOP_P: f32 = 0.96;
pub const MAX_OUTPUT_TOKENS: u32 = 600;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("upload session was not granted an upload URL")]
    MissingUploadUrl,

    #[error("prompt was blocked by the generation service: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A file registered with the generation service for the duration of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Resource name, e.g. `files/abc-123`. Used for deletion.
    pub name: String,
    /// URI referenced from the generation request.
    pub uri: String,
    pub mime_type: String,
}

/// Remote capability used by the generation pipeline.
///
/// Carried in `AppState` as `Arc<dyn GenerationBackend>` so tests can swap in a stub.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn upload(
        &self,
        credential: &Credential,
        resume: &ResumeFile,
    ) -> Result<UploadedFile, LlmError>;

    async fn generate(
        &self,
        credential: &Credential,
        file: &UploadedFile,
        prompt: &str,
    ) -> Result<String, LlmError>;

    async fn delete(&self, credential: &Credential, file: &UploadedFile) -> Result<(), LlmError>;
}
