//! Cover letter generation: one upload, one generation call, one delete.
//!
//! Flow: upload resume → generateContent(file, prompt) → delete uploaded file.
//!
//! The delete runs whenever the upload succeeded, whatever the generation
//! outcome. A failed delete is reported, never reconciled later. No retries.

use tracing::{info, warn};

use crate::application::{ApplicationRequest, Credential, ResumeFile};
use crate::generation::prompts::build_prompt;
use crate::llm_client::{GenerationBackend, LlmError};

/// Builds the prompt for `request` and runs the full generation pipeline.
pub async fn generate_cover_letter(
    backend: &dyn GenerationBackend,
    credential: &Credential,
    request: &ApplicationRequest,
) -> Result<String, LlmError> {
    let prompt = build_prompt(
        &request.job_title,
        &request.company_name,
        &request.job_description,
        &request.platform,
        &request.recipient_name,
    );
    generate_letter(backend, credential, &request.resume, &prompt).await
}

/// Upload → generate → delete against `backend`.
///
/// Error precedence: upload error, then generation error, then delete error.
/// Whitespace-only text counts as `LlmError::EmptyContent`.
pub async fn generate_letter(
    backend: &dyn GenerationBackend,
    credential: &Credential,
    resume: &ResumeFile,
    prompt: &str,
) -> Result<String, LlmError> {
    let file = backend.upload(credential, resume).await?;

    let generated = backend
        .generate(credential, &file, prompt)
        .await
        .and_then(|text| {
            if text.trim().is_empty() {
                Err(LlmError::EmptyContent)
            } else {
                Ok(text)
            }
        });

    let deleted = backend.delete(credential, &file).await;

    match (generated, deleted) {
        (Ok(text), Ok(())) => {
            info!("Generated cover letter ({} characters)", text.len());
            Ok(text)
        }
        (Ok(_), Err(delete_err)) => {
            warn!("Generated letter discarded: uploaded file {} could not be deleted", file.name);
            Err(delete_err)
        }
        (Err(generate_err), Ok(())) => Err(generate_err),
        (Err(generate_err), Err(delete_err)) => {
            warn!("Failed to delete uploaded file {} after generation error: {delete_err}", file.name);
            Err(generate_err)
        }
    }
}
