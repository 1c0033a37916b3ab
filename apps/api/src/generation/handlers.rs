//! Axum route handler for the Generate action.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::application::{parse_application_form, validate};
use crate::errors::AppError;
use crate::generation::generator::generate_cover_letter;
use crate::render::OutputFormat;
use crate::session::handlers::{download_options, DownloadOption};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub letter: String,
    pub format: OutputFormat,
    pub downloads: Vec<DownloadOption>,
}

/// POST /api/v1/sessions/:id/generate
///
/// Validate → prompt → upload/generate/delete → store letter in the session.
/// A validation failure changes nothing. A generation failure leaves the
/// previously stored letter in place.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let session = state.sessions.get(id)?;

    let form = parse_application_form(multipart, state.config.max_resume_bytes).await?;
    let (request, credential) = validate(form, session.credential.as_ref())?;

    let _busy = state.sessions.begin_generation(id)?;
    state.sessions.store_credential(id, credential.clone())?;

    info!(
        "Generating cover letter for session {id} (resume: {} bytes)",
        request.resume.len()
    );
    let letter = generate_cover_letter(state.backend.as_ref(), &credential, &request).await?;

    state.sessions.store_letter(id, letter)?;
    let session = state.sessions.get(id)?;

    Ok(Json(GenerateResponse {
        downloads: download_options(id, &session),
        format: session.format,
        letter: session.letter,
    }))
}
