//! Axum route handlers for session lifecycle, format selection and downloads.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::application::Credential;
use crate::errors::AppError;
use crate::render::{render, OutputFormat};
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub format: OutputFormat,
}

/// One downloadable rendering of the current letter.
#[derive(Debug, Serialize)]
pub struct DownloadOption {
    pub format: OutputFormat,
    pub label: &'static str,
    pub file_name: String,
    pub media_type: &'static str,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub letter: String,
    pub format: OutputFormat,
    pub has_credential: bool,
    pub generating: bool,
    pub downloads: Vec<DownloadOption>,
}

impl SessionView {
    pub fn new(session_id: Uuid, session: &Session) -> Self {
        Self {
            session_id,
            letter: session.letter.clone(),
            format: session.format,
            has_credential: session.credential.is_some(),
            generating: session.is_generating(),
            downloads: download_options(session_id, session),
        }
    }
}

#[derive(Deserialize)]
pub struct CredentialRequest {
    pub api_key: String,
}

#[derive(Deserialize)]
pub struct FormatRequest {
    pub format: OutputFormat,
}

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub format: Option<OutputFormat>,
}

/// Both formats once a letter exists; nothing before.
pub fn download_options(session_id: Uuid, session: &Session) -> Vec<DownloadOption> {
    if !session.has_letter() {
        return Vec::new();
    }
    OutputFormat::ALL
        .iter()
        .map(|format| DownloadOption {
            format: *format,
            label: format.label(),
            file_name: format.file_name(),
            media_type: format.media_type(),
            url: format!(
                "/api/v1/sessions/{session_id}/download?format={}",
                format.extension()
            ),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create();
    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id,
            format: OutputFormat::default(),
        }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id)?;
    Ok(Json(SessionView::new(id, &session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.end(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/credential
///
/// Stores the API key in session memory only.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CredentialRequest>,
) -> Result<StatusCode, AppError> {
    let credential = Credential::new(&request.api_key)
        .ok_or_else(|| AppError::Validation("api_key cannot be empty".to_string()))?;
    state.sessions.store_credential(id, credential)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/format
///
/// Changes the selected format. The letter is not regenerated.
pub async fn handle_select_format(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FormatRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.select_format(id, request.format)?;
    Ok(Json(SessionView::new(id, &session)))
}

/// GET /api/v1/sessions/:id/download
///
/// Renders the stored letter in the selected format. A `format` query
/// parameter updates the selection first.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let session = match query.format {
        Some(format) => state.sessions.select_format(id, format)?,
        None => state.sessions.get(id)?,
    };

    if !session.has_letter() {
        return Err(AppError::NotFound(
            "No cover letter has been generated for this session yet".to_string(),
        ));
    }

    let format = session.format;
    let letter = session.letter;
    let document = tokio::task::spawn_blocking(move || render(&letter, format))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    info!(
        "Serving {} download for session {id} ({} bytes)",
        format.label(),
        document.bytes.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, document.media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.file_name),
            ),
        ],
        document.bytes,
    )
        .into_response())
}
