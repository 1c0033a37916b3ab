use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

use crate::application::models::{ApplicationForm, ResumeFile};
use crate::errors::AppError;

/// Reads the generate form. Unknown fields are skipped; absent fields stay blank.
///
/// `max_bytes` is the body limit the router enforces; it only shapes the
/// error message when a submission exceeds it.
pub async fn parse_application_form(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<ApplicationForm, AppError> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| form_error(e, max_bytes, "Malformed form submission"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "resume" {
            let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| form_error(e, max_bytes, "Could not read resume upload"))?;
            debug!("Received resume upload '{file_name}' ({} bytes)", bytes.len());
            form.resume = Some(ResumeFile {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }

        let slot = match name.as_str() {
            "job_title" => &mut form.job_title,
            "company_name" => &mut form.company_name,
            "recipient_name" => &mut form.recipient_name,
            "job_description" => &mut form.job_description,
            "platform" => &mut form.platform,
            "api_key" => form.api_key.get_or_insert_with(String::new),
            other => {
                debug!("Ignoring unknown form field '{other}'");
                continue;
            }
        };

        *slot = field
            .text()
            .await
            .map_err(|e| form_error(e, max_bytes, &format!("Could not read field '{name}'")))?;
    }

    Ok(form)
}

fn form_error(error: MultipartError, max_bytes: usize, context: &str) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!(
            "Resume too large: the form may not exceed {max_bytes} bytes"
        ));
    }
    AppError::Validation(format!("{context}: {error}"))
}
