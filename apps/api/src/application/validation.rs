use crate::application::models::{
    ApplicationForm, ApplicationRequest, Credential, DEFAULT_RECIPIENT,
};
use crate::errors::AppError;

pub const MISSING_FIELDS_WARNING: &str =
    "Please fill in all required fields before generating a cover letter.";

pub const NOT_A_PDF_WARNING: &str = "The resume must be uploaded as a PDF file.";

/// Checks required-field presence and produces the request plus the credential
/// to use for this attempt.
///
/// A key typed into the form wins over one already stored in the session.
/// Nothing is mutated here: the caller decides what to keep once this passes.
pub fn validate(
    form: ApplicationForm,
    stored_credential: Option<&Credential>,
) -> Result<(ApplicationRequest, Credential), AppError> {
    let ApplicationForm {
        job_title,
        company_name,
        recipient_name,
        job_description,
        platform,
        resume,
        api_key,
    } = form;

    let credential = api_key
        .as_deref()
        .and_then(Credential::new)
        .or_else(|| stored_credential.cloned());
    let resume = resume.filter(|file| !file.is_empty());

    let mut missing = Vec::new();
    if job_title.trim().is_empty() {
        missing.push("job title");
    }
    if company_name.trim().is_empty() {
        missing.push("company name");
    }
    if job_description.trim().is_empty() {
        missing.push("job description");
    }
    if resume.is_none() {
        missing.push("resume (PDF)");
    }
    if credential.is_none() {
        missing.push("API key");
    }

    let (Some(resume), Some(credential), true) = (resume, credential, missing.is_empty()) else {
        return Err(AppError::Validation(format!(
            "{MISSING_FIELDS_WARNING} Missing: {}",
            missing.join(", ")
        )));
    };

    if !resume.is_pdf() {
        return Err(AppError::Validation(NOT_A_PDF_WARNING.to_string()));
    }

    let recipient_name = match recipient_name.trim() {
        "" => DEFAULT_RECIPIENT.to_string(),
        name => name.to_string(),
    };

    Ok((
        ApplicationRequest {
            job_title: job_title.trim().to_string(),
            company_name: company_name.trim().to_string(),
            recipient_name,
            job_description: job_description.trim().to_string(),
            platform: platform.trim().to_string(),
            resume,
        },
        credential,
    ))
}
