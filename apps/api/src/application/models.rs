use std::fmt;

use bytes::Bytes;

/// Recipient used in the prompt when the form leaves the name blank.
pub const DEFAULT_RECIPIENT: &str = "Hiring Manager";

const PDF_MEDIA_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Raw form submission, exactly as the user filled it in.
///
/// Every field may be blank; `validation::validate` turns this into an
/// `ApplicationRequest` or a warning.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub job_title: String,
    pub company_name: String,
    pub recipient_name: String,
    pub job_description: String,
    pub platform: String,
    pub resume: Option<ResumeFile>,
    pub api_key: Option<String>,
}

/// A validated application. Only `validation::validate` constructs one, so
/// holding a value means every required field was present.
#[derive(Debug, Clone)]
pub struct ApplicationRequest {
    pub job_title: String,
    pub company_name: String,
    pub recipient_name: String,
    pub job_description: String,
    pub platform: String,
    pub resume: ResumeFile,
}

/// The uploaded resume.
#[derive(Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub const MEDIA_TYPE: &'static str = PDF_MEDIA_TYPE;

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Declared as a PDF (content type or extension) and starts with the PDF header.
    pub fn is_pdf(&self) -> bool {
        let declared = self
            .content_type
            .as_deref()
            .map(|ct| ct.eq_ignore_ascii_case(PDF_MEDIA_TYPE))
            .unwrap_or(false)
            || self.file_name.to_ascii_lowercase().ends_with(".pdf");

        declared && self.bytes.starts_with(PDF_MAGIC)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// API key for the generation service. Never printed, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Credential(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
