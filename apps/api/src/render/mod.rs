//! Document rendering: letter text → downloadable bytes.
//!
//! Two independent pure paths share `layout::COVER_LETTER_LAYOUT` and
//! `layout::split_paragraphs`. Nothing is cached: every download renders again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod docx;
pub mod pdf;

const FILE_STEM: &str = "Firstname_Lastname_CoverLetter";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("DOCX rendering failed: {0}")]
    Docx(String),
}

/// Downloadable document format. Defaults to PDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Docx,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Pdf, OutputFormat::Docx];

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "PDF",
            OutputFormat::Docx => "DOCX",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn file_name(&self) -> String {
        format!("{FILE_STEM}.{}", self.extension())
    }
}

/// Rendered bytes plus what the download response needs to label them.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub media_type: &'static str,
}

/// Renders `text` in `format`. No fallback to the other format on failure.
pub fn render(text: &str, format: OutputFormat) -> Result<RenderedDocument, RenderError> {
    let bytes = match format {
        OutputFormat::Pdf => pdf::render_pdf(text)?,
        OutputFormat::Docx => docx::render_docx(text)?,
    };

    tracing::debug!("Rendered {} ({} bytes)", format.label(), bytes.len());

    Ok(RenderedDocument {
        bytes,
        file_name: format.file_name(),
        media_type: format.media_type(),
    })
}
