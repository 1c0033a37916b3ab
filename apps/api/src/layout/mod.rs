// Page geometry shared by both document renderers.
// All magic numbers for the cover letter page live here; render::pdf and
// render::docx translate them into their own units.

pub mod font_metrics;

pub use font_metrics::{drawn_byte, wrap_lines, TIMES_ROMAN};

const POINTS_PER_INCH: f32 = 72.0;
const TWIPS_PER_POINT: f32 = 20.0;
const TWIPS_PER_INCH: f32 = 1440.0;

/// Fixed layout of a cover letter page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// ISO A4 in points, as used by the PDF path.
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// A4 rounded to two decimals of an inch, as used by the DOCX path.
    pub page_width_in: f32,
    pub page_height_in: f32,
    pub margin_in: f32,
    pub font_size_pt: f32,
    /// Baseline-to-baseline distance.
    pub line_height_pt: f32,
    /// Vertical gap between paragraphs.
    pub paragraph_spacing_pt: f32,
    /// PDF standard Type1 font name.
    pub pdf_font: &'static str,
    /// Word-processor font family name.
    pub docx_font: &'static str,
}

/// A4, 1" margins, Times 12pt on a 14pt line.
pub const COVER_LETTER_LAYOUT: PageLayout = PageLayout {
    page_width_pt: 595.2756,
    page_height_pt: 841.8898,
    page_width_in: 8.27,
    page_height_in: 11.69,
    margin_in: 1.0,
    font_size_pt: 12.0,
    line_height_pt: 14.0,
    paragraph_spacing_pt: 14.0,
    pdf_font: "Times-Roman",
    docx_font: "Times New Roman",
};

impl PageLayout {
    pub fn margin_pt(&self) -> f32 {
        self.margin_in * POINTS_PER_INCH
    }

    /// Usable line width between the left and right margins.
    pub fn text_width_pt(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt()
    }

    pub fn inches_to_twips(inches: f32) -> u32 {
        (inches * TWIPS_PER_INCH).round() as u32
    }

    pub fn points_to_twips(points: f32) -> u32 {
        (points * TWIPS_PER_POINT).round() as u32
    }
}

/// Splits letter text into paragraphs on double line breaks.
///
/// Text with no double line break is exactly one paragraph. Paragraphs are
/// returned untrimmed; each renderer applies its own whitespace rules.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").collect()
}
