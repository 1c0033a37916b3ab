//! DOCX path: A4 (8.27" × 11.69"), Times New Roman 12pt, built with `docx-rs`.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, LineSpacingType, PageMargin, Paragraph, Run,
    RunFonts,
};

use crate::layout::{split_paragraphs, PageLayout, COVER_LETTER_LAYOUT};
use crate::render::RenderError;

/// Renders letter text to DOCX bytes.
///
/// Paragraphs are trimmed and blank ones skipped. All paragraphs get exact
/// line spacing and space-after; the last one emitted gets no space-after.
pub fn render_docx(text: &str) -> Result<Vec<u8>, RenderError> {
    let layout = &COVER_LETTER_LAYOUT;
    let margin = PageLayout::inches_to_twips(layout.margin_in) as i32;
    let half_points = (layout.font_size_pt * 2.0).round() as usize;

    let mut docx = Docx::new()
        .page_size(
            PageLayout::inches_to_twips(layout.page_width_in),
            PageLayout::inches_to_twips(layout.page_height_in),
        )
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        .default_fonts(
            RunFonts::new()
                .ascii(layout.docx_font)
                .hi_ansi(layout.docx_font)
                .cs(layout.docx_font),
        )
        .default_size(half_points);

    let paragraphs: Vec<&str> = split_paragraphs(text)
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let last = paragraphs.len().saturating_sub(1);
    for (i, paragraph) in paragraphs.iter().enumerate() {
        let space_after = if i == last {
            0
        } else {
            PageLayout::points_to_twips(layout.paragraph_spacing_pt)
        };
        docx = docx.add_paragraph(build_paragraph(paragraph, space_after, layout));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn build_paragraph(text: &str, space_after: u32, layout: &PageLayout) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }

    let spacing = LineSpacing::new()
        .line_rule(LineSpacingType::Exact)
        .line(PageLayout::points_to_twips(layout.line_height_pt) as i32)
        .before(0)
        .after(space_after);

    Paragraph::new()
        .add_run(run)
        .align(AlignmentType::Left)
        .line_spacing(spacing)
}
