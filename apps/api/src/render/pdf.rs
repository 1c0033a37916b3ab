//! PDF path: A4 pages, Times-Roman 12pt, 14pt lines, built with `lopdf`.
//!
//! Layout runs first as a pure step (`layout_pages`) so line placement can be
//! tested without decoding PDF streams. The writer adds no dates or IDs, so
//! identical text always produces identical bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::layout::{
    drawn_byte, split_paragraphs, wrap_lines, PageLayout, COVER_LETTER_LAYOUT, TIMES_ROMAN,
};
use crate::render::RenderError;

const FONT_RESOURCE: &str = "F1";

/// One line of text at an absolute baseline position, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Lines on a single page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub lines: Vec<PlacedLine>,
}

/// Places every wrapped line on the page grid.
///
/// The first baseline sits on the top margin. Each line moves down one line
/// height; every paragraph after the first is preceded by one extra line
/// height. A baseline that would fall below the bottom margin moves to the
/// top of a new page.
pub fn layout_pages(text: &str, layout: &PageLayout) -> Vec<PdfPage> {
    let margin = layout.margin_pt();
    let top = layout.page_height_pt - margin;
    let text_width = layout.text_width_pt();

    let mut pages = vec![PdfPage::default()];
    let mut y = top;

    for (i, paragraph) in split_paragraphs(text).into_iter().enumerate() {
        if i > 0 {
            y -= layout.paragraph_spacing_pt;
        }

        for line in wrap_lines(&TIMES_ROMAN, paragraph, layout.font_size_pt, text_width) {
            if y < margin {
                pages.push(PdfPage::default());
                y = top;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    x: margin,
                    y,
                    text: line,
                });
            }
            y -= layout.line_height_pt;
        }
    }

    pages
}

/// Renders letter text to PDF bytes.
pub fn render_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    let layout = &COVER_LETTER_LAYOUT;
    let pages = layout_pages(text, layout);

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => layout.pdf_font,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in &pages {
        let content_id = add_page_content(&mut doc, page, layout)?;
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(layout.page_width_pt),
            Object::Real(layout.page_height_pt),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn add_page_content(
    doc: &mut Document,
    page: &PdfPage,
    layout: &PageLayout,
) -> Result<ObjectId, RenderError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), Object::Real(layout.font_size_pt)],
        ),
    ];

    for line in &page.lines {
        operations.push(Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Real(line.x),
                Object::Real(line.y),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ));
    }
    operations.push(Operation::new("ET", vec![]));

    let encoded = Content { operations }
        .encode()
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(doc.add_object(Stream::new(dictionary! {}, encoded)))
}

/// Encodes text for a WinAnsiEncoding simple font. Unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(drawn_byte).collect()
}
