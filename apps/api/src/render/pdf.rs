//! PDF writer for a [`LetterLayout`].
//!
//! Blocks are typeset top to bottom onto A4 pages using the static Helvetica
//! metrics; when a line no longer fits above the bottom padding a new page is
//! started. Text is written in WinAnsiEncoding with the standard 14 fonts, so
//! nothing is embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use crate::render::font_metrics::{get_metrics, FontFamily};
use crate::render::layout::{Block, LetterLayout};

/// A4 in points.
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;
pub const PAGE_PADDING_PT: f32 = 30.0;

/// Portion of the font size between the top of a line box and the baseline,
/// on top of the half-leading.
const ASCENT_RATIO: f32 = 0.8;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

fn content_width_pt() -> f32 {
    PAGE_WIDTH_PT - 2.0 * PAGE_PADDING_PT
}

// ────────────────────────────────────────────────────────────────────────────
// Typesetting
// ────────────────────────────────────────────────────────────────────────────

/// Content-stream operations for each page, in order.
struct Typesetter {
    pages: Vec<Vec<Operation>>,
    cursor_y: f32,
}

impl Typesetter {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor_y: PAGE_HEIGHT_PT - PAGE_PADDING_PT,
        }
    }

    fn bottom() -> f32 {
        PAGE_PADDING_PT
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_y = PAGE_HEIGHT_PT - PAGE_PADDING_PT;
    }

    /// Moves the cursor down. Gaps never trigger a page break on their own;
    /// the next line that does not fit does.
    fn advance(&mut self, gap: f32) {
        self.cursor_y = (self.cursor_y - gap).max(Self::bottom());
    }

    fn place_block(&mut self, block: &Block) {
        if let Block::Spacer(height) = block {
            self.advance(*height);
            return;
        }
        let Some(text) = block.text() else {
            return;
        };

        let style = block.style();
        let metrics = get_metrics(style.font);
        let width_pt = content_width_pt();
        let line_box = style.size_pt * style.line_height;

        self.advance(style.margin_top);

        for line in metrics.wrap(text, width_pt / style.size_pt) {
            if self.cursor_y - line_box < Self::bottom() {
                self.new_page();
            }

            let baseline =
                self.cursor_y - (line_box - style.size_pt) / 2.0 - style.size_pt * ASCENT_RATIO;
            let word_spacing = if style.justify && !line.ends_segment && line.gaps > 0 {
                ((width_pt - line.width_em * style.size_pt) / line.gaps as f32).max(0.0)
            } else {
                0.0
            };

            self.current_page().extend(text_operations(
                style.font,
                style.size_pt,
                word_spacing,
                PAGE_PADDING_PT,
                baseline,
                &line.text,
            ));
            self.cursor_y -= line_box;
        }

        self.advance(style.margin_bottom);
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

fn text_operations(
    font: FontFamily,
    size_pt: f32,
    word_spacing: f32,
    x: f32,
    y: f32,
    text: &str,
) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![font.resource_name().into(), Object::Real(size_pt.into())],
        ),
        Operation::new("Tw", vec![Object::Real(word_spacing.into())]),
        Operation::new("Td", vec![Object::Real(x.into()), Object::Real(y.into())]),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

fn typeset(layout: &LetterLayout) -> Vec<Vec<Operation>> {
    let mut typesetter = Typesetter::new();
    for block in layout.blocks() {
        typesetter.place_block(block);
    }
    typesetter.pages
}

// ────────────────────────────────────────────────────────────────────────────
// Text encoding
// ────────────────────────────────────────────────────────────────────────────

/// Encodes text for a WinAnsiEncoding simple font.
///
/// Latin-1 maps directly; common typographic punctuation maps to its
/// Windows-1252 slot; everything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\t' => b' ',
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

/// Renders the layout to PDF bytes.
pub fn write_pdf(layout: &LetterLayout, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_resources = [FontFamily::Helvetica, FontFamily::HelveticaBold]
        .into_iter()
        .map(|font| {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            (font.resource_name(), Object::Reference(font_id))
        })
        .collect::<Vec<_>>();

    let mut fonts = lopdf::Dictionary::new();
    for (name, reference) in font_resources {
        fonts.set(name, reference);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in typeset(layout) {
        let content = Content { operations }
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH_PT.into()),
            Object::Real(PAGE_HEIGHT_PT.into()),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal("coverdraft"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::{ApplicantProfile, JobTarget};
    use crate::render::layout::compose_letter;
    use chrono::NaiveDate;

    fn layout(body: &str) -> LetterLayout {
        compose_letter(
            body,
            &ApplicantProfile {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
            },
            &JobTarget {
                company_name: "Acme Corp".to_string(),
                position: "Data Analyst".to_string(),
            },
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    fn shown_text(pages: &[Vec<Operation>]) -> Vec<String> {
        pages
            .iter()
            .flatten()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_typeset_emits_blocks_in_order() {
        let pages = typeset(&layout("First paragraph.\n\nSecond paragraph."));
        assert_eq!(pages.len(), 1);
        assert_eq!(
            shown_text(&pages),
            vec![
                "Jane Doe",
                "jane@example.com",
                "555-0100",
                "October 16, 2026",
                "Hiring Manager",
                "Acme Corp",
                "First paragraph.",
                "Second paragraph.",
                "Sincerely,",
                "Jane Doe",
            ]
        );
    }

    #[test]
    fn test_long_letter_flows_onto_more_pages() {
        let body = vec!["This paragraph is long enough to wrap across several lines of the page. ".repeat(8); 20]
            .join("\n\n");
        let pages = typeset(&layout(&body));
        assert!(pages.len() > 1, "expected overflow, got {} page(s)", pages.len());
    }

    #[test]
    fn test_justified_lines_get_word_spacing_except_last() {
        let body = "word ".repeat(120);
        let pages = typeset(&layout(&body));
        let spacings: Vec<f32> = pages[0]
            .iter()
            .filter(|op| op.operator == "Tw")
            .filter_map(|op| match op.operands.first() {
                Some(Object::Real(v)) => Some(*v as f32),
                _ => None,
            })
            .collect();
        // header, date and recipient lines come first and are never stretched
        assert!(spacings[..6].iter().all(|s| *s == 0.0));
        assert!(spacings.iter().any(|s| *s > 0.0));
    }

    #[test]
    fn test_typed_spacing_reaches_content_stream() {
        let pages = typeset(&layout("Dear Hiring Manager,\n\nI  *really*  want this job!"));
        assert!(shown_text(&pages).contains(&"I  *really*  want this job!".to_string()));
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Café"), b"Caf\xE9".to_vec());
        assert_eq!(encode_win_ansi("it’s — “ok”"), b"it\x92s \x97 \x93ok\x94".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_write_pdf_produces_loadable_document() {
        let bytes = write_pdf(&layout("Dear Hiring Manager,\n\nI am excited."), "Cover Letter").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
