//! Letter layout as an ordered list of typed blocks.
//!
//! Each block role has one fixed style. The builder only decides which blocks
//! appear and in what order; the PDF writer decides where they land.

use chrono::NaiveDate;

use crate::models::application::{ApplicantProfile, JobTarget};
use crate::render::font_metrics::FontFamily;

pub const CLOSING_LINE: &str = "Sincerely,";
pub const RECIPIENT_LINE: &str = "Hiring Manager";

/// Vertical gap after the header and before the body.
const SECTION_GAP_PT: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Name(String),
    Contact(String),
    Date(String),
    Recipient(String),
    Spacer(f32),
    Paragraph(String),
    Closing(String),
    Signature(String),
}

/// Typography for one block role. Margins are in points and never collapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    pub font: FontFamily,
    pub size_pt: f32,
    /// Multiple of `size_pt`.
    pub line_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub justify: bool,
}

const BODY_STYLE: BlockStyle = BlockStyle {
    font: FontFamily::Helvetica,
    size_pt: 10.0,
    line_height: 1.2,
    margin_top: 0.0,
    margin_bottom: 0.0,
    justify: false,
};

impl Block {
    pub fn style(&self) -> BlockStyle {
        match self {
            Block::Name(_) => BlockStyle {
                font: FontFamily::HelveticaBold,
                size_pt: 16.0,
                margin_bottom: 5.0,
                ..BODY_STYLE
            },
            Block::Contact(_) | Block::Recipient(_) => BlockStyle {
                margin_bottom: 2.0,
                ..BODY_STYLE
            },
            Block::Date(_) => BlockStyle {
                margin_top: 10.0,
                margin_bottom: 10.0,
                ..BODY_STYLE
            },
            Block::Paragraph(_) => BlockStyle {
                line_height: 1.5,
                margin_bottom: 10.0,
                justify: true,
                ..BODY_STYLE
            },
            Block::Closing(_) => BlockStyle {
                margin_top: 20.0,
                ..BODY_STYLE
            },
            Block::Signature(_) => BlockStyle {
                font: FontFamily::HelveticaBold,
                margin_top: 30.0,
                ..BODY_STYLE
            },
            Block::Spacer(_) => BODY_STYLE,
        }
    }

    /// The text this block prints, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Name(t)
            | Block::Contact(t)
            | Block::Date(t)
            | Block::Recipient(t)
            | Block::Paragraph(t)
            | Block::Closing(t)
            | Block::Signature(t) => Some(t),
            Block::Spacer(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetterLayout {
    blocks: Vec<Block>,
}

impl LetterLayout {
    pub fn builder() -> LetterLayoutBuilder {
        LetterLayoutBuilder { blocks: Vec::new() }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Body paragraphs in render order.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

pub struct LetterLayoutBuilder {
    blocks: Vec<Block>,
}

impl LetterLayoutBuilder {
    pub fn header(mut self, profile: &ApplicantProfile) -> Self {
        self.blocks.push(Block::Name(profile.name.clone()));
        self.blocks.push(Block::Contact(profile.email.clone()));
        self.blocks.push(Block::Contact(profile.phone.clone()));
        self.blocks.push(Block::Spacer(SECTION_GAP_PT));
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.blocks.push(Block::Date(format_letter_date(date)));
        self
    }

    /// Adds the recipient block. Skipped entirely when `company_name` is empty.
    pub fn recipient(mut self, company_name: &str) -> Self {
        if !company_name.is_empty() {
            self.blocks.push(Block::Recipient(RECIPIENT_LINE.to_string()));
            self.blocks.push(Block::Recipient(company_name.to_string()));
        }
        self
    }

    pub fn body(mut self, text: &str) -> Self {
        self.blocks.push(Block::Spacer(SECTION_GAP_PT));
        self.blocks
            .extend(split_paragraphs(text).into_iter().map(Block::Paragraph));
        self
    }

    pub fn signature(mut self, name: &str) -> Self {
        self.blocks.push(Block::Closing(CLOSING_LINE.to_string()));
        self.blocks.push(Block::Signature(name.to_string()));
        self
    }

    pub fn build(self) -> LetterLayout {
        LetterLayout {
            blocks: self.blocks,
        }
    }
}

/// Lays out a full letter in the fixed block order.
pub fn compose_letter(
    text: &str,
    profile: &ApplicantProfile,
    job: &JobTarget,
    date: NaiveDate,
) -> LetterLayout {
    LetterLayout::builder()
        .header(profile)
        .date(date)
        .recipient(&job.company_name)
        .body(text)
        .signature(&profile.name)
        .build()
}

/// Splits text into paragraphs on blank lines.
///
/// A blank line is empty or whitespace-only; any run of them is one boundary.
/// Lines inside a paragraph are kept verbatim and rejoined with `\n`.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

/// "October 16, 2026"
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn job(company: &str) -> JobTarget {
        JobTarget {
            company_name: company.to_string(),
            position: "Analyst".to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 6).unwrap()
    }

    #[test]
    fn test_split_paragraphs_drops_empty_runs() {
        assert_eq!(split_paragraphs("A\n\nB\n\n\nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_split_paragraphs_keeps_single_line_breaks() {
        assert_eq!(
            split_paragraphs("Sincerely,\nJane\n\n\n"),
            vec!["Sincerely,\nJane"]
        );
    }

    #[test]
    fn test_split_paragraphs_handles_crlf_and_blank_whitespace_lines() {
        assert_eq!(split_paragraphs("A\r\n \r\nB"), vec!["A", "B"]);
    }

    #[test]
    fn test_split_paragraphs_of_empty_text() {
        assert!(split_paragraphs("\n\n  \n").is_empty());
    }

    #[test]
    fn test_compose_letter_block_order() {
        let layout = compose_letter("Para one.\n\nPara two.", &profile(), &job("Acme"), date());
        assert_eq!(
            layout.blocks(),
            &[
                Block::Name("Jane Doe".to_string()),
                Block::Contact("jane@example.com".to_string()),
                Block::Contact("555-0100".to_string()),
                Block::Spacer(20.0),
                Block::Date("October 6, 2026".to_string()),
                Block::Recipient("Hiring Manager".to_string()),
                Block::Recipient("Acme".to_string()),
                Block::Spacer(20.0),
                Block::Paragraph("Para one.".to_string()),
                Block::Paragraph("Para two.".to_string()),
                Block::Closing("Sincerely,".to_string()),
                Block::Signature("Jane Doe".to_string()),
            ]
        );
    }

    #[test]
    fn test_recipient_omitted_without_company() {
        let layout = compose_letter("Body", &profile(), &job(""), date());
        assert!(!layout
            .blocks()
            .iter()
            .any(|b| matches!(b, Block::Recipient(_))));
    }

    #[test]
    fn test_paragraphs_keep_user_edits_verbatim() {
        let text = "Dear Hiring Manager,\n\nI  *really*  want this job!\n\n";
        let layout = compose_letter(text, &profile(), &job("Acme"), date());
        assert_eq!(
            layout.paragraphs(),
            vec!["Dear Hiring Manager,", "I  *really*  want this job!"]
        );
    }

    #[test]
    fn test_only_body_paragraphs_are_justified() {
        assert!(Block::Paragraph(String::new()).style().justify);
        assert!(!Block::Closing(String::new()).style().justify);
        assert_eq!(Block::Name(String::new()).style().font, FontFamily::HelveticaBold);
        assert_eq!(Block::Name(String::new()).style().size_pt, 16.0);
    }

    #[test]
    fn test_format_letter_date() {
        assert_eq!(format_letter_date(date()), "October 6, 2026");
    }
}
