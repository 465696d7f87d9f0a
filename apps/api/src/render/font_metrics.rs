//! Static font-metric tables for the two standard PDF fonts the letter uses.
//!
//! Widths come from the Adobe Helvetica AFM files and are stored in 1/1000 em,
//! the unit PDF uses for glyph widths. Because Helvetica is one of the
//! standard 14 fonts, no font program is embedded and these tables are the
//! only place its geometry is known.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Helvetica,
    HelveticaBold,
}

impl FontFamily {
    /// The `/BaseFont` name written into the PDF font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// The resource name content streams use to select this font.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "F1",
            FontFamily::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in 1/1000 em.
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback width for anything outside printable ASCII.
    pub average_char_width: u16,
}

/// One output line produced by [`FontMetricTable::wrap`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    /// The line as shown, spaces included.
    pub text: String,
    /// Number of spaces on the line, i.e. where justification may add space.
    pub gaps: usize,
    /// Natural width in em, before any justification.
    pub width_em: f32,
    /// True for the last line before a hard break or the end of the text.
    /// Justified text leaves these lines ragged.
    pub ends_segment: bool,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c) as u32).sum::<u32>() as f32 / 1000.0
    }

    pub fn space_width(&self) -> f32 {
        self.widths[0] as f32 / 1000.0
    }

    /// Greedy word-wrap at `max_width_em`.
    ///
    /// `\n` is a hard break; `\r` is dropped and a tab counts as one space.
    /// Spaces are kept as typed, including indentation at the start of a
    /// segment, except where a soft break falls.
    /// A word wider than the whole line is split between characters.
    /// Segments that hold no words produce no lines.
    pub fn wrap(&self, text: &str, max_width_em: f32) -> Vec<WrappedLine> {
        let mut lines = Vec::new();
        let space_w = self.space_width();

        for segment in text.split('\n') {
            let segment = segment.replace('\r', "").replace('\t', " ");
            let mut line = String::new();
            let mut width = 0.0_f32;
            let mut spaces = 0usize;
            let mut soft_broken = false;

            for (i, word) in segment.split(' ').enumerate() {
                if i > 0 {
                    spaces += 1;
                }
                if word.is_empty() {
                    continue;
                }

                for (j, piece) in self.split_oversized(word, max_width_em).into_iter().enumerate() {
                    let gap = if j == 0 { spaces } else { 0 };
                    let piece_w = self.measure_str(&piece);
                    let gap_w = gap as f32 * space_w;

                    if !line.is_empty() && width + gap_w + piece_w > max_width_em {
                        lines.push(finish_line(&mut line, width, false));
                        width = 0.0;
                        soft_broken = true;
                    }
                    if !line.is_empty() || !soft_broken {
                        line.extend(std::iter::repeat(' ').take(gap));
                        width += gap_w;
                    }
                    line.push_str(&piece);
                    width += piece_w;
                }
                spaces = 0;
            }

            if !line.is_empty() {
                lines.push(finish_line(&mut line, width, true));
            }
        }
        lines
    }

    fn split_oversized(&self, word: &str, max_width_em: f32) -> Vec<String> {
        if self.measure_str(word) <= max_width_em {
            return vec![word.to_string()];
        }

        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.char_width(c) as f32 / 1000.0;
            if !piece.is_empty() && width + w > max_width_em {
                pieces.push(std::mem::take(&mut piece));
                width = 0.0;
            }
            piece.push(c);
            width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

/// Every space on the line is a gap that `Tw` widens when justifying.
fn finish_line(line: &mut String, width_em: f32, ends_segment: bool) -> WrappedLine {
    let text = std::mem::take(line);
    WrappedLine {
        gaps: text.matches(' ').count(),
        text,
        width_em,
        ends_segment,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Helvetica => &HELVETICA_TABLE,
        FontFamily::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFamily::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Helvetica);
        // "Acme" = A(667) + c(500) + m(833) + e(556) = 2556
        let width = metrics.measure_str("Acme");
        assert!((width - 2.556).abs() < 1e-4, "Acme width should be 2.556, got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let width = metrics.measure_str("é");
        assert!((width - 0.556).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Sincerely, Jane Doe";
        assert!(
            get_metrics(FontFamily::HelveticaBold).measure_str(text)
                > get_metrics(FontFamily::Helvetica).measure_str(text)
        );
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = get_metrics(FontFamily::Helvetica).wrap("Dear Hiring Manager,", 53.5);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Dear Hiring Manager,");
        assert_eq!(lines[0].gaps, 2);
        assert!(lines[0].ends_segment);
    }

    #[test]
    fn test_wrap_long_text_stays_within_width() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let text = "I am writing to express my interest in the Data Analyst position at Acme Corp. ".repeat(6);
        let lines = metrics.wrap(&text, 53.5);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width_em <= 53.5 + 1e-3, "line too wide: {}", line.width_em);
        }
        assert!(!lines[0].ends_segment);
        assert!(lines.last().unwrap().ends_segment);
    }

    #[test]
    fn test_wrap_keeps_hard_breaks() {
        let lines = get_metrics(FontFamily::Helvetica).wrap("Sincerely,\r\nJane", 53.5);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Sincerely,", "Jane"]);
        assert!(lines.iter().all(|l| l.ends_segment));
    }

    #[test]
    fn test_wrap_splits_oversized_word() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let word = "x".repeat(200);
        let lines = metrics.wrap(&word, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.iter().map(|l| l.text.len()).sum::<usize>(), 200);
    }

    #[test]
    fn test_wrap_keeps_typed_spacing() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let lines = metrics.wrap("  I  *really*  want\tthis", 53.5);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "  I  *really*  want this");
        assert_eq!(lines[0].gaps, 7);
        assert!((lines[0].width_em - metrics.measure_str("  I  *really*  want this")).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_drops_spaces_at_soft_break() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let text = "alpha    beta    alpha    beta";
        let lines = metrics.wrap(text, metrics.measure_str("alpha    beta") + 0.01);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha    beta", "alpha    beta"]);
    }

    #[test]
    fn test_wrap_whitespace_only_yields_nothing() {
        assert!(get_metrics(FontFamily::Helvetica).wrap("   \n  ", 53.5).is_empty());
    }
}
