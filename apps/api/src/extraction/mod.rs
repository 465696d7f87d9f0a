//! Text extraction by lossy decoding.
//!
//! The upload is decoded as UTF-8 (invalid sequences become U+FFFD) and every
//! character outside printable ASCII, `\n`, `\r` and `\t` is replaced with one
//! space. No PDF structure is parsed: compressed streams and embedded fonts
//! come out as noise, and that is accepted.

pub mod handlers;

use serde::Serialize;

/// Source tag reported with every extraction result.
pub const FALLBACK_SOURCE: &str = "server-fallback";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub source: &'static str,
}

/// Decodes `bytes` and strips everything that is not printable ASCII or
/// line/tab whitespace.
pub fn extract_text(bytes: &[u8]) -> ExtractedText {
    let decoded = String::from_utf8_lossy(bytes);
    let text = decoded
        .chars()
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();

    ExtractedText {
        text,
        source: FALLBACK_SOURCE,
    }
}

fn is_kept(c: char) -> bool {
    matches!(c, ' '..='~' | '\n' | '\r' | '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_passes_through() {
        let out = extract_text(b"Jane Doe\nData Analyst\r\n\tSQL, Python");
        assert_eq!(out.text, "Jane Doe\nData Analyst\r\n\tSQL, Python");
        assert_eq!(out.source, "server-fallback");
    }

    #[test]
    fn test_control_bytes_become_spaces() {
        let out = extract_text(b"%PDF-1.4\x00\x01obj\x7f");
        assert_eq!(out.text, "%PDF-1.4  obj ");
    }

    #[test]
    fn test_each_non_ascii_character_becomes_one_space() {
        // "é" is two UTF-8 bytes but one character
        let out = extract_text("Café — ok".as_bytes());
        assert_eq!(out.text, "Caf    ok");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let out = extract_text(&[b'A', 0xFF, 0xFE, b'B']);
        assert_eq!(out.text, "A  B");
    }

    #[test]
    fn test_output_only_contains_allowed_characters() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let out = extract_text(&bytes);
        assert!(out.text.chars().all(is_kept));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let bytes: Vec<u8> = (0..2048u32).map(|i| (i * 37 % 256) as u8).collect();
        assert_eq!(extract_text(&bytes), extract_text(&bytes));
    }

    #[test]
    fn test_empty_input_yields_empty_text() {
        assert_eq!(extract_text(b"").text, "");
    }
}
