//! WinAnsi text encoding for standard-font content.
//!
//! Field fonts are declared with `/Encoding /WinAnsiEncoding`, so string
//! operands of `Tj` must be Windows-1252 bytes. WinAnsi agrees with Latin-1
//! except in 0x80-0x9F, where it places typographic characters instead of
//! the C1 controls.

/// Map a Unicode code point to its WinAnsi byte.
///
/// Returns `None` for characters WinAnsi cannot represent, including the C1
/// controls U+0080..U+009F.
pub fn unicode_to_winansi(codepoint: u32) -> Option<u8> {
    if codepoint < 0x80 || (0xA0..=0xFF).contains(&codepoint) {
        return Some(codepoint as u8);
    }

    match codepoint {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation mark
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation mark
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// WinAnsi byte for `ch`, or `?` when it has none.
pub fn winansi_byte(ch: char) -> u8 {
    unicode_to_winansi(ch as u32).unwrap_or(b'?')
}

/// Encode `text` as WinAnsi bytes, replacing unmappable characters by `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_and_latin1_pass_through() {
        assert_eq!(unicode_to_winansi('A' as u32), Some(b'A'));
        assert_eq!(unicode_to_winansi(0xE9), Some(0xE9));
        assert_eq!(unicode_to_winansi(0xA0), Some(0xA0));
    }

    #[test]
    fn test_typographic_characters() {
        assert_eq!(encode_winansi("€’–…œ"), vec![0x80, 0x92, 0x96, 0x85, 0x9C]);
    }

    #[test]
    fn test_c1_controls_and_unmapped_become_question_mark() {
        assert_eq!(unicode_to_winansi(0x80), None);
        assert_eq!(unicode_to_winansi(0x9F), None);
        assert_eq!(encode_winansi("\u{0080}\u{263A}x"), b"??x".to_vec());
    }
}
