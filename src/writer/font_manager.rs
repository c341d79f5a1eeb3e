//! Font selection and metrics for field appearances.
//!
//! Field fonts are requested by family name and size and resolved to one of
//! the PDF standard Type1 fonts, which every viewer provides without
//! embedding. Metrics are the standard AFM values in 1/1000 em.

use super::encoding::winansi_byte;
use crate::object::{Dictionary, Object};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Font requested for a field: family name plus size in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Family name, e.g. "Courier New" or "Helvetica"
    pub family: String,
    /// Size in points
    pub size: f32,
    /// Use the bold face
    #[serde(default)]
    pub bold: bool,
}

impl FontSpec {
    /// Create a regular font spec.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    /// Select the bold face.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Courier New", 10.0)
    }
}

/// Standard font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Helvetica (sans-serif)
    Helvetica,
    /// Times (serif)
    Times,
    /// Courier (monospace)
    Courier,
}

impl FontFamily {
    /// Map a family name to a standard family.
    ///
    /// Unknown names fall back to Helvetica.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "courier" | "courier new" | "couriernew" | "cour" | "monospace" => FontFamily::Courier,
            "times" | "times-roman" | "times roman" | "times new roman" | "timesnewroman"
            | "tiro" | "serif" => FontFamily::Times,
            _ => FontFamily::Helvetica,
        }
    }
}

/// Resolved standard font with metrics.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// PostScript name, e.g. "Courier-Bold"
    pub base_font: &'static str,
    /// Resource name used in content streams, e.g. "CoBo"
    pub resource_name: &'static str,
    /// Font family
    pub family: FontFamily,
    /// Ascender height (above baseline)
    pub ascender: f32,
    /// Descender depth (below baseline, negative)
    pub descender: f32,
}

impl FontInfo {
    /// Width of `text` in points at `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        units * font_size / 1000.0
    }

    /// Width of a single character in font units (1/1000 em).
    ///
    /// Measures the WinAnsi glyph actually shown, so a character without a
    /// WinAnsi code has the width of `?`.
    pub fn char_width(&self, ch: char) -> f32 {
        let byte = winansi_byte(ch);
        match self.family {
            FontFamily::Courier => 600.0,
            FontFamily::Helvetica => ascii_width(&HELVETICA_WIDTHS, byte, 556.0),
            FontFamily::Times => ascii_width(&TIMES_WIDTHS, byte, 500.0),
        }
    }

    /// Distance from the top of the line box to the baseline, in points.
    pub fn ascent(&self, font_size: f32) -> f32 {
        self.ascender * font_size / 1000.0
    }

    /// The Type1 font dictionary for this font.
    pub fn font_dict(&self) -> Dictionary {
        let mut dict = HashMap::new();
        dict.insert("Type".to_string(), Object::Name("Font".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Type1".to_string()));
        dict.insert("BaseFont".to_string(), Object::Name(self.base_font.to_string()));
        dict.insert("Encoding".to_string(), Object::Name("WinAnsiEncoding".to_string()));
        dict
    }
}

fn ascii_width(table: &[u16; 95], byte: u8, fallback: f32) -> f32 {
    match byte {
        0x20..=0x7E => table[(byte - 0x20) as usize] as f32,
        _ => fallback,
    }
}

/// Helvetica widths for ASCII 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    278, 278, 584, 584, 584, 556, 1015, // : - @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    278, 278, 278, 469, 556, 333, // [ - `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a - m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n - z
    334, 260, 334, 584, // { - ~
];

/// Times-Roman widths for ASCII 0x20..=0x7E.
const TIMES_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // sp - /
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // 0 - 9
    278, 278, 564, 564, 564, 444, 921, // : - @
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, // A - M
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, // N - Z
    333, 278, 333, 469, 500, 333, // [ - `
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, // a - m
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, // n - z
    480, 200, 480, 541, // { - ~
];

/// Resolves field fonts to standard fonts.
#[derive(Debug, Clone, Default)]
pub struct FontManager;

impl FontManager {
    /// Create a font manager.
    pub fn new() -> Self {
        Self
    }

    /// Resolve a requested font.
    pub fn resolve(&self, spec: &FontSpec) -> FontInfo {
        let family = FontFamily::from_name(&spec.family);
        let (base_font, resource_name, ascender, descender) = match (family, spec.bold) {
            (FontFamily::Courier, false) => ("Courier", "Cour", 629.0, -157.0),
            (FontFamily::Courier, true) => ("Courier-Bold", "CoBo", 626.0, -142.0),
            (FontFamily::Times, false) => ("Times-Roman", "TiRo", 683.0, -217.0),
            (FontFamily::Times, true) => ("Times-Bold", "TiBo", 676.0, -205.0),
            (FontFamily::Helvetica, false) => ("Helvetica", "Helv", 718.0, -207.0),
            (FontFamily::Helvetica, true) => ("Helvetica-Bold", "HeBo", 718.0, -207.0),
        };
        FontInfo {
            base_font,
            resource_name,
            family,
            ascender,
            descender,
        }
    }

    /// Reverse lookup from a `/DA` resource name to a font spec.
    ///
    /// Accepts both the short form names ("Helv") and PostScript names
    /// ("Helvetica-Bold").
    pub fn spec_for_resource(&self, resource_name: &str, size: f32) -> FontSpec {
        let spec = match resource_name {
            "Cour" | "Courier" => FontSpec::new("Courier", size),
            "CoBo" | "Courier-Bold" => FontSpec::new("Courier", size).bold(),
            "TiRo" | "Times-Roman" => FontSpec::new("Times-Roman", size),
            "TiBo" | "Times-Bold" => FontSpec::new("Times-Roman", size).bold(),
            "HeBo" | "Helvetica-Bold" => FontSpec::new("Helvetica", size).bold(),
            _ => FontSpec::new("Helvetica", size),
        };
        log::trace!("Resolved /DA font {} to {:?}", resource_name, spec);
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_is_courier_new_10() {
        let spec = FontSpec::default();
        assert_eq!(spec.family, "Courier New");
        assert_eq!(spec.size, 10.0);
        assert!(!spec.bold);
    }

    #[test]
    fn test_family_mapping() {
        assert_eq!(FontFamily::from_name("Courier New"), FontFamily::Courier);
        assert_eq!(FontFamily::from_name("  times new roman "), FontFamily::Times);
        assert_eq!(FontFamily::from_name("Arial"), FontFamily::Helvetica);
        assert_eq!(FontFamily::from_name(""), FontFamily::Helvetica);
    }

    #[test]
    fn test_resolve_resource_names() {
        let fm = FontManager::new();
        assert_eq!(fm.resolve(&FontSpec::default()).resource_name, "Cour");
        assert_eq!(fm.resolve(&FontSpec::new("Arial", 12.0).bold()).base_font, "Helvetica-Bold");
        assert_eq!(fm.resolve(&FontSpec::new("serif", 12.0)).resource_name, "TiRo");
    }

    #[test]
    fn test_monospace_width() {
        let font = FontManager::new().resolve(&FontSpec::default());
        assert_eq!(font.text_width("Hello XXX", 10.0), 54.0);
        assert_eq!(font.text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_proportional_width() {
        let font = FontManager::new().resolve(&FontSpec::new("Helvetica", 10.0));
        // H(722) + i(222)
        assert!((font.text_width("Hi", 10.0) - 9.44).abs() < 1e-4);
        // Non-ASCII falls back to an average width
        assert_eq!(font.char_width('é'), 556.0);
    }

    #[test]
    fn test_width_follows_winansi_glyph() {
        let font = FontManager::new().resolve(&FontSpec::new("Times", 10.0));
        // Unmappable characters are shown as '?' (444)
        assert_eq!(font.char_width('\u{263A}'), 444.0);
        assert_eq!(font.char_width('\u{0080}'), 444.0);
        // Mapped characters outside ASCII use the average width
        assert_eq!(font.char_width('\u{20AC}'), 500.0);
        assert_eq!(font.char_width('\u{2019}'), 500.0);
    }

    #[test]
    fn test_ascent() {
        let font = FontManager::new().resolve(&FontSpec::default());
        assert!((font.ascent(10.0) - 6.29).abs() < 1e-4);
    }

    #[test]
    fn test_font_dict() {
        let font = FontManager::new().resolve(&FontSpec::default());
        let dict = font.font_dict();
        assert_eq!(dict.get("BaseFont"), Some(&Object::Name("Courier".to_string())));
        assert_eq!(dict.get("Subtype"), Some(&Object::Name("Type1".to_string())));
    }

    #[test]
    fn test_spec_for_resource() {
        let fm = FontManager::new();
        let spec = fm.spec_for_resource("CoBo", 9.0);
        assert_eq!(FontFamily::from_name(&spec.family), FontFamily::Courier);
        assert!(spec.bold);
        assert_eq!(spec.size, 9.0);
        assert_eq!(fm.resolve(&fm.spec_for_resource("Unknown", 8.0)).resource_name, "Helv");
    }
}
