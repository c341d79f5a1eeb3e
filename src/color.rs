//! RGB colors for field text and backgrounds.

use crate::object::Object;
use serde::{Deserialize, Serialize};

/// RGB color with channels in the 0.0 - 1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
}

impl Color {
    /// Create a new color.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a black color.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create a white color.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Serialize as a PDF color array `[r g b]`.
    pub fn to_pdf_array(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.r as f64),
            Object::Real(self.g as f64),
            Object::Real(self.b as f64),
        ])
    }

    /// Read a PDF color array.
    ///
    /// One component is gray, three are RGB and four are CMYK (converted
    /// naively). An empty array means "transparent" and yields `None`, as
    /// do arrays of any other length.
    pub fn from_pdf_array(obj: &Object) -> Option<Color> {
        let comps: Vec<f32> = obj
            .as_array()?
            .iter()
            .map(|c| c.as_number().map(|v| v as f32))
            .collect::<Option<_>>()?;
        match comps.as_slice() {
            [g] => Some(Color::new(*g, *g, *g)),
            [r, g, b] => Some(Color::new(*r, *g, *b)),
            [c, m, y, k] => Some(Color::new(
                (1.0 - c) * (1.0 - k),
                (1.0 - m) * (1.0 - k),
                (1.0 - y) * (1.0 - k),
            )),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_constructors() {
        assert_eq!(Color::black(), Color::new(0.0, 0.0, 0.0));
        assert_eq!(Color::white(), Color::new(1.0, 1.0, 1.0));
        assert_eq!(Color::from_rgb8(255, 0, 0), Color::new(1.0, 0.0, 0.0));
        assert_eq!(Color::default(), Color::black());
    }

    #[test]
    fn test_from_pdf_array_gray_rgb_cmyk() {
        let gray = Object::Array(vec![Object::Real(0.5)]);
        assert_eq!(Color::from_pdf_array(&gray), Some(Color::new(0.5, 0.5, 0.5)));

        let rgb = Object::Array(vec![Object::Integer(1), Object::Integer(0), Object::Integer(0)]);
        assert_eq!(Color::from_pdf_array(&rgb), Some(Color::new(1.0, 0.0, 0.0)));

        let cmyk = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
        ]);
        assert_eq!(Color::from_pdf_array(&cmyk), Some(Color::black()));
    }

    #[test]
    fn test_from_pdf_array_transparent() {
        assert_eq!(Color::from_pdf_array(&Object::Array(vec![])), None);
        assert_eq!(Color::from_pdf_array(&Object::Null), None);
    }
}
