//! PDF content stream builder.
//!
//! Builds the operator sequences used inside appearance streams
//! according to PDF specification ISO 32000-1:2008 Section 8-9.

use super::encoding::encode_winansi;
use crate::color::Color;
use crate::error::Result;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Move text position (Td)
    MoveText(f32, f32),
    /// Show text (Tj) - literal string
    ShowText(String),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Set fill color gray (g)
    SetFillColorGray(f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Fill (f)
    Fill,
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    ///
    /// Font state does not survive the text object boundary, so the next
    /// `set_font` always emits `Tf`.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
            self.current_font = None;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, resource_name: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(resource_name) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(resource_name.to_string(), size));
            self.current_font = Some(resource_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Move the text position.
    pub fn move_text(&mut self, tx: f32, ty: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveText(tx, ty))
    }

    /// Show a literal string at the current text position.
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.op(ContentStreamOp::ShowText(text.to_string()))
    }

    /// Set fill color.
    ///
    /// Neutral colors use the shorter gray operator.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        if color.r == color.g && color.g == color.b {
            self.op(ContentStreamOp::SetFillColorGray(color.r))
        } else {
            self.op(ContentStreamOp::SetFillColorRGB(color.r, color.g, color.b))
        }
    }

    /// Draw a rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Build the content stream to bytes.
    ///
    /// Each operator is terminated by a newline.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            self.write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, num(*size)),
            ContentStreamOp::MoveText(tx, ty) => write!(w, "{} {} Td", num(*tx), num(*ty)),
            ContentStreamOp::ShowText(text) => {
                write!(w, "(")?;
                write_escaped_string(w, text)?;
                write!(w, ") Tj")
            },
            ContentStreamOp::SetFillColorRGB(r, g, b) => {
                write!(w, "{} {} {} rg", num(*r), num(*g), num(*b))
            },
            ContentStreamOp::SetFillColorGray(g) => write!(w, "{} g", num(*g)),
            ContentStreamOp::Rectangle(x, y, w_val, h) => {
                write!(w, "{} {} {} {} re", num(*x), num(*y), num(*w_val), num(*h))
            },
            ContentStreamOp::Fill => write!(w, "f"),
        }
    }
}

/// Format a number for a content stream.
///
/// At most three decimals, trailing zeros removed, no exponent notation.
pub(crate) fn num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Write an escaped PDF literal string in WinAnsi encoding.
///
/// Characters WinAnsi cannot represent are replaced by `?`.
fn write_escaped_string<W: Write>(w: &mut W, text: &str) -> std::io::Result<()> {
    for byte in encode_winansi(text) {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            b'\n' => write!(w, "\\n")?,
            b'\r' => write!(w, "\\r")?,
            b'\t' => write!(w, "\\t")?,
            0x08 => write!(w, "\\b")?,
            0x0C => write!(w, "\\f")?,
            _ => w.write_all(&[byte])?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("Helv", 12.0)
            .move_text(72.0, 720.0)
            .show_text("Hello, World!")
            .end_text();

        let bytes = builder.build().unwrap();
        assert_eq!(
            String::from_utf8_lossy(&bytes),
            "BT\n/Helv 12 Tf\n72 720 Td\n(Hello, World!) Tj\nET\n"
        );
    }

    #[test]
    fn test_font_deduplicated_within_text_object() {
        let mut builder = ContentStreamBuilder::new();
        builder.begin_text().set_font("Cour", 10.0).set_font("Cour", 10.0);
        builder.end_text().begin_text().set_font("Cour", 10.0);

        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert_eq!(content.matches(" Tf\n").count(), 2);
    }

    #[test]
    fn test_fill_color_gray_and_rgb() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .fill_color(Color::black())
            .fill_color(Color::new(1.0, 0.5, 0.0));

        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert_eq!(content, "0 g\n1 0.5 0 rg\n");
    }

    #[test]
    fn test_rectangle_fill() {
        let mut builder = ContentStreamBuilder::new();
        builder.rect(0.0, 0.0, 122.653, 12.707).fill();

        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert_eq!(content, "0 0 122.653 12.707 re\nf\n");
    }

    #[test]
    fn test_escaped_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.show_text("a(b)c\\d\u{263A}");

        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert_eq!(content, "(a\\(b\\)c\\\\d?) Tj\n");
    }

    #[test]
    fn test_latin1_text_written_as_single_bytes() {
        let mut builder = ContentStreamBuilder::new();
        builder.show_text("é");
        let bytes = builder.build().unwrap();
        assert_eq!(bytes, b"(\xE9) Tj\n");
    }

    #[test]
    fn test_winansi_text_bytes() {
        let mut builder = ContentStreamBuilder::new();
        builder.show_text("5\u{20AC} \u{2019}ok\u{2019} \u{0080}");
        let bytes = builder.build().unwrap();
        assert_eq!(bytes, b"(5\x80 \x92ok\x92 ?) Tj\n");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(num(2.0), "2");
        assert_eq!(num(6.417), "6.417");
        assert_eq!(num(12.707 - 6.29), "6.417");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(f32::NAN), "0");
        assert_eq!(num(0.5), "0.5");
    }
}
