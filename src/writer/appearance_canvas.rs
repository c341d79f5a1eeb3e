//! Drawing surface for form XObject content.
//!
//! A canvas covers a fixed area with its origin at the lower-left corner.
//! It records fills and text runs into a [`ContentStreamBuilder`] and keeps
//! track of the font resources the content refers to, so the caller can
//! emit a matching `/Resources` dictionary.

use super::content_stream::ContentStreamBuilder;
use super::font_manager::{FontInfo, FontManager, FontSpec};
use crate::color::Color;
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::writer::form_fields::TextAlignment;

/// Finalized canvas output.
#[derive(Debug, Clone)]
pub struct CanvasContent {
    /// Content stream bytes
    pub content: Vec<u8>,
    /// Fonts referenced by `Tf` operators, in first-use order
    pub fonts: Vec<FontInfo>,
}

/// Drawing surface sized to an appearance bounding box.
#[derive(Debug)]
pub struct AppearanceCanvas {
    size: Size,
    builder: ContentStreamBuilder,
    font_manager: FontManager,
    fonts: Vec<FontInfo>,
}

impl AppearanceCanvas {
    /// Create a canvas of the given size.
    ///
    /// The size is not validated; a degenerate canvas still produces a
    /// (possibly empty) content stream.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            builder: ContentStreamBuilder::new(),
            font_manager: FontManager::new(),
            fonts: Vec::new(),
        }
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The whole canvas area.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// Fill a rectangle with a solid color.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> &mut Self {
        self.builder
            .fill_color(color)
            .rect(rect.x, rect.y, rect.width, rect.height)
            .fill();
        self
    }

    /// Draw a single line of text inside `layout`.
    ///
    /// The text is top-aligned: its baseline sits one ascent below the top
    /// edge of the layout box. `alignment` positions it horizontally. No
    /// wrapping or clipping is applied. Empty text draws nothing.
    pub fn draw_text(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Color,
        layout: Rect,
        alignment: TextAlignment,
    ) -> &mut Self {
        if text.is_empty() {
            return self;
        }

        let info = self.font_manager.resolve(font);
        let text_width = info.text_width(text, font.size);
        let x = match alignment {
            TextAlignment::Left => layout.x,
            TextAlignment::Center => layout.x + (layout.width - text_width) / 2.0,
            TextAlignment::Right => layout.right() - text_width,
        };
        let y = layout.top() - info.ascent(font.size);

        self.builder
            .begin_text()
            .set_font(info.resource_name, font.size)
            .fill_color(color)
            .move_text(x, y)
            .show_text(text)
            .end_text();

        if !self.fonts.iter().any(|f| f.resource_name == info.resource_name) {
            self.fonts.push(info);
        }
        self
    }

    /// Finalize the canvas into content stream bytes.
    pub fn finish(self) -> Result<CanvasContent> {
        Ok(CanvasContent {
            content: self.builder.build()?,
            fonts: self.fonts,
        })
    }
}
