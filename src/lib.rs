// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]

//! # PDF Form Appearance
//!
//! Appearance stream generation for PDF text form fields.
//!
//! A text field's visible content in a PDF is not its `/V` value but its
//! normal appearance: a form XObject referenced from `/AP /N`. Viewers that
//! do not regenerate appearances show exactly that stream. This crate keeps
//! the two in step.
//!
//! ## Core Features
//!
//! - **Text fields**: value, font, colors, maximum length, field flags,
//!   alignment (ISO 32000-1:2008 §12.7.4.3)
//! - **Appearance streams**: background fill plus single-line text, wrapped
//!   in a `/Tx` marked-content sequence (§12.5.5, §12.7.3.3)
//! - **Render policies**: render on value change, eagerly, or deferred to save
//! - **Save hook**: every field is re-synchronized and re-rendered before
//!   the document is written
//! - **Lenient import**: read existing field dictionaries with defaults for
//!   anything absent or ill-typed
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_form_appearance::color::Color;
//! use pdf_form_appearance::document::Document;
//! use pdf_form_appearance::geometry::Rect;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::new();
//! let page = doc.add_page(612.0, 792.0);
//! let id = doc.add_text_field(page, "name", Rect::new(72.0, 700.0, 200.0, 20.0))?;
//!
//! let mut field = doc.text_field_mut(id)?;
//! field.set_back_color(Some(Color::white()))?;
//! field.set_value("Hello XXX")?;
//!
//! doc.save("form.pdf")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Object model
pub mod color;
pub mod geometry;
pub mod object;

// Configuration
pub mod config;

// Document and object store
pub mod document;

// Appearance generation and PDF output
pub mod writer;

pub use config::{AppearanceConfig, RenderPolicy};
pub use document::{Document, ObjectStore, TextFieldId};
pub use error::{Error, Result};
pub use writer::form_fields::{AppearanceState, TextAlignment, TextField, TextFieldMut};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf_form_appearance");
    }
}
