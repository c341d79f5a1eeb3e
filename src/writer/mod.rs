//! PDF writing: content streams, appearance streams and file output.
//!
//! ## Architecture
//!
//! ```text
//! TextField
//!     ↓
//! [AppearanceRenderer] (field → canvas → form XObject)
//!     ↓
//! [AppearanceCanvas] / [ContentStreamBuilder] (drawing → content bytes)
//!     ↓
//! [ObjectStore] (indirect objects, owned by Document)
//!     ↓
//! [PdfWriter] (catalog, pages, AcroForm, xref)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! [ObjectStore]: crate::document::ObjectStore

mod acroform;
mod appearance_canvas;
mod appearance_stream;
pub(crate) mod content_stream;
pub mod encoding;
pub mod font_manager;
pub mod form_fields;
mod object_serializer;
mod pdf_writer;

pub use acroform::AcroFormBuilder;
pub use appearance_canvas::{AppearanceCanvas, CanvasContent};
pub use appearance_stream::{wrap_marked_content, AppearanceStream, IDENTITY_MATRIX};
pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{FontFamily, FontInfo, FontManager, FontSpec};
pub use form_fields::{
    AppearanceRenderer, AppearanceState, SaveHook, TextAlignment, TextField, TextFieldFlags,
    TextFieldMut,
};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PageEntry, PdfWriter, PdfWriterConfig};
