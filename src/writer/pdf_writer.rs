//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! The body holds every object of the document store, in id order,
//! followed by the structural objects built at write time (catalog, page
//! tree, AcroForm, info). Ids missing from the store become free xref
//! entries.

use super::acroform::AcroFormBuilder;
use super::object_serializer::ObjectSerializer;
use crate::document::ObjectStore;
use crate::error::Result;
use crate::object::{text_string, Object, ObjectRef};
use crate::geometry::Rect;
use std::collections::HashMap;
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            creator: Some("pdf_form_appearance".to_string()),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, streams without a filter are compressed using
    /// FlateDecode (zlib/deflate) to reduce file size.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
///
/// Returns compressed bytes suitable for FlateDecode filter.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A page to be written: its object, size and annotations.
#[derive(Debug, Clone)]
pub struct PageEntry {
    /// Page object reference
    pub page_ref: ObjectRef,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Widget annotations on the page
    pub annots: Vec<ObjectRef>,
}

/// PDF document writer.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    config: PdfWriterConfig,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self { config }
    }

    /// Writer configuration.
    pub fn config(&self) -> &PdfWriterConfig {
        &self.config
    }

    /// Serialize a document store into a complete PDF file.
    ///
    /// `fields` become the AcroForm `/Fields` array; the store's shared
    /// fonts become its default resources.
    pub fn write(
        &self,
        store: &ObjectStore,
        pages: &[PageEntry],
        fields: &[ObjectRef],
    ) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();

        // Structural objects go after every store id
        let first = store.next_id();
        let catalog_ref = ObjectRef::new(first, 0);
        let pages_ref = ObjectRef::new(first + 1, 0);
        let acroform_ref = ObjectRef::new(first + 2, 0);
        let info_ref = ObjectRef::new(first + 3, 0);
        let size = first + 4;

        let mut structural: HashMap<u32, Object> = HashMap::new();

        for page in pages {
            let mut dict = store
                .get(page.page_ref)
                .and_then(|o| o.as_dict())
                .cloned()
                .unwrap_or_default();
            dict.insert("Type".to_string(), Object::Name("Page".to_string()));
            dict.insert("Parent".to_string(), Object::Reference(pages_ref));
            dict.insert(
                "MediaBox".to_string(),
                Rect::new(0.0, 0.0, page.width, page.height).to_pdf_array(),
            );
            dict.entry("Resources".to_string())
                .or_insert_with(|| Object::Dictionary(HashMap::new()));
            if !page.annots.is_empty() {
                let annots = page.annots.iter().map(|r| Object::Reference(*r)).collect();
                dict.insert("Annots".to_string(), Object::Array(annots));
            }
            structural.insert(page.page_ref.id, Object::Dictionary(dict));
        }

        let mut pages_dict = HashMap::new();
        pages_dict.insert("Type".to_string(), Object::Name("Pages".to_string()));
        pages_dict.insert(
            "Kids".to_string(),
            Object::Array(pages.iter().map(|p| Object::Reference(p.page_ref)).collect()),
        );
        pages_dict.insert("Count".to_string(), Object::Integer(pages.len() as i64));
        structural.insert(pages_ref.id, Object::Dictionary(pages_dict));

        let mut acroform = AcroFormBuilder::new();
        acroform.add_fields(fields.iter().copied());
        for (resource_name, font_ref) in store.fonts() {
            acroform.add_font(resource_name, font_ref);
        }
        structural.insert(acroform_ref.id, Object::Dictionary(acroform.build()));

        let mut catalog = HashMap::new();
        catalog.insert("Type".to_string(), Object::Name("Catalog".to_string()));
        catalog.insert("Pages".to_string(), Object::Reference(pages_ref));
        catalog.insert("AcroForm".to_string(), Object::Reference(acroform_ref));
        structural.insert(catalog_ref.id, Object::Dictionary(catalog));

        let mut info = HashMap::new();
        if let Some(title) = &self.config.title {
            info.insert("Title".to_string(), text_string(title));
        }
        if let Some(author) = &self.config.author {
            info.insert("Author".to_string(), text_string(author));
        }
        if let Some(creator) = &self.config.creator {
            info.insert("Creator".to_string(), text_string(creator));
        }
        structural.insert(info_ref.id, Object::Dictionary(info));

        // PDF Header
        let mut output = Vec::new();
        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets: Vec<Option<usize>> = Vec::with_capacity(size as usize);
        offsets.push(None);
        for id in 1..size {
            let obj_ref = ObjectRef::new(id, 0);
            let obj = structural.get(&id).or_else(|| store.get(obj_ref));
            match obj {
                Some(obj) => {
                    offsets.push(Some(output.len()));
                    let obj = self.maybe_compress(obj);
                    output.extend_from_slice(&serializer.serialize_indirect(obj_ref, &obj)?);
                },
                None => offsets.push(None),
            }
        }

        // Cross-reference table
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;

        let free: Vec<u32> = (1..size).filter(|&id| offsets[id as usize].is_none()).collect();
        let next_free = |id: u32| free.iter().copied().find(|&f| f > id).unwrap_or(0);

        writeln!(output, "{:010} 65535 f ", next_free(0))?;
        for id in 1..size {
            match offsets[id as usize] {
                Some(offset) => writeln!(output, "{:010} 00000 n ", offset)?,
                None => writeln!(output, "{:010} 00001 f ", next_free(id))?,
            }
        }

        let mut trailer = HashMap::new();
        trailer.insert("Size".to_string(), Object::Integer(size as i64));
        trailer.insert("Root".to_string(), Object::Reference(catalog_ref));
        trailer.insert("Info".to_string(), Object::Reference(info_ref));

        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&Object::Dictionary(trailer))?);
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "Wrote PDF: {} objects, {} free, {} bytes",
            size - 1 - free.len() as u32,
            free.len(),
            output.len()
        );

        Ok(output)
    }

    /// Deflate an unfiltered stream when compression is enabled.
    fn maybe_compress<'o>(&self, obj: &'o Object) -> std::borrow::Cow<'o, Object> {
        use std::borrow::Cow;

        match obj {
            Object::Stream { dict, data } if self.config.compress && !dict.contains_key("Filter") => {
                match compress_data(data) {
                    Ok(compressed) => {
                        let mut dict = dict.clone();
                        dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
                        dict.insert("Length".to_string(), Object::Integer(compressed.len() as i64));
                        Cow::Owned(Object::Stream {
                            dict,
                            data: bytes::Bytes::from(compressed),
                        })
                    },
                    Err(e) => {
                        log::warn!("Stream compression failed, writing uncompressed: {}", e);
                        Cow::Borrowed(obj)
                    },
                }
            },
            _ => Cow::Borrowed(obj),
        }
    }
}
