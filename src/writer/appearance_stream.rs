//! Appearance stream form XObjects.
//!
//! PDF Spec: ISO 32000-1:2008, Section 12.5.5 (Appearance Streams) and
//! Section 8.10 (Form XObjects).
//!
//! An appearance stream is created once per render and never modified
//! afterwards; a later render produces a new stream that supersedes it.

use crate::geometry::{Rect, Size};
use crate::object::{Dictionary, Object, ObjectRef};
use std::collections::HashMap;

/// Identity transformation matrix.
pub const IDENTITY_MATRIX: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// A generated normal appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceStream {
    /// Bounding box, always anchored at the origin
    pub bbox: Rect,
    /// Form matrix
    pub matrix: [f32; 6],
    /// Complete content stream, marked-content wrapper included
    pub content: bytes::Bytes,
    /// Font resources (resource name -> font object)
    pub fonts: Vec<(String, ObjectRef)>,
}

impl AppearanceStream {
    /// Create a stream whose bounding box covers `size`.
    pub fn new(size: Size, content: impl Into<bytes::Bytes>) -> Self {
        Self {
            bbox: Rect::from_size(size),
            matrix: IDENTITY_MATRIX,
            content: content.into(),
            fonts: Vec::new(),
        }
    }

    /// Register a font resource.
    pub fn with_font(mut self, resource_name: impl Into<String>, font_ref: ObjectRef) -> Self {
        self.fonts.push((resource_name.into(), font_ref));
        self
    }

    /// Build the form XObject stream object.
    pub fn to_object(&self) -> Object {
        let mut dict = HashMap::new();

        dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Form".to_string()));
        dict.insert("FormType".to_string(), Object::Integer(1));
        dict.insert("BBox".to_string(), self.bbox.to_pdf_array());
        dict.insert(
            "Matrix".to_string(),
            Object::Array(self.matrix.iter().map(|&v| Object::Real(v as f64)).collect()),
        );
        dict.insert("Resources".to_string(), Object::Dictionary(self.resources()));
        dict.insert("Length".to_string(), Object::Integer(self.content.len() as i64));

        Object::Stream {
            dict,
            data: self.content.clone(),
        }
    }

    fn resources(&self) -> Dictionary {
        let mut resources = HashMap::new();
        resources.insert(
            "ProcSet".to_string(),
            Object::Array(vec![
                Object::Name("PDF".to_string()),
                Object::Name("Text".to_string()),
            ]),
        );
        if !self.fonts.is_empty() {
            let fonts: Dictionary = self
                .fonts
                .iter()
                .map(|(name, font_ref)| (name.clone(), Object::Reference(*font_ref)))
                .collect();
            resources.insert("Font".to_string(), Object::Dictionary(fonts));
        }
        resources
    }
}

/// Wrap content in a marked-content sequence.
///
/// Produces `"/<tag> BMC\n" + content + "\nEMC"`. Some viewers show a
/// blank field when the `/Tx` sequence is missing.
pub fn wrap_marked_content(tag: &str, content: &[u8]) -> Vec<u8> {
    let mut wrapped = Vec::with_capacity(content.len() + tag.len() + 10);
    wrapped.push(b'/');
    wrapped.extend_from_slice(tag.as_bytes());
    wrapped.extend_from_slice(b" BMC\n");
    wrapped.extend_from_slice(content);
    wrapped.extend_from_slice(b"\nEMC");
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_marked_content() {
        assert_eq!(wrap_marked_content("Tx", b"BT\nET\n"), b"/Tx BMC\nBT\nET\n\nEMC".to_vec());
        assert_eq!(wrap_marked_content("Tx", b""), b"/Tx BMC\n\nEMC".to_vec());
    }

    #[test]
    fn test_form_xobject_dict() {
        let ap = AppearanceStream::new(Size::new(122.653, 12.707), b"/Tx BMC\n\nEMC".to_vec())
            .with_font("Cour", ObjectRef::new(3, 0));
        let obj = ap.to_object();
        let dict = obj.as_dict().unwrap();

        assert_eq!(dict.get("Subtype"), Some(&Object::Name("Form".to_string())));
        assert_eq!(dict.get("FormType"), Some(&Object::Integer(1)));
        assert_eq!(
            Rect::from_pdf_array(dict.get("BBox").unwrap()),
            Some(Rect::new(0.0, 0.0, 122.653, 12.707))
        );
        let matrix: Vec<f64> = dict
            .get("Matrix")
            .and_then(|m| m.as_array())
            .unwrap()
            .iter()
            .filter_map(|v| v.as_number())
            .collect();
        assert_eq!(matrix, vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

        let fonts = dict
            .get("Resources")
            .and_then(|r| r.as_dict())
            .and_then(|r| r.get("Font"))
            .and_then(|f| f.as_dict())
            .unwrap();
        assert_eq!(fonts.get("Cour"), Some(&Object::Reference(ObjectRef::new(3, 0))));
        assert_eq!(dict.get("Length"), Some(&Object::Integer(13)));
    }

    #[test]
    fn test_no_font_resources_without_text() {
        let ap = AppearanceStream::new(Size::new(10.0, 10.0), Vec::new());
        let obj = ap.to_object();
        let resources = obj.as_dict().unwrap().get("Resources").unwrap().as_dict().unwrap();
        assert!(!resources.contains_key("Font"));
    }
}
