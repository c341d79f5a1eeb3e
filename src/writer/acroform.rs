//! AcroForm dictionary builder.
//!
//! Implements the document-level AcroForm dictionary per ISO 32000-1:2008 Section 12.7.2.
//!
//! Every text field carries a generated normal appearance by the time a
//! document is written, so `NeedAppearances` defaults to false. The default
//! resources (`/DR`) list the shared font objects the appearances use.

use crate::object::{Dictionary, Object, ObjectRef};
use std::collections::HashMap;

/// Builder for the document-level AcroForm dictionary.
#[derive(Debug, Clone)]
pub struct AcroFormBuilder {
    /// Field object references
    fields: Vec<ObjectRef>,
    /// Whether viewers should regenerate appearances
    need_appearances: bool,
    /// Default appearance string
    default_appearance: Option<String>,
    /// Default resource fonts (resource name -> font object)
    fonts: Vec<(String, ObjectRef)>,
}

impl Default for AcroFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AcroFormBuilder {
    /// Create a new AcroForm builder.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            need_appearances: false,
            default_appearance: Some("/Cour 10 Tf 0 g".to_string()),
            fonts: Vec::new(),
        }
    }

    /// Add a field reference.
    pub fn add_field(&mut self, field_ref: ObjectRef) {
        self.fields.push(field_ref);
    }

    /// Add multiple field references.
    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = ObjectRef>) {
        self.fields.extend(fields);
    }

    /// Register a default resource font.
    pub fn add_font(&mut self, resource_name: impl Into<String>, font_ref: ObjectRef) {
        self.fonts.push((resource_name.into(), font_ref));
    }

    /// Set the NeedAppearances flag.
    pub fn with_need_appearances(mut self, need: bool) -> Self {
        self.need_appearances = need;
        self
    }

    /// Set the document-wide default appearance string.
    pub fn with_default_appearance(mut self, da: impl Into<String>) -> Self {
        self.default_appearance = Some(da.into());
        self
    }

    /// Check if this form has any fields.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Build the AcroForm dictionary.
    pub fn build(&self) -> Dictionary {
        let mut dict = HashMap::new();

        let fields: Vec<Object> = self.fields.iter().map(|r| Object::Reference(*r)).collect();
        dict.insert("Fields".to_string(), Object::Array(fields));

        if self.need_appearances {
            dict.insert("NeedAppearances".to_string(), Object::Boolean(true));
        }

        if let Some(ref da) = self.default_appearance {
            dict.insert("DA".to_string(), Object::String(da.as_bytes().to_vec()));
        }

        if !self.fonts.is_empty() {
            let font: Dictionary = self
                .fonts
                .iter()
                .map(|(name, font_ref)| (name.clone(), Object::Reference(*font_ref)))
                .collect();
            let mut dr = HashMap::new();
            dr.insert("Font".to_string(), Object::Dictionary(font));
            dict.insert("DR".to_string(), Object::Dictionary(dr));
        }

        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acroform_new() {
        let acroform = AcroFormBuilder::new();
        assert!(!acroform.has_fields());
        let dict = acroform.build();
        assert!(!dict.contains_key("NeedAppearances"));
        assert!(!dict.contains_key("DR"));
        assert_eq!(dict.get("Fields"), Some(&Object::Array(Vec::new())));
    }

    #[test]
    fn test_acroform_fields_and_fonts() {
        let mut acroform = AcroFormBuilder::new();
        acroform.add_fields([ObjectRef::new(5, 0), ObjectRef::new(6, 0)]);
        acroform.add_font("Cour", ObjectRef::new(3, 0));

        let dict = acroform.build();
        assert_eq!(dict.get("Fields").and_then(|f| f.as_array()).map(|f| f.len()), Some(2));

        let fonts = dict
            .get("DR")
            .and_then(|dr| dr.as_dict())
            .and_then(|dr| dr.get("Font"))
            .and_then(|f| f.as_dict())
            .unwrap();
        assert_eq!(fonts.get("Cour"), Some(&Object::Reference(ObjectRef::new(3, 0))));
    }

    #[test]
    fn test_acroform_need_appearances() {
        let dict = AcroFormBuilder::new().with_need_appearances(true).build();
        assert_eq!(dict.get("NeedAppearances"), Some(&Object::Boolean(true)));
    }

    #[test]
    fn test_acroform_default_appearance() {
        let dict = AcroFormBuilder::new()
            .with_default_appearance("/Helv 0 Tf 0 g")
            .build();
        assert_eq!(dict.get("DA"), Some(&Object::String(b"/Helv 0 Tf 0 g".to_vec())));
    }
}
