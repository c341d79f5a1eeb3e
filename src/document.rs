//! Editable PDF document model.
//!
//! A [`Document`] owns an [`ObjectStore`] of indirect objects, a list of
//! pages, and the text fields placed on them. Fields are edited through
//! [`TextFieldMut`] handles; saving runs every field's save hook before
//! the store is serialized.

use crate::config::AppearanceConfig;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{text_string, Dictionary, Object, ObjectRef};
use crate::writer::font_manager::FontInfo;
use crate::writer::form_fields::{
    run_save_hooks, AppearanceRenderer, TextField, TextFieldMut,
};
use crate::writer::{PageEntry, PdfWriter, PdfWriterConfig};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Annotation flag bit 3: print the annotation.
const ANNOT_FLAG_PRINT: i64 = 4;

/// Indirect objects of a document, keyed by object number.
///
/// Ids are allocated sequentially starting at 1 and are never reused, so a
/// removed object leaves a gap that the writer records as a free entry.
/// All objects have generation 0.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects: BTreeMap<u32, Object>,
    next_id: u32,
    /// Shared font objects (resource name -> font)
    fonts: BTreeMap<&'static str, ObjectRef>,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 1,
            fonts: BTreeMap::new(),
        }
    }

    /// Store `obj` under a fresh id.
    pub fn allocate(&mut self, obj: Object) -> ObjectRef {
        let obj_ref = ObjectRef::new(self.next_id, 0);
        self.next_id += 1;
        self.objects.insert(obj_ref.id, obj);
        obj_ref
    }

    /// Look up an object.
    pub fn get(&self, obj_ref: ObjectRef) -> Option<&Object> {
        if obj_ref.gen != 0 {
            return None;
        }
        self.objects.get(&obj_ref.id)
    }

    /// Look up an object for modification.
    pub fn get_mut(&mut self, obj_ref: ObjectRef) -> Option<&mut Object> {
        if obj_ref.gen != 0 {
            return None;
        }
        self.objects.get_mut(&obj_ref.id)
    }

    /// Look up a dictionary, failing when absent or of another type.
    pub fn dict(&self, obj_ref: ObjectRef) -> Result<&Dictionary> {
        let obj = self
            .get(obj_ref)
            .ok_or_else(|| Error::object_not_found(obj_ref))?;
        obj.as_dict().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: obj.type_name().to_string(),
        })
    }

    /// Remove an object, returning it.
    pub fn remove(&mut self, obj_ref: ObjectRef) -> Option<Object> {
        if obj_ref.gen != 0 {
            return None;
        }
        self.objects.remove(&obj_ref.id)
    }

    /// Whether the store holds `obj_ref`.
    pub fn contains(&self, obj_ref: ObjectRef) -> bool {
        self.get(obj_ref).is_some()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The id the next allocation will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Iterate over live objects in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectRef, &Object)> {
        self.objects.iter().map(|(id, obj)| (ObjectRef::new(*id, 0), obj))
    }

    /// Reference to the shared font object for `font`, allocating it on
    /// first use.
    pub fn font_ref(&mut self, font: &FontInfo) -> ObjectRef {
        if let Some(font_ref) = self.fonts.get(font.resource_name) {
            if self.contains(*font_ref) {
                return *font_ref;
            }
        }
        let font_ref = self.allocate(Object::Dictionary(font.font_dict()));
        self.fonts.insert(font.resource_name, font_ref);
        log::trace!("Allocated font {} as {}", font.base_font, font_ref);
        font_ref
    }

    /// Shared font objects, by resource name.
    pub fn fonts(&self) -> impl Iterator<Item = (&'static str, ObjectRef)> + '_ {
        self.fonts.iter().map(|(name, font_ref)| (*name, *font_ref))
    }
}

/// Handle to a text field of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextFieldId(usize);

impl TextFieldId {
    /// Position of the field in creation order.
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct PageData {
    page_ref: ObjectRef,
    width: f32,
    height: f32,
    annots: Vec<ObjectRef>,
}

/// An editable PDF document with text form fields.
///
/// # Example
///
/// ```
/// use pdf_form_appearance::document::Document;
/// use pdf_form_appearance::geometry::Rect;
///
/// let mut doc = Document::new();
/// let page = doc.add_page(612.0, 792.0);
/// let id = doc.add_text_field(page, "name", Rect::new(72.0, 700.0, 122.653, 12.707))?;
/// doc.text_field_mut(id)?.set_value("Hello XXX")?;
///
/// let bytes = doc.save_to_bytes()?;
/// assert!(bytes.starts_with(b"%PDF-"));
/// # Ok::<(), pdf_form_appearance::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    store: ObjectStore,
    pages: Vec<PageData>,
    fields: Vec<TextField>,
    config: AppearanceConfig,
    writer_config: PdfWriterConfig,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with default configuration.
    pub fn new() -> Self {
        Self {
            store: ObjectStore::new(),
            pages: Vec::new(),
            fields: Vec::new(),
            config: AppearanceConfig::default(),
            writer_config: PdfWriterConfig::default(),
        }
    }

    /// Create an empty document with the given appearance configuration.
    pub fn with_config(config: AppearanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Replace the writer configuration.
    pub fn with_writer_config(mut self, writer_config: PdfWriterConfig) -> Self {
        self.writer_config = writer_config;
        self
    }

    /// Appearance configuration.
    pub fn config(&self) -> &AppearanceConfig {
        &self.config
    }

    /// The document's object store.
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Add a page and return its index.
    pub fn add_page(&mut self, width: f32, height: f32) -> usize {
        let mut dict = HashMap::new();
        dict.insert("Type".to_string(), Object::Name("Page".to_string()));
        let page_ref = self.store.allocate(Object::Dictionary(dict));
        self.pages.push(PageData {
            page_ref,
            width,
            height,
            annots: Vec::new(),
        });
        self.pages.len() - 1
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a new, empty text field on `page`.
    ///
    /// The field and its widget share one dictionary.
    pub fn add_text_field(
        &mut self,
        page: usize,
        name: impl Into<String>,
        rect: Rect,
    ) -> Result<TextFieldId> {
        let page_ref = self.page(page)?.page_ref;

        let mut dict = HashMap::new();
        dict.insert("Type".to_string(), Object::Name("Annot".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Widget".to_string()));
        dict.insert("P".to_string(), Object::Reference(page_ref));
        dict.insert("F".to_string(), Object::Integer(ANNOT_FLAG_PRINT));

        let name = name.into();
        dict.insert("FT".to_string(), Object::Name("Tx".to_string()));
        dict.insert("T".to_string(), text_string(&name));
        dict.insert("Rect".to_string(), rect.to_pdf_array());

        let field_ref = self.store.allocate(Object::Dictionary(dict));
        Ok(self.push_field(page, TextField::new(name, field_ref, rect)))
    }

    /// Add a text field read from an existing field dictionary.
    ///
    /// The dictionary is stored as given, with `/P` pointing at `page`;
    /// its attributes are read leniently (see [`TextField`]).
    pub fn import_text_field(&mut self, page: usize, mut dict: Dictionary) -> Result<TextFieldId> {
        let page_ref = self.page(page)?.page_ref;
        dict.insert("P".to_string(), Object::Reference(page_ref));

        let field_ref = self.store.allocate(Object::Dictionary(HashMap::new()));
        let field = TextField::from_dict(field_ref, &dict);
        if let Some(obj) = self.store.get_mut(field_ref) {
            *obj = Object::Dictionary(dict);
        }
        log::debug!("Imported text field '{}' as {}", field.name(), field_ref);
        Ok(self.push_field(page, field))
    }

    fn push_field(&mut self, page: usize, field: TextField) -> TextFieldId {
        if let Some(page) = self.pages.get_mut(page) {
            page.annots.push(field.object_ref());
        }
        self.fields.push(field);
        TextFieldId(self.fields.len() - 1)
    }

    fn page(&self, page: usize) -> Result<&PageData> {
        self.pages.get(page).ok_or(Error::PageNotFound(page))
    }

    /// Number of text fields.
    pub fn text_field_count(&self) -> usize {
        self.fields.len()
    }

    /// All text fields with their handles.
    pub fn text_fields(&self) -> impl Iterator<Item = (TextFieldId, &TextField)> {
        self.fields.iter().enumerate().map(|(i, f)| (TextFieldId(i), f))
    }

    /// Read access to a text field.
    pub fn text_field(&self, id: TextFieldId) -> Result<&TextField> {
        self.fields.get(id.0).ok_or(Error::FieldNotFound(id.0))
    }

    /// Editing handle for a text field.
    pub fn text_field_mut(&mut self, id: TextFieldId) -> Result<TextFieldMut<'_>> {
        let field = self.fields.get_mut(id.0).ok_or(Error::FieldNotFound(id.0))?;
        Ok(TextFieldMut::new(field, &mut self.store, &self.config))
    }

    /// Render a field's normal appearance now, regardless of policy.
    pub fn render(&mut self, id: TextFieldId) -> Result<ObjectRef> {
        self.text_field_mut(id)?.render()
    }

    /// The stream currently referenced by the field's `/AP /N`, if any.
    pub fn normal_appearance(&self, id: TextFieldId) -> Result<Option<ObjectRef>> {
        let field = self.text_field(id)?;
        let dict = self.store.dict(field.object_ref())?;
        let ap = match dict.get("AP") {
            Some(Object::Reference(ap_ref)) => self.store.get(*ap_ref),
            other => other,
        };
        Ok(ap
            .and_then(|ap| ap.as_dict())
            .and_then(|ap| ap.get("N"))
            .and_then(|n| n.as_reference()))
    }

    /// Synchronize every field dictionary and render every appearance.
    pub fn prepare_for_save(&mut self) -> Result<()> {
        let renderer = AppearanceRenderer::new(&self.config);
        run_save_hooks(&mut self.fields, &mut self.store, &renderer)?;
        Ok(())
    }

    /// Prepare the document and serialize it to PDF bytes.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>> {
        self.prepare_for_save()?;

        let pages: Vec<PageEntry> = self
            .pages
            .iter()
            .map(|p| PageEntry {
                page_ref: p.page_ref,
                width: p.width,
                height: p.height,
                annots: p.annots.clone(),
            })
            .collect();
        let fields: Vec<ObjectRef> = self.fields.iter().map(|f| f.object_ref()).collect();

        PdfWriter::with_config(self.writer_config.clone()).write(&self.store, &pages, &fields)
    }

    /// Prepare the document and write it to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.save_to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        log::debug!("Saved document to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::font_manager::{FontManager, FontSpec};

    #[test]
    fn test_store_allocate_and_remove() {
        let mut store = ObjectStore::new();
        let a = store.allocate(Object::Integer(1));
        let b = store.allocate(Object::Integer(2));
        assert_eq!(a, ObjectRef::new(1, 0));
        assert_eq!(b, ObjectRef::new(2, 0));
        assert_eq!(store.len(), 2);

        assert_eq!(store.remove(a), Some(Object::Integer(1)));
        assert!(!store.contains(a));
        assert_eq!(store.next_id(), 3);
        assert_eq!(store.allocate(Object::Null).id, 3);
    }

    #[test]
    fn test_store_generation_mismatch() {
        let mut store = ObjectStore::new();
        let a = store.allocate(Object::Integer(1));
        assert!(store.get(ObjectRef::new(a.id, 1)).is_none());
    }

    #[test]
    fn test_store_dict_errors() {
        let mut store = ObjectStore::new();
        let int = store.allocate(Object::Integer(1));
        assert!(matches!(store.dict(int), Err(Error::InvalidObjectType { .. })));
        assert!(matches!(store.dict(ObjectRef::new(9, 0)), Err(Error::ObjectNotFound(9, 0))));
    }

    #[test]
    fn test_font_ref_shared() {
        let mut store = ObjectStore::new();
        let font = FontManager::new().resolve(&FontSpec::default());
        let a = store.font_ref(&font);
        let b = store.font_ref(&font);
        assert_eq!(a, b);
        assert_eq!(store.fonts().collect::<Vec<_>>(), vec![("Cour", a)]);
    }

    #[test]
    fn test_add_text_field_dict() {
        let mut doc = Document::new();
        let page = doc.add_page(612.0, 792.0);
        let id = doc
            .add_text_field(page, "name", Rect::new(72.0, 700.0, 100.0, 20.0))
            .unwrap();

        let field = doc.text_field(id).unwrap();
        let dict = doc.store().dict(field.object_ref()).unwrap();
        assert_eq!(dict.get("Subtype"), Some(&Object::Name("Widget".to_string())));
        assert_eq!(dict.get("FT"), Some(&Object::Name("Tx".to_string())));
        assert_eq!(dict.get("F"), Some(&Object::Integer(4)));
        assert!(!dict.contains_key("AP"));
        assert_eq!(doc.normal_appearance(id).unwrap(), None);
    }

    #[test]
    fn test_unknown_page_and_field() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.add_text_field(0, "x", Rect::default()),
            Err(Error::PageNotFound(0))
        ));
        assert!(matches!(doc.text_field(TextFieldId(3)), Err(Error::FieldNotFound(3))));
    }

    #[test]
    fn test_with_invalid_config() {
        let config = AppearanceConfig::default().with_marked_content_tag("");
        assert!(matches!(Document::with_config(config), Err(Error::InvalidConfig(_))));
    }
}
