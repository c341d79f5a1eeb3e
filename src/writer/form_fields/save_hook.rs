//! Pre-save reconciliation of field dictionaries and appearances.
//!
//! Attribute setters may leave a field's appearance stale, depending on the
//! render policy. Before a document is serialized, every field writes its
//! typed attributes into its dictionary and renders a fresh normal
//! appearance, so the saved file always matches the in-memory state.

use super::form_appearance::AppearanceRenderer;
use super::text_field::TextField;
use crate::document::ObjectStore;
use crate::error::{Error, Result};

/// Hook run on a form field immediately before the document is saved.
pub trait SaveHook {
    /// Bring the field's stored objects in line with its attributes.
    fn prepare_for_save(
        &mut self,
        store: &mut ObjectStore,
        renderer: &AppearanceRenderer<'_>,
    ) -> Result<()>;
}

impl SaveHook for TextField {
    fn prepare_for_save(
        &mut self,
        store: &mut ObjectStore,
        renderer: &AppearanceRenderer<'_>,
    ) -> Result<()> {
        let field_ref = self.object_ref();
        let obj = store
            .get_mut(field_ref)
            .ok_or_else(|| Error::object_not_found(field_ref))?;
        let found = obj.type_name();
        let dict = obj.as_dict_mut().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: found.to_string(),
        })?;
        self.write_dictionary(dict);

        renderer.render(self, self.rect(), store)?;
        self.mark_rendered();
        Ok(())
    }
}

/// Run the save hook of every item, stopping at the first error.
///
/// Returns the number of items prepared.
pub fn run_save_hooks<H: SaveHook>(
    items: &mut [H],
    store: &mut ObjectStore,
    renderer: &AppearanceRenderer<'_>,
) -> Result<usize> {
    for item in items.iter_mut() {
        item.prepare_for_save(store, renderer)?;
    }
    log::debug!("Prepared {} form fields for save", items.len());
    Ok(items.len())
}
