//! Normal appearance generation for text fields.
//!
//! Generates the `/AP /N` form XObject that viewers display for a text
//! field. The content is a background fill (when the field has a back
//! color) followed by the value drawn in a single line, top-left aligned
//! with a small horizontal inset, all wrapped in a `/Tx` marked-content
//! sequence.
//!
//! Each render allocates a fresh stream object. The stream it replaces is
//! left in the document unless the configuration asks for disposal.

use super::text_field::TextField;
use crate::config::AppearanceConfig;
use crate::document::ObjectStore;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Size};
use crate::object::{Object, ObjectRef};
use crate::writer::appearance_canvas::AppearanceCanvas;
use crate::writer::appearance_stream::{wrap_marked_content, AppearanceStream};
use std::collections::HashMap;

/// Renders text field appearances into a document store.
#[derive(Debug, Clone, Copy)]
pub struct AppearanceRenderer<'a> {
    config: &'a AppearanceConfig,
}

impl<'a> AppearanceRenderer<'a> {
    /// Create a renderer using `config`.
    pub fn new(config: &'a AppearanceConfig) -> Self {
        Self { config }
    }

    /// Draw the field onto a canvas of `size`, without the marked-content
    /// wrapper.
    ///
    /// Degenerate sizes are accepted; drawing simply falls outside the box.
    pub fn paint(&self, field: &TextField, size: Size) -> AppearanceCanvas {
        let mut canvas = AppearanceCanvas::new(size);

        if let Some(back_color) = field.back_color() {
            let bounds = canvas.bounds();
            canvas.fill_rect(bounds, back_color);
        }

        if !field.value().is_empty() {
            let inset = self.config.text_inset;
            let layout = Rect::new(inset, 0.0, size.width - 2.0 * inset, size.height);
            canvas.draw_text(
                field.value(),
                field.font(),
                field.fore_color(),
                layout,
                field.alignment(),
            );
        }

        canvas
    }

    /// Render the field's normal appearance for a widget of `rect`.
    ///
    /// Allocates a new form XObject whose bounding box is `rect` moved to
    /// the origin, and points `/AP /N` of the field dictionary at it. An
    /// absent `/AP` dictionary is created. Returns the new stream's
    /// reference.
    ///
    /// # Errors
    ///
    /// Fails only when the field's dictionary is missing from `store` or is
    /// not a dictionary.
    pub fn render(
        &self,
        field: &TextField,
        rect: Rect,
        store: &mut ObjectStore,
    ) -> Result<ObjectRef> {
        let size = rect.size();
        if size.is_degenerate() {
            log::debug!(
                "Field '{}': degenerate rectangle {}x{}",
                field.name(),
                size.width,
                size.height
            );
        }

        let painted = self.paint(field, size).finish()?;
        let content = wrap_marked_content(&self.config.marked_content_tag, &painted.content);

        let mut stream = AppearanceStream::new(size, content);
        for font in &painted.fonts {
            let font_ref = store.font_ref(font);
            stream = stream.with_font(font.resource_name, font_ref);
        }

        let stream_ref = store.allocate(stream.to_object());
        let superseded = set_normal_appearance(store, field.object_ref(), stream_ref)?;

        if self.config.dispose_superseded {
            if let Some(old) = superseded.filter(|old| *old != stream_ref) {
                if is_form_xobject(store.get(old)) {
                    store.remove(old);
                    log::trace!("Field '{}': disposed superseded appearance {}", field.name(), old);
                } else {
                    log::debug!("Field '{}': kept superseded /N {}, not a form XObject", field.name(), old);
                }
            }
        }

        log::debug!(
            "Field '{}': rendered appearance {} ({} bytes)",
            field.name(),
            stream_ref,
            stream.content.len()
        );

        Ok(stream_ref)
    }
}

/// Only form XObject streams are disposed; anything else a `/N` entry
/// points at may be shared.
fn is_form_xobject(obj: Option<&Object>) -> bool {
    match obj {
        Some(Object::Stream { dict, .. }) => {
            dict.get("Subtype").and_then(|s| s.as_name()) == Some("Form")
        },
        _ => false,
    }
}

/// Point `/AP /N` of the dictionary at `field_ref` to `stream_ref`.
///
/// The `/AP` entry may be a direct dictionary or a reference to one; an
/// absent or unusable entry is replaced by a new direct dictionary. Other
/// appearance entries (`/D`, `/R`) are kept. Returns the previous `/N`
/// reference, if any.
pub fn set_normal_appearance(
    store: &mut ObjectStore,
    field_ref: ObjectRef,
    stream_ref: ObjectRef,
) -> Result<Option<ObjectRef>> {
    let field_obj = store
        .get_mut(field_ref)
        .ok_or_else(|| Error::object_not_found(field_ref))?;
    let found = field_obj.type_name();
    let field_dict = field_obj.as_dict_mut().ok_or_else(|| Error::InvalidObjectType {
        expected: "Dictionary".to_string(),
        found: found.to_string(),
    })?;

    let indirect_ap = field_dict.get("AP").and_then(|ap| ap.as_reference());

    let ap_dict = match indirect_ap {
        Some(ap_ref) if store.get(ap_ref).and_then(|o| o.as_dict()).is_some() => store
            .get_mut(ap_ref)
            .and_then(|o| o.as_dict_mut())
            .ok_or_else(|| Error::object_not_found(ap_ref))?,
        _ => {
            let field_dict = store
                .get_mut(field_ref)
                .and_then(|o| o.as_dict_mut())
                .ok_or_else(|| Error::object_not_found(field_ref))?;
            if field_dict.get("AP").and_then(|ap| ap.as_dict()).is_none() {
                field_dict.insert("AP".to_string(), Object::Dictionary(HashMap::new()));
            }
            field_dict
                .get_mut("AP")
                .and_then(|ap| ap.as_dict_mut())
                .ok_or_else(|| Error::object_not_found(field_ref))?
        },
    };

    let previous = ap_dict.insert("N".to_string(), Object::Reference(stream_ref));
    Ok(previous.and_then(|p| p.as_reference()))
}
