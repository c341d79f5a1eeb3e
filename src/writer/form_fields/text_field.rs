//! Text field model for PDF forms.
//!
//! Implements text input fields per ISO 32000-1:2008 Section 12.7.4.3.
//!
//! A [`TextField`] is the typed record of a field's attributes. It is owned
//! by a [`Document`](crate::document::Document); mutation goes through a
//! [`TextFieldMut`] handle, which applies the configured
//! [`RenderPolicy`] after every change.
//!
//! # Example
//!
//! ```ignore
//! use pdf_form_appearance::document::Document;
//! use pdf_form_appearance::geometry::Rect;
//!
//! let mut doc = Document::new();
//! let page = doc.add_page(612.0, 792.0);
//! let id = doc.add_text_field(page, "name", Rect::new(72.0, 700.0, 122.653, 12.707))?;
//! doc.text_field_mut(id)?.set_value("Hello XXX")?;
//! ```

use super::form_appearance::AppearanceRenderer;
use super::{TextAlignment, TextFieldFlags};
use crate::color::Color;
use crate::config::{AppearanceConfig, RenderPolicy};
use crate::document::ObjectStore;
use crate::error::Result;
use crate::geometry::Rect;
use crate::object::{text_string, Dictionary, Object, ObjectRef};
use crate::writer::content_stream::num;
use crate::writer::font_manager::{FontManager, FontSpec};
use std::collections::HashMap;

/// Whether the stored normal appearance reflects the current attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppearanceState {
    /// Attributes changed since the last render
    Stale,
    /// The last render used the current attributes
    Rendered,
}

/// Attribute touched by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Value,
    Other,
}

/// A text input field.
#[derive(Debug, Clone)]
pub struct TextField {
    /// Field name (partial name, `/T`)
    name: String,
    /// Merged field/widget dictionary in the document store
    object_ref: ObjectRef,
    /// Widget rectangle on the page
    rect: Rect,
    /// Current value (`/V`)
    value: String,
    /// Font used to draw the value
    font: FontSpec,
    /// Text color
    fore_color: Color,
    /// Background fill; `None` leaves the field transparent
    back_color: Option<Color>,
    /// Advisory maximum number of characters (`/MaxLen`)
    max_length: Option<u32>,
    /// Field flags (`/Ff`)
    flags: TextFieldFlags,
    /// Quadding (`/Q`)
    alignment: TextAlignment,
    state: AppearanceState,
}

impl TextField {
    /// Create a field with default attributes.
    ///
    /// Defaults: empty value, Courier New 10pt, black text, no background,
    /// no maximum length, no flags.
    pub(crate) fn new(name: impl Into<String>, object_ref: ObjectRef, rect: Rect) -> Self {
        Self {
            name: name.into(),
            object_ref,
            rect,
            value: String::new(),
            font: FontSpec::default(),
            fore_color: Color::black(),
            back_color: None,
            max_length: None,
            flags: TextFieldFlags::empty(),
            alignment: TextAlignment::Left,
            state: AppearanceState::Rendered,
        }
    }

    /// Read a field from an existing field dictionary.
    ///
    /// Lenient: absent keys take the defaults of [`TextField::new`], and
    /// values of the wrong type are ignored with a warning.
    pub(crate) fn from_dict(object_ref: ObjectRef, dict: &Dictionary) -> Self {
        let name = dict.get("T").and_then(|t| t.as_text()).unwrap_or_default();
        let rect = match dict.get("Rect").map(Rect::from_pdf_array) {
            Some(Some(rect)) => rect,
            Some(None) => {
                log::warn!("Field '{}': malformed /Rect ignored", name);
                Rect::default()
            },
            None => Rect::default(),
        };

        let mut field = Self::new(name, object_ref, rect);

        match dict.get("V") {
            Some(v) => match v.as_text() {
                Some(text) => field.value = text,
                None if v.is_null() => {},
                None => log::warn!("Field '{}': non-string /V ignored", field.name),
            },
            None => {},
        }

        if let Some(max_len) = dict.get("MaxLen") {
            field.max_length = match max_len.as_integer().map(u32::try_from) {
                Some(Ok(n)) => Some(n),
                _ => {
                    log::warn!("Field '{}': invalid /MaxLen {:?} ignored", field.name, max_len);
                    None
                },
            };
        }

        if let Some(bits) = dict.get("Ff").and_then(|f| f.as_integer()) {
            field.flags = TextFieldFlags::from_bits_retain(bits as u32);
        }

        if let Some(q) = dict.get("Q").and_then(|q| q.as_integer()) {
            field.alignment = TextAlignment::from_q_value(q);
        }

        if let Some(da) = dict.get("DA").and_then(|da| da.as_text()) {
            let parsed = parse_default_appearance(&da);
            match parsed.font {
                Some((resource, size)) => {
                    field.font = FontManager::new().spec_for_resource(&resource, size);
                },
                None => log::warn!("Field '{}': /DA without font ignored: {}", field.name, da),
            }
            if let Some(color) = parsed.color {
                field.fore_color = color;
            }
        }

        field.back_color = dict
            .get("MK")
            .and_then(|mk| mk.as_dict())
            .and_then(|mk| mk.get("BG"))
            .and_then(Color::from_pdf_array);

        field
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference to the field's dictionary in the document.
    pub fn object_ref(&self) -> ObjectRef {
        self.object_ref
    }

    /// Widget rectangle on the page.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current text value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Font used to draw the value.
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Text color.
    pub fn fore_color(&self) -> Color {
        self.fore_color
    }

    /// Background color, if the field is filled.
    pub fn back_color(&self) -> Option<Color> {
        self.back_color
    }

    /// Advisory maximum length. Not enforced on assignment.
    pub fn max_length(&self) -> Option<u32> {
        self.max_length
    }

    /// All field flags.
    pub fn flags(&self) -> TextFieldFlags {
        self.flags
    }

    /// Whether the field accepts multiple lines.
    ///
    /// Rendering is single-line regardless of this flag.
    pub fn is_multiline(&self) -> bool {
        self.flags.contains(TextFieldFlags::MULTILINE)
    }

    /// Whether the field is a password field.
    pub fn is_password(&self) -> bool {
        self.flags.contains(TextFieldFlags::PASSWORD)
    }

    /// Horizontal alignment of the value.
    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    /// Whether the stored appearance matches the current attributes.
    pub fn appearance_state(&self) -> AppearanceState {
        self.state
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.state = AppearanceState::Rendered;
    }

    /// Default appearance string (`/DA`).
    pub fn default_appearance(&self) -> String {
        let font = FontManager::new().resolve(&self.font);
        let c = self.fore_color;
        format!(
            "/{} {} Tf {} {} {} rg",
            font.resource_name,
            num(self.font.size),
            num(c.r),
            num(c.g),
            num(c.b)
        )
    }

    /// Write the typed attributes into the field dictionary.
    ///
    /// Entries owned by other parties (`/AP`, `/P`, `/F`, unknown keys) are
    /// left untouched; optional entries are removed when unset.
    pub fn write_dictionary(&self, dict: &mut Dictionary) {
        dict.insert("FT".to_string(), Object::Name("Tx".to_string()));
        dict.insert("T".to_string(), text_string(&self.name));
        dict.insert("V".to_string(), text_string(&self.value));
        dict.insert("Rect".to_string(), self.rect.to_pdf_array());
        dict.insert("DA".to_string(), Object::String(self.default_appearance().into_bytes()));

        match self.max_length {
            Some(max_len) => {
                dict.insert("MaxLen".to_string(), Object::Integer(max_len as i64));
            },
            None => {
                dict.remove("MaxLen");
            },
        }

        if self.flags.is_empty() {
            dict.remove("Ff");
        } else {
            dict.insert("Ff".to_string(), Object::Integer(self.flags.bits() as i64));
        }

        if self.alignment == TextAlignment::Left {
            dict.remove("Q");
        } else {
            dict.insert("Q".to_string(), Object::Integer(self.alignment.q_value()));
        }

        // Appearance characteristics (MK)
        let mk = dict
            .entry("MK".to_string())
            .or_insert_with(|| Object::Dictionary(HashMap::new()));
        if let Some(mk) = mk.as_dict_mut() {
            match self.back_color {
                Some(color) => {
                    mk.insert("BG".to_string(), color.to_pdf_array());
                },
                None => {
                    mk.remove("BG");
                },
            }
        }
        if dict
            .get("MK")
            .and_then(|mk| mk.as_dict())
            .is_some_and(|mk| mk.is_empty())
        {
            dict.remove("MK");
        }
    }
}

/// Mutable handle to a text field inside its document.
///
/// Every setter updates the typed attribute and then applies the render
/// policy: under [`RenderPolicy::OnValueChange`] only `set_value` renders
/// and every other setter leaves the appearance [`AppearanceState::Stale`]
/// until the next render or save.
pub struct TextFieldMut<'a> {
    field: &'a mut TextField,
    store: &'a mut ObjectStore,
    config: &'a AppearanceConfig,
}

impl<'a> TextFieldMut<'a> {
    pub(crate) fn new(
        field: &'a mut TextField,
        store: &'a mut ObjectStore,
        config: &'a AppearanceConfig,
    ) -> Self {
        Self {
            field,
            store,
            config,
        }
    }

    /// Read access to the field.
    pub fn field(&self) -> &TextField {
        &*self.field
    }

    /// Set the text value.
    ///
    /// The value is stored as given, even when longer than
    /// [`TextField::max_length`].
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
        self.field.value = value.into();
        self.after_change(Attribute::Value)
    }

    /// Set the font.
    pub fn set_font(&mut self, font: FontSpec) -> Result<()> {
        self.field.font = font;
        self.after_change(Attribute::Other)
    }

    /// Set the text color.
    pub fn set_fore_color(&mut self, color: Color) -> Result<()> {
        self.field.fore_color = color;
        self.after_change(Attribute::Other)
    }

    /// Set or clear the background color.
    pub fn set_back_color(&mut self, color: Option<Color>) -> Result<()> {
        self.field.back_color = color;
        self.after_change(Attribute::Other)
    }

    /// Set or clear the advisory maximum length.
    pub fn set_max_length(&mut self, max_length: Option<u32>) -> Result<()> {
        self.field.max_length = max_length;
        self.after_change(Attribute::Other)
    }

    /// Set or clear the multiline flag.
    pub fn set_multiline(&mut self, multiline: bool) -> Result<()> {
        self.set_flag(TextFieldFlags::MULTILINE, multiline)
    }

    /// Set or clear the password flag.
    pub fn set_password(&mut self, password: bool) -> Result<()> {
        self.set_flag(TextFieldFlags::PASSWORD, password)
    }

    /// Set or clear any field flag.
    pub fn set_flag(&mut self, flag: TextFieldFlags, enabled: bool) -> Result<()> {
        self.field.flags.set(flag, enabled);
        self.after_change(Attribute::Other)
    }

    /// Set the horizontal alignment.
    pub fn set_alignment(&mut self, alignment: TextAlignment) -> Result<()> {
        self.field.alignment = alignment;
        self.after_change(Attribute::Other)
    }

    /// Move or resize the widget.
    pub fn set_rect(&mut self, rect: Rect) -> Result<()> {
        self.field.rect = rect;
        self.after_change(Attribute::Other)
    }

    /// Render the normal appearance now, regardless of policy.
    ///
    /// Returns the reference of the new appearance stream.
    pub fn render(&mut self) -> Result<ObjectRef> {
        let renderer = AppearanceRenderer::new(self.config);
        let stream_ref = renderer.render(self.field, self.field.rect(), self.store)?;
        self.field.mark_rendered();
        Ok(stream_ref)
    }

    fn after_change(&mut self, attribute: Attribute) -> Result<()> {
        let render = match self.config.render_policy {
            RenderPolicy::Eager => true,
            RenderPolicy::OnValueChange => attribute == Attribute::Value,
            RenderPolicy::Deferred => false,
        };
        if render {
            self.render().map(|_| ())
        } else {
            self.field.state = AppearanceState::Stale;
            Ok(())
        }
    }
}

/// Font and color extracted from a default appearance string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultAppearance {
    /// Font resource name and size from `Tf`
    pub font: Option<(String, f32)>,
    /// Fill color from `g`, `rg` or `k`
    pub color: Option<Color>,
}

/// Parse a `/DA` string such as `/Helv 12 Tf 0 g`.
///
/// Unknown operators are skipped. The last font and color operators win.
pub fn parse_default_appearance(da: &str) -> DefaultAppearance {
    let mut result = DefaultAppearance::default();
    let mut operands: Vec<&str> = Vec::new();

    for token in da.split_whitespace() {
        match token {
            "Tf" => {
                if let [.., name, size] = operands.as_slice() {
                    if let (Some(name), Ok(size)) = (name.strip_prefix('/'), size.parse::<f32>()) {
                        result.font = Some((name.to_string(), size));
                    }
                }
                operands.clear();
            },
            "g" | "rg" | "k" => {
                let comps: Option<Vec<f32>> =
                    operands.iter().map(|o| o.parse::<f32>().ok()).collect();
                let color = comps.and_then(|c| {
                    let arr = Object::Array(c.into_iter().map(|v| Object::Real(v as f64)).collect());
                    Color::from_pdf_array(&arr)
                });
                if color.is_some() {
                    result.color = color;
                }
                operands.clear();
            },
            t if t.starts_with('/') || t.parse::<f32>().is_ok() => operands.push(t),
            _ => operands.clear(),
        }
    }

    result
}
