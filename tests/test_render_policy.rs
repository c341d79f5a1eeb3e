//! Integration tests for render policies and appearance state.
//!
//! Tests when attribute setters regenerate the normal appearance:
//! - OnValueChange: only the value setter renders
//! - Eager: every setter renders
//! - Deferred: nothing renders until an explicit render or save

use pdf_form_appearance::color::Color;
use pdf_form_appearance::document::Document;
use pdf_form_appearance::geometry::Rect;
use pdf_form_appearance::writer::{FontSpec, TextFieldFlags};
use pdf_form_appearance::{AppearanceConfig, AppearanceState, RenderPolicy, TextFieldId};

fn doc_with_policy(policy: RenderPolicy) -> (Document, TextFieldId) {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = AppearanceConfig::default().with_render_policy(policy);
    let mut doc = Document::with_config(config).expect("Valid config rejected");
    let page = doc.add_page(612.0, 792.0);
    let id = doc
        .add_text_field(page, "field", Rect::new(72.0, 700.0, 150.0, 18.0))
        .unwrap();
    (doc, id)
}

fn state(doc: &Document, id: TextFieldId) -> AppearanceState {
    doc.text_field(id).unwrap().appearance_state()
}

fn stream_bytes(doc: &Document, id: TextFieldId) -> Vec<u8> {
    let r = doc.normal_appearance(id).unwrap().expect("No appearance");
    doc.store().get(r).and_then(|o| o.stream_data()).unwrap().to_vec()
}

#[test]
fn test_new_field_starts_rendered_without_appearance() {
    let (doc, id) = doc_with_policy(RenderPolicy::OnValueChange);
    assert_eq!(state(&doc, id), AppearanceState::Rendered);
    assert_eq!(doc.normal_appearance(id).unwrap(), None);
}

#[test]
fn test_on_value_change_renders_on_value_only() {
    let (mut doc, id) = doc_with_policy(RenderPolicy::OnValueChange);

    doc.text_field_mut(id).unwrap().set_value("abc").unwrap();
    assert_eq!(state(&doc, id), AppearanceState::Rendered);
    let after_value = doc.normal_appearance(id).unwrap();
    assert!(after_value.is_some());

    doc.text_field_mut(id)
        .unwrap()
        .set_fore_color(Color::new(1.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(state(&doc, id), AppearanceState::Stale);
    assert_eq!(doc.normal_appearance(id).unwrap(), after_value);

    // The stored appearance still shows the old color
    assert!(String::from_utf8_lossy(&stream_bytes(&doc, id)).contains("\n0 g\n"));

    doc.text_field_mut(id).unwrap().set_value("abc").unwrap();
    assert_eq!(state(&doc, id), AppearanceState::Rendered);
    assert!(String::from_utf8_lossy(&stream_bytes(&doc, id)).contains("\n1 0 0 rg\n"));
}

#[test]
fn test_on_value_change_other_setters_only_mark_stale() {
    let (mut doc, id) = doc_with_policy(RenderPolicy::OnValueChange);
    doc.text_field_mut(id).unwrap().set_value("abc").unwrap();
    let before = doc.normal_appearance(id).unwrap();
    let objects = doc.store().len();

    {
        let mut field = doc.text_field_mut(id).unwrap();
        field.set_font(FontSpec::new("Times New Roman", 12.0)).unwrap();
        field.set_back_color(Some(Color::white())).unwrap();
        field.set_max_length(Some(10)).unwrap();
        field.set_multiline(true).unwrap();
        field.set_password(true).unwrap();
    }

    assert_eq!(doc.normal_appearance(id).unwrap(), before);
    assert_eq!(doc.store().len(), objects);
    assert_eq!(state(&doc, id), AppearanceState::Stale);
}

#[test]
fn test_multiline_toggle_does_not_change_content() {
    let (mut doc, id) = doc_with_policy(RenderPolicy::OnValueChange);
    let page = 0;
    let plain = doc
        .add_text_field(page, "plain", Rect::new(72.0, 700.0, 150.0, 18.0))
        .unwrap();
    for field in [id, plain] {
        let mut field = doc.text_field_mut(field).unwrap();
        field.set_back_color(Some(Color::from_rgb8(240, 240, 240))).unwrap();
        field.set_value("one line").unwrap();
    }
    let flags_before = doc.text_field(id).unwrap().flags();

    for (multiline, bits) in [(true, 4096), (false, 0), (true, 4096)] {
        doc.text_field_mut(id).unwrap().set_multiline(multiline).unwrap();
        let field = doc.text_field(id).unwrap();
        assert_eq!(field.is_multiline(), multiline);
        assert_eq!(field.flags().bits(), bits);
        assert_eq!(field.flags() - TextFieldFlags::MULTILINE, flags_before);
    }

    let rerendered = doc.render(id).unwrap();
    assert_eq!(doc.normal_appearance(id).unwrap(), Some(rerendered));
    assert_eq!(state(&doc, id), AppearanceState::Rendered);
    assert_eq!(stream_bytes(&doc, id), stream_bytes(&doc, plain));

    doc.save_to_bytes().unwrap();
    let field_ref = doc.text_field(id).unwrap().object_ref();
    let dict = doc.store().dict(field_ref).unwrap();
    assert_eq!(dict.get("Ff").and_then(|ff| ff.as_integer()), Some(4096));
    assert_eq!(stream_bytes(&doc, id), stream_bytes(&doc, plain));
}

#[test]
fn test_eager_renders_on_every_setter() {
    let (mut doc, id) = doc_with_policy(RenderPolicy::Eager);

    doc.text_field_mut(id)
        .unwrap()
        .set_back_color(Some(Color::white()))
        .unwrap();
    let first = doc.normal_appearance(id).unwrap();
    assert!(first.is_some());
    assert_eq!(state(&doc, id), AppearanceState::Rendered);

    doc.text_field_mut(id).unwrap().set_multiline(true).unwrap();
    let second = doc.normal_appearance(id).unwrap();
    assert_ne!(first, second);
    assert_eq!(state(&doc, id), AppearanceState::Rendered);
}

#[test]
fn test_deferred_renders_only_on_request() {
    let (mut doc, id) = doc_with_policy(RenderPolicy::Deferred);

    doc.text_field_mut(id).unwrap().set_value("later").unwrap();
    assert_eq!(doc.normal_appearance(id).unwrap(), None);
    assert_eq!(state(&doc, id), AppearanceState::Stale);

    let r = doc.text_field_mut(id).unwrap().render().unwrap();
    assert_eq!(doc.normal_appearance(id).unwrap(), Some(r));
    assert_eq!(state(&doc, id), AppearanceState::Rendered);
    assert!(String::from_utf8_lossy(&stream_bytes(&doc, id)).contains("(later) Tj"));
}

#[test]
fn test_save_renders_every_field() {
    let (mut doc, id) = doc_with_policy(RenderPolicy::Deferred);
    doc.text_field_mut(id).unwrap().set_value("saved").unwrap();

    doc.save_to_bytes().unwrap();

    assert_eq!(state(&doc, id), AppearanceState::Rendered);
    assert!(String::from_utf8_lossy(&stream_bytes(&doc, id)).contains("(saved) Tj"));
}
