//! Interactive text form fields.
//!
//! Text fields per ISO 32000-1:2008 Section 12.7.4.3, with generated
//! normal appearance streams (Section 12.5.5).
//!
//! - [`TextField`]: typed field attributes and appearance state
//! - [`TextFieldMut`]: editing handle that applies the render policy
//! - [`AppearanceRenderer`]: builds the `/AP /N` form XObject
//! - [`SaveHook`]: reconciles fields with their dictionaries before save

mod field_flags;
mod form_appearance;
mod save_hook;
mod text_field;

pub use field_flags::{TextAlignment, TextFieldFlags};
pub use form_appearance::{set_normal_appearance, AppearanceRenderer};
pub use save_hook::{run_save_hooks, SaveHook};
pub use text_field::{
    parse_default_appearance, AppearanceState, DefaultAppearance, TextField, TextFieldMut,
};
