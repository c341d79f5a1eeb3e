//! Field flags for text fields.
//!
//! Implements field flags per ISO 32000-1:2008 Section 12.7.3 (Field Flags).
//! Bit positions in the PDF reference are 1-indexed; bit `n` is `1 << (n - 1)`.

use bitflags::bitflags;

bitflags! {
    /// Text field flags (field type Tx).
    ///
    /// Per PDF spec Table 221 (common flags) and Table 228 (text field flags).
    /// Unknown bits read from an existing dictionary are preserved.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextFieldFlags: u32 {
        // --- Common flags (bits 1-3) ---
        /// Bit 1: Field is read-only
        const READ_ONLY = 1 << 0;
        /// Bit 2: Field is required
        const REQUIRED = 1 << 1;
        /// Bit 3: Field should not be exported
        const NO_EXPORT = 1 << 2;

        // --- Text-specific flags ---
        /// Bit 13: Text may include multiple lines
        const MULTILINE = 1 << 12;

        /// Bit 14: Text should be displayed as asterisks (password)
        const PASSWORD = 1 << 13;

        /// Bit 21: File path should be submitted as field value
        const FILE_SELECT = 1 << 20;

        /// Bit 23: Text should not be spell-checked
        const DO_NOT_SPELL_CHECK = 1 << 22;

        /// Bit 24: Text should not scroll beyond visible area
        const DO_NOT_SCROLL = 1 << 23;

        /// Bit 25: Field is divided into equally spaced positions (comb)
        const COMB = 1 << 24;

        /// Bit 26: Field contains rich text
        const RICH_TEXT = 1 << 25;
    }
}

impl Default for TextFieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Horizontal text alignment (quadding) for form fields.
///
/// Per PDF spec Section 12.7.3.3 (Variable Text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Left-aligned (Q=0)
    #[default]
    Left,
    /// Centered (Q=1)
    Center,
    /// Right-aligned (Q=2)
    Right,
}

impl TextAlignment {
    /// Get the PDF Q value for this alignment.
    pub fn q_value(&self) -> i64 {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }

    /// Parse a PDF Q value; anything unknown is left-aligned.
    pub fn from_q_value(q: i64) -> Self {
        match q {
            1 => Self::Center,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}
