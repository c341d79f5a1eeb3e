//! Configuration for appearance generation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// When text field mutations regenerate the normal appearance.
///
/// Saving a document always re-renders every text field, whatever the
/// policy; the policy only decides what happens between saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Setting the value renders; font, color, length and flag changes
    /// only mark the appearance stale.
    #[default]
    OnValueChange,
    /// Every setter renders immediately.
    Eager,
    /// No setter renders. Appearances are produced by an explicit render
    /// call or at save.
    Deferred,
}

/// Appearance generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Render trigger policy.
    pub render_policy: RenderPolicy,

    /// Horizontal inset of the text from the field edge, in user space units.
    pub text_inset: f32,

    /// Tag of the marked-content sequence wrapping the appearance content.
    pub marked_content_tag: String,

    /// Remove the previously referenced appearance stream from the
    /// document when a new one replaces it.
    pub dispose_superseded: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppearanceConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            render_policy: RenderPolicy::OnValueChange,
            text_inset: 2.0,
            marked_content_tag: "Tx".to_string(),
            dispose_superseded: false,
        }
    }

    /// Set the render policy.
    pub fn with_render_policy(mut self, policy: RenderPolicy) -> Self {
        self.render_policy = policy;
        self
    }

    /// Set the text inset.
    pub fn with_text_inset(mut self, inset: f32) -> Self {
        self.text_inset = inset;
        self
    }

    /// Set the marked-content tag.
    pub fn with_marked_content_tag(mut self, tag: impl Into<String>) -> Self {
        self.marked_content_tag = tag.into();
        self
    }

    /// Enable or disable disposal of superseded appearance streams.
    pub fn with_dispose_superseded(mut self, dispose: bool) -> Self {
        self.dispose_superseded = dispose;
        self
    }

    /// Check that the settings can produce a well-formed content stream.
    pub fn validate(&self) -> Result<()> {
        if self.marked_content_tag.is_empty() {
            return Err(Error::InvalidConfig("marked content tag is empty".to_string()));
        }
        if let Some(c) = self
            .marked_content_tag
            .chars()
            .find(|c| c.is_whitespace() || "()<>[]{}/%".contains(*c) || !c.is_ascii())
        {
            return Err(Error::InvalidConfig(format!(
                "marked content tag contains invalid character {:?}",
                c
            )));
        }
        if !self.text_inset.is_finite() {
            return Err(Error::InvalidConfig("text inset must be finite".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing keys take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppearanceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
