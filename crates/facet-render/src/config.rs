//! Compositor settings.

use facet_style::Color;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Settings for a [`Compositor`](crate::Compositor).
///
/// Loaded from JSON; every field is optional:
///
/// ```json
/// { "cache_node_output": true, "clear_color": "#202020", "debug_bounds": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositorConfig {
    /// Keep each node's paint output between frames and regenerate it only
    /// when the node is paint-dirty.
    pub cache_node_output: bool,
    /// Color the surface is cleared to before each frame.
    pub clear_color: Color,
    /// Outline content, padding and margin boxes of every painted node.
    pub debug_bounds: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            cache_node_output: true,
            clear_color: Color::TRANSPARENT,
            debug_bounds: false,
        }
    }
}

impl CompositorConfig {
    /// Parse a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Config`] for malformed JSON, unknown fields or
    /// bad colors.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = CompositorConfig::from_json(r##"{ "clear_color": "#ff000080" }"##).unwrap();
        assert_eq!(config.clear_color, Color::rgba(255, 0, 0, 128));
        assert!(config.cache_node_output);
        assert!(!config.debug_bounds);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            CompositorConfig::from_json(r#"{ "cache": false }"#),
            Err(RenderError::Config(_))
        ));
    }
}
