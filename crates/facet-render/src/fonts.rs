//! Font registration backed by fontdue.
//!
//! The registry serves both sides of text: layout asks it for advance
//! widths and line heights, and [`SkiaCanvas`](crate::SkiaCanvas) asks it
//! for glyph bitmaps. Both use the same per-character advances, so the
//! lines layout wrapped are the lines the canvas draws.

use std::collections::HashMap;

use facet_layout::{FontError, FontService};
use fontdue::{Font, FontSettings};

use crate::error::RenderError;

/// Fonts keyed by the small integer ids styles refer to.
#[derive(Default)]
pub struct FontRegistry {
    fonts: HashMap<u32, Font>,
}

impl FontRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `bytes` (TTF or OTF) and register the font as `font_id`,
    /// replacing any font previously registered under that id.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidFont`] if the bytes are not a font.
    pub fn register(&mut self, font_id: u32, bytes: &[u8]) -> Result<(), RenderError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            RenderError::InvalidFont {
                font_id,
                reason: reason.to_string(),
            }
        })?;
        tracing::debug!(font_id, name = ?font.name(), "registered font");
        let _ = self.fonts.insert(font_id, font);
        Ok(())
    }

    /// Read a font file from disk and register it.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn register_file(
        &mut self,
        font_id: u32,
        path: impl AsRef<std::path::Path>,
    ) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("failed to read font '{}': {e}", path.display()))?;
        self.register(font_id, &bytes)?;
        Ok(())
    }

    /// The font registered as `font_id`.
    #[must_use]
    pub fn get(&self, font_id: u32) -> Option<&Font> {
        self.fonts.get(&font_id)
    }

    /// Number of registered fonts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True when no font is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    fn font(&self, font_id: u32) -> Result<&Font, FontError> {
        self.get(font_id).ok_or(FontError::UnregisteredFont(font_id))
    }
}

impl FontService for FontRegistry {
    fn text_width(&self, text: &str, font_id: u32, font_size: f32) -> Result<f32, FontError> {
        let font = self.font(font_id)?;
        Ok(advance_width(font, text, font_size))
    }

    fn line_height(&self, font_id: u32, font_size: f32) -> Result<f32, FontError> {
        let font = self.font(font_id)?;
        Ok(line_height(font, font_size))
    }
}

/// Sum of advance widths, skipping control characters.
pub(crate) fn advance_width(font: &Font, text: &str, font_size: f32) -> f32 {
    text.chars()
        .filter(|ch| !ch.is_control())
        .map(|ch| font.metrics(ch, font_size).advance_width)
        .sum()
}

/// Baseline-to-baseline distance for one line.
pub(crate) fn line_height(font: &Font, font_size: f32) -> f32 {
    font.horizontal_line_metrics(font_size)
        .map_or(font_size, |metrics| metrics.new_line_size)
}

/// Distance from the top of a line to its baseline.
pub(crate) fn ascent(font: &Font, font_size: f32) -> f32 {
    font.horizontal_line_metrics(font_size)
        .map_or(font_size, |metrics| metrics.ascent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_font_bytes() {
        let mut fonts = FontRegistry::new();
        let err = fonts.register(3, b"definitely not a font").unwrap_err();
        assert!(matches!(err, RenderError::InvalidFont { font_id: 3, .. }));
        assert!(fonts.is_empty());
    }

    #[test]
    fn test_unregistered_font_is_a_font_error() {
        let fonts = FontRegistry::new();
        assert!(matches!(
            fonts.text_width("abc", 0, 12.0),
            Err(FontError::UnregisteredFont(0))
        ));
        assert!(matches!(
            fonts.line_height(7, 12.0),
            Err(FontError::UnregisteredFont(7))
        ));
    }
}
