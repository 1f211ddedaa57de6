//! Font and icon services consumed by layout.

use std::collections::HashSet;

use thiserror::Error;

/// Errors from a font service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FontError {
    /// The font id was never registered by the host.
    #[error("font {0} is not registered")]
    UnregisteredFont(u32),
}

/// A measured block of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasuredText {
    /// Width of the widest line.
    pub width: f32,
    /// Number of lines times the font's natural line height.
    pub height: f32,
    /// The text broken into lines.
    pub lines: Vec<String>,
}

impl MeasuredText {
    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Text measurement backed by registered fonts.
///
/// Implementors provide per-string advance widths and line heights;
/// [`measure`](Self::measure) breaks text into lines with [`wrap_text`].
pub trait FontService {
    /// Total advance width of `text` on one line.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::UnregisteredFont`] for an unknown `font_id`.
    fn text_width(&self, text: &str, font_id: u32, font_size: f32) -> Result<f32, FontError>;

    /// Natural height of one line.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::UnregisteredFont`] for an unknown `font_id`.
    fn line_height(&self, font_id: u32, font_size: f32) -> Result<f32, FontError>;

    /// Break `text` into lines and measure the block.
    ///
    /// Wrapping happens only when `word_wrap` is set and a maximum line
    /// width is known; otherwise every explicit line is kept whole.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::UnregisteredFont`] for an unknown `font_id`.
    fn measure(
        &self,
        text: &str,
        font_id: u32,
        font_size: f32,
        max_line_width: Option<f32>,
        word_wrap: bool,
    ) -> Result<MeasuredText, FontError> {
        let line_height = self.line_height(font_id, font_size)?;
        let lines = wrap_text(text, max_line_width, word_wrap, |line| {
            self.text_width(line, font_id, font_size)
        })?;

        let mut width: f32 = 0.0;
        for line in &lines {
            width = width.max(self.text_width(line, font_id, font_size)?);
        }

        Ok(MeasuredText {
            width,
            height: line_height * lines.len() as f32,
            lines,
        })
    }
}

/// Greedy word wrapper.
///
/// Explicit `\n` always starts a new line. With `word_wrap` and a
/// `max_width`, words are packed onto a line while it fits; a single word
/// wider than `max_width` gets a line of its own and overflows.
///
/// # Errors
///
/// Propagates the first error of `width_of`.
pub fn wrap_text<E>(
    text: &str,
    max_width: Option<f32>,
    word_wrap: bool,
    mut width_of: impl FnMut(&str) -> Result<f32, E>,
) -> Result<Vec<String>, E> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let Some(max_width) = max_width.filter(|_| word_wrap) else {
            lines.push(paragraph.to_string());
            continue;
        };

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if width_of(&candidate)? <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    Ok(lines)
}

/// Approximate metrics using fixed ratios: every character advances
/// `0.6 × font_size` and a line is `font_size` tall.
///
/// Used in tests and as a fallback when no real font is loaded. Only
/// registered font ids are accepted; font `0` is registered by default.
#[derive(Debug, Clone)]
pub struct ApproximateFontMetrics {
    fonts: HashSet<u32>,
}

impl ApproximateFontMetrics {
    /// Average advance of a glyph relative to the font size.
    pub const CHAR_WIDTH_RATIO: f32 = 0.6;

    /// Metrics with only font `0` registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fonts: HashSet::from([0]),
        }
    }

    /// Metrics with no font registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fonts: HashSet::new(),
        }
    }

    /// Register another font id.
    #[must_use]
    pub fn with_font(mut self, font_id: u32) -> Self {
        let _ = self.fonts.insert(font_id);
        self
    }

    fn check(&self, font_id: u32) -> Result<(), FontError> {
        if self.fonts.contains(&font_id) {
            Ok(())
        } else {
            Err(FontError::UnregisteredFont(font_id))
        }
    }
}

impl Default for ApproximateFontMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl FontService for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font_id: u32, font_size: f32) -> Result<f32, FontError> {
        self.check(font_id)?;
        Ok(text.chars().count() as f32 * font_size * Self::CHAR_WIDTH_RATIO)
    }

    fn line_height(&self, font_id: u32, font_size: f32) -> Result<f32, FontError> {
        self.check(font_id)?;
        Ok(font_size)
    }
}

/// Pixel size of an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IconSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Icon lookup used for intrinsic sizing.
pub trait IconService {
    /// Size of a registered icon, `None` when the id is unknown.
    fn icon_size(&self, icon_id: u32) -> Option<IconSize>;
}

/// An icon service that knows no icons.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconService for NoIcons {
    fn icon_size(&self, _icon_id: u32) -> Option<IconSize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_width(s: &str) -> Result<f32, FontError> {
        Ok(s.chars().count() as f32)
    }

    #[test]
    fn test_wrap_greedy() {
        let lines = wrap_text("the quick brown fox", Some(10.0), true, char_width).unwrap();
        assert_eq!(lines, ["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_long_word_overflows_on_own_line() {
        let lines = wrap_text("a extraordinarily b", Some(5.0), true, char_width).unwrap();
        assert_eq!(lines, ["a", "extraordinarily", "b"]);
    }

    #[test]
    fn test_no_wrap_without_flag_or_width() {
        let text = "one two three";
        assert_eq!(
            wrap_text(text, Some(3.0), false, char_width).unwrap(),
            [text]
        );
        assert_eq!(wrap_text(text, None, true, char_width).unwrap(), [text]);
    }

    #[test]
    fn test_explicit_newlines() {
        let lines = wrap_text("a\r\n\nb", None, false, char_width).unwrap();
        assert_eq!(lines, ["a", "", "b"]);
    }

    #[test]
    fn test_approximate_measure() {
        let metrics = ApproximateFontMetrics::new();
        let measured = metrics.measure("hello", 0, 10.0, None, false).unwrap();
        assert!((measured.width - 30.0).abs() < 1e-3);
        assert_eq!(measured.height, 10.0);
        assert_eq!(measured.line_count(), 1);
    }

    #[test]
    fn test_unregistered_font() {
        let metrics = ApproximateFontMetrics::new();
        assert_eq!(
            metrics.measure("x", 3, 10.0, None, false),
            Err(FontError::UnregisteredFont(3))
        );
        assert!(metrics.with_font(3).line_height(3, 10.0).is_ok());
    }
}
