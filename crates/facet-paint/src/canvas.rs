//! The drawing surface abstraction.

use std::ops::{Deref, DerefMut};

use facet_dom::Rect;
use facet_style::{Anchor, Color, EdgeSize, RoundedCorners, Vec2};

/// Per-corner radii of a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    /// Top-left radius.
    pub top_left: f32,
    /// Top-right radius.
    pub top_right: f32,
    /// Bottom-right radius.
    pub bottom_right: f32,
    /// Bottom-left radius.
    pub bottom_left: f32,
}

impl CornerRadii {
    /// Square corners.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same radius on every corner.
    #[must_use]
    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// `radius` on the flagged corners, square elsewhere.
    #[must_use]
    pub fn selective(radius: f32, corners: RoundedCorners) -> Self {
        let pick = |corner| if corners.contains(corner) { radius } else { 0.0 };
        Self {
            top_left: pick(RoundedCorners::TOP_LEFT),
            top_right: pick(RoundedCorners::TOP_RIGHT),
            bottom_right: pick(RoundedCorners::BOTTOM_RIGHT),
            bottom_left: pick(RoundedCorners::BOTTOM_LEFT),
        }
    }

    /// True when every corner is square.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top_left <= 0.0
            && self.top_right <= 0.0
            && self.bottom_right <= 0.0
            && self.bottom_left <= 0.0
    }

    /// Each radius reduced by `amount`, never below zero.
    #[must_use]
    pub fn shrink(&self, amount: f32) -> Self {
        Self {
            top_left: (self.top_left - amount).max(0.0),
            top_right: (self.top_right - amount).max(0.0),
            bottom_right: (self.bottom_right - amount).max(0.0),
            bottom_left: (self.bottom_left - amount).max(0.0),
        }
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brush {
    /// One color.
    Solid(Color),
    /// Two-color interpolation from `start` to `end`, clamped beyond.
    Linear {
        /// Where `from` is fully applied.
        start: Vec2,
        /// Where `to` is fully applied.
        end: Vec2,
        /// Start color.
        from: Color,
        /// End color.
        to: Color,
    },
    /// Two-color interpolation from `center` outward to `radius`.
    Radial {
        /// Center of the gradient.
        center: Vec2,
        /// Distance at which `to` is fully applied.
        radius: f32,
        /// Center color.
        from: Color,
        /// Outer color.
        to: Color,
    },
}

/// Which pass of a text draw this is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEffect {
    /// Plain glyph fill.
    Fill,
    /// Glyph outline of the given width.
    Outline(f32),
    /// Blurred glyph shadow of the given size.
    Shadow(f32),
}

/// A block of pre-wrapped text to draw.
///
/// The canvas measures each line with its font to place it inside `rect`
/// according to `align`, then moves it by `offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Lines, top to bottom.
    pub lines: Vec<String>,
    /// Box the block is aligned in.
    pub rect: Rect,
    /// Placement of the block inside `rect`.
    pub align: Anchor,
    /// Offset after alignment.
    pub offset: Vec2,
    /// Registered font id.
    pub font_id: u32,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height factor.
    pub line_height: f32,
    /// Glyph color.
    pub color: Color,
    /// Which pass this is.
    pub effect: TextEffect,
}

/// An icon to draw into a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconDraw {
    /// Registered icon id.
    pub icon_id: u32,
    /// Destination rectangle; the icon is scaled to fill it.
    pub rect: Rect,
    /// Corner radius of the destination.
    pub rounding: f32,
    /// Draw in grayscale.
    pub grayscale: bool,
    /// Contrast adjustment, 0 for none.
    pub contrast: f32,
    /// Opacity multiplier.
    pub opacity: f32,
}

/// A 2D drawing surface.
///
/// Coordinates are affected by [`translate`](Self::translate); the
/// translation is part of the state saved and restored by
/// [`save`](Self::save) and [`restore`](Self::restore).
pub trait Canvas {
    /// Push the current state.
    fn save(&mut self);

    /// Pop the last saved state. Unbalanced restores are ignored.
    fn restore(&mut self);

    /// Move the origin.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Fill a rectangle, rounding each corner by its radius.
    fn fill_rect(&mut self, rect: Rect, radii: CornerRadii, brush: &Brush, antialias: bool);

    /// Stroke a rectangle outline centered on its edges.
    fn stroke_rect(
        &mut self,
        rect: Rect,
        radii: CornerRadii,
        width: f32,
        color: Color,
        antialias: bool,
    );

    /// Draw a soft shadow around `rect`, reaching out by `extent` per side.
    fn draw_shadow(&mut self, rect: Rect, radii: CornerRadii, extent: EdgeSize, color: Color);

    /// Draw a text block.
    fn draw_text(&mut self, run: &TextRun);

    /// Draw an icon.
    fn draw_icon(&mut self, icon: &IconDraw);
}

/// Saves canvas state on creation and restores it when dropped, on every
/// exit path including early returns with an error.
pub struct CanvasScope<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
}

impl<'c, C: Canvas + ?Sized> CanvasScope<'c, C> {
    /// Save `canvas` state until the scope is dropped.
    pub fn new(canvas: &'c mut C) -> Self {
        canvas.save();
        Self { canvas }
    }
}

impl<C: Canvas + ?Sized> Drop for CanvasScope<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

impl<C: Canvas + ?Sized> Deref for CanvasScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for CanvasScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selective_radii() {
        let radii = CornerRadii::selective(
            5.0,
            RoundedCorners::TOP_LEFT | RoundedCorners::BOTTOM_RIGHT,
        );
        assert_eq!(radii.top_left, 5.0);
        assert_eq!(radii.top_right, 0.0);
        assert_eq!(radii.bottom_right, 5.0);
        assert_eq!(radii.bottom_left, 0.0);
        assert!(!radii.is_zero());
        assert!(CornerRadii::selective(5.0, RoundedCorners::NONE).is_zero());
    }

    #[test]
    fn test_shrink_clamps() {
        let radii = CornerRadii::uniform(3.0).shrink(5.0);
        assert!(radii.is_zero());
    }
}
