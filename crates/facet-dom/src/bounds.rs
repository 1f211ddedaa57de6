//! Layout rectangles.

use facet_style::EdgeSize;

/// An axis-aligned rectangle in absolute surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width, never negative.
    pub width: f32,
    /// Height, never negative.
    pub height: f32,
}

impl Rect {
    /// A rectangle at `(x, y)`. Negative sizes clamp to zero.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow outward by `edges`.
    #[must_use]
    pub fn expand(&self, edges: EdgeSize) -> Self {
        Self::new(
            self.x - edges.left as f32,
            self.y - edges.top as f32,
            self.width + edges.horizontal() as f32,
            self.height + edges.vertical() as f32,
        )
    }

    /// Shrink inward by `amount` on every side.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - amount * 2.0,
            self.height - amount * 2.0,
        )
    }

    /// Move by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// The three nested boxes of a laid-out node.
///
/// `padding` is `content` grown by the node's padding, `margin` is `padding`
/// grown by its margin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Content box.
    pub content: Rect,
    /// Padding box.
    pub padding: Rect,
    /// Margin box.
    pub margin: Rect,
}

impl Bounds {
    /// Build all three boxes from a content box and the node's edges.
    #[must_use]
    pub fn from_content(content: Rect, padding: EdgeSize, margin: EdgeSize) -> Self {
        let padding_box = content.expand(padding);
        Self {
            content,
            padding: padding_box,
            margin: padding_box.expand(margin),
        }
    }

    /// Move all three boxes by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            content: self.content.translate(dx, dy),
            padding: self.padding.translate(dx, dy),
            margin: self.margin.translate(dx, dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_nest() {
        let bounds = Bounds::from_content(
            Rect::new(10.0, 10.0, 20.0, 5.0),
            EdgeSize::all(2),
            EdgeSize::new(1, 0, 0, 3),
        );
        assert_eq!(bounds.padding, Rect::new(8.0, 8.0, 24.0, 9.0));
        assert_eq!(bounds.margin, Rect::new(5.0, 7.0, 27.0, 10.0));
    }

    #[test]
    fn test_negative_size_clamps() {
        let rect = Rect::new(0.0, 0.0, 4.0, 4.0).inset(3.0);
        assert_eq!(rect.width, 0.0);
        assert!(rect.is_empty());
    }
}
