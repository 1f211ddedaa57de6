//! Sizes, edges and offsets.

use serde::{Deserialize, Serialize};

/// A four-sided integer offset (padding, margin, border width, insets).
///
/// Sides are expected to be non-negative except where the value describes
/// an inset, in which case negative values push outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EdgeSize {
    /// Top edge size.
    pub top: i32,
    /// Right edge size.
    pub right: i32,
    /// Bottom edge size.
    pub bottom: i32,
    /// Left edge size.
    pub left: i32,
}

impl EdgeSize {
    /// All four sides zero.
    pub const ZERO: Self = Self::all(0);

    /// Build an edge size from each side, clockwise from the top.
    #[must_use]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same value on every side.
    #[must_use]
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `vertical` on top and bottom, `horizontal` on left and right.
    #[must_use]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left plus right, saturating at the `i32` bounds.
    #[must_use]
    pub const fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Top plus bottom, saturating at the `i32` bounds.
    #[must_use]
    pub const fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    /// True when every side is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}

/// An explicit node size in pixels. Zero on an axis means "size to content".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Build a size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A 2D offset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The zero offset.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Build an offset.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
