//! Anchor points and flow direction.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, FromRepr};

/// The point of a parent's free space a child attaches to.
///
/// The horizontal component groups siblings along a horizontal main axis
/// (start, center, end groups) and aligns them on a vertical one; the
/// vertical component does the converse.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
)]
#[repr(u32)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Anchor {
    /// Top edge, left side.
    #[default]
    TopLeft = 0,
    /// Top edge, centered horizontally.
    TopCenter = 1,
    /// Top edge, right side.
    TopRight = 2,
    /// Vertically centered, left side.
    MiddleLeft = 3,
    /// Centered on both axes.
    MiddleCenter = 4,
    /// Vertically centered, right side.
    MiddleRight = 5,
    /// Bottom edge, left side.
    BottomLeft = 6,
    /// Bottom edge, centered horizontally.
    BottomCenter = 7,
    /// Bottom edge, right side.
    BottomRight = 8,
}

/// Horizontal component of an [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    /// Attach to the left edge.
    Left,
    /// Center horizontally.
    Center,
    /// Attach to the right edge.
    Right,
}

/// Vertical component of an [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    /// Attach to the top edge.
    Top,
    /// Center vertically.
    Middle,
    /// Attach to the bottom edge.
    Bottom,
}

impl Anchor {
    /// The horizontal component of this anchor.
    #[must_use]
    pub const fn horizontal(self) -> HorizontalAlign {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => HorizontalAlign::Left,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => HorizontalAlign::Center,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => HorizontalAlign::Right,
        }
    }

    /// The vertical component of this anchor.
    #[must_use]
    pub const fn vertical(self) -> VerticalAlign {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VerticalAlign::Top,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => VerticalAlign::Middle,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VerticalAlign::Bottom,
        }
    }

    /// Fraction of free space placed before the item on the x axis (0, 0.5 or 1).
    #[must_use]
    pub const fn x_factor(self) -> f32 {
        match self.horizontal() {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => 0.5,
            HorizontalAlign::Right => 1.0,
        }
    }

    /// Fraction of free space placed before the item on the y axis (0, 0.5 or 1).
    #[must_use]
    pub const fn y_factor(self) -> f32 {
        match self.vertical() {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => 0.5,
            VerticalAlign::Bottom => 1.0,
        }
    }
}

/// Main-axis direction along which siblings are placed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    FromRepr,
)]
#[repr(u32)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Flow {
    /// Children are placed left to right.
    #[default]
    Horizontal = 0,
    /// Children are placed top to bottom.
    Vertical = 1,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_anchor_components() {
        assert_eq!(Anchor::BottomCenter.horizontal(), HorizontalAlign::Center);
        assert_eq!(Anchor::BottomCenter.vertical(), VerticalAlign::Bottom);
        assert!((Anchor::MiddleRight.x_factor() - 1.0).abs() < f32::EPSILON);
        assert!((Anchor::MiddleRight.y_factor() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_anchor_repr_round_trip() {
        for anchor in Anchor::iter() {
            assert_eq!(Anchor::from_repr(anchor as u32), Some(anchor));
        }
        assert_eq!(Anchor::from_repr(9), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Anchor::from_str("middle-center").ok(), Some(Anchor::MiddleCenter));
        assert_eq!(Flow::from_str("vertical").ok(), Some(Flow::Vertical));
        assert!(Flow::from_str("diagonal").is_err());
    }
}
