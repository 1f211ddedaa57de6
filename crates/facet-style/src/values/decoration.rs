//! Borders, gradients and corner flags.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, FromRepr};

use super::Color;

/// Per-side border colors. A side without a color draws no border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BorderColor {
    /// Top side color.
    #[serde(default)]
    pub top: Option<Color>,
    /// Right side color.
    #[serde(default)]
    pub right: Option<Color>,
    /// Bottom side color.
    #[serde(default)]
    pub bottom: Option<Color>,
    /// Left side color.
    #[serde(default)]
    pub left: Option<Color>,
}

impl BorderColor {
    /// The same color on all four sides.
    #[must_use]
    pub const fn all(color: Color) -> Self {
        Self {
            top: Some(color),
            right: Some(color),
            bottom: Some(color),
            left: Some(color),
        }
    }
}

/// Direction of a two-color gradient.
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
pub enum GradientType {
    /// Left to right.
    #[default]
    Horizontal = 0,
    /// Top to bottom.
    Vertical = 1,
    /// Center outward.
    Radial = 2,
}

/// A two-color gradient filling the padding box shrunk by `inset` pixels.
///
/// A missing color stands for transparent; a gradient with neither color is
/// empty and draws nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GradientColor {
    /// Gradient direction.
    #[serde(default)]
    pub kind: GradientType,
    /// Start color.
    #[serde(default)]
    pub color1: Option<Color>,
    /// End color.
    #[serde(default)]
    pub color2: Option<Color>,
    /// Distance from the padding box edge, in pixels.
    #[serde(default)]
    pub inset: i32,
}

impl GradientColor {
    /// A left-to-right gradient.
    #[must_use]
    pub const fn horizontal(color1: Option<Color>, color2: Option<Color>, inset: i32) -> Self {
        Self {
            kind: GradientType::Horizontal,
            color1,
            color2,
            inset,
        }
    }

    /// A top-to-bottom gradient.
    #[must_use]
    pub const fn vertical(color1: Option<Color>, color2: Option<Color>, inset: i32) -> Self {
        Self {
            kind: GradientType::Vertical,
            color1,
            color2,
            inset,
        }
    }

    /// A center-outward gradient.
    #[must_use]
    pub const fn radial(color1: Option<Color>, color2: Option<Color>, inset: i32) -> Self {
        Self {
            kind: GradientType::Radial,
            color1,
            color2,
            inset,
        }
    }

    /// True when neither color is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.color1.is_none() && self.color2.is_none()
    }
}

/// Which corners of a box follow the border radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundedCorners(u8);

impl RoundedCorners {
    /// No corner is rounded.
    pub const NONE: Self = Self(0);
    /// Top-left corner.
    pub const TOP_LEFT: Self = Self(1);
    /// Top-right corner.
    pub const TOP_RIGHT: Self = Self(1 << 1);
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self(1 << 2);
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self(1 << 3);
    /// Both top corners.
    pub const TOP: Self = Self(Self::TOP_LEFT.0 | Self::TOP_RIGHT.0);
    /// Both bottom corners.
    pub const BOTTOM: Self = Self(Self::BOTTOM_LEFT.0 | Self::BOTTOM_RIGHT.0);
    /// Every corner.
    pub const ALL: Self = Self(0b1111);

    /// Raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Rebuild from raw bits, dropping unknown ones.
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// True when every corner in `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for RoundedCorners {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for RoundedCorners {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}
