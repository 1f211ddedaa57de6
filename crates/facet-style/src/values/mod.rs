//! Value types shared by `Style`, `ComputedStyle` and the snapshots.

mod anchor;
mod color;
mod decoration;
mod geometry;

pub use anchor::{Anchor, Flow, HorizontalAlign, VerticalAlign};
pub use color::Color;
pub use decoration::{BorderColor, GradientColor, GradientType, RoundedCorners};
pub use geometry::{EdgeSize, Size, Vec2};
