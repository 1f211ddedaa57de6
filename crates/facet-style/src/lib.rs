//! Style values, cascade resolution, and computed styles for facet.
//!
//! # Scope
//!
//! This crate implements:
//! - **Values** - colors, edge sizes, anchors, gradients and corner flags
//! - **Style** - a sparse, optional-valued property bag (one rule or inline override)
//! - **Stylesheet** - class/tag rule registration and cascade resolution
//! - **Computed Styles** - fully defaulted per-node state with change detection
//!
//! # Change detection
//!
//! ```text
//! Stylesheet::resolve ─┐
//!                      ├─► ComputedStyle::apply ─► ComputedStyle::commit ─► ChangeMask
//! inline Style ────────┘                                 │
//!                                            LayoutStyle + PaintStyle
//! ```
//!
//! `commit` snapshots the working state into two fixed-layout records and
//! compares each against the previous commit byte for byte. The caller
//! decides what a layout or paint change means for its node.

/// Computed style and commit.
pub mod computed;
/// Style errors.
pub mod error;
/// Fixed-layout style snapshots.
pub mod snapshot;
/// Sparse style declarations.
pub mod style;
/// Rule registration and cascade resolution.
pub mod stylesheet;
/// Value types used by styles.
pub mod values;

pub use computed::{ChangeMask, ComputedStyle};
pub use error::StyleError;
pub use snapshot::{LayoutStyle, PaintStyle};
pub use style::Style;
pub use stylesheet::{NodeSelectors, Selector, SelectorKind, Stylesheet};
pub use values::{
    Anchor, BorderColor, Color, EdgeSize, Flow, GradientColor, GradientType, RoundedCorners,
    Size, Vec2,
};
