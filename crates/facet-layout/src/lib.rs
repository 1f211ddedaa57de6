//! Box-model layout for the facet drawing core.
//!
//! [`LayoutSolver`] turns committed [`LayoutStyle`](facet_style::LayoutStyle)s
//! into node [`Bounds`](facet_dom::Bounds). Text is measured through a
//! [`FontService`] and icons through an [`IconService`], both supplied by
//! the host.

mod solver;
mod text;

pub use solver::{LayoutError, LayoutSolver, SolveStats};
pub use text::{
    ApproximateFontMetrics, FontError, FontService, IconService, IconSize, MeasuredText, NoIcons,
    wrap_text,
};
