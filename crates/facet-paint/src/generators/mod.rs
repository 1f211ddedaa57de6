//! Paint generators.
//!
//! Each generator draws one visual effect of a node from its committed
//! [`PaintStyle`](facet_style::PaintStyle) and its [`Bounds`]. Coordinates
//! are local to the node's padding box: `(0, 0)` is its top-left corner.
//! A generator whose governing property is unset draws nothing at all.

mod content;
mod fill;
mod outline;

use facet_dom::{Bounds, Node, Rect};
use facet_style::{Color, PaintStyle};

use crate::canvas::{Canvas, CornerRadii};
use crate::error::PaintError;

pub use content::{IconGenerator, TextEffectsGenerator, TextGenerator};
pub use fill::{BackgroundGenerator, GradientGenerator, ShadowGenerator};
pub use outline::{BorderGenerator, StrokeGenerator};

/// One unit of the render pipeline.
pub trait Generator {
    /// Position in the pipeline; lower orders draw first.
    fn render_order(&self) -> i32;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Draw this generator's effect for `node`.
    ///
    /// # Errors
    ///
    /// Returns a [`PaintError`] for configuration mistakes such as an
    /// unknown gradient type.
    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError>;
}

/// The padding box in local coordinates.
pub(crate) fn local_padding_box(bounds: &Bounds) -> Rect {
    Rect::new(0.0, 0.0, bounds.padding.width, bounds.padding.height)
}

/// The content box in local coordinates.
pub(crate) fn local_content_box(bounds: &Bounds) -> Rect {
    bounds
        .content
        .translate(-bounds.padding.x, -bounds.padding.y)
}

/// Corner radii from the border radius and the rounded corner flags.
pub(crate) fn corner_radii(paint: &PaintStyle) -> CornerRadii {
    if paint.border_radius() <= 0 {
        return CornerRadii::ZERO;
    }
    CornerRadii::selective(paint.border_radius() as f32, paint.rounded_corners())
}

/// `color` with the node opacity applied, `None` if nothing would show.
pub(crate) fn visible_color(color: Color, paint: &PaintStyle) -> Option<Color> {
    let color = color.with_opacity(paint.opacity());
    (color.a > 0).then_some(color)
}
