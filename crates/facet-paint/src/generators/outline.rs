use facet_dom::{Node, Rect};
use facet_style::Color;

use super::{Generator, corner_radii, local_padding_box, visible_color};
use crate::canvas::{Brush, Canvas, CornerRadii};
use crate::error::PaintError;

/// Per-side borders inside the padding box, moved in by the border inset.
///
/// Four sides of one color and width are stroked as a single rounded
/// outline; anything else is drawn side by side as square strips.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderGenerator;

impl Generator for BorderGenerator {
    fn render_order(&self) -> i32 {
        2
    }

    fn name(&self) -> &'static str {
        "border"
    }

    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        let paint = node.computed().paint();
        let Some(colors) = paint.border_color() else {
            return Ok(());
        };
        let widths = paint.border_width();
        let rect = local_padding_box(&node.bounds).inset(paint.border_inset());
        if rect.is_empty() {
            return Ok(());
        }
        let antialias = paint.is_antialiased();
        let tint = |color: Option<Color>| color.and_then(|c| visible_color(c, paint));

        let sides = [
            (widths.top, tint(colors.top)),
            (widths.right, tint(colors.right)),
            (widths.bottom, tint(colors.bottom)),
            (widths.left, tint(colors.left)),
        ];
        let uniform = sides.iter().all(|side| *side == sides[0]);
        if uniform {
            if let (width, Some(color)) = sides[0]
                && width > 0
            {
                let width = width as f32;
                let radii = corner_radii(paint).shrink(width / 2.0);
                canvas.stroke_rect(rect.inset(width / 2.0), radii, width, color, antialias);
            }
            return Ok(());
        }

        let [top, right, bottom, left] = sides;
        let strips = [
            (Rect::new(rect.x, rect.y, rect.width, top.0 as f32), top.1),
            (
                Rect::new(rect.right() - right.0 as f32, rect.y, right.0 as f32, rect.height),
                right.1,
            ),
            (
                Rect::new(rect.x, rect.bottom() - bottom.0 as f32, rect.width, bottom.0 as f32),
                bottom.1,
            ),
            (Rect::new(rect.x, rect.y, left.0 as f32, rect.height), left.1),
        ];
        for (strip, color) in strips {
            if let Some(color) = color
                && !strip.is_empty()
            {
                canvas.fill_rect(strip, CornerRadii::ZERO, &Brush::Solid(color), antialias);
            }
        }
        Ok(())
    }
}

/// A single-color outline of the padding box, moved in by the stroke inset.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokeGenerator;

impl Generator for StrokeGenerator {
    fn render_order(&self) -> i32 {
        3
    }

    fn name(&self) -> &'static str {
        "stroke"
    }

    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        let paint = node.computed().paint();
        let width = paint.stroke_width();
        let Some(color) = paint.stroke_color().and_then(|c| visible_color(c, paint)) else {
            return Ok(());
        };
        if width <= 0 {
            return Ok(());
        }

        let width = width as f32;
        let inset = paint.stroke_inset() + width / 2.0;
        let rect = local_padding_box(&node.bounds).inset(inset);
        if rect.is_empty() {
            return Ok(());
        }
        canvas.stroke_rect(
            rect,
            corner_radii(paint).shrink(inset),
            width,
            color,
            paint.is_antialiased(),
        );
        Ok(())
    }
}
