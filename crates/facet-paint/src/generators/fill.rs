use facet_dom::Node;
use facet_style::{Color, GradientType, StyleError, Vec2};

use super::{Generator, corner_radii, local_padding_box, visible_color};
use crate::canvas::{Brush, Canvas};
use crate::error::PaintError;

/// Drop shadow behind the node.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowGenerator;

impl Generator for ShadowGenerator {
    fn render_order(&self) -> i32 {
        -1
    }

    fn name(&self) -> &'static str {
        "shadow"
    }

    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        let paint = node.computed().paint();
        let extent = paint.shadow_size();
        let Some(color) = paint.shadow_color().and_then(|c| visible_color(c, paint)) else {
            return Ok(());
        };
        if extent.is_zero() {
            return Ok(());
        }

        let offset = paint.shadow_offset();
        let rect = local_padding_box(&node.bounds)
            .inset(paint.shadow_inset() as f32)
            .translate(offset.x, offset.y);
        canvas.draw_shadow(rect, corner_radii(paint), extent, color);
        Ok(())
    }
}

/// Solid background fill of the padding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundGenerator;

impl Generator for BackgroundGenerator {
    fn render_order(&self) -> i32 {
        0
    }

    fn name(&self) -> &'static str {
        "background"
    }

    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        let paint = node.computed().paint();
        let Some(color) = paint.background_color().and_then(|c| visible_color(c, paint)) else {
            return Ok(());
        };
        let rect = local_padding_box(&node.bounds);
        if rect.is_empty() {
            return Ok(());
        }
        canvas.fill_rect(
            rect,
            corner_radii(paint),
            &Brush::Solid(color),
            paint.is_antialiased(),
        );
        Ok(())
    }
}

/// Two-color gradient over the padding box shrunk by the gradient inset.
///
/// With a border radius, corners not flagged in the rounded corners stay
/// square.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientGenerator;

impl Generator for GradientGenerator {
    fn render_order(&self) -> i32 {
        1
    }

    fn name(&self) -> &'static str {
        "gradient"
    }

    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        let paint = node.computed().paint();
        let gradient = match paint.gradient() {
            Ok(Some(gradient)) if !gradient.is_empty() => gradient,
            Ok(_) => return Ok(()),
            Err(StyleError::UnknownVariant { code, .. }) => {
                return Err(PaintError::UnknownGradient(code));
            }
            Err(err) => return Err(err.into()),
        };

        let padding = local_padding_box(&node.bounds);
        let inset = gradient.inset as f32;
        let rect = padding.inset(inset);
        if rect.is_empty() {
            return Ok(());
        }

        let tint = |color: Option<Color>| {
            color
                .unwrap_or(Color::TRANSPARENT)
                .with_opacity(paint.opacity())
        };
        let (from, to) = (tint(gradient.color1), tint(gradient.color2));
        let (width, height) = (padding.width, padding.height);
        let brush = match gradient.kind {
            GradientType::Horizontal => Brush::Linear {
                start: Vec2::new(inset, inset),
                end: Vec2::new(width - inset, inset),
                from,
                to,
            },
            GradientType::Vertical => Brush::Linear {
                start: Vec2::new(inset, inset),
                end: Vec2::new(inset, height - inset),
                from,
                to,
            },
            GradientType::Radial => Brush::Radial {
                center: Vec2::new(width / 2.0, height / 2.0),
                radius: ((width - inset) / 2.0).max(0.0),
                from,
                to,
            },
        };

        canvas.fill_rect(rect, corner_radii(paint), &brush, true);
        Ok(())
    }
}
