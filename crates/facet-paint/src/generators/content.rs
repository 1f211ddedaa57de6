use facet_dom::{Node, Rect};
use facet_style::{Color, EdgeSize, Vec2};

use super::{Generator, local_content_box, local_padding_box, visible_color};
use crate::canvas::{Canvas, IconDraw, TextEffect, TextRun};
use crate::error::PaintError;

/// The node's icon, scaled into the padding box shrunk by the icon inset.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconGenerator;

impl Generator for IconGenerator {
    fn render_order(&self) -> i32 {
        4
    }

    fn name(&self) -> &'static str {
        "icon"
    }

    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        let paint = node.computed().paint();
        let Some(icon_id) = paint.icon_id() else {
            return Ok(());
        };
        let inset = paint.icon_inset().unwrap_or(EdgeSize::ZERO);
        let offset = paint.icon_offset().unwrap_or(Vec2::ZERO);
        let padding = local_padding_box(&node.bounds);
        let rect = Rect::new(
            padding.x + inset.left as f32 + offset.x,
            padding.y + inset.top as f32 + offset.y,
            padding.width - inset.horizontal() as f32,
            padding.height - inset.vertical() as f32,
        );
        if rect.is_empty() || paint.opacity() <= 0.0 {
            return Ok(());
        }

        canvas.draw_icon(&IconDraw {
            icon_id,
            rect,
            rounding: paint.icon_rounding(),
            grayscale: paint.icon_grayscale(),
            contrast: paint.icon_contrast(),
            opacity: paint.opacity().min(1.0),
        });
        Ok(())
    }
}

fn text_run(node: &Node, effect: TextEffect, color: Color) -> Result<TextRun, PaintError> {
    let layout = node.computed().layout();
    let paint = node.computed().paint();
    Ok(TextRun {
        lines: node.text_lines.clone(),
        rect: local_content_box(&node.bounds),
        align: paint.text_align()?,
        offset: paint.text_offset(),
        font_id: layout.font(),
        font_size: layout.font_size().max(0) as f32,
        line_height: layout.line_height().max(0.0),
        color,
        effect,
    })
}

fn has_text(node: &Node) -> bool {
    node.text_lines.iter().any(|line| !line.is_empty())
}

/// Text shadow and outline, drawn beneath the glyph fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEffectsGenerator;

impl Generator for TextEffectsGenerator {
    fn render_order(&self) -> i32 {
        5
    }

    fn name(&self) -> &'static str {
        "text-effects"
    }

    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        if !has_text(node) {
            return Ok(());
        }
        let paint = node.computed().paint();

        let shadow = paint
            .text_shadow_color()
            .and_then(|c| visible_color(c, paint))
            .filter(|_| paint.text_shadow_size() > 0.0);
        if let Some(color) = shadow {
            canvas.draw_text(&text_run(
                node,
                TextEffect::Shadow(paint.text_shadow_size()),
                color,
            )?);
        }

        let outline = paint
            .outline_color()
            .and_then(|c| visible_color(c, paint))
            .filter(|_| paint.outline_size() > 0.0);
        if let Some(color) = outline {
            canvas.draw_text(&text_run(
                node,
                TextEffect::Outline(paint.outline_size()),
                color,
            )?);
        }
        Ok(())
    }
}

/// The node's text, as wrapped by layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextGenerator;

impl Generator for TextGenerator {
    fn render_order(&self) -> i32 {
        6
    }

    fn name(&self) -> &'static str {
        "text"
    }

    fn generate(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        if !has_text(node) {
            return Ok(());
        }
        let paint = node.computed().paint();
        let Some(color) = visible_color(paint.color(), paint) else {
            return Ok(());
        };
        canvas.draw_text(&text_run(node, TextEffect::Fill, color)?);
        Ok(())
    }
}
