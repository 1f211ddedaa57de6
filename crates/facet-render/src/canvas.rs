//! A [`Canvas`] that rasterizes into a tiny-skia [`Pixmap`].
//!
//! State is a transform stack: `save` pushes the current transform and
//! `restore` pops it. Shapes are built as paths with per-corner radii, so
//! gradients and icons are clipped to rounded rectangles by construction.

use facet_common::warning::warn_once;
use facet_dom::Rect;
use facet_paint::{Brush, Canvas, CornerRadii, IconDraw, TextEffect, TextRun};
use facet_style::{Color, EdgeSize, Vec2};
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, GradientStop, LinearGradient, Paint, Path, PathBuilder,
    Pattern, Pixmap, PixmapPaint, Point, RadialGradient, Shader, SpreadMode, Stroke, Transform,
};

use crate::error::RenderError;
use crate::fonts::{FontRegistry, advance_width, ascent, line_height};
use crate::icons::{IconBitmap, IconRegistry};

/// Control point distance of a cubic quarter circle, relative to its radius.
const KAPPA: f32 = 0.552_284_8;

/// Upper bound on the layers of a shadow.
const MAX_SHADOW_STEPS: i32 = 32;

/// Software canvas over an owned pixmap.
///
/// Fonts and icons are borrowed from their registries for the lifetime of
/// the canvas.
pub struct SkiaCanvas<'r> {
    pixmap: Pixmap,
    transform: Transform,
    saved: Vec<Transform>,
    fonts: &'r FontRegistry,
    icons: &'r IconRegistry,
}

impl<'r> SkiaCanvas<'r> {
    /// A transparent `width` by `height` canvas.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] for a zero or oversized surface.
    pub fn new(
        width: u32,
        height: u32,
        fonts: &'r FontRegistry,
        icons: &'r IconRegistry,
    ) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            saved: Vec::new(),
            fonts,
            icons,
        })
    }

    /// Fill the whole surface with `color`, ignoring the transform.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
    }

    /// The pixels drawn so far.
    #[must_use]
    pub const fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Give up the canvas and keep its pixels.
    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Straight-alpha color of one pixel, `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    fn fill_path(&mut self, path: &Path, shader: Shader<'_>, antialias: bool) {
        let paint = Paint {
            shader,
            anti_alias: antialias,
            ..Paint::default()
        };
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, self.transform, None);
    }

    fn draw_glyphs(&mut self, run: &TextRun, stamps: &[(f32, f32, f32)]) {
        let fonts = self.fonts;
        let Some(font) = fonts.get(run.font_id) else {
            warn_once(
                "render",
                &format!("font {} is not registered; text skipped", run.font_id),
            );
            return;
        };
        let size = run.font_size;
        if size <= 0.0 {
            return;
        }

        let advance = line_height(font, size) * run.line_height;
        let block_height = advance * run.lines.len() as f32;
        let top = (run.rect.height - block_height).mul_add(run.align.y_factor(), run.rect.y)
            + run.offset.y;
        let baseline = ascent(font, size);

        for (index, line) in run.lines.iter().enumerate() {
            let width = advance_width(font, line, size);
            let mut pen = (run.rect.width - width).mul_add(run.align.x_factor(), run.rect.x)
                + run.offset.x;
            let line_baseline = (index as f32).mul_add(advance, top) + baseline;

            for ch in line.chars().filter(|ch| !ch.is_control()) {
                let (metrics, coverage) = font.rasterize(ch, size);
                if let Some(glyph) =
                    glyph_pixmap(&coverage, metrics.width, metrics.height, run.color)
                {
                    let x = pen + metrics.xmin as f32;
                    let y = line_baseline - metrics.ymin as f32 - metrics.height as f32;
                    for &(dx, dy, opacity) in stamps {
                        let paint = PixmapPaint {
                            opacity,
                            ..PixmapPaint::default()
                        };
                        self.pixmap.draw_pixmap(
                            (x + dx).round() as i32,
                            (y + dy).round() as i32,
                            glyph.as_ref(),
                            &paint,
                            self.transform,
                            None,
                        );
                    }
                }
                pen += metrics.advance_width;
            }
        }
    }
}

impl Canvas for SkiaCanvas<'_> {
    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.pre_translate(dx, dy);
    }

    fn fill_rect(&mut self, rect: Rect, radii: CornerRadii, brush: &Brush, antialias: bool) {
        let Some(path) = rounded_rect_path(rect, radii) else {
            return;
        };
        self.fill_path(&path, brush_shader(brush), antialias);
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        radii: CornerRadii,
        width: f32,
        color: Color,
        antialias: bool,
    ) {
        let Some(path) = rounded_rect_path(rect, radii) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = antialias;
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform, None);
    }

    /// Approximated by stacked translucent layers, each grown a step
    /// further toward `extent`, so coverage fades linearly outward.
    fn draw_shadow(&mut self, rect: Rect, radii: CornerRadii, extent: EdgeSize, color: Color) {
        let reach = extent.top.max(extent.right).max(extent.bottom).max(extent.left);
        if reach <= 0 {
            return;
        }
        let steps = reach.min(MAX_SHADOW_STEPS);
        let layer = Color {
            a: (f32::from(color.a) / steps as f32).ceil() as u8,
            ..color
        };

        for step in (1..=steps).rev() {
            let t = step as f32 / steps as f32;
            let grow = |side: i32| side.max(0) as f32 * t;
            let bounds = Rect::new(
                rect.x - grow(extent.left),
                rect.y - grow(extent.top),
                rect.width + grow(extent.left) + grow(extent.right),
                rect.height + grow(extent.top) + grow(extent.bottom),
            );
            let round = grow(reach);
            let layer_radii = CornerRadii {
                top_left: radii.top_left + round,
                top_right: radii.top_right + round,
                bottom_right: radii.bottom_right + round,
                bottom_left: radii.bottom_left + round,
            };
            if let Some(path) = rounded_rect_path(bounds, layer_radii) {
                self.fill_path(&path, Shader::SolidColor(skia_color(layer)), true);
            }
        }
    }

    fn draw_text(&mut self, run: &TextRun) {
        if run.lines.is_empty() {
            return;
        }
        let stamps = match run.effect {
            TextEffect::Fill => vec![(0.0, 0.0, 1.0)],
            TextEffect::Outline(width) => ring(width, 1.0),
            TextEffect::Shadow(size) => {
                let mut stamps = ring(size / 2.0, 0.5);
                stamps.extend(ring(size, 0.25));
                stamps
            }
        };
        self.draw_glyphs(run, &stamps);
    }

    fn draw_icon(&mut self, icon: &IconDraw) {
        let icons = self.icons;
        let Some(bitmap) = icons.get(icon.icon_id) else {
            warn_once(
                "render",
                &format!("icon {} is not registered; icon skipped", icon.icon_id),
            );
            return;
        };
        if bitmap.width() == 0 || bitmap.height() == 0 {
            return;
        }
        let Some(source) = icon_pixmap(bitmap, icon.grayscale, icon.contrast) else {
            return;
        };
        let Some(path) = rounded_rect_path(icon.rect, CornerRadii::uniform(icon.rounding)) else {
            return;
        };

        let scale_x = icon.rect.width / bitmap.width() as f32;
        let scale_y = icon.rect.height / bitmap.height() as f32;
        let shader = Pattern::new(
            source.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            icon.opacity.clamp(0.0, 1.0),
            Transform::from_row(scale_x, 0.0, 0.0, scale_y, icon.rect.x, icon.rect.y),
        );
        self.fill_path(&path, shader, true);
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn point(v: Vec2) -> Point {
    Point::from_xy(v.x, v.y)
}

fn brush_shader(brush: &Brush) -> Shader<'static> {
    let stops = |from, to| {
        vec![
            GradientStop::new(0.0, skia_color(from)),
            GradientStop::new(1.0, skia_color(to)),
        ]
    };
    let shader = match *brush {
        Brush::Solid(color) => return Shader::SolidColor(skia_color(color)),
        Brush::Linear {
            start,
            end,
            from,
            to,
        } => LinearGradient::new(
            point(start),
            point(end),
            stops(from, to),
            SpreadMode::Pad,
            Transform::identity(),
        ),
        Brush::Radial {
            center,
            radius,
            from,
            to,
        } => RadialGradient::new(
            point(center),
            point(center),
            radius,
            stops(from, to),
            SpreadMode::Pad,
            Transform::identity(),
        ),
    };
    // A degenerate gradient (zero length or radius) shows its end color.
    shader.unwrap_or_else(|| match *brush {
        Brush::Solid(color) | Brush::Linear { to: color, .. } | Brush::Radial { to: color, .. } => {
            Shader::SolidColor(skia_color(color))
        }
    })
}

/// Eight offsets around the origin at `distance`.
fn ring(distance: f32, opacity: f32) -> Vec<(f32, f32, f32)> {
    if distance <= 0.0 {
        return Vec::new();
    }
    let diagonal = distance * std::f32::consts::FRAC_1_SQRT_2;
    [
        (distance, 0.0),
        (-distance, 0.0),
        (0.0, distance),
        (0.0, -distance),
        (diagonal, diagonal),
        (diagonal, -diagonal),
        (-diagonal, diagonal),
        (-diagonal, -diagonal),
    ]
    .into_iter()
    .map(|(dx, dy)| (dx, dy, opacity))
    .collect()
}

/// A rectangle with per-corner radii, each clamped to half the shorter side.
fn rounded_rect_path(rect: Rect, radii: CornerRadii) -> Option<Path> {
    if rect.is_empty() {
        return None;
    }
    let bounds = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)?;
    if radii.is_zero() {
        return Some(PathBuilder::from_rect(bounds));
    }

    let limit = rect.width.min(rect.height) / 2.0;
    let radius = CornerRadii {
        top_left: radii.top_left.clamp(0.0, limit),
        top_right: radii.top_right.clamp(0.0, limit),
        bottom_right: radii.bottom_right.clamp(0.0, limit),
        bottom_left: radii.bottom_left.clamp(0.0, limit),
    };
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

    let mut builder = PathBuilder::new();
    builder.move_to(left + radius.top_left, top);
    builder.line_to(right - radius.top_right, top);
    quarter(
        &mut builder,
        (right - radius.top_right, top),
        (right, top),
        (right, top + radius.top_right),
    );
    builder.line_to(right, bottom - radius.bottom_right);
    quarter(
        &mut builder,
        (right, bottom - radius.bottom_right),
        (right, bottom),
        (right - radius.bottom_right, bottom),
    );
    builder.line_to(left + radius.bottom_left, bottom);
    quarter(
        &mut builder,
        (left + radius.bottom_left, bottom),
        (left, bottom),
        (left, bottom - radius.bottom_left),
    );
    builder.line_to(left, top + radius.top_left);
    quarter(
        &mut builder,
        (left, top + radius.top_left),
        (left, top),
        (left + radius.top_left, top),
    );
    builder.close();
    builder.finish()
}

/// Cubic arc from `from` to `to` bulging toward `corner`.
fn quarter(builder: &mut PathBuilder, from: (f32, f32), corner: (f32, f32), to: (f32, f32)) {
    if from == to {
        return;
    }
    let pull = |a: f32, b: f32| (b - a).mul_add(KAPPA, a);
    builder.cubic_to(
        pull(from.0, corner.0),
        pull(from.1, corner.1),
        pull(to.0, corner.0),
        pull(to.1, corner.1),
        to.0,
        to.1,
    );
}

fn glyph_pixmap(coverage: &[u8], width: usize, height: usize, color: Color) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?)?;
    for (pixel, &alpha) in pixmap.pixels_mut().iter_mut().zip(coverage) {
        let alpha = (u16::from(alpha) * u16::from(color.a) / 255) as u8;
        *pixel = ColorU8::from_rgba(color.r, color.g, color.b, alpha).premultiply();
    }
    Some(pixmap)
}

fn icon_pixmap(bitmap: &IconBitmap, grayscale: bool, contrast: f32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(bitmap.width(), bitmap.height())?;
    let adjust = contrast.abs() > f32::EPSILON;
    for (pixel, rgba) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(bitmap.rgba().chunks_exact(4))
    {
        let [mut red, mut green, mut blue, alpha] = [rgba[0], rgba[1], rgba[2], rgba[3]];
        if grayscale {
            let luma = 0.114f32.mul_add(
                f32::from(blue),
                0.299f32.mul_add(f32::from(red), 0.587 * f32::from(green)),
            );
            let luma = luma.round().clamp(0.0, 255.0) as u8;
            (red, green, blue) = (luma, luma, luma);
        }
        if adjust {
            (red, green, blue) = (
                apply_contrast(red, contrast),
                apply_contrast(green, contrast),
                apply_contrast(blue, contrast),
            );
        }
        *pixel = ColorU8::from_rgba(red, green, blue, alpha).premultiply();
    }
    Some(pixmap)
}

/// Scale a channel's distance from mid-gray by `1 + contrast`.
fn apply_contrast(channel: u8, contrast: f32) -> u8 {
    let value = (f32::from(channel) / 255.0 - 0.5).mul_add(1.0 + contrast, 0.5);
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use facet_style::{Anchor, RoundedCorners};

    use super::*;

    const RED: Color = Color::rgba(255, 0, 0, 255);
    const BLUE: Color = Color::rgba(0, 0, 255, 255);

    fn canvas<'r>(fonts: &'r FontRegistry, icons: &'r IconRegistry) -> SkiaCanvas<'r> {
        SkiaCanvas::new(10, 10, fonts, icons).unwrap()
    }

    #[test]
    fn test_zero_surface_is_an_error() {
        let (fonts, icons) = (FontRegistry::new(), IconRegistry::new());
        assert!(matches!(
            SkiaCanvas::new(0, 10, &fonts, &icons),
            Err(RenderError::Surface {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_solid_fill() {
        let (fonts, icons) = (FontRegistry::new(), IconRegistry::new());
        let mut canvas = canvas(&fonts, &icons);
        canvas.fill_rect(
            Rect::new(0.0, 0.0, 5.0, 10.0),
            CornerRadii::ZERO,
            &Brush::Solid(RED),
            false,
        );
        assert_eq!(canvas.pixel(2, 5), Some(RED));
        assert_eq!(canvas.pixel(7, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_unflagged_corners_stay_square() {
        let (fonts, icons) = (FontRegistry::new(), IconRegistry::new());
        let mut canvas = canvas(&fonts, &icons);
        canvas.fill_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            CornerRadii::selective(5.0, RoundedCorners::TOP_LEFT),
            &Brush::Solid(RED),
            true,
        );
        assert_eq!(canvas.pixel(0, 0).map(|c| c.a), Some(0));
        assert_eq!(canvas.pixel(9, 0), Some(RED));
        assert_eq!(canvas.pixel(9, 9), Some(RED));
        assert_eq!(canvas.pixel(0, 9), Some(RED));
    }

    #[test]
    fn test_translate_is_scoped_by_save() {
        let (fonts, icons) = (FontRegistry::new(), IconRegistry::new());
        let mut canvas = canvas(&fonts, &icons);
        canvas.save();
        canvas.translate(5.0, 5.0);
        canvas.fill_rect(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            CornerRadii::ZERO,
            &Brush::Solid(RED),
            false,
        );
        canvas.restore();
        canvas.fill_rect(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            CornerRadii::ZERO,
            &Brush::Solid(BLUE),
            false,
        );
        assert_eq!(canvas.pixel(6, 6), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn test_horizontal_gradient_runs_left_to_right() {
        let (fonts, icons) = (FontRegistry::new(), IconRegistry::new());
        let mut canvas = canvas(&fonts, &icons);
        canvas.fill_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            CornerRadii::ZERO,
            &Brush::Linear {
                start: Vec2::new(0.0, 0.0),
                end: Vec2::new(10.0, 0.0),
                from: RED,
                to: BLUE,
            },
            false,
        );
        let left = canvas.pixel(0, 5).unwrap();
        let right = canvas.pixel(9, 5).unwrap();
        assert!(left.r > left.b);
        assert!(right.b > right.r);
    }

    #[test]
    fn test_icon_is_scaled_into_rect() {
        let fonts = FontRegistry::new();
        let mut icons = IconRegistry::new();
        icons.insert(1, IconBitmap::solid(2, 2, [255, 0, 0, 255]));
        let mut canvas = canvas(&fonts, &icons);
        canvas.draw_icon(&IconDraw {
            icon_id: 1,
            rect: Rect::new(2.0, 2.0, 4.0, 4.0),
            rounding: 0.0,
            grayscale: false,
            contrast: 0.0,
            opacity: 1.0,
        });
        let inside = canvas.pixel(3, 3).unwrap();
        assert!(inside.r >= 250 && inside.g <= 5 && inside.a >= 250);
        assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(8, 8), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_missing_resources_draw_nothing() {
        let (fonts, icons) = (FontRegistry::new(), IconRegistry::new());
        let mut canvas = canvas(&fonts, &icons);
        canvas.draw_text(&TextRun {
            lines: vec!["hello".to_owned()],
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            align: Anchor::TopLeft,
            offset: Vec2::ZERO,
            font_id: 4,
            font_size: 12.0,
            line_height: 1.2,
            color: RED,
            effect: TextEffect::Fill,
        });
        canvas.draw_icon(&IconDraw {
            icon_id: 9,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            rounding: 0.0,
            grayscale: false,
            contrast: 0.0,
            opacity: 1.0,
        });
        assert!(canvas.pixmap().pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn test_grayscale_and_contrast() {
        assert_eq!(apply_contrast(128, 0.0), 128);
        assert_eq!(apply_contrast(200, 1.0), 255);
        assert_eq!(apply_contrast(50, 1.0), 0);

        let icon = IconBitmap::solid(1, 1, [255, 0, 0, 255]);
        let pixmap = icon_pixmap(&icon, true, 0.0).unwrap();
        let pixel = pixmap.pixel(0, 0).unwrap();
        assert_eq!(pixel.red(), pixel.green());
        assert_eq!(pixel.green(), pixel.blue());
        assert_eq!(pixel.red(), 76);
    }
}
