//! Computed styles and change detection.

use crate::snapshot::{LayoutStyle, PaintStyle, present, same_bytes};
use crate::style::Style;
use crate::values::{
    Anchor, BorderColor, Color, EdgeSize, Flow, GradientColor, RoundedCorners, Size, Vec2,
};

/// Text color used when no rule sets one.
pub const DEFAULT_COLOR: Color = Color::rgba(0xC0, 0xC0, 0xC0, 0xFF);

/// Font size used when no rule sets one.
pub const DEFAULT_FONT_SIZE: i32 = 12;

/// Line height factor used when no rule sets one.
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// What a [`ComputedStyle::commit`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeMask {
    /// Neither snapshot changed.
    None,
    /// Only geometry-affecting properties changed.
    LayoutChanged,
    /// Only paint properties changed.
    PaintChanged,
    /// Both snapshots changed.
    Both,
}

impl ChangeMask {
    const fn from_flags(layout: bool, paint: bool) -> Self {
        match (layout, paint) {
            (false, false) => Self::None,
            (true, false) => Self::LayoutChanged,
            (false, true) => Self::PaintChanged,
            (true, true) => Self::Both,
        }
    }

    /// True when the layout snapshot changed.
    #[must_use]
    pub const fn layout_changed(self) -> bool {
        matches!(self, Self::LayoutChanged | Self::Both)
    }

    /// True when the paint snapshot changed.
    #[must_use]
    pub const fn paint_changed(self) -> bool {
        matches!(self, Self::PaintChanged | Self::Both)
    }
}

/// The fully defaulted style of one node.
///
/// Working values are updated by [`apply`](Self::apply), once per style
/// source (cascade result first, inline style last), and published by
/// [`commit`](Self::commit), which snapshots them and reports which half
/// changed since the previous commit.
///
/// Visual attributes that may be absent (background, borders, gradient,
/// icon, ...) stay optional: `None` means "not drawn".
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    /// Whether the node takes part in layout and paint.
    pub is_visible: bool,
    /// Alignment inside the parent.
    pub anchor: Anchor,
    /// Explicit content size.
    pub size: Size,
    /// Child placement direction.
    pub flow: Flow,
    /// Spacing between children.
    pub gap: i32,
    /// Whether the node fills the remaining space of its parent.
    pub stretch: bool,
    /// Padding edges.
    pub padding: EdgeSize,
    /// Margin edges.
    pub margin: EdgeSize,
    /// Text color.
    pub color: Color,
    /// Registered font id.
    pub font: u32,
    /// Font size in pixels.
    pub font_size: i32,
    /// Line height factor.
    pub line_height: f32,
    /// Whether text wraps.
    pub word_wrap: bool,
    /// Text block placement.
    pub text_align: Anchor,
    /// Text offset after alignment.
    pub text_offset: Vec2,
    /// Text outline width.
    pub outline_size: f32,
    /// Text outline color.
    pub outline_color: Option<Color>,
    /// Text shadow blur size.
    pub text_shadow_size: f32,
    /// Text shadow color.
    pub text_shadow_color: Option<Color>,
    /// Solid background fill.
    pub background_color: Option<Color>,
    /// Background gradient.
    pub background_gradient: Option<GradientColor>,
    /// Per-side border colors.
    pub border_color: Option<BorderColor>,
    /// Per-side border widths.
    pub border_width: EdgeSize,
    /// Corner radius.
    pub border_radius: i32,
    /// Border distance from the padding box edge.
    pub border_inset: f32,
    /// Corners following the border radius.
    pub rounded_corners: RoundedCorners,
    /// Stroke color.
    pub stroke_color: Option<Color>,
    /// Stroke width.
    pub stroke_width: i32,
    /// Stroke distance from the padding box edge.
    pub stroke_inset: f32,
    /// Icon id.
    pub icon_id: Option<u32>,
    /// Icon insets.
    pub icon_inset: Option<EdgeSize>,
    /// Icon offset.
    pub icon_offset: Option<Vec2>,
    /// Icon corner radius.
    pub icon_rounding: f32,
    /// Grayscale icon.
    pub icon_grayscale: bool,
    /// Icon contrast adjustment.
    pub icon_contrast: f32,
    /// Node opacity.
    pub opacity: f32,
    /// Per-side drop shadow extent.
    pub shadow_size: EdgeSize,
    /// Shadow start distance inside the padding box.
    pub shadow_inset: i32,
    /// Drop shadow offset.
    pub shadow_offset: Vec2,
    /// Drop shadow color.
    pub shadow_color: Option<Color>,
    /// Antialiased shapes.
    pub is_antialiased: bool,

    committed_layout: LayoutStyle,
    committed_paint: PaintStyle,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            is_visible: true,
            anchor: Anchor::TopLeft,
            size: Size::default(),
            flow: Flow::Horizontal,
            gap: 0,
            stretch: false,
            padding: EdgeSize::ZERO,
            margin: EdgeSize::ZERO,
            color: DEFAULT_COLOR,
            font: 0,
            font_size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_LINE_HEIGHT,
            word_wrap: false,
            text_align: Anchor::TopLeft,
            text_offset: Vec2::ZERO,
            outline_size: 0.0,
            outline_color: None,
            text_shadow_size: 0.0,
            text_shadow_color: None,
            background_color: None,
            background_gradient: None,
            border_color: None,
            border_width: EdgeSize::ZERO,
            border_radius: 0,
            border_inset: 0.0,
            rounded_corners: RoundedCorners::ALL,
            stroke_color: None,
            stroke_width: 0,
            stroke_inset: 0.0,
            icon_id: None,
            icon_inset: None,
            icon_offset: None,
            icon_rounding: 0.0,
            icon_grayscale: false,
            icon_contrast: 0.0,
            opacity: 1.0,
            shadow_size: EdgeSize::ZERO,
            shadow_inset: 0,
            shadow_offset: Vec2::ZERO,
            shadow_color: None,
            is_antialiased: true,
            committed_layout: LayoutStyle::default(),
            committed_paint: PaintStyle::default(),
        }
    }
}

macro_rules! apply_required {
    ($target:ident, $source:ident; $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = $source.$field {
                $target.$field = value;
            }
        )*
    };
}

macro_rules! apply_optional {
    ($target:ident, $source:ident; $($field:ident),* $(,)?) => {
        $(
            if $source.$field.is_some() {
                $target.$field = $source.$field;
            }
        )*
    };
}

impl ComputedStyle {
    /// A computed style holding the defaults, with nothing committed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every property `style` sets; keep the working value for the rest.
    ///
    /// Does not publish anything; call [`commit`](Self::commit) once all
    /// sources have been applied.
    pub fn apply(&mut self, style: &Style) {
        apply_required!(self, style;
            is_visible, anchor, size, flow, gap, stretch, padding, margin,
            color, font, font_size, line_height, word_wrap, text_align, text_offset,
            outline_size, text_shadow_size, border_width, border_radius, border_inset,
            rounded_corners, stroke_width, stroke_inset, icon_rounding, icon_grayscale,
            icon_contrast, opacity, shadow_size, shadow_inset, shadow_offset,
            is_antialiased,
        );
        apply_optional!(self, style;
            outline_color, text_shadow_color, background_color, background_gradient,
            border_color, stroke_color, icon_id, icon_inset, icon_offset, shadow_color,
        );
    }

    /// Return every working value to its default. Committed snapshots are kept
    /// so the next commit still diffs against what was last published.
    pub fn reset(&mut self) {
        let committed_layout = self.committed_layout;
        let committed_paint = self.committed_paint;
        *self = Self {
            committed_layout,
            committed_paint,
            ..Self::default()
        };
    }

    /// Snapshot the working values and compare each half with the last commit.
    ///
    /// A changed snapshot replaces the stored one; an unchanged one is left
    /// alone. Committing twice without an intervening change returns
    /// [`ChangeMask::None`] the second time.
    pub fn commit(&mut self) -> ChangeMask {
        let layout = self.layout_snapshot();
        let paint = self.paint_snapshot();

        let layout_changed = !same_bytes(&self.committed_layout, &layout);
        if layout_changed {
            self.committed_layout = layout;
        }

        let paint_changed = !same_bytes(&self.committed_paint, &paint);
        if paint_changed {
            self.committed_paint = paint;
        }

        ChangeMask::from_flags(layout_changed, paint_changed)
    }

    /// The last committed layout snapshot.
    #[must_use]
    pub const fn layout(&self) -> &LayoutStyle {
        &self.committed_layout
    }

    /// The last committed paint snapshot.
    #[must_use]
    pub const fn paint(&self) -> &PaintStyle {
        &self.committed_paint
    }

    fn layout_snapshot(&self) -> LayoutStyle {
        LayoutStyle::new(
            self.anchor,
            self.is_visible,
            self.size,
            self.flow,
            self.gap,
            self.stretch,
            self.padding,
            self.margin,
            self.word_wrap,
            self.font,
            self.font_size,
            self.line_height,
        )
    }

    fn paint_snapshot(&self) -> PaintStyle {
        let mut ps = PaintStyle {
            color: self.color.to_argb(),
            text_align: self.text_align as u32,
            text_offset_x: self.text_offset.x,
            text_offset_y: self.text_offset.y,
            outline_size: self.outline_size,
            text_shadow_size: self.text_shadow_size,
            border_top_width: self.border_width.top,
            border_right_width: self.border_width.right,
            border_bottom_width: self.border_width.bottom,
            border_left_width: self.border_width.left,
            border_radius: self.border_radius,
            border_inset: self.border_inset,
            rounded_corners: u32::from(self.rounded_corners.bits()),
            stroke_width: self.stroke_width,
            stroke_inset: self.stroke_inset,
            icon_rounding: self.icon_rounding,
            icon_grayscale: u32::from(self.icon_grayscale),
            icon_contrast: self.icon_contrast,
            opacity: self.opacity,
            shadow_top: self.shadow_size.top,
            shadow_right: self.shadow_size.right,
            shadow_bottom: self.shadow_size.bottom,
            shadow_left: self.shadow_size.left,
            shadow_inset: self.shadow_inset,
            shadow_offset_x: self.shadow_offset.x,
            shadow_offset_y: self.shadow_offset.y,
            is_antialiased: u32::from(self.is_antialiased),
            ..PaintStyle::default()
        };

        ps.background_color = ps.set_color(present::BACKGROUND_COLOR, self.background_color);
        ps.outline_color = ps.set_color(present::OUTLINE_COLOR, self.outline_color);
        ps.text_shadow_color = ps.set_color(present::TEXT_SHADOW_COLOR, self.text_shadow_color);
        ps.stroke_color = ps.set_color(present::STROKE_COLOR, self.stroke_color);
        ps.shadow_color = ps.set_color(present::SHADOW_COLOR, self.shadow_color);

        if let Some(border) = self.border_color {
            ps.present |= present::BORDER_COLOR;
            ps.border_top_color = ps.set_color(present::BORDER_TOP_COLOR, border.top);
            ps.border_right_color = ps.set_color(present::BORDER_RIGHT_COLOR, border.right);
            ps.border_bottom_color = ps.set_color(present::BORDER_BOTTOM_COLOR, border.bottom);
            ps.border_left_color = ps.set_color(present::BORDER_LEFT_COLOR, border.left);
        }

        if let Some(gradient) = self.background_gradient {
            ps.present |= present::GRADIENT;
            ps.gradient_type = gradient.kind as u32;
            ps.gradient_inset = gradient.inset;
            ps.gradient_color1 = ps.set_color(present::GRADIENT_COLOR1, gradient.color1);
            ps.gradient_color2 = ps.set_color(present::GRADIENT_COLOR2, gradient.color2);
        }

        if let Some(id) = self.icon_id {
            ps.present |= present::ICON_ID;
            ps.icon_id = id;
        }

        if let Some(inset) = self.icon_inset {
            ps.present |= present::ICON_INSET;
            ps.icon_inset_top = inset.top;
            ps.icon_inset_right = inset.right;
            ps.icon_inset_bottom = inset.bottom;
            ps.icon_inset_left = inset.left;
        }

        if let Some(offset) = self.icon_offset {
            ps.present |= present::ICON_OFFSET;
            ps.icon_offset_x = offset.x;
            ps.icon_offset_y = offset.y;
        }

        ps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::GradientType;

    fn committed() -> ComputedStyle {
        let mut style = ComputedStyle::new();
        let _ = style.commit();
        style
    }

    #[test]
    fn test_first_commit_publishes_defaults() {
        let mut style = ComputedStyle::new();
        assert_eq!(style.commit(), ChangeMask::Both);
        assert!(style.layout().is_visible());
        assert_eq!(style.layout().font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(style.paint().color(), DEFAULT_COLOR);
        assert_eq!(style.paint().rounded_corners(), RoundedCorners::ALL);
        assert!(style.paint().is_antialiased());
    }

    #[test]
    fn test_paint_field_reports_paint_only() {
        let mut style = committed();
        style.apply(&Style {
            background_color: Some(Color::BLACK),
            ..Style::default()
        });
        assert_eq!(style.commit(), ChangeMask::PaintChanged);
        assert_eq!(style.paint().background_color(), Some(Color::BLACK));
    }

    #[test]
    fn test_layout_field_reports_layout_only() {
        let mut style = committed();
        style.apply(&Style {
            padding: Some(EdgeSize::all(3)),
            ..Style::default()
        });
        assert_eq!(style.commit(), ChangeMask::LayoutChanged);
        assert_eq!(style.layout().padding(), EdgeSize::all(3));
    }

    #[test]
    fn test_both_halves_changed() {
        let mut style = committed();
        style.apply(&Style {
            gap: Some(2),
            opacity: Some(0.5),
            ..Style::default()
        });
        assert_eq!(style.commit(), ChangeMask::Both);
    }

    #[test]
    fn test_reset_then_same_values_is_no_change() {
        let mut style = committed();
        style.apply(&Style {
            icon_id: Some(4),
            ..Style::default()
        });
        let _ = style.commit();

        style.reset();
        style.apply(&Style {
            icon_id: Some(4),
            ..Style::default()
        });
        assert_eq!(style.commit(), ChangeMask::None);
    }

    #[test]
    fn test_gradient_round_trips_through_snapshot() {
        let mut style = committed();
        let gradient = GradientColor::radial(Some(Color::WHITE), None, 3);
        style.apply(&Style {
            background_gradient: Some(gradient),
            ..Style::default()
        });
        let _ = style.commit();
        let decoded = style.paint().gradient().unwrap().unwrap();
        assert_eq!(decoded, gradient);
        assert_eq!(decoded.kind, GradientType::Radial);
    }
}
