//! Sparse style declarations.
//!
//! A [`Style`] is one declaration: a class rule, a tag rule or a node's
//! inline override. Every property is optional; `None` means "not set here"
//! and never overrides a value resolved from another source.

use serde::{Deserialize, Serialize};

use crate::values::{
    Anchor, BorderColor, Color, EdgeSize, Flow, GradientColor, RoundedCorners, Size, Vec2,
};

/// A sparse, optional-valued property bag.
///
/// Rules are immutable once registered with a
/// [`Stylesheet`](crate::Stylesheet); changing a rule means registering a
/// new `Style` for the same selector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    /// Whether the node takes part in layout and paint at all.
    pub is_visible: Option<bool>,
    /// Alignment inside the parent's free space.
    pub anchor: Option<Anchor>,
    /// Explicit content size. A zero dimension means "size to content".
    pub size: Option<Size>,
    /// Direction in which children are placed.
    pub flow: Option<Flow>,
    /// Spacing inserted between children along the flow direction.
    pub gap: Option<i32>,
    /// Whether the node fills the remaining space of its parent.
    pub stretch: Option<bool>,
    /// Space between the content box and the padding box.
    pub padding: Option<EdgeSize>,
    /// Space between the padding box and the margin box.
    pub margin: Option<EdgeSize>,

    /// Text color.
    pub color: Option<Color>,
    /// Registered font id.
    pub font: Option<u32>,
    /// Font size in pixels.
    pub font_size: Option<i32>,
    /// Line height as a multiple of the font's natural line height.
    pub line_height: Option<f32>,
    /// Whether text wraps at the available width.
    pub word_wrap: Option<bool>,
    /// Placement of the text block inside the content box.
    pub text_align: Option<Anchor>,
    /// Offset applied to the text after alignment.
    pub text_offset: Option<Vec2>,
    /// Width of the text outline.
    pub outline_size: Option<f32>,
    /// Color of the text outline.
    pub outline_color: Option<Color>,
    /// Blur size of the text shadow.
    pub text_shadow_size: Option<f32>,
    /// Color of the text shadow.
    pub text_shadow_color: Option<Color>,

    /// Solid fill of the padding box.
    pub background_color: Option<Color>,
    /// Gradient fill of the padding box.
    pub background_gradient: Option<GradientColor>,
    /// Per-side border colors.
    pub border_color: Option<BorderColor>,
    /// Per-side border widths.
    pub border_width: Option<EdgeSize>,
    /// Corner radius shared by fills, borders and strokes.
    pub border_radius: Option<i32>,
    /// Distance of the border from the padding box edge.
    pub border_inset: Option<f32>,
    /// Corners that follow `border_radius`.
    pub rounded_corners: Option<RoundedCorners>,
    /// Color of the stroke drawn around the padding box.
    pub stroke_color: Option<Color>,
    /// Width of the stroke.
    pub stroke_width: Option<i32>,
    /// Distance of the stroke from the padding box edge.
    pub stroke_inset: Option<f32>,

    /// Registered icon id.
    pub icon_id: Option<u32>,
    /// Distance of the icon from the padding box edges.
    pub icon_inset: Option<EdgeSize>,
    /// Offset applied to the icon after insetting.
    pub icon_offset: Option<Vec2>,
    /// Corner radius of the icon.
    pub icon_rounding: Option<f32>,
    /// Whether the icon is drawn in grayscale.
    pub icon_grayscale: Option<bool>,
    /// Contrast adjustment applied to the icon.
    pub icon_contrast: Option<f32>,

    /// Opacity multiplied into every color the node draws.
    pub opacity: Option<f32>,
    /// Per-side extent of the drop shadow.
    pub shadow_size: Option<EdgeSize>,
    /// Distance the shadow starts inside the padding box.
    pub shadow_inset: Option<i32>,
    /// Offset of the drop shadow.
    pub shadow_offset: Option<Vec2>,
    /// Color of the drop shadow.
    pub shadow_color: Option<Color>,
    /// Whether shapes are antialiased.
    pub is_antialiased: Option<bool>,
}

macro_rules! merge_fields {
    ($target:ident, $source:ident; $($field:ident),* $(,)?) => {
        $(
            if $source.$field.is_some() {
                $target.$field = $source.$field;
            }
        )*
    };
}

macro_rules! all_unset {
    ($style:ident; $($field:ident),* $(,)?) => {
        true $(&& $style.$field.is_none())*
    };
}

impl Style {
    /// A style with every property unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite every property that `other` sets. Unset properties of
    /// `other` leave `self` untouched.
    pub fn merge(&mut self, other: &Self) {
        merge_fields!(self, other;
            is_visible, anchor, size, flow, gap, stretch, padding, margin,
            color, font, font_size, line_height, word_wrap, text_align, text_offset,
            outline_size, outline_color, text_shadow_size, text_shadow_color,
            background_color, background_gradient, border_color, border_width,
            border_radius, border_inset, rounded_corners, stroke_color, stroke_width,
            stroke_inset, icon_id, icon_inset, icon_offset, icon_rounding,
            icon_grayscale, icon_contrast, opacity, shadow_size, shadow_inset,
            shadow_offset, shadow_color, is_antialiased,
        );
    }

    /// Merge `other` into a copy of `self`.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// True when no property is set.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        all_unset!(self;
            is_visible, anchor, size, flow, gap, stretch, padding, margin,
            color, font, font_size, line_height, word_wrap, text_align, text_offset,
            outline_size, outline_color, text_shadow_size, text_shadow_color,
            background_color, background_gradient, border_color, border_width,
            border_radius, border_inset, rounded_corners, stroke_color, stroke_width,
            stroke_inset, icon_id, icon_inset, icon_offset, icon_rounding,
            icon_grayscale, icon_contrast, opacity, shadow_size, shadow_inset,
            shadow_offset, shadow_color, is_antialiased,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_fields_win() {
        let mut base = Style {
            gap: Some(4),
            color: Some(Color::WHITE),
            ..Style::default()
        };
        let overlay = Style {
            gap: Some(8),
            ..Style::default()
        };
        base.merge(&overlay);
        assert_eq!(base.gap, Some(8));
        assert_eq!(base.color, Some(Color::WHITE));
    }

    #[test]
    fn test_merge_unset_never_overrides() {
        let base = Style {
            opacity: Some(0.5),
            ..Style::default()
        };
        let merged = base.clone().merged(&Style::new());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_is_unset() {
        assert!(Style::new().is_unset());
        let style = Style {
            is_antialiased: Some(false),
            ..Style::default()
        };
        assert!(!style.is_unset());
    }

    #[test]
    fn test_deserialize_sparse_document() {
        let style: Style = serde_json::from_str(
            r##"{"anchor":"middle-center","padding":{"top":2,"right":4,"bottom":2,"left":4},"background_color":"#ff000080"}"##,
        )
        .unwrap();
        assert_eq!(style.anchor, Some(Anchor::MiddleCenter));
        assert_eq!(style.padding, Some(EdgeSize::symmetric(2, 4)));
        assert_eq!(style.background_color, Some(Color::rgba(255, 0, 0, 128)));
        assert!(style.size.is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_property() {
        assert!(serde_json::from_str::<Style>(r#"{"z_index":3}"#).is_err());
    }
}
