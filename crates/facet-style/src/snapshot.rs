//! Fixed-layout style snapshots.
//!
//! [`LayoutStyle`] holds every property that affects node geometry,
//! [`PaintStyle`] everything else. Both are plain-old-data records built
//! only from 4-byte scalars so two snapshots can be compared as raw bytes.
//! An optional value occupies a bit in the record's `present` mask and is
//! stored as zero when absent, so "unset" always has one byte pattern.
//!
//! Floats compare by bit pattern: a NaN equals only an identical NaN, and
//! `0.0` differs from `-0.0`.

// bytemuck's derives expand to `unsafe impl` blocks.
#![allow(unsafe_code)]

use bytemuck::{Pod, Zeroable};

use crate::StyleError;
use crate::values::{
    Anchor, BorderColor, Color, EdgeSize, Flow, GradientColor, GradientType, RoundedCorners,
    Size, Vec2,
};

/// Byte-for-byte equality of two snapshots.
pub(crate) fn same_bytes<T: Pod>(a: &T, b: &T) -> bool {
    bytemuck::bytes_of(a) == bytemuck::bytes_of(b)
}

fn decode<T>(kind: &'static str, code: u32, from_repr: fn(u32) -> Option<T>) -> Result<T, StyleError> {
    from_repr(code).ok_or(StyleError::UnknownVariant { kind, code })
}

const fn flag(value: bool) -> u32 {
    value as u32
}

/// Geometry-affecting half of a committed style.
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct LayoutStyle {
    pub(crate) anchor: u32,
    pub(crate) is_visible: u32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) flow: u32,
    pub(crate) gap: i32,
    pub(crate) stretch: u32,
    pub(crate) padding_top: i32,
    pub(crate) padding_right: i32,
    pub(crate) padding_bottom: i32,
    pub(crate) padding_left: i32,
    pub(crate) margin_top: i32,
    pub(crate) margin_right: i32,
    pub(crate) margin_bottom: i32,
    pub(crate) margin_left: i32,
    pub(crate) word_wrap: u32,
    pub(crate) font: u32,
    pub(crate) font_size: i32,
    pub(crate) line_height: f32,
}

impl LayoutStyle {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn new(
        anchor: Anchor,
        is_visible: bool,
        size: Size,
        flow: Flow,
        gap: i32,
        stretch: bool,
        padding: EdgeSize,
        margin: EdgeSize,
        word_wrap: bool,
        font: u32,
        font_size: i32,
        line_height: f32,
    ) -> Self {
        Self {
            anchor: anchor as u32,
            is_visible: flag(is_visible),
            width: size.width,
            height: size.height,
            flow: flow as u32,
            gap,
            stretch: flag(stretch),
            padding_top: padding.top,
            padding_right: padding.right,
            padding_bottom: padding.bottom,
            padding_left: padding.left,
            margin_top: margin.top,
            margin_right: margin.right,
            margin_bottom: margin.bottom,
            margin_left: margin.left,
            word_wrap: flag(word_wrap),
            font,
            font_size,
            line_height,
        }
    }

    /// Alignment inside the parent.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownVariant`] if the stored code names no anchor.
    pub fn anchor(&self) -> Result<Anchor, StyleError> {
        decode("anchor", self.anchor, Anchor::from_repr)
    }

    /// Whether the node takes part in layout.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.is_visible != 0
    }

    /// Explicit content size; zero dimensions mean "size to content".
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Child placement direction.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownVariant`] if the stored code names no flow.
    pub fn flow(&self) -> Result<Flow, StyleError> {
        decode("flow", self.flow, Flow::from_repr)
    }

    /// Spacing between children.
    #[must_use]
    pub const fn gap(&self) -> i32 {
        self.gap
    }

    /// Whether the node fills the remaining space of its parent.
    #[must_use]
    pub const fn stretch(&self) -> bool {
        self.stretch != 0
    }

    /// Padding edges.
    #[must_use]
    pub const fn padding(&self) -> EdgeSize {
        EdgeSize::new(
            self.padding_top,
            self.padding_right,
            self.padding_bottom,
            self.padding_left,
        )
    }

    /// Margin edges.
    #[must_use]
    pub const fn margin(&self) -> EdgeSize {
        EdgeSize::new(
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
        )
    }

    /// Whether text wraps at the available width.
    #[must_use]
    pub const fn word_wrap(&self) -> bool {
        self.word_wrap != 0
    }

    /// Registered font id.
    #[must_use]
    pub const fn font(&self) -> u32 {
        self.font
    }

    /// Font size in pixels.
    #[must_use]
    pub const fn font_size(&self) -> i32 {
        self.font_size
    }

    /// Line height factor.
    #[must_use]
    pub const fn line_height(&self) -> f32 {
        self.line_height
    }
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl PartialEq for LayoutStyle {
    fn eq(&self, other: &Self) -> bool {
        same_bytes(self, other)
    }
}

impl Eq for LayoutStyle {}

/// Presence bits of [`PaintStyle::present`].
pub(crate) mod present {
    pub(crate) const BACKGROUND_COLOR: u32 = 1;
    pub(crate) const BORDER_TOP_COLOR: u32 = 1 << 1;
    pub(crate) const BORDER_RIGHT_COLOR: u32 = 1 << 2;
    pub(crate) const BORDER_BOTTOM_COLOR: u32 = 1 << 3;
    pub(crate) const BORDER_LEFT_COLOR: u32 = 1 << 4;
    pub(crate) const BORDER_COLOR: u32 = 1 << 5;
    pub(crate) const STROKE_COLOR: u32 = 1 << 6;
    pub(crate) const GRADIENT: u32 = 1 << 7;
    pub(crate) const GRADIENT_COLOR1: u32 = 1 << 8;
    pub(crate) const GRADIENT_COLOR2: u32 = 1 << 9;
    pub(crate) const OUTLINE_COLOR: u32 = 1 << 10;
    pub(crate) const TEXT_SHADOW_COLOR: u32 = 1 << 11;
    pub(crate) const ICON_ID: u32 = 1 << 12;
    pub(crate) const ICON_INSET: u32 = 1 << 13;
    pub(crate) const ICON_OFFSET: u32 = 1 << 14;
    pub(crate) const SHADOW_COLOR: u32 = 1 << 15;
}

/// Paint-only half of a committed style.
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct PaintStyle {
    pub(crate) present: u32,
    pub(crate) color: u32,
    pub(crate) text_align: u32,
    pub(crate) text_offset_x: f32,
    pub(crate) text_offset_y: f32,
    pub(crate) outline_size: f32,
    pub(crate) outline_color: u32,
    pub(crate) text_shadow_size: f32,
    pub(crate) text_shadow_color: u32,
    pub(crate) background_color: u32,
    pub(crate) gradient_type: u32,
    pub(crate) gradient_color1: u32,
    pub(crate) gradient_color2: u32,
    pub(crate) gradient_inset: i32,
    pub(crate) border_top_color: u32,
    pub(crate) border_right_color: u32,
    pub(crate) border_bottom_color: u32,
    pub(crate) border_left_color: u32,
    pub(crate) border_top_width: i32,
    pub(crate) border_right_width: i32,
    pub(crate) border_bottom_width: i32,
    pub(crate) border_left_width: i32,
    pub(crate) border_radius: i32,
    pub(crate) border_inset: f32,
    pub(crate) rounded_corners: u32,
    pub(crate) stroke_color: u32,
    pub(crate) stroke_width: i32,
    pub(crate) stroke_inset: f32,
    pub(crate) icon_id: u32,
    pub(crate) icon_inset_top: i32,
    pub(crate) icon_inset_right: i32,
    pub(crate) icon_inset_bottom: i32,
    pub(crate) icon_inset_left: i32,
    pub(crate) icon_offset_x: f32,
    pub(crate) icon_offset_y: f32,
    pub(crate) icon_rounding: f32,
    pub(crate) icon_grayscale: u32,
    pub(crate) icon_contrast: f32,
    pub(crate) opacity: f32,
    pub(crate) shadow_top: i32,
    pub(crate) shadow_right: i32,
    pub(crate) shadow_bottom: i32,
    pub(crate) shadow_left: i32,
    pub(crate) shadow_inset: i32,
    pub(crate) shadow_offset_x: f32,
    pub(crate) shadow_offset_y: f32,
    pub(crate) shadow_color: u32,
    pub(crate) is_antialiased: u32,
}

impl PaintStyle {
    const fn has(&self, bit: u32) -> bool {
        self.present & bit != 0
    }

    const fn color_if(&self, bit: u32, argb: u32) -> Option<Color> {
        if self.has(bit) {
            Some(Color::from_argb(argb))
        } else {
            None
        }
    }

    pub(crate) fn set_color(&mut self, bit: u32, color: Option<Color>) -> u32 {
        match color {
            Some(color) => {
                self.present |= bit;
                color.to_argb()
            }
            None => 0,
        }
    }

    /// Text color.
    #[must_use]
    pub const fn color(&self) -> Color {
        Color::from_argb(self.color)
    }

    /// Text block placement.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownVariant`] if the stored code names no anchor.
    pub fn text_align(&self) -> Result<Anchor, StyleError> {
        decode("text align", self.text_align, Anchor::from_repr)
    }

    /// Text offset after alignment.
    #[must_use]
    pub const fn text_offset(&self) -> Vec2 {
        Vec2::new(self.text_offset_x, self.text_offset_y)
    }

    /// Text outline width.
    #[must_use]
    pub const fn outline_size(&self) -> f32 {
        self.outline_size
    }

    /// Text outline color.
    #[must_use]
    pub const fn outline_color(&self) -> Option<Color> {
        self.color_if(present::OUTLINE_COLOR, self.outline_color)
    }

    /// Text shadow blur size.
    #[must_use]
    pub const fn text_shadow_size(&self) -> f32 {
        self.text_shadow_size
    }

    /// Text shadow color.
    #[must_use]
    pub const fn text_shadow_color(&self) -> Option<Color> {
        self.color_if(present::TEXT_SHADOW_COLOR, self.text_shadow_color)
    }

    /// Solid background fill.
    #[must_use]
    pub const fn background_color(&self) -> Option<Color> {
        self.color_if(present::BACKGROUND_COLOR, self.background_color)
    }

    /// Raw gradient type code, if a gradient is set.
    #[must_use]
    pub const fn gradient_type_code(&self) -> Option<u32> {
        if self.has(present::GRADIENT) {
            Some(self.gradient_type)
        } else {
            None
        }
    }

    /// Background gradient.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownVariant`] if the stored type code names
    /// no gradient type.
    pub fn gradient(&self) -> Result<Option<GradientColor>, StyleError> {
        if !self.has(present::GRADIENT) {
            return Ok(None);
        }
        Ok(Some(GradientColor {
            kind: decode("gradient type", self.gradient_type, GradientType::from_repr)?,
            color1: self.color_if(present::GRADIENT_COLOR1, self.gradient_color1),
            color2: self.color_if(present::GRADIENT_COLOR2, self.gradient_color2),
            inset: self.gradient_inset,
        }))
    }

    /// Per-side border colors.
    #[must_use]
    pub const fn border_color(&self) -> Option<BorderColor> {
        if !self.has(present::BORDER_COLOR) {
            return None;
        }
        Some(BorderColor {
            top: self.color_if(present::BORDER_TOP_COLOR, self.border_top_color),
            right: self.color_if(present::BORDER_RIGHT_COLOR, self.border_right_color),
            bottom: self.color_if(present::BORDER_BOTTOM_COLOR, self.border_bottom_color),
            left: self.color_if(present::BORDER_LEFT_COLOR, self.border_left_color),
        })
    }

    /// Per-side border widths.
    #[must_use]
    pub const fn border_width(&self) -> EdgeSize {
        EdgeSize::new(
            self.border_top_width,
            self.border_right_width,
            self.border_bottom_width,
            self.border_left_width,
        )
    }

    /// Corner radius.
    #[must_use]
    pub const fn border_radius(&self) -> i32 {
        self.border_radius
    }

    /// Border distance from the padding box edge.
    #[must_use]
    pub const fn border_inset(&self) -> f32 {
        self.border_inset
    }

    /// Corners following the border radius.
    #[must_use]
    pub const fn rounded_corners(&self) -> RoundedCorners {
        RoundedCorners::from_bits_truncate(self.rounded_corners as u8)
    }

    /// Stroke color.
    #[must_use]
    pub const fn stroke_color(&self) -> Option<Color> {
        self.color_if(present::STROKE_COLOR, self.stroke_color)
    }

    /// Stroke width.
    #[must_use]
    pub const fn stroke_width(&self) -> i32 {
        self.stroke_width
    }

    /// Stroke distance from the padding box edge.
    #[must_use]
    pub const fn stroke_inset(&self) -> f32 {
        self.stroke_inset
    }

    /// Icon id.
    #[must_use]
    pub const fn icon_id(&self) -> Option<u32> {
        if self.has(present::ICON_ID) {
            Some(self.icon_id)
        } else {
            None
        }
    }

    /// Icon insets.
    #[must_use]
    pub const fn icon_inset(&self) -> Option<EdgeSize> {
        if self.has(present::ICON_INSET) {
            Some(EdgeSize::new(
                self.icon_inset_top,
                self.icon_inset_right,
                self.icon_inset_bottom,
                self.icon_inset_left,
            ))
        } else {
            None
        }
    }

    /// Icon offset.
    #[must_use]
    pub const fn icon_offset(&self) -> Option<Vec2> {
        if self.has(present::ICON_OFFSET) {
            Some(Vec2::new(self.icon_offset_x, self.icon_offset_y))
        } else {
            None
        }
    }

    /// Icon corner radius.
    #[must_use]
    pub const fn icon_rounding(&self) -> f32 {
        self.icon_rounding
    }

    /// Whether the icon is drawn in grayscale.
    #[must_use]
    pub const fn icon_grayscale(&self) -> bool {
        self.icon_grayscale != 0
    }

    /// Icon contrast adjustment.
    #[must_use]
    pub const fn icon_contrast(&self) -> f32 {
        self.icon_contrast
    }

    /// Node opacity.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Per-side drop shadow extent.
    #[must_use]
    pub const fn shadow_size(&self) -> EdgeSize {
        EdgeSize::new(
            self.shadow_top,
            self.shadow_right,
            self.shadow_bottom,
            self.shadow_left,
        )
    }

    /// Shadow start distance inside the padding box.
    #[must_use]
    pub const fn shadow_inset(&self) -> i32 {
        self.shadow_inset
    }

    /// Drop shadow offset.
    #[must_use]
    pub const fn shadow_offset(&self) -> Vec2 {
        Vec2::new(self.shadow_offset_x, self.shadow_offset_y)
    }

    /// Drop shadow color.
    #[must_use]
    pub const fn shadow_color(&self) -> Option<Color> {
        self.color_if(present::SHADOW_COLOR, self.shadow_color)
    }

    /// Whether shapes are antialiased.
    #[must_use]
    pub const fn is_antialiased(&self) -> bool {
        self.is_antialiased != 0
    }
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl PartialEq for PaintStyle {
    fn eq(&self, other: &Self) -> bool {
        same_bytes(self, other)
    }
}

impl Eq for PaintStyle {}
