//! Integration tests for computed style apply and commit.

use facet_style::{
    BorderColor, ChangeMask, Color, ComputedStyle, EdgeSize, Flow, GradientColor,
    RoundedCorners, Size, Style, Vec2,
};

fn committed() -> ComputedStyle {
    let mut style = ComputedStyle::new();
    let _ = style.commit();
    style
}

#[test]
fn test_apply_unset_is_noop() {
    let mut style = ComputedStyle::new();
    style.apply(&Style {
        flow: Some(Flow::Vertical),
        border_color: Some(BorderColor::all(Color::WHITE)),
        ..Style::default()
    });
    let before = style.clone();
    style.apply(&Style::new());
    assert_eq!(style, before);
}

#[test]
fn test_second_commit_is_none() {
    let mut style = ComputedStyle::new();
    style.apply(&Style {
        size: Some(Size::new(40, 10)),
        ..Style::default()
    });
    assert_ne!(style.commit(), ChangeMask::None);
    assert_eq!(style.commit(), ChangeMask::None);
}

#[test]
fn test_every_layout_field_reports_layout_only() {
    let cases = [
        Style { is_visible: Some(false), ..Style::default() },
        Style { anchor: Some(facet_style::Anchor::BottomRight), ..Style::default() },
        Style { size: Some(Size::new(1, 0)), ..Style::default() },
        Style { flow: Some(Flow::Vertical), ..Style::default() },
        Style { gap: Some(5), ..Style::default() },
        Style { stretch: Some(true), ..Style::default() },
        Style { padding: Some(EdgeSize::new(0, 0, 1, 0)), ..Style::default() },
        Style { margin: Some(EdgeSize::new(0, 1, 0, 0)), ..Style::default() },
        Style { word_wrap: Some(true), ..Style::default() },
        Style { font: Some(2), ..Style::default() },
        Style { font_size: Some(20), ..Style::default() },
        Style { line_height: Some(1.5), ..Style::default() },
    ];
    for case in &cases {
        let mut style = committed();
        style.apply(case);
        assert_eq!(style.commit(), ChangeMask::LayoutChanged, "{case:?}");
    }
}

#[test]
fn test_every_paint_field_reports_paint_only() {
    let cases = [
        Style { color: Some(Color::BLACK), ..Style::default() },
        Style { text_align: Some(facet_style::Anchor::MiddleCenter), ..Style::default() },
        Style { text_offset: Some(Vec2::new(1.0, 0.0)), ..Style::default() },
        Style { outline_size: Some(1.0), ..Style::default() },
        Style { outline_color: Some(Color::BLACK), ..Style::default() },
        Style { text_shadow_size: Some(2.0), ..Style::default() },
        Style { text_shadow_color: Some(Color::BLACK), ..Style::default() },
        Style { background_color: Some(Color::TRANSPARENT), ..Style::default() },
        Style {
            background_gradient: Some(GradientColor::vertical(None, None, 0)),
            ..Style::default()
        },
        Style { border_color: Some(BorderColor::default()), ..Style::default() },
        Style { border_width: Some(EdgeSize::all(1)), ..Style::default() },
        Style { border_radius: Some(4), ..Style::default() },
        Style { border_inset: Some(1.0), ..Style::default() },
        Style { rounded_corners: Some(RoundedCorners::TOP), ..Style::default() },
        Style { stroke_color: Some(Color::WHITE), ..Style::default() },
        Style { stroke_width: Some(1), ..Style::default() },
        Style { stroke_inset: Some(0.5), ..Style::default() },
        Style { icon_id: Some(0), ..Style::default() },
        Style { icon_inset: Some(EdgeSize::ZERO), ..Style::default() },
        Style { icon_offset: Some(Vec2::ZERO), ..Style::default() },
        Style { icon_rounding: Some(3.0), ..Style::default() },
        Style { icon_grayscale: Some(true), ..Style::default() },
        Style { icon_contrast: Some(0.2), ..Style::default() },
        Style { opacity: Some(0.25), ..Style::default() },
        Style { shadow_size: Some(EdgeSize::all(2)), ..Style::default() },
        Style { shadow_inset: Some(1), ..Style::default() },
        Style { shadow_offset: Some(Vec2::new(0.0, 2.0)), ..Style::default() },
        Style { shadow_color: Some(Color::BLACK), ..Style::default() },
        Style { is_antialiased: Some(false), ..Style::default() },
    ];
    for case in &cases {
        let mut style = committed();
        style.apply(case);
        assert_eq!(style.commit(), ChangeMask::PaintChanged, "{case:?}");
    }
}

#[test]
fn test_setting_default_value_explicitly_is_no_change() {
    let mut style = committed();
    style.apply(&Style {
        font_size: Some(12),
        opacity: Some(1.0),
        rounded_corners: Some(RoundedCorners::ALL),
        ..Style::default()
    });
    assert_eq!(style.commit(), ChangeMask::None);
}

#[test]
fn test_cascade_then_inline_composes() {
    let cascade = Style {
        gap: Some(4),
        background_color: Some(Color::BLACK),
        ..Style::default()
    };
    let inline = Style {
        background_color: Some(Color::WHITE),
        ..Style::default()
    };

    let mut style = ComputedStyle::new();
    style.apply(&cascade);
    style.apply(&inline);
    let _ = style.commit();

    assert_eq!(style.layout().gap(), 4);
    assert_eq!(style.paint().background_color(), Some(Color::WHITE));
}

#[test]
fn test_working_change_invisible_until_commit() {
    let mut style = committed();
    style.apply(&Style {
        gap: Some(8),
        ..Style::default()
    });
    assert_eq!(style.layout().gap(), 0);
    let _ = style.commit();
    assert_eq!(style.layout().gap(), 8);
}
