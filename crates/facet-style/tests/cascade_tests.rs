//! Integration tests for rule registration and cascade resolution.

use facet_style::{
    Anchor, Color, EdgeSize, NodeSelectors, SelectorKind, Style, Stylesheet,
};

fn button() -> NodeSelectors {
    NodeSelectors::new().with_tag("button").with_class("primary")
}

#[test]
fn test_unmatched_node_resolves_to_unset() {
    let mut sheet = Stylesheet::new();
    sheet.set_class_rule(
        "secondary",
        Style {
            gap: Some(3),
            ..Style::default()
        },
    );
    assert!(sheet.resolve(&button()).is_unset());
}

#[test]
fn test_resolve_is_repeatable() {
    let mut sheet = Stylesheet::new();
    sheet.set_tag_rule(
        "button",
        Style {
            padding: Some(EdgeSize::all(4)),
            ..Style::default()
        },
    );
    sheet.set_class_rule(
        "primary",
        Style {
            background_color: Some(Color::BLACK),
            ..Style::default()
        },
    );

    let first = sheet.resolve(&button());
    let second = sheet.resolve(&button());
    assert_eq!(first, second);
    assert_eq!(first.padding, Some(EdgeSize::all(4)));
    assert_eq!(first.background_color, Some(Color::BLACK));
}

#[test]
fn test_later_rule_wins_whatever_its_kind() {
    let mut sheet = Stylesheet::new();
    sheet.set_class_rule(
        "primary",
        Style {
            color: Some(Color::WHITE),
            ..Style::default()
        },
    );
    sheet.set_tag_rule(
        "button",
        Style {
            color: Some(Color::BLACK),
            ..Style::default()
        },
    );
    assert_eq!(sheet.resolve(&button()).color, Some(Color::BLACK));

    sheet.set_class_rule(
        "large",
        Style {
            color: Some(Color::TRANSPARENT),
            ..Style::default()
        },
    );
    let large = button().with_class("large");
    assert_eq!(sheet.resolve(&large).color, Some(Color::TRANSPARENT));
}

#[test]
fn test_reregistration_keeps_position() {
    let mut sheet = Stylesheet::new();
    sheet.set_tag_rule(
        "button",
        Style {
            gap: Some(1),
            ..Style::default()
        },
    );
    sheet.set_class_rule(
        "primary",
        Style {
            gap: Some(2),
            ..Style::default()
        },
    );
    sheet.set_tag_rule(
        "button",
        Style {
            gap: Some(3),
            ..Style::default()
        },
    );
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.resolve(&button()).gap, Some(2));
}

#[test]
fn test_state_rule_applies_only_in_state() {
    let mut sheet = Stylesheet::new();
    sheet.set_class_rule(
        "primary",
        Style {
            anchor: Some(Anchor::TopRight),
            gap: Some(2),
            ..Style::default()
        },
    );
    sheet.set_class_rule(
        "primary:hover",
        Style {
            anchor: Some(Anchor::MiddleCenter),
            ..Style::default()
        },
    );

    let idle = sheet.resolve(&button());
    assert_eq!(idle.anchor, Some(Anchor::TopRight));

    let hovered = sheet.resolve(&button().with_state("hover"));
    assert_eq!(hovered.anchor, Some(Anchor::MiddleCenter));
    assert_eq!(hovered.gap, Some(2));
}

#[test]
fn test_same_kind_later_registration_wins() {
    let mut sheet = Stylesheet::new();
    sheet.set_class_rule(
        "primary",
        Style {
            gap: Some(1),
            ..Style::default()
        },
    );
    sheet.set_class_rule(
        "large",
        Style {
            gap: Some(9),
            ..Style::default()
        },
    );
    let node = button().with_class("large");
    assert_eq!(sheet.resolve(&node).gap, Some(9));
}

#[test]
fn test_merge_subset_keeps_unrelated_fields() {
    let rule_a = Style {
        gap: Some(1),
        opacity: Some(0.5),
        font_size: Some(14),
        ..Style::default()
    };
    let rule_b = Style {
        gap: Some(7),
        ..Style::default()
    };

    let mut sheet = Stylesheet::new();
    sheet.set_class_rule("a", rule_a);
    sheet.set_class_rule("b", rule_b);

    let expected = Style {
        gap: Some(7),
        opacity: Some(0.5),
        font_size: Some(14),
        ..Style::default()
    };

    // An unrelated node resolved first must not leak into the next result.
    let unrelated = NodeSelectors::new().with_class("a");
    let _ = sheet.resolve(&unrelated);

    let node = NodeSelectors::new().with_class("a").with_class("b");
    assert_eq!(sheet.resolve(&node), expected);
}

#[test]
fn test_from_json_document() {
    let sheet = Stylesheet::from_json(
        r##"{
            "rules": [
                {"kind": "tag", "selector": "label", "style": {"font_size": 16}},
                {"kind": "class", "selector": "label:disabled", "style": {"color": "#808080"}},
                {"kind": "class", "selector": "not valid", "style": {}}
            ]
        }"##,
    )
    .unwrap();
    assert_eq!(sheet.len(), 2);

    let node = NodeSelectors::new()
        .with_tag("label")
        .with_class("label")
        .with_state("disabled");
    let style = sheet.resolve(&node);
    assert_eq!(style.font_size, Some(16));
    assert_eq!(style.color, Color::from_hex("#808080"));
}

#[test]
fn test_from_json_rejects_bad_document() {
    assert!(Stylesheet::from_json(r#"{"rules": [{"kind": "id", "selector": "x"}]}"#).is_err());
    assert!(Stylesheet::from_json("not json").is_err());
}

#[test]
fn test_selector_kind_names() {
    assert_eq!(SelectorKind::Class.to_string(), "class");
    assert_eq!("tag".parse::<SelectorKind>().ok(), Some(SelectorKind::Tag));
}
