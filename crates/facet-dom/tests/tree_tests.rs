//! Integration tests for the node tree and style re-resolution.

use facet_dom::{NodeId, NodeTree, TreeError};
use facet_style::{Color, Size, Style, Stylesheet};

fn clean(tree: &mut NodeTree, sheet: &Stylesheet) {
    let _ = tree.resolve_styles(sheet);
    let ids: Vec<NodeId> = (0..64).map(NodeId).filter(|&id| tree.contains(id)).collect();
    for id in ids {
        if let Some(node) = tree.get_mut(id) {
            node.layout_dirty = false;
            node.paint_dirty = false;
        }
    }
}

fn three_levels() -> (NodeTree, NodeId, NodeId, NodeId) {
    let mut tree = NodeTree::new();
    let root = tree.alloc(Some("root"));
    let middle = tree.alloc(None);
    let leaf = tree.alloc(Some("label"));
    tree.append_child(root, middle).unwrap();
    tree.append_child(middle, leaf).unwrap();
    (tree, root, middle, leaf)
}

#[test]
fn test_structure_and_traversal() {
    let (mut tree, root, middle, leaf) = three_levels();
    let sibling = tree.alloc(None);
    tree.append_child(root, sibling).unwrap();

    assert_eq!(tree.children(root), [middle, sibling]);
    assert_eq!(tree.parent(leaf), Some(middle));
    assert_eq!(tree.ancestors(leaf).collect::<Vec<_>>(), [middle, root]);
    assert_eq!(
        tree.subtree(root).collect::<Vec<_>>(),
        [root, middle, leaf, sibling]
    );
    assert_eq!(tree.descendants(root).count(), 3);
}

#[test]
fn test_append_errors() {
    let (mut tree, root, middle, leaf) = three_levels();
    assert_eq!(
        tree.append_child(root, leaf),
        Err(TreeError::AlreadyAttached(leaf))
    );
    let _ = tree.remove(leaf).unwrap();
    let orphan = tree.alloc(None);
    assert_eq!(
        tree.append_child(orphan, orphan),
        Err(TreeError::Cycle {
            parent: orphan,
            child: orphan
        })
    );
    assert_eq!(
        tree.append_child(leaf, orphan),
        Err(TreeError::UnknownNode(leaf))
    );
    assert!(tree.append_child(middle, orphan).is_ok());
}

#[test]
fn test_remove_drops_subtree_and_reports_ids() {
    let (mut tree, root, middle, leaf) = three_levels();
    assert_eq!(tree.remove(middle), Ok(2));
    assert!(!tree.contains(middle));
    assert!(!tree.contains(leaf));
    assert!(tree.children(root).is_empty());
    assert_eq!(tree.take_removed(), [middle, leaf]);
    assert!(tree.take_removed().is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_layout_change_dirties_ancestors() {
    let (mut tree, root, middle, leaf) = three_levels();
    let sheet = Stylesheet::new();
    clean(&mut tree, &sheet);

    tree.get_mut(leaf).unwrap().set_inline_style(Style {
        size: Some(Size::new(10, 10)),
        ..Style::default()
    });
    assert_eq!(tree.resolve_styles(&sheet), 1);

    for id in [root, middle, leaf] {
        assert!(tree.get(id).unwrap().layout_dirty);
    }
    assert!(!tree.get(leaf).unwrap().paint_dirty);
}

#[test]
fn test_paint_change_dirties_only_node() {
    let (mut tree, root, _middle, leaf) = three_levels();
    let sheet = Stylesheet::new();
    clean(&mut tree, &sheet);

    tree.get_mut(leaf).unwrap().set_inline_style(Style {
        background_color: Some(Color::BLACK),
        ..Style::default()
    });
    let _ = tree.resolve_styles(&sheet);

    let node = tree.get(leaf).unwrap();
    assert!(node.paint_dirty);
    assert!(!node.layout_dirty);
    assert!(!tree.get(root).unwrap().layout_dirty);
}

#[test]
fn test_icon_change_also_dirties_layout() {
    let (mut tree, root, _middle, leaf) = three_levels();
    let sheet = Stylesheet::new();
    clean(&mut tree, &sheet);

    tree.get_mut(leaf).unwrap().set_inline_style(Style {
        icon_id: Some(12),
        ..Style::default()
    });
    let _ = tree.resolve_styles(&sheet);
    assert!(tree.get(leaf).unwrap().paint_dirty);
    assert!(tree.get(root).unwrap().layout_dirty);
}

#[test]
fn test_class_change_picks_up_rule() {
    let (mut tree, _root, _middle, leaf) = three_levels();
    let mut sheet = Stylesheet::new();
    sheet.set_class_rule(
        "warning",
        Style {
            color: Some(Color::rgba(255, 200, 0, 255)),
            ..Style::default()
        },
    );
    clean(&mut tree, &sheet);
    assert_eq!(tree.resolve_styles(&sheet), 0);

    tree.get_mut(leaf).unwrap().add_class("warning");
    assert_eq!(tree.resolve_styles(&sheet), 1);
    assert_eq!(
        tree.get(leaf).unwrap().computed().paint().color(),
        Color::rgba(255, 200, 0, 255)
    );
}

#[test]
fn test_stylesheet_change_resolves_everything() {
    let (mut tree, _root, _middle, _leaf) = three_levels();
    let mut sheet = Stylesheet::new();
    clean(&mut tree, &sheet);

    sheet.set_tag_rule("label", Style::default());
    assert_eq!(tree.resolve_styles(&sheet), 3);
    assert_eq!(tree.resolve_styles(&sheet), 0);
}

#[test]
fn test_unchanged_resolution_leaves_flags_clean() {
    let (mut tree, root, _middle, leaf) = three_levels();
    let sheet = Stylesheet::new();
    clean(&mut tree, &sheet);

    tree.get_mut(leaf).unwrap().set_state("hover", true);
    assert_eq!(tree.resolve_styles(&sheet), 1);
    assert!(!tree.get(leaf).unwrap().paint_dirty);
    assert!(!tree.get(root).unwrap().layout_dirty);
}

#[test]
fn test_set_text_invalidates_measurement() {
    let (mut tree, root, _middle, leaf) = three_levels();
    let sheet = Stylesheet::new();
    clean(&mut tree, &sheet);

    tree.set_text(leaf, Some("hello".to_string())).unwrap();
    assert!(tree.get(root).unwrap().layout_dirty);
    assert!(tree.get(leaf).unwrap().paint_dirty);
    assert_eq!(tree.get(leaf).unwrap().text(), Some("hello"));
}
