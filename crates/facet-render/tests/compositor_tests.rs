//! Integration tests for frame composition.

use facet_dom::{NodeId, NodeTree};
use facet_layout::{ApproximateFontMetrics, LayoutSolver, NoIcons};
use facet_paint::{Brush, DisplayCommand, DisplayList, RenderPipeline};
use facet_render::{Compositor, CompositorConfig, FrameStats, RenderError, Renderer};
use facet_style::{Color, EdgeSize, Flow, Size, Style, Stylesheet};

const RED: Color = Color::rgba(255, 0, 0, 255);
const BLUE: Color = Color::rgba(0, 0, 255, 255);

struct Scene {
    tree: NodeTree,
    root: NodeId,
    first: NodeId,
    second: NodeId,
}

fn block(color: Color) -> Style {
    Style {
        size: Some(Size::new(20, 10)),
        background_color: Some(color),
        ..Style::default()
    }
}

/// A padded vertical column holding a red and a blue block.
fn scene() -> Scene {
    let mut tree = NodeTree::new();
    let root = tree.alloc(Some("column"));
    tree.get_mut(root).unwrap().set_inline_style(Style {
        flow: Some(Flow::Vertical),
        padding: Some(EdgeSize::all(4)),
        ..Style::default()
    });
    let first = tree.alloc(None);
    tree.get_mut(first).unwrap().set_inline_style(block(RED));
    let second = tree.alloc(None);
    tree.get_mut(second).unwrap().set_inline_style(block(BLUE));
    tree.append_child(root, first).unwrap();
    tree.append_child(root, second).unwrap();
    Scene {
        tree,
        root,
        first,
        second,
    }
}

fn frame(compositor: &mut Compositor, scene: &mut Scene) -> (FrameStats, DisplayList) {
    let fonts = ApproximateFontMetrics::new();
    let solver = LayoutSolver::new(&fonts, &NoIcons);
    let mut canvas = DisplayList::new();
    let stats = compositor
        .render_frame(
            &mut scene.tree,
            scene.root,
            &Stylesheet::new(),
            &solver,
            &mut canvas,
        )
        .unwrap();
    (stats, canvas)
}

#[test]
fn test_first_frame_paints_everything() {
    let mut scene = scene();
    let mut compositor = Compositor::default();
    let (stats, list) = frame(&mut compositor, &mut scene);

    assert_eq!(stats.resolved, 3);
    assert!(stats.layout.is_some());
    assert_eq!(stats.painted, 3);
    assert_eq!(stats.regenerated, 3);
    assert_eq!(compositor.cached_nodes(), 3);
    assert!(!scene.tree.get(scene.first).unwrap().paint_dirty);

    let fills = list
        .drawing_commands()
        .filter(|c| matches!(c, DisplayCommand::FillRect { .. }))
        .count();
    assert_eq!(fills, 2);
}

#[test]
fn test_output_is_placed_at_each_padding_box() {
    let mut scene = scene();
    let (_, list) = frame(&mut Compositor::default(), &mut scene);

    let translations: Vec<(f32, f32)> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DisplayCommand::Translate { dx, dy } => Some((*dx, *dy)),
            _ => None,
        })
        .collect();
    assert_eq!(translations, [(0.0, 0.0), (4.0, 4.0), (4.0, 14.0)]);
}

#[test]
fn test_clean_frame_replays_cache() {
    let mut scene = scene();
    let mut compositor = Compositor::default();
    let (_, first_list) = frame(&mut compositor, &mut scene);
    let (stats, second_list) = frame(&mut compositor, &mut scene);

    assert_eq!(stats.resolved, 0);
    assert_eq!(stats.layout, None);
    assert_eq!(stats.painted, 3);
    assert_eq!(stats.regenerated, 0);
    assert_eq!(first_list, second_list);
}

#[test]
fn test_paint_change_regenerates_one_node() {
    let mut scene = scene();
    let mut compositor = Compositor::default();
    let _ = frame(&mut compositor, &mut scene);

    scene
        .tree
        .get_mut(scene.second)
        .unwrap()
        .set_inline_style(block(Color::WHITE));
    let (stats, _) = frame(&mut compositor, &mut scene);

    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.layout, None);
    assert_eq!(stats.regenerated, 1);
}

#[test]
fn test_removed_nodes_are_evicted() {
    let mut scene = scene();
    let mut compositor = Compositor::default();
    let _ = frame(&mut compositor, &mut scene);

    let _ = scene.tree.remove(scene.second).unwrap();
    let (stats, _) = frame(&mut compositor, &mut scene);

    assert_eq!(stats.evicted, 1);
    assert_eq!(stats.painted, 2);
    assert_eq!(compositor.cached_nodes(), 2);
}

#[test]
fn test_invisible_subtree_is_skipped() {
    let mut scene = scene();
    let mut compositor = Compositor::default();
    let _ = frame(&mut compositor, &mut scene);

    scene.tree.get_mut(scene.first).unwrap().set_inline_style(Style {
        is_visible: Some(false),
        ..block(RED)
    });
    let (stats, list) = frame(&mut compositor, &mut scene);

    assert_eq!(stats.painted, 2);
    let colors: Vec<_> = list
        .drawing_commands()
        .filter_map(|c| match c {
            DisplayCommand::FillRect { brush, .. } => Some(*brush),
            _ => None,
        })
        .collect();
    assert_eq!(colors, [Brush::Solid(BLUE)]);
}

#[test]
fn test_uncached_compositor_regenerates_every_frame() {
    let mut scene = scene();
    let config = CompositorConfig {
        cache_node_output: false,
        ..CompositorConfig::default()
    };
    let mut compositor = Compositor::new(RenderPipeline::standard(), config);
    let _ = frame(&mut compositor, &mut scene);
    let (stats, _) = frame(&mut compositor, &mut scene);

    assert_eq!(stats.regenerated, 3);
    assert_eq!(compositor.cached_nodes(), 0);
}

#[test]
fn test_debug_bounds_outline_every_box() {
    let mut scene = scene();
    let config = CompositorConfig {
        debug_bounds: true,
        ..CompositorConfig::default()
    };
    let (_, list) = frame(
        &mut Compositor::new(RenderPipeline::standard(), config),
        &mut scene,
    );
    let strokes = list
        .drawing_commands()
        .filter(|c| matches!(c, DisplayCommand::StrokeRect { .. }))
        .count();
    assert_eq!(strokes, 9);
}

#[test]
fn test_unknown_root() {
    let mut tree = NodeTree::new();
    let fonts = ApproximateFontMetrics::new();
    let solver = LayoutSolver::new(&fonts, &NoIcons);
    let err = Compositor::default()
        .render_frame(
            &mut tree,
            NodeId(7),
            &Stylesheet::new(),
            &solver,
            &mut DisplayList::new(),
        )
        .unwrap_err();
    assert!(matches!(err, RenderError::UnknownRoot(NodeId(7))));
}

#[test]
fn test_renderer_rasterizes_frame() {
    let mut scene = scene();
    let mut renderer = Renderer::new(CompositorConfig {
        clear_color: Color::WHITE,
        ..CompositorConfig::default()
    });
    let (pixmap, stats) = renderer
        .render(&mut scene.tree, scene.root, &Stylesheet::new(), 40, 40)
        .unwrap();

    assert_eq!(stats.painted, 3);
    let red = pixmap.pixel(10, 8).unwrap();
    assert_eq!((red.red(), red.green(), red.blue()), (255, 0, 0));
    let blue = pixmap.pixel(10, 18).unwrap();
    assert_eq!((blue.red(), blue.green(), blue.blue()), (0, 0, 255));
    let background = pixmap.pixel(35, 35).unwrap();
    assert_eq!(background.red(), 255);
    assert_eq!(background.alpha(), 255);
}
