//! Frame composition.
//!
//! One frame runs the whole core in order:
//!
//! ```text
//! take_removed ─► resolve_styles ─► solve (root layout-dirty) ─► paint
//!   evict caches                                                  │
//!                        paint-dirty nodes: RenderPipeline ─► DisplayList cache
//!                        every visible node: replay cache at its padding box
//! ```
//!
//! Bounds changes made by layout already flag nodes paint-dirty, so paint
//! output is regenerated on either kind of change.

use std::collections::HashMap;

use facet_dom::{NodeId, NodeTree, Rect};
use facet_layout::{LayoutSolver, SolveStats};
use facet_paint::{Canvas, CanvasScope, CornerRadii, DisplayList, RenderPipeline};
use facet_style::{Color, Stylesheet};

use crate::config::CompositorConfig;
use crate::error::RenderError;

const DEBUG_MARGIN: Color = Color::rgba(255, 165, 0, 160);
const DEBUG_PADDING: Color = Color::rgba(0, 200, 0, 160);
const DEBUG_CONTENT: Color = Color::rgba(0, 120, 255, 160);

/// Work done by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Nodes whose styles were re-resolved.
    pub resolved: usize,
    /// Layout work, `None` when the tree needed no layout.
    pub layout: Option<SolveStats>,
    /// Visible nodes replayed onto the canvas.
    pub painted: usize,
    /// Nodes whose paint output was regenerated.
    pub regenerated: usize,
    /// Cached display lists dropped for removed nodes.
    pub evicted: usize,
}

/// Drives style, layout and paint for a node tree, frame after frame.
#[derive(Debug)]
pub struct Compositor {
    pipeline: RenderPipeline,
    config: CompositorConfig,
    cache: HashMap<NodeId, DisplayList>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(RenderPipeline::standard(), CompositorConfig::default())
    }
}

impl Compositor {
    /// A compositor painting with `pipeline`.
    #[must_use]
    pub fn new(pipeline: RenderPipeline, config: CompositorConfig) -> Self {
        Self {
            pipeline,
            config,
            cache: HashMap::new(),
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Number of nodes with cached paint output.
    #[must_use]
    pub fn cached_nodes(&self) -> usize {
        self.cache.len()
    }

    /// Produce one frame of the subtree at `root` onto `canvas`.
    ///
    /// The canvas is expected to be cleared by the caller.
    ///
    /// # Errors
    ///
    /// Fails on an unknown root, a layout error or a generator error. A
    /// failed frame leaves the canvas state balanced.
    pub fn render_frame(
        &mut self,
        tree: &mut NodeTree,
        root: NodeId,
        sheet: &Stylesheet,
        solver: &LayoutSolver<'_>,
        canvas: &mut dyn Canvas,
    ) -> Result<FrameStats, RenderError> {
        let mut stats = FrameStats::default();
        for id in tree.take_removed() {
            if self.cache.remove(&id).is_some() {
                stats.evicted += 1;
            }
        }
        if !tree.contains(root) {
            return Err(RenderError::UnknownRoot(root));
        }

        stats.resolved = tree.resolve_styles(sheet);
        if tree.get(root).is_some_and(|node| node.layout_dirty) {
            stats.layout = Some(solver.solve(tree, root)?);
        }

        let order = visible_nodes(tree, root);
        for &id in &order {
            self.paint(tree, id, canvas, &mut stats)?;
        }
        if self.config.debug_bounds {
            draw_debug_bounds(tree, &order, canvas);
        }

        tracing::trace!(
            resolved = stats.resolved,
            painted = stats.painted,
            regenerated = stats.regenerated,
            evicted = stats.evicted,
            "frame composed"
        );
        Ok(stats)
    }

    fn paint(
        &mut self,
        tree: &mut NodeTree,
        id: NodeId,
        canvas: &mut dyn Canvas,
        stats: &mut FrameStats,
    ) -> Result<(), RenderError> {
        let Some(node) = tree.get_mut(id) else {
            return Ok(());
        };
        let origin = node.bounds.padding;
        let mut scope = CanvasScope::new(canvas);
        scope.translate(origin.x, origin.y);

        if !self.config.cache_node_output {
            self.pipeline.paint_node(&mut *scope, node)?;
            node.paint_dirty = false;
            stats.regenerated += 1;
            stats.painted += 1;
            return Ok(());
        }

        if node.paint_dirty || !self.cache.contains_key(&id) {
            let list = self.pipeline.record_node(node)?;
            let _ = self.cache.insert(id, list);
            node.paint_dirty = false;
            stats.regenerated += 1;
        }
        if let Some(list) = self.cache.get(&id) {
            list.replay(&mut *scope);
        }
        stats.painted += 1;
        Ok(())
    }
}

/// Visible nodes of the subtree in painting order (parents before children).
fn visible_nodes(tree: &NodeTree, root: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = tree.get(id) else { continue };
        if !node.is_visible() {
            continue;
        }
        order.push(id);
        stack.extend(node.children().iter().rev().copied());
    }
    order
}

fn draw_debug_bounds(tree: &NodeTree, order: &[NodeId], canvas: &mut dyn Canvas) {
    for node in order.iter().filter_map(|&id| tree.get(id)) {
        outline(canvas, node.bounds.margin, DEBUG_MARGIN);
        outline(canvas, node.bounds.padding, DEBUG_PADDING);
        outline(canvas, node.bounds.content, DEBUG_CONTENT);
    }
}

fn outline(canvas: &mut dyn Canvas, rect: Rect, color: Color) {
    if !rect.is_empty() {
        canvas.stroke_rect(rect.inset(0.5), CornerRadii::ZERO, 1.0, color, false);
    }
}
