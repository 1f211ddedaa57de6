//! The layout solver.
//!
//! Layout runs in two passes over the visible part of a subtree:
//!
//! 1. **Measure** (bottom-up) - each node's content size: explicit size
//!    where set, otherwise the extent of its children along the flow plus
//!    gaps, widened to fit its text and icon. Results are cached per node
//!    together with the width constraint they were taken under.
//! 2. **Place** (top-down) - each node gets its boxes, then its children are
//!    positioned inside its content box.
//!
//! Along the main axis children are grouped by their anchor (start, center,
//! end) and packed with `gap` between neighbours of a group. On the cross
//! axis each child aligns by the other anchor component. Stretch children
//! split the main-axis space left by their siblings evenly.

use facet_common::warning::warn_once;
use facet_dom::{Bounds, MeasureCache, NodeId, NodeTree, Rect};
use facet_style::values::{HorizontalAlign, VerticalAlign};
use facet_style::{Anchor, Flow, LayoutStyle, StyleError};
use thiserror::Error;

use crate::text::{FontError, FontService, IconService};

/// Errors that stop a layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The font service rejected a request.
    #[error(transparent)]
    Font(#[from] FontError),
    /// A committed style held an unknown enum code.
    #[error(transparent)]
    Style(#[from] StyleError),
    /// The id names no live node.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}

/// Work done by one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// Nodes whose intrinsic size was recomputed.
    pub measured: usize,
    /// Nodes whose boxes were recomputed.
    pub placed: usize,
    /// Clean nodes whose boxes were reused as-is.
    pub reused: usize,
    /// Clean nodes moved without relayout.
    pub translated: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Start,
    Center,
    End,
}

impl Align {
    const fn of(anchor: Anchor, horizontal: bool) -> Self {
        if horizontal {
            match anchor.horizontal() {
                HorizontalAlign::Left => Self::Start,
                HorizontalAlign::Center => Self::Center,
                HorizontalAlign::Right => Self::End,
            }
        } else {
            match anchor.vertical() {
                VerticalAlign::Top => Self::Start,
                VerticalAlign::Middle => Self::Center,
                VerticalAlign::Bottom => Self::End,
            }
        }
    }

    fn offset(self, free: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => free / 2.0,
            Self::End => free,
        }
    }
}

/// A visible child during placement, sizes along (main, cross).
struct Item {
    id: NodeId,
    main_align: Align,
    cross_align: Align,
    stretch: bool,
    content: (f32, f32),
    edges: (f32, f32),
}

impl Item {
    fn outer_main(&self) -> f32 {
        self.content.0 + self.edges.0
    }

    fn outer_cross(&self) -> f32 {
        self.content.1 + self.edges.1
    }
}

fn same_constraint(a: Option<f32>, b: Option<f32>) -> bool {
    a.map(f32::to_bits) == b.map(f32::to_bits)
}

fn edges(layout: &LayoutStyle) -> (f32, f32) {
    let (padding, margin) = (layout.padding(), layout.margin());
    (
        padding.horizontal() as f32 + margin.horizontal() as f32,
        padding.vertical() as f32 + margin.vertical() as f32,
    )
}

/// Computes node boxes from committed layout styles.
pub struct LayoutSolver<'a> {
    fonts: &'a dyn FontService,
    icons: &'a dyn IconService,
}

impl<'a> LayoutSolver<'a> {
    /// A solver measuring text with `fonts` and icons with `icons`.
    #[must_use]
    pub fn new(fonts: &'a dyn FontService, icons: &'a dyn IconService) -> Self {
        Self { fonts, icons }
    }

    /// Lay out the subtree at `root` with its margin box at the origin.
    ///
    /// # Errors
    ///
    /// See [`solve_at`](Self::solve_at).
    pub fn solve(&self, tree: &mut NodeTree, root: NodeId) -> Result<SolveStats, LayoutError> {
        self.solve_at(tree, root, 0.0, 0.0)
    }

    /// Lay out the subtree at `root` with its margin box at `(x, y)`.
    ///
    /// Only layout-dirty nodes are recomputed; clean subtrees keep their
    /// boxes, translated if their origin moved. An invisible root is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Fails on an unknown root, an unregistered font or an unknown enum
    /// code in a committed style.
    pub fn solve_at(
        &self,
        tree: &mut NodeTree,
        root: NodeId,
        x: f32,
        y: f32,
    ) -> Result<SolveStats, LayoutError> {
        let node = tree.get(root).ok_or(LayoutError::UnknownNode(root))?;
        let mut stats = SolveStats::default();
        if !node.is_visible() {
            return Ok(stats);
        }

        let size = self.measure(tree, root, None, &mut stats)?;
        self.place(tree, root, (x, y), size, &mut stats)?;
        tracing::debug!(
            root = root.0,
            measured = stats.measured,
            placed = stats.placed,
            reused = stats.reused,
            translated = stats.translated,
            "layout solved"
        );
        Ok(stats)
    }

    fn measure(
        &self,
        tree: &mut NodeTree,
        id: NodeId,
        constraint: Option<f32>,
        stats: &mut SolveStats,
    ) -> Result<(f32, f32), LayoutError> {
        let node = tree.get(id).ok_or(LayoutError::UnknownNode(id))?;
        let layout = *node.computed().layout();
        if !layout.is_visible() {
            return Ok((0.0, 0.0));
        }
        if !node.layout_dirty
            && let Some(cache) = node.measure
            && same_constraint(cache.constraint, constraint)
        {
            return Ok((cache.width, cache.height));
        }

        let flow = layout.flow()?;
        let explicit = layout.size();
        let wrap_width = if explicit.width > 0 {
            Some(explicit.width as f32)
        } else {
            constraint
        };
        let children = node.children().to_vec();
        let text = node.text().filter(|t| !t.is_empty()).map(str::to_string);
        let icon = node.computed().paint().icon_id();

        let mut main: f32 = 0.0;
        let mut cross: f32 = 0.0;
        let mut count = 0usize;
        for child in children {
            let Some(child_layout) = tree.get(child).map(|c| *c.computed().layout()) else {
                continue;
            };
            if !child_layout.is_visible() {
                continue;
            }
            let (edge_w, edge_h) = edges(&child_layout);
            let child_constraint = wrap_width.map(|w| (w - edge_w).max(0.0));
            let (w, h) = self.measure(tree, child, child_constraint, stats)?;
            let (child_main, child_cross) = match flow {
                Flow::Horizontal => (w + edge_w, h + edge_h),
                Flow::Vertical => (h + edge_h, w + edge_w),
            };
            main += child_main;
            cross = cross.max(child_cross);
            count += 1;
        }
        if count > 1 {
            main += layout.gap() as f32 * (count - 1) as f32;
        }
        let (mut width, mut height) = match flow {
            Flow::Horizontal => (main, cross),
            Flow::Vertical => (cross, main),
        };

        let mut lines = Vec::new();
        if let Some(text) = text {
            let font_size = layout.font_size().max(0) as f32;
            let measured = self.fonts.measure(
                &text,
                layout.font(),
                font_size,
                wrap_width,
                layout.word_wrap(),
            )?;
            let line_height =
                self.fonts.line_height(layout.font(), font_size)? * layout.line_height().max(0.0);
            width = width.max(measured.width);
            height = height.max(line_height * measured.lines.len() as f32);
            lines = measured.lines;
        }

        if let Some(icon) = icon {
            match self.icons.icon_size(icon) {
                Some(size) => {
                    width = width.max(size.width as f32);
                    height = height.max(size.height as f32);
                }
                None => warn_once("layout", &format!("icon {icon} is not registered")),
            }
        }

        if explicit.width > 0 {
            width = explicit.width as f32;
        }
        if explicit.height > 0 {
            height = explicit.height as f32;
        }
        let (width, height) = (width.max(0.0), height.max(0.0));

        if let Some(node) = tree.get_mut(id) {
            node.measure = Some(MeasureCache {
                constraint,
                width,
                height,
            });
            // Re-wrapped text must be repainted even when the box is unchanged.
            if node.text_lines != lines {
                node.paint_dirty = true;
            }
            node.text_lines = lines;
        }
        stats.measured += 1;
        tracing::trace!(node = id.0, width, height, "measured");
        Ok((width, height))
    }

    fn place(
        &self,
        tree: &mut NodeTree,
        id: NodeId,
        origin: (f32, f32),
        size: (f32, f32),
        stats: &mut SolveStats,
    ) -> Result<(), LayoutError> {
        let node = tree.get_mut(id).ok_or(LayoutError::UnknownNode(id))?;
        let layout = *node.computed().layout();
        let (padding, margin) = (layout.padding(), layout.margin());
        let content = Rect::new(
            origin.0 + margin.left as f32 + padding.left as f32,
            origin.1 + margin.top as f32 + padding.top as f32,
            size.0,
            size.1,
        );
        let bounds = Bounds::from_content(content, padding, margin);
        let previous = node.bounds;

        if !node.layout_dirty {
            if previous == bounds {
                stats.reused += 1;
                return Ok(());
            }
            if previous.content.width == bounds.content.width
                && previous.content.height == bounds.content.height
            {
                let dx = bounds.content.x - previous.content.x;
                let dy = bounds.content.y - previous.content.y;
                stats.translated += translate_subtree(tree, id, dx, dy);
                return Ok(());
            }
        }

        node.bounds = bounds;
        if previous != bounds {
            node.paint_dirty = true;
        }
        node.layout_dirty = false;
        stats.placed += 1;

        self.place_children(tree, id, &layout, content, stats)
    }

    fn place_children(
        &self,
        tree: &mut NodeTree,
        id: NodeId,
        layout: &LayoutStyle,
        content: Rect,
        stats: &mut SolveStats,
    ) -> Result<(), LayoutError> {
        let horizontal = layout.flow()? == Flow::Horizontal;
        let gap = layout.gap() as f32;
        let (main_size, cross_size) = if horizontal {
            (content.width, content.height)
        } else {
            (content.height, content.width)
        };

        let mut items = Vec::new();
        for &child in tree.children(id) {
            let Some(node) = tree.get(child) else { continue };
            let child_layout = node.computed().layout();
            if !child_layout.is_visible() {
                continue;
            }
            let anchor = child_layout.anchor()?;
            let cache = node.measure.unwrap_or_default();
            let (edge_w, edge_h) = edges(child_layout);
            let explicit = child_layout.size();
            let explicit_main = if horizontal {
                explicit.width > 0
            } else {
                explicit.height > 0
            };
            let (content, edges) = if horizontal {
                ((cache.width, cache.height), (edge_w, edge_h))
            } else {
                ((cache.height, cache.width), (edge_h, edge_w))
            };
            items.push(Item {
                id: child,
                main_align: Align::of(anchor, horizontal),
                cross_align: Align::of(anchor, !horizontal),
                stretch: child_layout.stretch() && !explicit_main,
                content,
                edges,
            });
        }

        let groups = [Align::Start, Align::Center, Align::End];
        let gap_count: usize = groups
            .iter()
            .map(|&g| items.iter().filter(|i| i.main_align == g).count().saturating_sub(1))
            .sum();

        let stretch_count = items.iter().filter(|i| i.stretch).count();
        if stretch_count > 0 {
            let fixed: f32 = items
                .iter()
                .filter(|i| !i.stretch)
                .map(Item::outer_main)
                .sum();
            let share =
                ((main_size - fixed - gap * gap_count as f32) / stretch_count as f32).max(0.0);
            for item in items.iter_mut().filter(|i| i.stretch) {
                item.content.0 = item.content.0.max(share - item.edges.0);
            }
        }

        for group in groups {
            let members: Vec<&Item> = items.iter().filter(|i| i.main_align == group).collect();
            if members.is_empty() {
                continue;
            }
            let extent: f32 = members.iter().map(|i| i.outer_main()).sum::<f32>()
                + gap * (members.len() - 1) as f32;
            let mut cursor = group.offset(main_size - extent);

            for item in members {
                let cross = item.cross_align.offset(cross_size - item.outer_cross());
                let (origin, size) = if horizontal {
                    (
                        (content.x + cursor, content.y + cross),
                        (item.content.0, item.content.1),
                    )
                } else {
                    (
                        (content.x + cross, content.y + cursor),
                        (item.content.1, item.content.0),
                    )
                };
                self.place(tree, item.id, origin, size, stats)?;
                cursor += item.outer_main() + gap;
            }
        }
        Ok(())
    }
}

/// Move a clean subtree; invisible nodes and their subtrees are skipped.
fn translate_subtree(tree: &mut NodeTree, id: NodeId, dx: f32, dy: f32) -> usize {
    let Some(node) = tree.get_mut(id) else {
        return 0;
    };
    if !node.is_visible() {
        return 0;
    }
    node.bounds = node.bounds.translate(dx, dy);
    node.paint_dirty = true;
    let children = node.children().to_vec();
    1 + children
        .into_iter()
        .map(|child| translate_subtree(tree, child, dx, dy))
        .sum::<usize>()
}
