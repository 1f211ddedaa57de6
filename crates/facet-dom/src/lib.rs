//! Node tree for the facet drawing core.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. A parent
//! owns its children; a child only records its parent's id.
//!
//! # Dirty flags
//!
//! Every node carries three flags:
//!
//! - `style_dirty` - tag, classes, states or inline style changed
//! - `layout_dirty` - geometry of the node or a descendant must be recomputed
//! - `paint_dirty` - paint output of the node must be regenerated
//!
//! A layout-dirty node always has layout-dirty ancestors, so a solver can
//! start at the root and skip every clean subtree.

mod bounds;
mod node;

use facet_style::{ChangeMask, Stylesheet};
use thiserror::Error;

pub use bounds::{Bounds, Rect};
pub use node::{MeasureCache, Node};

/// A type-safe index into a [`NodeTree`].
///
/// Ids are never reused, so a stale id of a removed node stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Structural errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id names no live node.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// The child already has a parent.
    #[error("node {0:?} is already attached")]
    AlreadyAttached(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },
}

/// Arena of nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<Option<Node>>,
    removed: Vec<NodeId>,
    resolved_generation: Option<u64>,
}

impl NodeTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached node. New nodes start dirty on every flag.
    pub fn alloc(&mut self, tag: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(tag)));
        id
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.get_mut(id).ok_or(TreeError::UnknownNode(id))
    }

    /// True if `id` names a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no node is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(Option::is_none)
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either node is unknown, `child` already has a parent, or
    /// `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let _ = self.node(parent)?;
        if self.node(child)?.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if child == parent || self.ancestors(parent).any(|id| id == child) {
            return Err(TreeError::Cycle { parent, child });
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.mark_layout_dirty(parent);
        Ok(())
    }

    /// Detach `id` from its parent and drop it with its whole subtree.
    ///
    /// Only node-owned data is released. Removed ids are queued for
    /// [`take_removed`](Self::take_removed) so caches keyed by node can be
    /// evicted. Returns the number of nodes removed.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not live.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, TreeError> {
        if let Some(parent) = self.node(id)?.parent {
            if let Some(node) = self.get_mut(parent) {
                node.children.retain(|&c| c != id);
            }
            self.mark_layout_dirty(parent);
        }

        let doomed: Vec<NodeId> = self.subtree(id).collect();
        for &node in &doomed {
            if let Some(slot) = self.nodes.get_mut(node.0) {
                *slot = None;
            }
        }
        self.removed.extend_from_slice(&doomed);
        tracing::debug!(root = id.0, count = doomed.len(), "removed subtree");
        Ok(doomed.len())
    }

    /// Ids removed since the last call.
    pub fn take_removed(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.removed)
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node, empty for an unknown id.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Pre-order walk of `id` and everything below it.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> SubtreeIterator<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        SubtreeIterator { tree: self, stack }
    }

    /// Pre-order walk of everything below `id`, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.subtree(id).skip(1)
    }

    /// Replace a node's text and flag it for relayout.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not live.
    pub fn set_text(&mut self, id: NodeId, text: Option<String>) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        if node.text == text {
            return Ok(());
        }
        node.text = text;
        node.measure = None;
        node.paint_dirty = true;
        self.mark_layout_dirty(id);
        Ok(())
    }

    /// Flag `id` and all its ancestors for relayout.
    pub fn mark_layout_dirty(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            let Some(node) = self.get_mut(id) else { break };
            node.layout_dirty = true;
            current = node.parent;
        }
    }

    /// Flag `id` for repaint.
    pub fn mark_paint_dirty(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.paint_dirty = true;
        }
    }

    /// Re-resolve the computed style of every style-dirty node, or of every
    /// node when `sheet` changed since the last pass.
    ///
    /// Each node is reset to defaults, then receives the cascade result and
    /// its inline style before a single commit. A layout change flags the
    /// node and its ancestors for relayout; a paint change flags the node for
    /// repaint. Swapping the icon also flags relayout, since the icon's size
    /// is intrinsic content. Returns the number of nodes re-resolved.
    pub fn resolve_styles(&mut self, sheet: &Stylesheet) -> usize {
        let everything = self.resolved_generation != Some(sheet.generation());
        self.resolved_generation = Some(sheet.generation());

        let mut resolved = 0;
        for index in 0..self.nodes.len() {
            let id = NodeId(index);
            let Some(node) = self.get_mut(id) else {
                continue;
            };
            if !everything && !node.is_style_dirty() {
                continue;
            }

            let cascaded = sheet.resolve(node.selectors());
            let inline = node.inline_style().clone();
            let computed = node.computed_mut();
            let previous_icon = computed.paint().icon_id();
            computed.reset();
            computed.apply(&cascaded);
            computed.apply(&inline);
            let mask = computed.commit();
            let icon_changed = computed.paint().icon_id() != previous_icon;
            node.clear_style_dirty();
            resolved += 1;

            self.apply_change_mask(id, mask, icon_changed);
        }

        if resolved > 0 {
            tracing::trace!(resolved, everything, "resolved styles");
        }
        resolved
    }

    fn apply_change_mask(&mut self, id: NodeId, mask: ChangeMask, icon_changed: bool) {
        if mask.paint_changed() {
            self.mark_paint_dirty(id);
        }
        if mask.layout_changed() || (mask.paint_changed() && icon_changed) {
            if let Some(node) = self.get_mut(id) {
                node.measure = None;
            }
            self.mark_layout_dirty(id);
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a NodeTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct SubtreeIterator<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl Iterator for SubtreeIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
