//! Node data.

use facet_style::{ComputedStyle, NodeSelectors, Style};

use crate::{Bounds, NodeId};

/// Result of the last intrinsic measurement of a node.
///
/// `constraint` is the maximum content width the measurement was taken
/// under; a later measurement with the same constraint may reuse `width`
/// and `height` while the node is layout-clean.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureCache {
    /// Width constraint the measurement used, if any.
    pub constraint: Option<f32>,
    /// Measured content-box width.
    pub width: f32,
    /// Measured content-box height.
    pub height: f32,
}

/// One node of a [`NodeTree`](crate::NodeTree).
///
/// Style inputs (tag, classes, states, inline style) are changed through
/// setters that flag the node for style re-resolution. Layout output
/// (`bounds`, `measure`, `text_lines`) and the dirty flags are written by the
/// layout solver and the compositor.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) text: Option<String>,
    element_id: Option<String>,
    selectors: NodeSelectors,
    inline_style: Style,
    computed: ComputedStyle,
    style_dirty: bool,

    /// Last computed boxes. Stale while the node is invisible.
    pub bounds: Bounds,
    /// Geometry of this node or a descendant must be recomputed.
    pub layout_dirty: bool,
    /// Paint output of this node must be regenerated.
    pub paint_dirty: bool,
    /// Cached intrinsic content size.
    pub measure: Option<MeasureCache>,
    /// Text split into lines by the last measurement.
    pub text_lines: Vec<String>,
}

impl Node {
    pub(crate) fn new(tag: Option<&str>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            text: None,
            element_id: None,
            selectors: NodeSelectors {
                tag: tag.map(str::to_string),
                ..NodeSelectors::default()
            },
            inline_style: Style::default(),
            computed: ComputedStyle::new(),
            style_dirty: true,
            bounds: Bounds::default(),
            layout_dirty: true,
            paint_dirty: true,
            measure: None,
            text_lines: Vec::new(),
        }
    }

    /// Parent node, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in placement order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Host-assigned identifier.
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    /// Set the host-assigned identifier. Has no effect on style.
    pub fn set_element_id(&mut self, id: Option<String>) {
        self.element_id = id;
    }

    /// Text content.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Tag, classes and states used for rule matching.
    #[must_use]
    pub const fn selectors(&self) -> &NodeSelectors {
        &self.selectors
    }

    /// Replace the tag.
    pub fn set_tag(&mut self, tag: Option<&str>) {
        let tag = tag.map(str::to_string);
        if self.selectors.tag != tag {
            self.selectors.tag = tag;
            self.style_dirty = true;
        }
    }

    /// Add a class. Adding a class the node already has does nothing.
    pub fn add_class(&mut self, class: &str) {
        if !self.selectors.has_class(class) {
            self.selectors.classes.push(class.to_string());
            self.style_dirty = true;
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, class: &str) {
        let before = self.selectors.classes.len();
        self.selectors.classes.retain(|c| c != class);
        if self.selectors.classes.len() != before {
            self.style_dirty = true;
        }
    }

    /// Replace every class.
    pub fn set_classes<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next: Vec<String> = Vec::new();
        for class in classes {
            let class = class.into();
            if !next.contains(&class) {
                next.push(class);
            }
        }
        if next != self.selectors.classes {
            self.selectors.classes = next;
            self.style_dirty = true;
        }
    }

    /// Turn a pseudo state (`hover`, `disabled`, ...) on or off.
    pub fn set_state(&mut self, state: &str, active: bool) {
        let has = self.selectors.has_state(state);
        if active && !has {
            self.selectors.states.push(state.to_string());
            self.style_dirty = true;
        } else if !active && has {
            self.selectors.states.retain(|s| s != state);
            self.style_dirty = true;
        }
    }

    /// The node's inline style override.
    #[must_use]
    pub const fn inline_style(&self) -> &Style {
        &self.inline_style
    }

    /// Replace the inline style override.
    pub fn set_inline_style(&mut self, style: Style) {
        if self.inline_style != style {
            self.inline_style = style;
            self.style_dirty = true;
        }
    }

    /// The node's computed style.
    #[must_use]
    pub const fn computed(&self) -> &ComputedStyle {
        &self.computed
    }

    pub(crate) fn computed_mut(&mut self) -> &mut ComputedStyle {
        &mut self.computed
    }

    /// True when the node must be re-resolved against the stylesheet.
    #[must_use]
    pub const fn is_style_dirty(&self) -> bool {
        self.style_dirty
    }

    pub(crate) fn clear_style_dirty(&mut self) {
        self.style_dirty = false;
    }

    /// Whether the committed style makes this node visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.computed.layout().is_visible()
    }
}
