//! Render errors.

use facet_dom::NodeId;
use facet_layout::LayoutError;
use facet_paint::PaintError;
use thiserror::Error;

/// Errors raised while registering resources or producing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Font bytes could not be parsed.
    #[error("font {font_id} could not be loaded: {reason}")]
    InvalidFont {
        /// Id the font was registered under.
        font_id: u32,
        /// Parser message.
        reason: String,
    },
    /// Icon pixel data does not match its declared size.
    #[error("icon {icon_id} has {actual} bytes, expected {expected}")]
    InvalidIcon {
        /// Id the icon was registered under.
        icon_id: u32,
        /// `width * height * 4`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A surface of this size cannot be allocated.
    #[error("cannot allocate a {width}x{height} surface")]
    Surface {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The root passed to the compositor names no live node.
    #[error("unknown root node {0:?}")]
    UnknownRoot(NodeId),
    /// Layout failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A generator failed.
    #[error(transparent)]
    Paint(#[from] PaintError),
    /// A configuration document could not be parsed.
    #[error("invalid compositor config: {0}")]
    Config(#[from] serde_json::Error),
}
