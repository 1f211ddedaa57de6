//! Software rendering for the facet drawing core.
//!
//! # Architecture
//!
//! The renderer is the final stage in the pipeline:
//!
//! ```text
//! Style → Layout → Paint → Render
//!                    ↓        ↓
//!              DisplayList → Pixels
//! ```
//!
//! [`FontRegistry`] and [`IconRegistry`] serve layout (sizes) and the
//! [`SkiaCanvas`] (glyphs and bitmaps). The [`Compositor`] runs one frame
//! over a node tree and keeps per-node paint output between frames.

mod canvas;
mod compositor;
mod config;
mod error;
mod fonts;
mod icons;
mod renderer;

pub use canvas::SkiaCanvas;
pub use compositor::{Compositor, FrameStats};
pub use config::CompositorConfig;
pub use error::RenderError;
pub use fonts::FontRegistry;
pub use icons::{IconBitmap, IconRegistry};
pub use renderer::{Renderer, save_png};
