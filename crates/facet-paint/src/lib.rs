//! Paint generation for facet nodes.
//!
//! # Scope
//!
//! This crate implements:
//! - **Canvas** - the drawing surface trait and its scoped state guard
//! - **Display List** - a recording canvas that can be replayed later
//! - **Generators** - one visual effect each (shadow, fill, border, text...)
//! - **Render Pipeline** - generators ordered by render order
//!
//! Generators read a node's committed paint snapshot and its bounds only.
//! They never touch styles or geometry.

/// Drawing surface abstraction.
pub mod canvas;
/// Recorded canvas calls.
pub mod display_list;
/// Paint errors.
pub mod error;
/// Paint generators.
pub mod generators;
/// Ordered generator list.
pub mod pipeline;

pub use canvas::{Brush, Canvas, CanvasScope, CornerRadii, IconDraw, TextEffect, TextRun};
pub use display_list::{DisplayCommand, DisplayList};
pub use error::PaintError;
pub use generators::Generator;
pub use pipeline::RenderPipeline;
