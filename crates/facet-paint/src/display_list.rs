//! Display List - a recorded sequence of canvas calls
//!
//! A [`DisplayList`] is itself a [`Canvas`]: generators draw into it exactly
//! as they would into a real surface, and the recorded commands can be
//! replayed later onto any other canvas. The compositor keeps one list per
//! node so that only paint-dirty nodes are regenerated.

use facet_dom::Rect;
use facet_style::{Color, EdgeSize};

use crate::canvas::{Brush, Canvas, CornerRadii, IconDraw, TextRun};

/// A single recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// [`Canvas::save`]
    Save,
    /// [`Canvas::restore`]
    Restore,
    /// [`Canvas::translate`]
    Translate {
        /// Horizontal offset.
        dx: f32,
        /// Vertical offset.
        dy: f32,
    },
    /// [`Canvas::fill_rect`]
    FillRect {
        /// Rectangle to fill.
        rect: Rect,
        /// Corner radii.
        radii: CornerRadii,
        /// Fill brush.
        brush: Brush,
        /// Antialias edges.
        antialias: bool,
    },
    /// [`Canvas::stroke_rect`]
    StrokeRect {
        /// Rectangle to outline.
        rect: Rect,
        /// Corner radii.
        radii: CornerRadii,
        /// Line width.
        width: f32,
        /// Line color.
        color: Color,
        /// Antialias edges.
        antialias: bool,
    },
    /// [`Canvas::draw_shadow`]
    Shadow {
        /// Shape casting the shadow.
        rect: Rect,
        /// Corner radii of the shape.
        radii: CornerRadii,
        /// Reach of the shadow per side.
        extent: EdgeSize,
        /// Shadow color.
        color: Color,
    },
    /// [`Canvas::draw_text`]
    Text(TextRun),
    /// [`Canvas::draw_icon`]
    Icon(IconDraw),
}

/// A list of canvas calls in painting order (back to front).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Commands other than state bookkeeping (save, restore, translate).
    pub fn drawing_commands(&self) -> impl Iterator<Item = &DisplayCommand> {
        self.commands.iter().filter(|command| {
            !matches!(
                command,
                DisplayCommand::Save | DisplayCommand::Restore | DisplayCommand::Translate { .. }
            )
        })
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Issue every recorded call, in order, on `canvas`.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for command in &self.commands {
            match command {
                DisplayCommand::Save => canvas.save(),
                DisplayCommand::Restore => canvas.restore(),
                DisplayCommand::Translate { dx, dy } => canvas.translate(*dx, *dy),
                DisplayCommand::FillRect {
                    rect,
                    radii,
                    brush,
                    antialias,
                } => canvas.fill_rect(*rect, *radii, brush, *antialias),
                DisplayCommand::StrokeRect {
                    rect,
                    radii,
                    width,
                    color,
                    antialias,
                } => canvas.stroke_rect(*rect, *radii, *width, *color, *antialias),
                DisplayCommand::Shadow {
                    rect,
                    radii,
                    extent,
                    color,
                } => canvas.draw_shadow(*rect, *radii, *extent, *color),
                DisplayCommand::Text(run) => canvas.draw_text(run),
                DisplayCommand::Icon(icon) => canvas.draw_icon(icon),
            }
        }
    }
}

impl Canvas for DisplayList {
    fn save(&mut self) {
        self.push(DisplayCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DisplayCommand::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.push(DisplayCommand::Translate { dx, dy });
    }

    fn fill_rect(&mut self, rect: Rect, radii: CornerRadii, brush: &Brush, antialias: bool) {
        self.push(DisplayCommand::FillRect {
            rect,
            radii,
            brush: *brush,
            antialias,
        });
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        radii: CornerRadii,
        width: f32,
        color: Color,
        antialias: bool,
    ) {
        self.push(DisplayCommand::StrokeRect {
            rect,
            radii,
            width,
            color,
            antialias,
        });
    }

    fn draw_shadow(&mut self, rect: Rect, radii: CornerRadii, extent: EdgeSize, color: Color) {
        self.push(DisplayCommand::Shadow {
            rect,
            radii,
            extent,
            color,
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.push(DisplayCommand::Text(run.clone()));
    }

    fn draw_icon(&mut self, icon: &IconDraw) {
        self.push(DisplayCommand::Icon(*icon));
    }
}
