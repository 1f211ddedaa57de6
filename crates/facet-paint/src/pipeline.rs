//! The ordered generator list that paints one node.

use std::fmt;

use facet_dom::Node;

use crate::canvas::{Canvas, CanvasScope};
use crate::display_list::DisplayList;
use crate::error::PaintError;
use crate::generators::{
    BackgroundGenerator, BorderGenerator, Generator, GradientGenerator, IconGenerator,
    ShadowGenerator, StrokeGenerator, TextEffectsGenerator, TextGenerator,
};

/// Generators sorted by render order.
///
/// Generators with equal orders run in insertion order.
#[derive(Default)]
pub struct RenderPipeline {
    generators: Vec<Box<dyn Generator>>,
}

impl RenderPipeline {
    /// A pipeline with no generators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in generators, from shadow at the back to text at the front.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_generator(ShadowGenerator)
            .with_generator(BackgroundGenerator)
            .with_generator(GradientGenerator)
            .with_generator(BorderGenerator)
            .with_generator(StrokeGenerator)
            .with_generator(IconGenerator)
            .with_generator(TextEffectsGenerator)
            .with_generator(TextGenerator)
    }

    /// Add a generator at its render order.
    #[must_use]
    pub fn with_generator<G: Generator + 'static>(mut self, generator: G) -> Self {
        let order = generator.render_order();
        let at = self
            .generators
            .partition_point(|existing| existing.render_order() <= order);
        self.generators.insert(at, Box::new(generator));
        self
    }

    /// Generator names in drawing order.
    pub fn generator_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.iter().map(|generator| generator.name())
    }

    /// Paint `node` onto `canvas` in its padding box coordinates.
    ///
    /// Each generator runs inside its own save/restore scope, so canvas
    /// state is balanced even when a generator fails. Invisible nodes draw
    /// nothing.
    ///
    /// # Errors
    ///
    /// Stops at the first generator error and returns it.
    pub fn paint_node(&self, canvas: &mut dyn Canvas, node: &Node) -> Result<(), PaintError> {
        if !node.is_visible() {
            return Ok(());
        }
        for generator in &self.generators {
            let mut scope = CanvasScope::new(&mut *canvas);
            if let Err(err) = generator.generate(&mut *scope, node) {
                tracing::debug!(generator = generator.name(), %err, "generator failed");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Paint `node` into a fresh display list.
    ///
    /// # Errors
    ///
    /// See [`paint_node`](Self::paint_node).
    pub fn record_node(&self, node: &Node) -> Result<DisplayList, PaintError> {
        let mut list = DisplayList::new();
        self.paint_node(&mut list, node)?;
        Ok(list)
    }
}

impl fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.generator_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, i32);

    impl Generator for Named {
        fn render_order(&self) -> i32 {
            self.1
        }

        fn name(&self) -> &'static str {
            self.0
        }

        fn generate(&self, _canvas: &mut dyn Canvas, _node: &Node) -> Result<(), PaintError> {
            Ok(())
        }
    }

    #[test]
    fn test_standard_order() {
        let names: Vec<_> = RenderPipeline::standard().generator_names().collect();
        assert_eq!(
            names,
            [
                "shadow",
                "background",
                "gradient",
                "border",
                "stroke",
                "icon",
                "text-effects",
                "text"
            ]
        );
    }

    #[test]
    fn test_insertion_sorted_and_stable() {
        let pipeline = RenderPipeline::new()
            .with_generator(Named("late", 10))
            .with_generator(Named("first", 1))
            .with_generator(Named("second", 1))
            .with_generator(Named("early", -5));
        let names: Vec<_> = pipeline.generator_names().collect();
        assert_eq!(names, ["early", "first", "second", "late"]);
    }
}
