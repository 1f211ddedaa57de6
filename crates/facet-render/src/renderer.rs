//! Headless rendering to a pixel buffer.
//!
//! [`Renderer`] owns the font and icon registries and a [`Compositor`], and
//! renders a node tree into a fresh tiny-skia pixmap per call. The
//! compositor's per-node caches survive between calls, so re-rendering an
//! unchanged tree only replays recorded output.

use std::path::Path;

use anyhow::Result;
use facet_dom::{NodeId, NodeTree};
use facet_layout::LayoutSolver;
use facet_paint::RenderPipeline;
use facet_style::Stylesheet;
use tiny_skia::Pixmap;

use crate::canvas::SkiaCanvas;
use crate::compositor::{Compositor, FrameStats};
use crate::config::CompositorConfig;
use crate::error::RenderError;
use crate::fonts::FontRegistry;
use crate::icons::IconRegistry;

/// Fonts, icons and a compositor, ready to render frames.
#[derive(Default)]
pub struct Renderer {
    fonts: FontRegistry,
    icons: IconRegistry,
    compositor: Compositor,
}

impl Renderer {
    /// A renderer with the standard pipeline and `config`.
    #[must_use]
    pub fn new(config: CompositorConfig) -> Self {
        Self {
            fonts: FontRegistry::new(),
            icons: IconRegistry::new(),
            compositor: Compositor::new(RenderPipeline::standard(), config),
        }
    }

    /// Registered fonts.
    #[must_use]
    pub const fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Registered fonts, for registration.
    pub const fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }

    /// Registered icons.
    #[must_use]
    pub const fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    /// Registered icons, for registration.
    pub const fn icons_mut(&mut self) -> &mut IconRegistry {
        &mut self.icons
    }

    /// Render the subtree at `root` into a new `width` by `height` pixmap
    /// cleared to the configured color.
    ///
    /// # Errors
    ///
    /// Fails if the surface cannot be allocated or the frame fails.
    pub fn render(
        &mut self,
        tree: &mut NodeTree,
        root: NodeId,
        sheet: &Stylesheet,
        width: u32,
        height: u32,
    ) -> Result<(Pixmap, FrameStats), RenderError> {
        let mut canvas = SkiaCanvas::new(width, height, &self.fonts, &self.icons)?;
        canvas.clear(self.compositor.config().clear_color);
        let solver = LayoutSolver::new(&self.fonts, &self.icons);
        let stats = self
            .compositor
            .render_frame(tree, root, sheet, &solver, &mut canvas)?;
        Ok((canvas.into_pixmap(), stats))
    }
}

/// Save a rendered pixmap as a PNG file.
///
/// # Errors
///
/// Returns an error if the image cannot be encoded or written.
pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    pixmap
        .save_png(path)
        .map_err(|e| anyhow::anyhow!("failed to save frame to '{}': {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved frame");
    Ok(())
}
