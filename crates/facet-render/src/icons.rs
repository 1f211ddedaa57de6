//! Icon bitmaps.

use std::collections::HashMap;

use facet_layout::{IconService, IconSize};

use crate::error::RenderError;

/// A straight-alpha RGBA8 bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconBitmap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl IconBitmap {
    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA bytes.
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// A bitmap of one color.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width as usize) * (height as usize);
        Self {
            width,
            height,
            rgba: rgba.repeat(pixels),
        }
    }
}

/// Icons keyed by id.
#[derive(Debug, Default)]
pub struct IconRegistry {
    icons: HashMap<u32, IconBitmap>,
}

impl IconRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rgba` as a `width` by `height` icon under `icon_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidIcon`] if the buffer length is not
    /// `width * height * 4`.
    pub fn register(
        &mut self,
        icon_id: u32,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<(), RenderError> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(RenderError::InvalidIcon {
                icon_id,
                expected,
                actual: rgba.len(),
            });
        }
        self.insert(icon_id, IconBitmap { width, height, rgba });
        Ok(())
    }

    /// Register an already built bitmap.
    pub fn insert(&mut self, icon_id: u32, bitmap: IconBitmap) {
        let _ = self.icons.insert(icon_id, bitmap);
    }

    /// Drop an icon. Returns the bitmap if it was registered.
    pub fn remove(&mut self, icon_id: u32) -> Option<IconBitmap> {
        self.icons.remove(&icon_id)
    }

    /// The icon registered as `icon_id`.
    #[must_use]
    pub fn get(&self, icon_id: u32) -> Option<&IconBitmap> {
        self.icons.get(&icon_id)
    }
}

impl IconService for IconRegistry {
    fn icon_size(&self, icon_id: u32) -> Option<IconSize> {
        self.get(icon_id).map(|icon| IconSize {
            width: icon.width,
            height: icon.height,
        })
    }
}
