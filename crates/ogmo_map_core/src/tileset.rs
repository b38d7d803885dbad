//! Tileset configuration and source-rectangle math

use serde::{Deserialize, Serialize};

use crate::PixelRect;

/// A sprite sheet sliced into a uniform grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tileset {
    /// Registry key, also used as the texture id in the atlas
    pub name: String,
    /// Image path as authored, with `/` separators
    pub path: String,
    /// Cell size in pixels
    pub tile_size: (u32, u32),
}

impl Tileset {
    /// Create a tileset, normalising path separators to `/`
    pub fn new(name: impl Into<String>, path: &str, tile_width: u32, tile_height: u32) -> Self {
        Self {
            name: name.into(),
            path: path.replace('\\', "/"),
            tile_size: (tile_width, tile_height),
        }
    }

    /// Path handed to the texture atlas
    ///
    /// Project files reference images relative to the levels directory, so one
    /// leading `../` segment is stripped.
    pub fn atlas_path(&self) -> &str {
        self.path.strip_prefix("../").unwrap_or(&self.path)
    }

    /// Number of cells per row in an image of the given width
    pub fn columns(&self, image_width: u32) -> u32 {
        image_width / self.tile_size.0.max(1)
    }

    /// Total cells in an image of the given size
    pub fn tile_count(&self, image_width: u32, image_height: u32) -> u32 {
        self.columns(image_width) * (image_height / self.tile_size.1.max(1))
    }

    /// Source rectangle of `tile_id` in an image `image_width` pixels wide
    ///
    /// Returns `None` when the image is narrower than a single cell.
    pub fn source_rect(&self, tile_id: u32, image_width: u32) -> Option<PixelRect> {
        let columns = self.columns(image_width);
        if columns == 0 {
            return None;
        }
        let (w, h) = self.tile_size;
        let col = tile_id % columns;
        let row = tile_id / columns;
        Some(PixelRect::new((col * w) as i32, (row * h) as i32, w, h))
    }
}
