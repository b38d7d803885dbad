//! Texture atlas and drawing surface seams
//!
//! The level manager never loads or draws images itself. Tileset images are
//! registered with a [`TextureAtlas`], and tiles are drawn by blitting
//! sub-rectangles of those images onto a [`RenderSurface`].

use std::path::PathBuf;

use ogmo_map_core::PixelRect;
use thiserror::Error;

/// Error type for texture registration failures
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Texture '{0}' has an animation with no frames")]
    NoFrames(String),
}

/// Pixel dimensions of a registered image
pub trait TextureDimensions {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// A cache of named images
pub trait TextureAtlas {
    type Texture: TextureDimensions;

    /// Register the image at `path` under `id`, replacing any previous entry
    fn load_texture(&mut self, id: &str, path: &str) -> Result<(), AtlasError>;

    /// Look up a registered image
    fn get_texture(&self, id: &str) -> Option<&Self::Texture>;
}

/// Something tiles can be drawn onto
pub trait RenderSurface<T> {
    /// Copy `source` from `texture` with its top-left corner at `destination`
    fn blit(&mut self, texture: &T, destination: (i32, i32), source: PixelRect);
}
