//! File-backed texture atlas with shared animation frames

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ogmo_map_core::PixelRect;
use tracing::debug;

use crate::atlas::{AtlasError, TextureAtlas, TextureDimensions};

/// A horizontal strip of equally sized animation frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStrip {
    pub cell_size: (u32, u32),
    /// Top-left of the first frame
    pub offset: (u32, u32),
    pub frame_count: u32,
}

/// An image registered with the [`TextureCache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTexture {
    pub id: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub strip: Option<FrameStrip>,
}

impl TextureDimensions for CachedTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Texture atlas that reads image headers from an asset directory
///
/// Only dimensions are kept; pixel data belongs to whatever renderer draws the
/// blits. Every animated texture shares one frame counter, advanced by the game
/// loop through [`TextureCache::next_frame`].
#[derive(Debug, Default)]
pub struct TextureCache {
    root: PathBuf,
    textures: HashMap<String, CachedTexture>,
    frame: u32,
}

impl TextureCache {
    /// Create a cache resolving paths relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
            frame: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register an animated strip of `frame_count` cells starting at `offset`
    pub fn load_animation(
        &mut self,
        id: &str,
        path: &str,
        cell_size: (u32, u32),
        offset: (u32, u32),
        frame_count: u32,
    ) -> Result<(), AtlasError> {
        if frame_count == 0 {
            return Err(AtlasError::NoFrames(id.to_string()));
        }
        self.insert(
            id,
            path,
            Some(FrameStrip {
                cell_size,
                offset,
                frame_count,
            }),
        )
    }

    /// Advance the shared animation frame
    pub fn next_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Source rectangle of the current frame of `id`
    ///
    /// Static textures cover the whole image.
    pub fn frame_rect(&self, id: &str) -> Option<PixelRect> {
        let texture = self.textures.get(id)?;
        let rect = match texture.strip {
            Some(strip) => {
                let index = self.frame % strip.frame_count;
                PixelRect::new(
                    (strip.offset.0 + index * strip.cell_size.0) as i32,
                    strip.offset.1 as i32,
                    strip.cell_size.0,
                    strip.cell_size.1,
                )
            }
            None => PixelRect::new(0, 0, texture.width, texture.height),
        };
        Some(rect)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.textures.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn insert(&mut self, id: &str, path: &str, strip: Option<FrameStrip>) -> Result<(), AtlasError> {
        let full_path = self.root.join(path);
        let (width, height) =
            image::image_dimensions(&full_path).map_err(|source| AtlasError::Image {
                path: full_path.clone(),
                source,
            })?;
        debug!(id, path = %full_path.display(), width, height, "Registered texture");

        self.textures.insert(
            id.to_string(),
            CachedTexture {
                id: id.to_string(),
                path: full_path,
                width,
                height,
                strip,
            },
        );
        Ok(())
    }
}

impl TextureAtlas for TextureCache {
    type Texture = CachedTexture;

    fn load_texture(&mut self, id: &str, path: &str) -> Result<(), AtlasError> {
        self.insert(id, path, None)
    }

    fn get_texture(&self, id: &str) -> Option<&CachedTexture> {
        self.textures.get(id)
    }
}
