//! Core data structures for ogmo_map
//!
//! This crate provides the fundamental types for representing OGMO tile levels:
//! - `Tile` - A single placed tile
//! - `Layer` - A named plane of tiles sampled from one tileset
//! - `Tileset` - Sprite sheet configuration and source-rectangle math
//! - `ProjectDocument` - The parsed level-project (`.oep`) file
//! - `LevelDocument` - The parsed level-instance (`.oel`) file
//! - `CollisionRegistry` - Sink for rectangle colliders exported by a level

mod collision;
mod error;
mod layer;
mod level;
mod project;
mod tileset;

pub use collision::{ColliderSet, CollisionRegistry};
pub use error::DocumentError;
pub use layer::{Layer, Tile, FOREGROUND_PREFIX};
pub use level::{layout_tiles, ExportMode, LayerSection, LevelDocument, SectionContent};
pub use project::{CellSize, LayerDefinition, ProjectDocument, TilesetDefinition};
pub use tileset::Tileset;

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(feature = "bevy")]
impl From<Rgba> for bevy::color::Color {
    fn from(c: Rgba) -> Self {
        bevy::color::Color::srgba_u8(c.r, c.g, c.b, c.a)
    }
}

/// An axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Check whether two rectangles overlap (touching edges do not count)
    pub fn intersects(&self, other: &PixelRect) -> bool {
        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }
}
