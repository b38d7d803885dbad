//! Runtime level loading for ogmo_map
//!
//! [`LevelManager`] reads an OGMO level project once, then loads individual
//! levels into tile layers and rectangle colliders. Images and collision are
//! delegated to collaborators behind the [`TextureAtlas`] and
//! [`CollisionRegistry`] traits; [`TextureCache`] and [`ColliderSet`] are
//! ready-made implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use ogmo_map_runtime::{ColliderSet, LevelConfig, LevelManager, TextureCache};
//!
//! let mut atlas = TextureCache::new("assets");
//! let mut colliders = ColliderSet::new();
//! let mut levels = LevelManager::new(LevelConfig::default());
//!
//! levels.setup(&mut atlas)?;
//! levels.load_level("level1", &mut colliders)?;
//!
//! // Each frame:
//! levels.render_level(&atlas, &mut screen, false)?;
//! // ... draw game objects ...
//! levels.render_level(&atlas, &mut screen, true)?;
//! ```

pub mod atlas;
mod config;
mod error;
mod manager;
mod texture_cache;

pub use atlas::{AtlasError, RenderSurface, TextureAtlas, TextureDimensions};
pub use config::LevelConfig;
pub use error::{ErrorKind, LevelError};
pub use manager::LevelManager;
pub use texture_cache::{CachedTexture, FrameStrip, TextureCache};

pub use ogmo_map_core::{ColliderSet, CollisionRegistry, Layer, PixelRect, Rgba, Tile, Tileset};
