//! The level manager
//!
//! Owns the layer and tileset declarations read from the level project, and the
//! tile contents of whichever level is currently loaded.
//!
//! # Lifecycle
//!
//! 1. [`LevelManager::setup`] parses the project file once, declaring layers and
//!    registering every tileset image with the texture atlas.
//! 2. [`LevelManager::load_level`] replaces the tile contents of every layer and
//!    repopulates the collision registry. It may be called any number of times.
//! 3. [`LevelManager::render_level`] draws the background or foreground layers
//!    once per frame.
//! 4. [`LevelManager::teardown`] drops everything but the config.
//!
//! All calls are expected on the thread that owns the render surface.

use std::collections::HashMap;

use ogmo_map_core::{
    layout_tiles, CollisionRegistry, Layer, LevelDocument, PixelRect, ProjectDocument, Rgba,
    SectionContent, Tile, Tileset,
};
use tracing::{debug, info};

use crate::atlas::{RenderSurface, TextureAtlas, TextureDimensions};
use crate::{LevelConfig, LevelError};

/// Metadata of the currently loaded level
#[derive(Debug, Clone, PartialEq, Eq)]
struct LoadedLevel {
    name: String,
    width: u32,
    height: u32,
}

/// New contents for one layer, built before anything is committed
struct StagedLayer {
    tiles: Vec<Tile>,
    tileset: Option<String>,
}

/// Loads OGMO levels into tile layers and colliders
#[derive(Debug, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct LevelManager {
    config: LevelConfig,
    background_colour: Option<Rgba>,
    background_layers: Vec<Layer>,
    foreground_layers: Vec<Layer>,
    tilesets: HashMap<String, Tileset>,
    level: Option<LoadedLevel>,
}

impl LevelManager {
    pub fn new(config: LevelConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Read the project file named by the config and declare its layers and tilesets
    ///
    /// Each tileset image is registered with `atlas` under the tileset's name.
    /// Any previously loaded level is discarded.
    pub fn setup<A: TextureAtlas>(&mut self, atlas: &mut A) -> Result<(), LevelError> {
        let path = self.config.project_file.clone();
        let xml = std::fs::read_to_string(&path).map_err(|source| LevelError::ProjectRead {
            path: path.clone(),
            source,
        })?;
        let project =
            ProjectDocument::parse(&xml).map_err(|source| LevelError::ProjectFormat {
                origin: path.display().to_string(),
                source,
            })?;
        self.apply_project(project, atlas)
    }

    /// Like [`LevelManager::setup`], with the project given as XML text
    pub fn setup_from_str<A: TextureAtlas>(
        &mut self,
        xml: &str,
        atlas: &mut A,
    ) -> Result<(), LevelError> {
        let project = ProjectDocument::parse(xml).map_err(|source| LevelError::ProjectFormat {
            origin: "<inline>".to_string(),
            source,
        })?;
        self.apply_project(project, atlas)
    }

    fn apply_project<A: TextureAtlas>(
        &mut self,
        project: ProjectDocument,
        atlas: &mut A,
    ) -> Result<(), LevelError> {
        let mut tilesets = HashMap::new();
        for definition in &project.tilesets {
            let tileset = definition.to_tileset();
            atlas
                .load_texture(&tileset.name, tileset.atlas_path())
                .map_err(|source| LevelError::Atlas {
                    tileset: tileset.name.clone(),
                    source,
                })?;
            tilesets.insert(tileset.name.clone(), tileset);
        }

        let (foreground, background): (Vec<Layer>, Vec<Layer>) = project
            .layers
            .iter()
            .map(|definition| definition.to_layer())
            .partition(|layer| layer.is_foreground());

        info!(
            background_layers = background.len(),
            foreground_layers = foreground.len(),
            tilesets = tilesets.len(),
            "Level project set up"
        );

        self.background_colour = Some(project.background_colour);
        self.background_layers = background;
        self.foreground_layers = foreground;
        self.tilesets = tilesets;
        self.level = None;
        Ok(())
    }

    /// Load the level called `name` from the configured levels directory
    ///
    /// On success every layer's tiles are replaced and `colliders` holds exactly
    /// the new level's rectangles. On failure nothing changes: the previous
    /// level, its colliders, and the loaded flag are left as they were.
    pub fn load_level<C: CollisionRegistry>(
        &mut self,
        name: &str,
        colliders: &mut C,
    ) -> Result<(), LevelError> {
        if !self.is_set_up() {
            return Err(LevelError::NotSetUp);
        }
        let path = self.config.level_path(name);
        let xml = std::fs::read_to_string(&path).map_err(|source| LevelError::LevelNotFound {
            name: name.to_string(),
            path,
            source,
        })?;
        self.load_level_from_str(name, &xml, colliders)
    }

    /// Like [`LevelManager::load_level`], with the level given as XML text
    pub fn load_level_from_str<C: CollisionRegistry>(
        &mut self,
        name: &str,
        xml: &str,
        colliders: &mut C,
    ) -> Result<(), LevelError> {
        if !self.is_set_up() {
            return Err(LevelError::NotSetUp);
        }
        let declared: Vec<&str> = self.layers().map(|l| l.name.as_str()).collect();
        let document =
            LevelDocument::parse_layers(xml, &declared).map_err(|source| LevelError::Format {
                level: name.to_string(),
                source,
            })?;

        let mut rects: Vec<PixelRect> = Vec::new();
        let mut staged = Vec::with_capacity(self.layer_count());
        for layer in self.layers() {
            let section =
                document
                    .section(&layer.name)
                    .ok_or_else(|| LevelError::MissingLayerSection {
                        level: name.to_string(),
                        layer: layer.name.clone(),
                    })?;

            let next = match &section.content {
                SectionContent::Rectangles(found) => {
                    debug!(layer = %layer.name, colliders = found.len(), "Read collider layer");
                    rects.extend_from_slice(found);
                    StagedLayer {
                        tiles: Vec::new(),
                        tileset: None,
                    }
                }
                SectionContent::Grid { tileset, rows } => {
                    if !self.tilesets.contains_key(tileset) {
                        return Err(LevelError::UnknownTileset {
                            level: name.to_string(),
                            layer: layer.name.clone(),
                            tileset: tileset.clone(),
                        });
                    }
                    let tiles =
                        layout_tiles(layer, rows).map_err(|source| LevelError::Format {
                            level: name.to_string(),
                            source,
                        })?;
                    debug!(layer = %layer.name, %tileset, tiles = tiles.len(), "Read tile layer");
                    StagedLayer {
                        tiles,
                        tileset: Some(tileset.clone()),
                    }
                }
            };
            staged.push(next);
        }

        colliders.remove_all_colliders();
        for rect in &rects {
            colliders.add_collider(*rect);
        }

        let mut tile_count = 0;
        let layers = self
            .background_layers
            .iter_mut()
            .chain(self.foreground_layers.iter_mut());
        for (layer, next) in layers.zip(staged) {
            tile_count += next.tiles.len();
            layer.tiles = next.tiles;
            layer.tileset = next.tileset;
        }

        self.level = Some(LoadedLevel {
            name: name.to_string(),
            width: document.width,
            height: document.height,
        });

        info!(
            level = %name,
            width = document.width,
            height = document.height,
            tiles = tile_count,
            colliders = rects.len(),
            "Loaded level"
        );
        Ok(())
    }

    /// Draw the foreground or background layers onto `surface`
    ///
    /// Layers are drawn in declaration order, tiles in list order. Does nothing
    /// before a level is loaded. Tiles whose id lies outside the tileset image
    /// are skipped.
    pub fn render_level<A, S>(
        &self,
        atlas: &A,
        surface: &mut S,
        foreground: bool,
    ) -> Result<(), LevelError>
    where
        A: TextureAtlas,
        S: RenderSurface<A::Texture>,
    {
        if !self.is_level_loaded() {
            return Ok(());
        }

        let layers = if foreground {
            &self.foreground_layers
        } else {
            &self.background_layers
        };

        for layer in layers {
            let Some(tileset_name) = &layer.tileset else {
                continue;
            };
            let tileset = self
                .tilesets
                .get(tileset_name)
                .ok_or_else(|| LevelError::MissingTexture(tileset_name.clone()))?;
            let texture = atlas
                .get_texture(&tileset.name)
                .ok_or_else(|| LevelError::MissingTexture(tileset.name.clone()))?;

            let image_width = texture.width();
            if tileset.columns(image_width) == 0 {
                return Err(LevelError::TilesetTooNarrow {
                    tileset: tileset.name.clone(),
                    image_width,
                    tile_width: tileset.tile_size.0,
                });
            }
            let tile_count = tileset.tile_count(image_width, texture.height());

            let mut skipped = 0usize;
            for tile in &layer.tiles {
                if tile.tile_id >= tile_count {
                    skipped += 1;
                    continue;
                }
                if let Some(source) = tileset.source_rect(tile.tile_id, image_width) {
                    surface.blit(texture, tile.position, source);
                }
            }

            if skipped > 0 {
                debug!(
                    layer = %layer.name,
                    tileset = %tileset.name,
                    skipped,
                    "Skipped tiles outside the tileset image"
                );
            }
        }

        Ok(())
    }

    /// Background colour declared by the project
    pub fn fill_colour(&self) -> Result<Rgba, LevelError> {
        self.background_colour.ok_or(LevelError::NotSetUp)
    }

    /// Drop all declarations and level contents, keeping the config
    pub fn teardown(&mut self) {
        self.background_colour = None;
        self.background_layers.clear();
        self.foreground_layers.clear();
        self.tilesets.clear();
        self.level = None;
    }

    pub fn is_set_up(&self) -> bool {
        self.background_colour.is_some()
    }

    pub fn is_level_loaded(&self) -> bool {
        self.level.is_some()
    }

    /// Name of the loaded level
    pub fn current_level(&self) -> Option<&str> {
        self.level.as_ref().map(|l| l.name.as_str())
    }

    /// Width and height declared by the loaded level
    pub fn level_size(&self) -> Option<(u32, u32)> {
        self.level.as_ref().map(|l| (l.width, l.height))
    }

    pub fn background_layers(&self) -> &[Layer] {
        &self.background_layers
    }

    pub fn foreground_layers(&self) -> &[Layer] {
        &self.foreground_layers
    }

    /// Every layer, background first, in declaration order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.background_layers
            .iter()
            .chain(self.foreground_layers.iter())
    }

    /// Find a layer by name
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers().find(|l| l.name == name)
    }

    pub fn tileset(&self, name: &str) -> Option<&Tileset> {
        self.tilesets.get(name)
    }

    fn layer_count(&self) -> usize {
        self.background_layers.len() + self.foreground_layers.len()
    }
}
