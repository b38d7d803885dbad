//! Level-project (`.oep`) documents
//!
//! The project file declares the background colour, the ordered layer
//! definitions and the tilesets shared by every level:
//!
//! ```xml
//! <project>
//!   <BackgroundColor A="255" R="125" G="160" B="255" />
//!   <LayerDefinitions>
//!     <LayerDefinition xsi:type="TileLayerDefinition">
//!       <Name>bg</Name>
//!       <Grid><Width>16</Width><Height>16</Height></Grid>
//!     </LayerDefinition>
//!   </LayerDefinitions>
//!   <Tilesets>
//!     <Tileset>
//!       <Name>tiles</Name>
//!       <FilePath>..\textures\tiles.png</FilePath>
//!       <TileSize><Width>16</Width><Height>16</Height></TileSize>
//!     </Tileset>
//!   </Tilesets>
//! </project>
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use crate::{DocumentError, Layer, Rgba, Tileset};

/// A width/height pair written as child elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CellSize {
    #[serde(rename = "Width")]
    pub width: u32,
    #[serde(rename = "Height")]
    pub height: u32,
}

/// A layer declaration from the project file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerDefinition {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Grid")]
    pub grid: CellSize,
}

impl LayerDefinition {
    /// Build the empty layer this definition declares
    pub fn to_layer(&self) -> Layer {
        Layer::new(self.name.clone(), self.grid.width, self.grid.height)
    }
}

/// A tileset declaration from the project file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TilesetDefinition {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FilePath")]
    pub file_path: String,
    #[serde(rename = "TileSize")]
    pub tile_size: CellSize,
}

impl TilesetDefinition {
    pub fn to_tileset(&self) -> Tileset {
        Tileset::new(
            self.name.clone(),
            &self.file_path,
            self.tile_size.width,
            self.tile_size.height,
        )
    }
}

#[derive(Debug, Deserialize)]
struct ColorAttributes {
    #[serde(rename = "@R")]
    r: u8,
    #[serde(rename = "@G")]
    g: u8,
    #[serde(rename = "@B")]
    b: u8,
    #[serde(rename = "@A")]
    a: u8,
}

#[derive(Debug, Deserialize)]
struct LayerDefinitions {
    #[serde(rename = "LayerDefinition", default)]
    items: Vec<LayerDefinition>,
}

#[derive(Debug, Deserialize)]
struct Tilesets {
    #[serde(rename = "Tileset", default)]
    items: Vec<TilesetDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(rename = "BackgroundColor")]
    background_color: ColorAttributes,
    #[serde(rename = "LayerDefinitions")]
    layer_definitions: LayerDefinitions,
    #[serde(rename = "Tilesets")]
    tilesets: Tilesets,
}

/// A parsed and validated level-project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDocument {
    pub background_colour: Rgba,
    /// Layer declarations in paint order
    pub layers: Vec<LayerDefinition>,
    /// Tileset declarations in file order
    pub tilesets: Vec<TilesetDefinition>,
}

impl ProjectDocument {
    /// Parse a project file from XML text
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let raw: RawProject = quick_xml::de::from_str(xml)?;
        let c = raw.background_color;
        let document = Self {
            background_colour: Rgba::new(c.r, c.g, c.b, c.a),
            layers: raw.layer_definitions.items,
            tilesets: raw.tilesets.items,
        };
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<(), DocumentError> {
        for layer in &self.layers {
            check_size(
                || format!("Layer definition '{}'", layer.name),
                layer.grid,
            )?;
        }

        let mut seen = HashSet::new();
        for tileset in &self.tilesets {
            if !seen.insert(tileset.name.as_str()) {
                return Err(DocumentError::DuplicateTileset(tileset.name.clone()));
            }
            check_size(|| format!("Tileset '{}'", tileset.name), tileset.tile_size)?;
        }

        Ok(())
    }
}

fn check_size(context: impl FnOnce() -> String, size: CellSize) -> Result<(), DocumentError> {
    if size.width == 0 || size.height == 0 {
        return Err(DocumentError::InvalidSize {
            context: context(),
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}
