//! Tiles and layers

use serde::{Deserialize, Serialize};

/// Layers whose name starts with this prefix are drawn over game objects
pub const FOREGROUND_PREFIX: &str = "fg";

/// A single tile placed in a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Linear index into the tileset's cell grid
    pub tile_id: u32,
    /// Destination pixel position (top-left)
    pub position: (i32, i32),
}

impl Tile {
    pub fn new(tile_id: u32, position: (i32, i32)) -> Self {
        Self { tile_id, position }
    }
}

/// A named plane of tiles sampled from one tileset
///
/// Name and grid size are fixed when the project is set up. The tile list and
/// tileset binding are replaced wholesale on every level load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    /// Cell size in pixels used to turn grid rows/columns into positions
    pub grid_size: (u32, u32),
    /// Tiles in paint order
    #[serde(default)]
    pub tiles: Vec<Tile>,
    /// Registry key of the bound tileset, set when a CSV section is loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tileset: Option<String>,
}

impl Layer {
    /// Create an empty layer declaration
    pub fn new(name: impl Into<String>, grid_width: u32, grid_height: u32) -> Self {
        Self {
            name: name.into(),
            grid_size: (grid_width, grid_height),
            tiles: Vec::new(),
            tileset: None,
        }
    }

    /// Whether this layer belongs to the foreground set
    pub fn is_foreground(&self) -> bool {
        self.name.starts_with(FOREGROUND_PREFIX)
    }

    /// Pixel position of the cell at (`row`, `column`)
    ///
    /// Returns `None` when the position does not fit in `i32`.
    pub fn cell_position(&self, row: usize, column: usize) -> Option<(i32, i32)> {
        let x = i32::try_from(column)
            .ok()?
            .checked_mul(i32::try_from(self.grid_size.0).ok()?)?;
        let y = i32::try_from(row)
            .ok()?
            .checked_mul(i32::try_from(self.grid_size.1).ok()?)?;
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_classification() {
        assert!(Layer::new("fg", 16, 16).is_foreground());
        assert!(Layer::new("fgDecor", 16, 16).is_foreground());
        assert!(!Layer::new("f", 16, 16).is_foreground());
        assert!(!Layer::new("bgfg", 16, 16).is_foreground());
        assert!(!Layer::new("Fg", 16, 16).is_foreground());
    }

    #[test]
    fn test_layers_do_not_share_tiles() {
        let mut a = Layer::new("a", 8, 8);
        let b = Layer::new("b", 8, 8);
        a.tiles.push(Tile::new(1, (0, 0)));

        assert_eq!(a.tiles.len(), 1);
        assert!(b.tiles.is_empty());
    }

    #[test]
    fn test_cell_position() {
        let layer = Layer::new("ground", 16, 8);
        assert_eq!(layer.cell_position(0, 0), Some((0, 0)));
        assert_eq!(layer.cell_position(2, 3), Some((48, 16)));
    }

    #[test]
    fn test_cell_position_overflow() {
        let layer = Layer::new("huge", 1 << 20, 16);
        assert_eq!(layer.cell_position(0, 2047), Some((2047 << 20, 0)));
        assert_eq!(layer.cell_position(0, 2048), None);

        let wide = Layer::new("wide", u32::MAX, 16);
        assert_eq!(wide.cell_position(0, 0), None);
        assert_eq!(Layer::new("bg", 16, 16).cell_position(usize::MAX, 0), None);
    }
}
