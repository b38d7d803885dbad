//! Error types for level setup, loading and rendering

use std::path::PathBuf;

use ogmo_map_core::DocumentError;
use thiserror::Error;

use crate::atlas::AtlasError;

/// Broad category of a [`LevelError`]
///
/// None of these are retried; the caller decides whether to abort or keep the
/// previous level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Project or config file missing or malformed
    Configuration,
    /// Level file, layer section or tileset reference missing
    AssetNotFound,
    /// Unparseable field or unrecognised export mode in a level file
    Format,
    /// The texture atlas could not serve a bound tileset
    CollaboratorContract,
    /// An operation was called before `setup`
    Precondition,
}

/// Error type for level manager failures
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Failed to read config file {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("Failed to read project file {path}: {source}")]
    ProjectRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid project file {origin}: {source}")]
    ProjectFormat {
        origin: String,
        #[source]
        source: DocumentError,
    },
    #[error("Failed to register tileset '{tileset}' with the texture atlas: {source}")]
    Atlas {
        tileset: String,
        #[source]
        source: AtlasError,
    },
    #[error("Level '{name}' not found at {path}: {source}")]
    LevelNotFound {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Level '{level}' has no section for layer '{layer}'")]
    MissingLayerSection { level: String, layer: String },
    #[error("Level '{level}' layer '{layer}' references unknown tileset '{tileset}'")]
    UnknownTileset {
        level: String,
        layer: String,
        tileset: String,
    },
    #[error("Invalid level '{level}': {source}")]
    Format {
        level: String,
        #[source]
        source: DocumentError,
    },
    #[error("Texture '{0}' is not registered with the texture atlas")]
    MissingTexture(String),
    #[error("Tileset '{tileset}' image is {image_width}px wide, narrower than one {tile_width}px tile")]
    TilesetTooNarrow {
        tileset: String,
        image_width: u32,
        tile_width: u32,
    },
    #[error("Level manager has not been set up")]
    NotSetUp,
}

impl LevelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LevelError::Config { .. }
            | LevelError::ProjectRead { .. }
            | LevelError::ProjectFormat { .. }
            | LevelError::Atlas { .. } => ErrorKind::Configuration,
            LevelError::LevelNotFound { .. }
            | LevelError::MissingLayerSection { .. }
            | LevelError::UnknownTileset { .. } => ErrorKind::AssetNotFound,
            LevelError::Format { .. } => ErrorKind::Format,
            LevelError::MissingTexture(_) | LevelError::TilesetTooNarrow { .. } => {
                ErrorKind::CollaboratorContract
            }
            LevelError::NotSetUp => ErrorKind::Precondition,
        }
    }
}
