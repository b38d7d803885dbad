//! Errors raised while parsing project and level documents

use thiserror::Error;

/// Error type for document parsing failures
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Failed to deserialize XML: {0}")]
    De(#[from] quick_xml::de::DeError),
    #[error("Invalid XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Malformed document: {0}")]
    Malformed(String),
    #[error("Missing required field '{field}' in {context}")]
    MissingField { context: String, field: String },
    #[error("Layer '{layer}': invalid integer '{value}' in field '{field}'")]
    InvalidInteger {
        layer: String,
        field: String,
        value: String,
    },
    #[error("Layer '{layer}': unknown export mode '{mode}'")]
    UnknownExportMode { layer: String, mode: String },
    #[error("Layer '{layer}': rect field '{field}' is negative ({value})")]
    NegativeRectSize {
        layer: String,
        field: String,
        value: i32,
    },
    #[error("Layer '{layer}': cell at row {row}, column {column} lies outside the pixel range")]
    PositionOverflow {
        layer: String,
        row: usize,
        column: usize,
    },
    #[error("Duplicate tileset name '{0}'")]
    DuplicateTileset(String),
    #[error("{context} has a zero-sized cell ({width}x{height})")]
    InvalidSize {
        context: String,
        width: u32,
        height: u32,
    },
}
