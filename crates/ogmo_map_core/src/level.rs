//! Level-instance (`.oel`) documents
//!
//! A level file has one child element per declared layer, named after the
//! layer. Each child carries an `exportMode` attribute:
//!
//! ```xml
//! <level width="320" height="240">
//!   <bg tileset="tiles" exportMode="CSV">0,1,-1
//! 2,3,4</bg>
//!   <collision exportMode="Rectangles">
//!     <rect x="0" y="224" w="320" h="16" />
//!   </collision>
//! </level>
//! ```
//!
//! Section element names are only known at runtime, so the document is read
//! with the streaming `quick_xml::Reader` rather than serde.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{DocumentError, Layer, PixelRect, Tile};

const RECT_ELEMENT: &[u8] = b"rect";

/// How a layer section encodes its data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Collision geometry as `<rect>` children
    Rectangles,
    /// Dense tile-ID grid as comma-separated text
    Csv,
}

impl ExportMode {
    /// Parse the `exportMode` attribute value
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "Rectangles" => Some(ExportMode::Rectangles),
            "CSV" => Some(ExportMode::Csv),
            _ => None,
        }
    }
}

/// The decoded payload of a layer section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    /// Colliders for the collision registry
    Rectangles(Vec<PixelRect>),
    /// Tile IDs by row then column; negative values are empty cells
    Grid { tileset: String, rows: Vec<Vec<i32>> },
}

/// One layer's data within a level file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSection {
    pub name: String,
    pub content: SectionContent,
}

impl LayerSection {
    pub fn export_mode(&self) -> ExportMode {
        match self.content {
            SectionContent::Rectangles(_) => ExportMode::Rectangles,
            SectionContent::Grid { .. } => ExportMode::Csv,
        }
    }
}

/// A parsed level file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDocument {
    /// Level width in pixels (informational)
    pub width: u32,
    /// Level height in pixels (informational)
    pub height: u32,
    /// Sections in file order
    pub sections: Vec<LayerSection>,
}

impl LevelDocument {
    /// Parse a level file from XML text, decoding every section
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        Self::parse_filtered(xml, |_| true)
    }

    /// Parse a level file, decoding only the sections named in `layers`
    ///
    /// Other elements under the root (entity layers, editor metadata) are
    /// skipped without being validated.
    pub fn parse_layers<S: AsRef<str>>(xml: &str, layers: &[S]) -> Result<Self, DocumentError> {
        Self::parse_filtered(xml, |name| layers.iter().any(|l| l.as_ref() == name))
    }

    fn parse_filtered(xml: &str, keep: impl Fn(&str) -> bool) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let (root, has_children) = loop {
            match reader.read_event()? {
                Event::Start(e) => break (e.into_owned(), true),
                Event::Empty(e) => break (e.into_owned(), false),
                Event::Eof => {
                    return Err(DocumentError::Malformed(
                        "document has no root element".into(),
                    ))
                }
                _ => {}
            }
        };

        let width = parse_attr(&root, "level", "width")?;
        let height = parse_attr(&root, "level", "height")?;

        let mut sections = Vec::new();
        if has_children {
            loop {
                match reader.read_event()? {
                    Event::Start(e) => {
                        let e = e.into_owned();
                        if keep(&element_name(&e)) {
                            sections.push(read_section(&mut reader, &e, true)?);
                        } else {
                            reader.read_to_end(e.name())?;
                        }
                    }
                    Event::Empty(e) => {
                        let e = e.into_owned();
                        if keep(&element_name(&e)) {
                            sections.push(read_section(&mut reader, &e, false)?);
                        }
                    }
                    Event::End(_) | Event::Eof => break,
                    _ => {}
                }
            }
        }

        Ok(Self {
            width,
            height,
            sections,
        })
    }

    /// First section named `name`
    pub fn section(&self, name: &str) -> Option<&LayerSection> {
        self.sections.iter().find(|s| s.name == name)
    }
}

/// Lay out a CSV grid as tiles for `layer`
///
/// Every cell advances the running position by one grid cell, including empty
/// (negative) cells, which produce no tile.
pub fn layout_tiles(layer: &Layer, rows: &[Vec<i32>]) -> Result<Vec<Tile>, DocumentError> {
    let mut tiles = Vec::new();
    for (row, ids) in rows.iter().enumerate() {
        for (column, &id) in ids.iter().enumerate() {
            if id < 0 {
                continue;
            }
            let position =
                layer
                    .cell_position(row, column)
                    .ok_or_else(|| DocumentError::PositionOverflow {
                        layer: layer.name.clone(),
                        row,
                        column,
                    })?;
            tiles.push(Tile::new(id as u32, position));
        }
    }
    Ok(tiles)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn read_section(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<LayerSection, DocumentError> {
    let name = element_name(start);
    let mode = attr(start, "exportMode")?.ok_or_else(|| DocumentError::MissingField {
        context: format!("layer '{name}'"),
        field: "exportMode".into(),
    })?;
    let mode =
        ExportMode::from_attribute(&mode).ok_or_else(|| DocumentError::UnknownExportMode {
            layer: name.clone(),
            mode: mode.clone(),
        })?;

    let mut text = String::new();
    let mut rects = Vec::new();

    if has_children {
        let mut depth = 0usize;
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if depth == 0 && e.name().as_ref() == RECT_ELEMENT {
                        rects.push(read_rect(&name, &e)?);
                    }
                    depth += 1;
                }
                Event::Empty(e) => {
                    if depth == 0 && e.name().as_ref() == RECT_ELEMENT {
                        rects.push(read_rect(&name, &e)?);
                    }
                }
                Event::Text(t) => {
                    if depth == 0 {
                        text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if depth == 0 {
                        text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::End(_) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Event::Eof => {
                    return Err(DocumentError::Malformed(format!(
                        "unexpected end of document inside layer '{name}'"
                    )))
                }
                _ => {}
            }
        }
    }

    let content = match mode {
        ExportMode::Rectangles => SectionContent::Rectangles(rects),
        ExportMode::Csv => {
            let tileset =
                attr(start, "tileset")?.ok_or_else(|| DocumentError::MissingField {
                    context: format!("layer '{name}'"),
                    field: "tileset".into(),
                })?;
            SectionContent::Grid {
                tileset,
                rows: parse_csv(&name, &text)?,
            }
        }
    };

    Ok(LayerSection { name, content })
}

fn read_rect(layer: &str, e: &BytesStart<'_>) -> Result<PixelRect, DocumentError> {
    let context = format!("rect in layer '{layer}'");
    let extent = |field: &str| -> Result<u32, DocumentError> {
        let value: i32 = parse_attr(e, &context, field)?;
        u32::try_from(value).map_err(|_| DocumentError::NegativeRectSize {
            layer: layer.to_string(),
            field: field.to_string(),
            value,
        })
    };
    Ok(PixelRect::new(
        parse_attr(e, &context, "x")?,
        parse_attr(e, &context, "y")?,
        extent("w")?,
        extent("h")?,
    ))
}

fn parse_csv(layer: &str, text: &str) -> Result<Vec<Vec<i32>>, DocumentError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split('\n')
        .map(|row| {
            row.trim_end_matches('\r')
                .split(',')
                .map(|cell| {
                    let cell = cell.trim();
                    cell.parse::<i32>()
                        .map_err(|_| DocumentError::InvalidInteger {
                            layer: layer.to_string(),
                            field: "tile id".into(),
                            value: cell.to_string(),
                        })
                })
                .collect()
        })
        .collect()
}

fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, DocumentError> {
    match e.try_get_attribute(name)? {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn parse_attr<T: std::str::FromStr>(
    e: &BytesStart<'_>,
    context: &str,
    name: &str,
) -> Result<T, DocumentError> {
    let value = attr(e, name)?.ok_or_else(|| DocumentError::MissingField {
        context: context.to_string(),
        field: name.to_string(),
    })?;
    value
        .trim()
        .parse()
        .map_err(|_| DocumentError::InvalidInteger {
            layer: context.to_string(),
            field: name.to_string(),
            value,
        })
}
