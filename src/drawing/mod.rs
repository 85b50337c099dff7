//! Drawing document model
//!
//! A [`Drawing`] owns the symbol tables and the entity list. Handles are
//! allocated sequentially above the range reserved for the well-known table
//! objects, and entities keep their insertion order so output is stable.

mod entity;
mod table;

pub use entity::{
    Arc, Circle, EntityCommon, EntityKind, Line, Polyline, Text, TextHAlign, TextVAlign,
};
pub use table::{Layer, LineTypeRecord, Table, TableEntry, TextStyleRecord};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::io::dxf::DxfTextWriter;
use crate::types::{Handle, Vector2};

/// Handles below this value are reserved for table objects
const FIRST_ENTITY_HANDLE: u64 = 0x10;

/// A complete drawing document
#[derive(Debug, Clone)]
pub struct Drawing {
    /// Layer table
    pub layers: Table<Layer>,
    /// Line type table
    pub line_types: Table<LineTypeRecord>,
    /// Text style table
    pub text_styles: Table<TextStyleRecord>,
    /// Entities in insertion order
    entities: Vec<EntityKind>,
    /// Next handle to allocate
    next_handle: u64,
}

impl Drawing {
    /// Create a new drawing with the mandatory table entries
    pub fn new() -> Self {
        let mut drawing = Drawing {
            layers: Table::new(),
            line_types: Table::new(),
            text_styles: Table::new(),
            entities: Vec::new(),
            next_handle: FIRST_ENTITY_HANDLE,
        };
        drawing.initialize_defaults();
        drawing
    }

    /// Set up the entries every drawing must carry
    fn initialize_defaults(&mut self) {
        let mut layer0 = Layer::layer_0();
        layer0.set_handle(self.allocate_handle());
        self.layers.add(layer0).ok();

        for mut lt in [
            LineTypeRecord::by_block(),
            LineTypeRecord::by_layer(),
            LineTypeRecord::continuous(),
        ] {
            lt.set_handle(self.allocate_handle());
            self.line_types.add(lt).ok();
        }

        let mut standard = TextStyleRecord::standard();
        standard.set_handle(self.allocate_handle());
        self.text_styles.add(standard).ok();
    }

    /// Allocate the next unique handle
    pub fn allocate_handle(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// The next handle value that would be allocated
    pub fn next_handle(&self) -> u64 {
        self.next_handle
    }

    /// Add an entity, assigning it a handle if it has none yet
    pub fn add_entity(&mut self, mut entity: EntityKind) -> Handle {
        if entity.common().handle.is_null() {
            let handle = self.allocate_handle();
            entity.common_mut().handle = handle;
        }
        let handle = entity.common().handle;
        self.entities.push(entity);
        handle
    }

    /// Add a layer, assigning it a handle if it has none yet
    pub fn add_layer(&mut self, mut layer: Layer) -> Result<()> {
        if layer.handle.is_null() {
            layer.set_handle(self.allocate_handle());
        }
        self.layers
            .add(layer)
            .map_err(crate::error::DraftError::Config)
    }

    /// Add a line type, assigning it a handle if it has none yet
    pub fn add_line_type(&mut self, mut line_type: LineTypeRecord) -> Result<()> {
        if line_type.handle.is_null() {
            line_type.set_handle(self.allocate_handle());
        }
        self.line_types
            .add(line_type)
            .map_err(crate::error::DraftError::Config)
    }

    /// Add a text style, assigning it a handle if it has none yet
    pub fn add_text_style(&mut self, mut style: TextStyleRecord) -> Result<()> {
        if style.handle.is_null() {
            style.set_handle(self.allocate_handle());
        }
        self.text_styles
            .add(style)
            .map_err(crate::error::DraftError::Config)
    }

    /// Iterate over all entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &EntityKind> {
        self.entities.iter()
    }

    /// Look up an entity by handle
    pub fn entity(&self, handle: Handle) -> Option<&EntityKind> {
        self.entities.iter().find(|e| e.common().handle == handle)
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Bounding box over all entity geometry
    pub fn extents(&self) -> Option<(Vector2, Vector2)> {
        let mut result: Option<(Vector2, Vector2)> = None;
        for entity in &self.entities {
            if let Some((emin, emax)) = entity.bounds() {
                result = Some(match result {
                    None => (emin, emax),
                    Some((min, max)) => (
                        Vector2::new(min.x.min(emin.x), min.y.min(emin.y)),
                        Vector2::new(max.x.max(emax.x), max.y.max(emax.y)),
                    ),
                });
            }
        }
        result
    }

    /// Serialize the drawing to a DXF string
    pub fn to_dxf_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        {
            let mut writer = DxfTextWriter::new(&mut buffer);
            writer.write_drawing(self)?;
        }
        String::from_utf8(buffer)
            .map_err(|e| crate::error::DraftError::Config(format!("non UTF-8 output: {e}")))
    }

    /// Write the drawing to a DXF file
    pub fn save_dxf(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut buffered = BufWriter::new(file);
        {
            let mut writer = DxfTextWriter::new(&mut buffered);
            writer.write_drawing(self)?;
        }
        buffered.flush()?;
        Ok(())
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}
