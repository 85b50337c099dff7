//! Symbol tables for the drawing document
//!
//! Layers, line types and text styles live in name-keyed tables. Names are
//! case-insensitive (stored uppercased) and keep insertion order so the
//! serialized output is deterministic.

use indexmap::IndexMap;

use crate::standard::LineTypeDef;
use crate::types::{Color, Handle, LineWeight};

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's unique handle
    fn handle(&self) -> Handle;

    /// Set the entry's handle
    fn set_handle(&mut self, handle: Handle);

    /// Get the entry's name
    fn name(&self) -> &str;
}

/// Generic table for storing named entries
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    /// Entries stored by name (case-insensitive)
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry to the table
    pub fn add(&mut self, entry: T) -> Result<(), String> {
        let name = entry.name().to_uppercase();
        if self.entries.contains_key(&name) {
            return Err(format!("Entry '{}' already exists in table", entry.name()));
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Get all entry names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A layer table entry
#[derive(Debug, Clone)]
pub struct Layer {
    /// Unique handle
    pub handle: Handle,
    /// Layer name
    pub name: String,
    /// Layer color
    pub color: Color,
    /// Line type name
    pub line_type: String,
    /// Line weight
    pub line_weight: LineWeight,
    /// Is this layer plottable?
    pub is_plottable: bool,
}

impl Layer {
    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: Handle::NULL,
            name: name.into(),
            color: Color::WHITE,
            line_type: "Continuous".to_string(),
            line_weight: LineWeight::ByLayer,
            is_plottable: true,
        }
    }

    /// Create the standard "0" layer
    pub fn layer_0() -> Self {
        Layer::new("0")
    }

    /// Set the line type, builder style
    pub fn with_line_type(mut self, line_type: impl Into<String>) -> Self {
        self.line_type = line_type.into();
        self
    }

    /// Set the line weight, builder style
    pub fn with_line_weight(mut self, weight: LineWeight) -> Self {
        self.line_weight = weight;
        self
    }
}

impl TableEntry for Layer {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A line type table entry
///
/// Pattern elements use the standard's signed convention: positive dash,
/// negative gap, zero dot.
#[derive(Debug, Clone)]
pub struct LineTypeRecord {
    /// Unique handle
    pub handle: Handle,
    /// Line type name
    pub name: String,
    /// Display description
    pub description: String,
    /// Signed dash/gap/dot lengths
    pub pattern: Vec<f64>,
}

impl LineTypeRecord {
    /// Create a new line type
    pub fn new(name: impl Into<String>) -> Self {
        LineTypeRecord {
            handle: Handle::NULL,
            name: name.into(),
            description: String::new(),
            pattern: Vec::new(),
        }
    }

    /// Create the standard "Continuous" line type
    pub fn continuous() -> Self {
        LineTypeRecord {
            description: "Solid line".to_string(),
            ..LineTypeRecord::new("Continuous")
        }
    }

    /// Create the "ByLayer" placeholder line type
    pub fn by_layer() -> Self {
        LineTypeRecord::new("ByLayer")
    }

    /// Create the "ByBlock" placeholder line type
    pub fn by_block() -> Self {
        LineTypeRecord::new("ByBlock")
    }

    /// Create a record from a standard definition entry
    pub fn from_def(name: impl Into<String>, def: &LineTypeDef) -> Self {
        LineTypeRecord {
            handle: Handle::NULL,
            name: name.into(),
            description: def.description.clone(),
            pattern: def.pattern.clone(),
        }
    }

    /// Whether this line type has no dash pattern
    pub fn is_continuous(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Total pattern length (sum of absolute element lengths)
    pub fn pattern_length(&self) -> f64 {
        self.pattern.iter().map(|e| e.abs()).sum()
    }
}

impl TableEntry for LineTypeRecord {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A text style table entry
#[derive(Debug, Clone)]
pub struct TextStyleRecord {
    /// Unique handle
    pub handle: Handle,
    /// Style name
    pub name: String,
    /// Primary font file name
    pub font_file: String,
    /// Big font file name (for CJK text)
    pub big_font_file: String,
    /// Width factor
    pub width_factor: f64,
    /// Fixed text height (0 = variable)
    pub height: f64,
}

impl TextStyleRecord {
    /// Create a new text style
    pub fn new(name: impl Into<String>) -> Self {
        TextStyleRecord {
            handle: Handle::NULL,
            name: name.into(),
            font_file: "txt".to_string(),
            big_font_file: String::new(),
            width_factor: 1.0,
            height: 0.0,
        }
    }

    /// Create the standard "Standard" text style
    pub fn standard() -> Self {
        TextStyleRecord::new("Standard")
    }

    /// Create a style bound to a font file, big font included for CJK
    pub fn with_font(name: impl Into<String>, font_file: impl Into<String>) -> Self {
        let font_file = font_file.into();
        TextStyleRecord {
            big_font_file: font_file.clone(),
            font_file,
            ..TextStyleRecord::new(name)
        }
    }
}

impl TableEntry for TextStyleRecord {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
