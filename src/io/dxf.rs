//! ASCII DXF writer
//!
//! Emits the slim profile a 2D drafting document needs: HEADER with the
//! handful of variables readers require, the LTYPE/LAYER/STYLE tables and
//! the ENTITIES section. Group codes are right-aligned in a 3-character
//! field, one code/value pair per two lines.

use std::io::Write;

use crate::drawing::{
    Arc, Circle, Drawing, EntityCommon, EntityKind, Layer, Line, LineTypeRecord, Polyline, Text,
    TextStyleRecord,
};
use crate::error::Result;
use crate::types::{Color, Handle, LineWeight, Vector2};

/// Drawing database version written to $ACADVER
const ACAD_VERSION: &str = "AC1015";

/// Standard table handles (well-known values used by readers)
const HANDLE_LTYPE_TABLE: u64 = 0x5;
const HANDLE_LAYER_TABLE: u64 = 0x2;
const HANDLE_STYLE_TABLE: u64 = 0x3;

/// Owner handle for model space entities
const HANDLE_MODEL_SPACE: u64 = 0x1F;

/// ASCII DXF stream writer
pub struct DxfTextWriter<W: Write> {
    writer: W,
}

impl<W: Write> DxfTextWriter<W> {
    /// Create a new ASCII DXF writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a DXF code with proper formatting (right-aligned in 3-character field)
    fn write_code(&mut self, code: i32) -> Result<()> {
        if code < 10 {
            writeln!(self.writer, "  {}", code)?;
        } else if code < 100 {
            writeln!(self.writer, " {}", code)?;
        } else {
            writeln!(self.writer, "{}", code)?;
        }
        Ok(())
    }

    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_code(code)?;
        // Format with sufficient precision, trimming unnecessary trailing zeros
        // but always including at least one decimal place
        if value == value.trunc() {
            writeln!(self.writer, "{:.1}", value)?;
        } else {
            let formatted = format!("{:.15}", value);
            let trimmed = formatted.trim_end_matches('0');
            let trimmed = if trimmed.ends_with('.') {
                format!("{}0", trimmed)
            } else {
                trimmed.to_string()
            };
            writeln!(self.writer, "{}", trimmed)?;
        }
        Ok(())
    }

    fn write_bool(&mut self, code: i32, value: bool) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", if value { 1 } else { 0 })?;
        Ok(())
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{:X}", handle.value())?;
        Ok(())
    }

    /// Write a point as x/y/z triplet (z always 0 in a 2D drawing)
    fn write_point(&mut self, x_code: i32, point: Vector2) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)?;
        self.write_double(x_code + 20, 0.0)?;
        Ok(())
    }

    fn write_subclass(&mut self, marker: &str) -> Result<()> {
        self.write_string(100, marker)
    }

    fn write_section_start(&mut self, section_name: &str) -> Result<()> {
        self.write_string(0, "SECTION")?;
        self.write_string(2, section_name)?;
        Ok(())
    }

    fn write_section_end(&mut self) -> Result<()> {
        self.write_string(0, "ENDSEC")
    }

    /// Write a complete drawing
    pub fn write_drawing(&mut self, drawing: &Drawing) -> Result<()> {
        self.write_header(drawing)?;
        self.write_tables(drawing)?;
        self.write_entities(drawing)?;
        self.write_string(0, "EOF")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write the HEADER section
    fn write_header(&mut self, drawing: &Drawing) -> Result<()> {
        self.write_section_start("HEADER")?;

        self.write_string(9, "$ACADVER")?;
        self.write_string(1, ACAD_VERSION)?;

        self.write_string(9, "$DWGCODEPAGE")?;
        self.write_string(3, "ANSI_1252")?;

        self.write_string(9, "$HANDSEED")?;
        self.write_handle(5, Handle::new(drawing.next_handle()))?;

        let (ext_min, ext_max) = drawing.extents().unwrap_or((Vector2::ZERO, Vector2::ZERO));
        self.write_string(9, "$EXTMIN")?;
        self.write_point(10, ext_min)?;
        self.write_string(9, "$EXTMAX")?;
        self.write_point(10, ext_max)?;

        self.write_string(9, "$CLAYER")?;
        self.write_string(8, "0")?;

        self.write_string(9, "$CECOLOR")?;
        self.write_i16(62, 256)?;

        self.write_string(9, "$CELTYPE")?;
        self.write_string(6, "ByLayer")?;

        self.write_string(9, "$CELWEIGHT")?;
        self.write_i16(370, -1)?;

        // Metric drawing, units in millimeters
        self.write_string(9, "$MEASUREMENT")?;
        self.write_i16(70, 1)?;
        self.write_string(9, "$INSUNITS")?;
        self.write_i16(70, 4)?;

        self.write_section_end()
    }

    /// Write the TABLES section
    fn write_tables(&mut self, drawing: &Drawing) -> Result<()> {
        self.write_section_start("TABLES")?;

        self.write_table_header("LTYPE", drawing.line_types.len(), HANDLE_LTYPE_TABLE)?;
        for line_type in drawing.line_types.iter() {
            self.write_ltype_entry(line_type, Handle::new(HANDLE_LTYPE_TABLE))?;
        }
        self.write_table_end()?;

        self.write_table_header("LAYER", drawing.layers.len(), HANDLE_LAYER_TABLE)?;
        for layer in drawing.layers.iter() {
            self.write_layer_entry(layer, Handle::new(HANDLE_LAYER_TABLE))?;
        }
        self.write_table_end()?;

        self.write_table_header("STYLE", drawing.text_styles.len(), HANDLE_STYLE_TABLE)?;
        for style in drawing.text_styles.iter() {
            self.write_style_entry(style, Handle::new(HANDLE_STYLE_TABLE))?;
        }
        self.write_table_end()?;

        self.write_section_end()
    }

    fn write_table_header(&mut self, name: &str, count: usize, table_handle: u64) -> Result<()> {
        self.write_string(0, "TABLE")?;
        self.write_string(2, name)?;
        self.write_handle(5, Handle::new(table_handle))?;
        self.write_handle(330, Handle::new(0))?;
        self.write_subclass("AcDbSymbolTable")?;
        self.write_i16(70, count as i16)?;
        Ok(())
    }

    fn write_table_end(&mut self) -> Result<()> {
        self.write_string(0, "ENDTAB")
    }

    fn write_common_table_data(&mut self, handle: Handle, owner: Handle) -> Result<()> {
        self.write_handle(5, handle)?;
        self.write_handle(330, owner)?;
        Ok(())
    }

    fn write_ltype_entry(&mut self, ltype: &LineTypeRecord, owner: Handle) -> Result<()> {
        self.write_string(0, "LTYPE")?;
        self.write_common_table_data(ltype.handle, owner)?;
        self.write_subclass("AcDbSymbolTableRecord")?;
        self.write_subclass("AcDbLinetypeTableRecord")?;
        self.write_string(2, &ltype.name)?;
        self.write_i16(70, 0)?;
        self.write_string(3, &ltype.description)?;
        self.write_i16(72, 65)?; // Alignment code (always 65)
        self.write_i16(73, ltype.pattern.len() as i16)?;
        self.write_double(40, ltype.pattern_length())?;
        for element in &ltype.pattern {
            self.write_double(49, *element)?;
            self.write_i16(74, 0)?;
        }
        Ok(())
    }

    fn write_layer_entry(&mut self, layer: &Layer, owner: Handle) -> Result<()> {
        self.write_string(0, "LAYER")?;
        self.write_common_table_data(layer.handle, owner)?;
        self.write_subclass("AcDbSymbolTableRecord")?;
        self.write_subclass("AcDbLayerTableRecord")?;
        self.write_string(2, &layer.name)?;
        self.write_i16(70, 0)?;
        let color_index = match layer.color {
            Color::Index(i) => i as i16,
            Color::ByLayer | Color::ByBlock => 7,
        };
        self.write_i16(62, color_index)?;
        self.write_string(6, &layer.line_type)?;
        self.write_i16(370, layer.line_weight.value())?;
        self.write_bool(290, layer.is_plottable)?;
        Ok(())
    }

    fn write_style_entry(&mut self, style: &TextStyleRecord, owner: Handle) -> Result<()> {
        self.write_string(0, "STYLE")?;
        self.write_common_table_data(style.handle, owner)?;
        self.write_subclass("AcDbSymbolTableRecord")?;
        self.write_subclass("AcDbTextStyleTableRecord")?;
        self.write_string(2, &style.name)?;
        self.write_i16(70, 0)?;
        self.write_double(40, style.height)?;
        self.write_double(41, style.width_factor)?;
        self.write_double(50, 0.0)?;
        self.write_i16(71, 0)?;
        self.write_double(42, style.height)?;
        self.write_string(3, &style.font_file)?;
        self.write_string(4, &style.big_font_file)?;
        Ok(())
    }

    /// Write the ENTITIES section
    fn write_entities(&mut self, drawing: &Drawing) -> Result<()> {
        self.write_section_start("ENTITIES")?;
        let owner = Handle::new(HANDLE_MODEL_SPACE);
        for entity in drawing.entities() {
            match entity {
                EntityKind::Line(e) => self.write_line(e, owner)?,
                EntityKind::Circle(e) => self.write_circle(e, owner)?,
                EntityKind::Arc(e) => self.write_arc(e, owner)?,
                EntityKind::Text(e) => self.write_text(e, owner)?,
                EntityKind::Polyline(e) => self.write_lwpolyline(e, owner)?,
            }
        }
        self.write_section_end()
    }

    fn write_common_entity_data(&mut self, common: &EntityCommon, owner: Handle) -> Result<()> {
        self.write_handle(5, common.handle)?;
        self.write_handle(330, owner)?;
        self.write_subclass("AcDbEntity")?;
        self.write_string(8, &common.layer)?;
        if !common.line_type.eq_ignore_ascii_case("ByLayer") {
            self.write_string(6, &common.line_type)?;
        }
        if common.color != Color::ByLayer {
            self.write_i16(62, common.color.index())?;
        }
        if common.line_weight != LineWeight::ByLayer {
            self.write_i16(370, common.line_weight.value())?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &Line, owner: Handle) -> Result<()> {
        self.write_string(0, "LINE")?;
        self.write_common_entity_data(&line.common, owner)?;
        self.write_subclass("AcDbLine")?;
        self.write_point(10, line.start)?;
        self.write_point(11, line.end)?;
        Ok(())
    }

    fn write_circle(&mut self, circle: &Circle, owner: Handle) -> Result<()> {
        self.write_string(0, "CIRCLE")?;
        self.write_common_entity_data(&circle.common, owner)?;
        self.write_subclass("AcDbCircle")?;
        self.write_point(10, circle.center)?;
        self.write_double(40, circle.radius)?;
        Ok(())
    }

    fn write_arc(&mut self, arc: &Arc, owner: Handle) -> Result<()> {
        self.write_string(0, "ARC")?;
        self.write_common_entity_data(&arc.common, owner)?;
        self.write_subclass("AcDbCircle")?;
        self.write_point(10, arc.center)?;
        self.write_double(40, arc.radius)?;
        self.write_subclass("AcDbArc")?;
        self.write_double(50, arc.start_angle)?;
        self.write_double(51, arc.end_angle)?;
        Ok(())
    }

    fn write_text(&mut self, text: &Text, owner: Handle) -> Result<()> {
        self.write_string(0, "TEXT")?;
        self.write_common_entity_data(&text.common, owner)?;
        self.write_subclass("AcDbText")?;
        self.write_point(10, text.position)?;
        self.write_double(40, text.height)?;
        self.write_string(1, &text.value)?;
        if text.rotation != 0.0 {
            self.write_double(50, text.rotation)?;
        }
        self.write_string(7, &text.style)?;
        self.write_i16(72, text.halign.flag())?;
        if text.is_aligned() {
            self.write_point(11, text.position)?;
        }
        self.write_subclass("AcDbText")?;
        self.write_i16(73, text.valign.flag())?;
        Ok(())
    }

    fn write_lwpolyline(&mut self, polyline: &Polyline, owner: Handle) -> Result<()> {
        self.write_string(0, "LWPOLYLINE")?;
        self.write_common_entity_data(&polyline.common, owner)?;
        self.write_subclass("AcDbPolyline")?;
        self.write_i32(90, polyline.points.len() as i32)?;
        let flags: i16 = if polyline.closed { 1 } else { 0 };
        self.write_i16(70, flags)?;
        self.write_double(38, 0.0)?;
        for vertex in &polyline.points {
            self.write_double(10, vertex.x)?;
            self.write_double(20, vertex.y)?;
            self.write_double(40, 0.0)?;
            self.write_double(41, 0.0)?;
            self.write_double(42, 0.0)?;
        }
        Ok(())
    }
}
