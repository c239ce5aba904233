//! DXF section writers
//!
//! Writes the four sections of a drawing: HEADER, TABLES, BLOCKS and
//! ENTITIES. Layers are created implicitly by the entities that name them,
//! so the LAYER table is written empty.

use crate::document::{DxfDocument, ACAD_VERSION};
use crate::entities::*;
use crate::error::Result;
use crate::types::Handle;

use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};

/// Well-known LAYER table handle
const HANDLE_LAYER_TABLE: u64 = 0x2;

/// Writes all DXF sections
pub struct SectionWriter<'a, W: DxfStreamWriter> {
    writer: &'a mut W,
}

impl<'a, W: DxfStreamWriter> SectionWriter<'a, W> {
    /// Create a new section writer
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    /// Write the HEADER section
    pub fn write_header(&mut self, document: &DxfDocument) -> Result<()> {
        self.writer.write_section_start("HEADER")?;

        self.write_header_variable("$ACADVER", |w| w.write_string(1, ACAD_VERSION))?;

        self.write_header_variable("$DWGCODEPAGE", |w| {
            w.write_string(3, document.header.code_page.dxf_name())
        })?;

        self.write_header_variable("$HANDSEED", |w| {
            w.write_handle(5, Handle::new(document.next_handle()))
        })?;

        let (min, max) = document.extent_corners();
        self.write_header_variable("$EXTMIN", |w| w.write_point3d_flat(10, min))?;
        self.write_header_variable("$EXTMAX", |w| w.write_point3d_flat(10, max))?;

        self.write_header_variable("$INSUNITS", |w| {
            w.write_i16(70, document.header.insertion_units)
        })?;

        self.writer.write_section_end()?;
        Ok(())
    }

    /// Write a header variable
    fn write_header_variable<F>(&mut self, name: &str, write_value: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> Result<()>,
    {
        self.writer.write_string(9, name)?;
        write_value(self.writer)
    }

    /// Write the TABLES section
    pub fn write_tables(&mut self, _document: &DxfDocument) -> Result<()> {
        self.writer.write_section_start("TABLES")?;
        self.write_table_header("LAYER", 0, Handle::new(HANDLE_LAYER_TABLE))?;
        self.write_table_end()?;
        self.writer.write_section_end()?;
        Ok(())
    }

    /// Write table header
    fn write_table_header(&mut self, name: &str, count: usize, table_handle: Handle) -> Result<()> {
        self.writer.write_string(0, "TABLE")?;
        self.writer.write_string(2, name)?;
        self.writer.write_handle(5, table_handle)?;
        self.writer.write_subclass("AcDbSymbolTable")?;
        self.writer.write_i16(70, count as i16)?;
        Ok(())
    }

    /// Write table end
    fn write_table_end(&mut self) -> Result<()> {
        self.writer.write_string(0, "ENDTAB")
    }

    /// Write the BLOCKS section
    pub fn write_blocks(&mut self, _document: &DxfDocument) -> Result<()> {
        self.writer.write_section_start("BLOCKS")?;
        self.writer.write_section_end()?;
        Ok(())
    }

    /// Write the ENTITIES section
    pub fn write_entities(&mut self, document: &DxfDocument) -> Result<()> {
        self.writer.write_section_start("ENTITIES")?;
        for entity in document.entities() {
            self.write_entity(entity)?;
        }
        self.writer.write_section_end()?;
        Ok(())
    }

    fn write_entity(&mut self, entity: &EntityType) -> Result<()> {
        match entity {
            EntityType::Point(e) => self.write_point(e),
            EntityType::LwPolyline(e) => self.write_lwpolyline(e),
            EntityType::Text(e) => self.write_text(e),
        }
    }

    /// Write common entity data
    fn write_common_entity_data(&mut self, entity: &dyn Entity) -> Result<()> {
        self.writer.write_entity_type(entity.entity_type())?;
        self.writer.write_handle(5, entity.handle())?;
        self.writer.write_subclass("AcDbEntity")?;
        self.writer.write_string(8, entity.layer())?;
        Ok(())
    }

    /// Write POINT entity
    fn write_point(&mut self, point: &Point) -> Result<()> {
        self.write_common_entity_data(point)?;
        self.writer.write_subclass("AcDbPoint")?;
        self.writer.write_point3d_flat(10, point.location)?;
        Ok(())
    }

    /// Write LWPOLYLINE entity
    fn write_lwpolyline(&mut self, lwpoly: &LwPolyline) -> Result<()> {
        self.write_common_entity_data(lwpoly)?;
        self.writer.write_subclass("AcDbPolyline")?;
        self.writer.write_i32(90, lwpoly.vertices.len() as i32)?;
        self.writer.write_i16(70, lwpoly.flags.bits())?;
        self.writer.write_double(38, lwpoly.elevation)?;

        for vertex in &lwpoly.vertices {
            self.writer.write_point2d(10, *vertex)?;
        }

        Ok(())
    }

    /// Write TEXT entity
    fn write_text(&mut self, text: &Text) -> Result<()> {
        self.write_common_entity_data(text)?;
        self.writer.write_subclass("AcDbText")?;
        self.writer.write_point3d_flat(10, text.insertion_point)?;
        self.writer.write_double(40, text.height)?;
        self.writer.write_string(1, &text.value)?;
        self.writer.write_string(7, &text.style)?;
        Ok(())
    }
}
