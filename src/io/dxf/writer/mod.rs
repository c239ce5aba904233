//! DXF writer module

mod section_writer;
mod stream_writer;
mod text_writer;

pub use section_writer::SectionWriter;
pub use stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
pub use text_writer::DxfTextWriter;

use crate::document::DxfDocument;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// DXF file writer
pub struct DxfWriter<'a> {
    document: &'a DxfDocument,
}

impl<'a> DxfWriter<'a> {
    /// Create a new DXF writer
    pub fn new(document: &'a DxfDocument) -> Self {
        Self { document }
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.write_to_writer(writer)
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut stream_writer =
            DxfTextWriter::with_code_page(writer, self.document.header.code_page);
        self.write_dxf(&mut stream_writer)?;
        stream_writer.flush()?;
        Ok(())
    }

    /// Write to a byte vector (useful for testing)
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer)?;
        Ok(buffer)
    }

    /// Write DXF content to a stream writer
    fn write_dxf<W: DxfStreamWriter>(&self, writer: &mut W) -> Result<()> {
        let mut section_writer = SectionWriter::new(writer);

        section_writer.write_header(self.document)?;
        section_writer.write_tables(self.document)?;
        section_writer.write_blocks(self.document)?;
        section_writer.write_entities(self.document)?;

        writer.write_eof()?;

        Ok(())
    }
}

/// Convenience function to write a document to a file
pub fn write_dxf<P: AsRef<Path>>(document: &DxfDocument, path: P) -> Result<()> {
    DxfWriter::new(document).write_to_file(path)
}
