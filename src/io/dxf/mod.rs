//! DXF (Drawing Exchange Format) writing

mod code_page;
mod writer;

pub use code_page::CodePage;
pub use writer::{write_dxf, DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter, DxfWriter, SectionWriter};
