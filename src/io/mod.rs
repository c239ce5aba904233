//! I/O module for writing DXF drawings

pub mod dxf;

pub use dxf::{write_dxf, CodePage, DxfWriter};
