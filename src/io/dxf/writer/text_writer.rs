//! ASCII DXF writer

use std::io::Write;

use encoding_rs::Encoding;

use super::stream_writer::DxfStreamWriter;
use crate::error::{ConvertError, Result};
use crate::io::dxf::CodePage;
use crate::types::Handle;

/// ASCII DXF stream writer
pub struct DxfTextWriter<W: Write> {
    writer: W,
    encoding: Option<&'static Encoding>,
}

impl<W: Write> DxfTextWriter<W> {
    /// Create a new UTF-8 DXF writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            encoding: None,
        }
    }

    /// Create a writer that transcodes string values to a code page
    pub fn with_code_page(writer: W, code_page: CodePage) -> Self {
        Self {
            writer,
            encoding: code_page.encoding(),
        }
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

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DxfStreamWriter for DxfTextWriter<W> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        match self.encoding {
            Some(encoding) if !value.is_ascii() => {
                let (bytes, _, unmappable) = encoding.encode(value);
                if unmappable {
                    return Err(ConvertError::Encoding(format!(
                        "`{}` cannot be represented in {}",
                        value,
                        encoding.name()
                    )));
                }
                self.writer.write_all(&bytes)?;
                writeln!(self.writer)?;
            }
            _ => writeln!(self.writer, "{}", value)?,
        }
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
        // Shortest text that parses back to the same value, never exponent
        // notation, always with a decimal point
        let mut formatted = value.to_string();
        if value.is_finite() && !formatted.contains('.') {
            formatted.push_str(".0");
        }
        writeln!(self.writer, "{}", formatted)?;
        Ok(())
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{:X}", handle.value())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::stream_writer::DxfStreamWriterExt;
    use super::*;
    use crate::types::Vector2;

    fn written<F>(code_page: CodePage, write: F) -> Vec<u8>
    where
        F: FnOnce(&mut DxfTextWriter<Vec<u8>>) -> Result<()>,
    {
        let mut writer = DxfTextWriter::with_code_page(Vec::new(), code_page);
        write(&mut writer).unwrap();
        writer.into_inner()
    }

    #[test]
    fn test_write_string() {
        let buf = written(CodePage::Utf8, |w| w.write_string(0, "POINT"));
        assert_eq!(String::from_utf8(buf).unwrap(), "  0\nPOINT\n");
    }

    #[test]
    fn test_write_code_formatting() {
        let buf = written(CodePage::Utf8, |w| {
            w.write_i16(5, 100)?;
            w.write_i16(70, 7)?;
            w.write_i16(100, 1)
        });
        let output = String::from_utf8(buf).unwrap();
        // Codes should be right-aligned in 3-character field
        assert!(output.starts_with("  5\n"));
        assert!(output.contains(" 70\n"));
        assert!(output.contains("100\n"));
    }

    #[test]
    fn test_write_doubles() {
        let buf = written(CodePage::Utf8, |w| {
            w.write_point2d(10, Vector2::new(1.0, 2.25))?;
            w.write_double(40, 0.1)
        });
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output, " 10\n1.0\n 20\n2.25\n 40\n0.1\n");
    }

    #[test]
    fn test_doubles_keep_every_digit() {
        let buf = written(CodePage::Utf8, |w| {
            w.write_double(10, -0.7156789012345678)?;
            w.write_double(20, 1e-20)?;
            w.write_double(30, -0.0)
        });
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(
            output,
            " 10\n-0.7156789012345678\n 20\n0.00000000000000000001\n 30\n-0.0\n"
        );
    }

    #[test]
    fn test_write_handle() {
        let buf = written(CodePage::Utf8, |w| w.write_handle(5, Handle::new(255)));
        assert_eq!(String::from_utf8(buf).unwrap(), "  5\nFF\n");
    }

    #[test]
    fn test_utf8_passthrough() {
        let buf = written(CodePage::Utf8, |w| w.write_string(1, "Décollage"));
        assert_eq!(String::from_utf8(buf).unwrap(), "  1\nDécollage\n");
    }

    #[test]
    fn test_windows_1252_transcoding() {
        let buf = written(CodePage::Ansi1252, |w| w.write_string(1, "é"));
        assert_eq!(buf, b"  1\n\xE9\n".to_vec());
    }

    #[test]
    fn test_unmappable_character_is_an_error() {
        let mut buf = Vec::new();
        let mut writer = DxfTextWriter::with_code_page(&mut buf, CodePage::Ansi1252);
        let err = writer.write_string(1, "滑走路").unwrap_err();
        assert!(matches!(err, ConvertError::Encoding(_)));
    }
}
