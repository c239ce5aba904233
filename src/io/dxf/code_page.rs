//! DXF code page ($DWGCODEPAGE) and text encoding

use std::fmt;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

/// Text encoding of a written DXF file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CodePage {
    /// Strings written as UTF-8
    #[default]
    #[serde(rename = "UTF-8", alias = "utf-8", alias = "utf8")]
    Utf8,
    /// Windows-1252, for readers that predate UTF-8 DXF
    #[serde(rename = "ANSI_1252", alias = "ansi_1252", alias = "windows-1252")]
    Ansi1252,
}

impl CodePage {
    /// Value written to `$DWGCODEPAGE`
    pub fn dxf_name(&self) -> &'static str {
        match self {
            CodePage::Utf8 => "UTF-8",
            CodePage::Ansi1252 => "ANSI_1252",
        }
    }

    /// Encoding used to transcode strings, `None` when no transcoding is needed
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match self {
            CodePage::Utf8 => None,
            CodePage::Ansi1252 => Some(encoding_rs::WINDOWS_1252),
        }
    }

    /// Whether every character of `text` has a byte in this code page
    pub fn can_encode(&self, text: &str) -> bool {
        match self.encoding() {
            Some(encoding) if !text.is_ascii() => !encoding.encode(text).2,
            _ => true,
        }
    }

    /// Look a code page up by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<CodePage> {
        match name.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(CodePage::Utf8),
            "ansi_1252" | "windows-1252" | "cp1252" => Some(CodePage::Ansi1252),
            _ => None,
        }
    }
}

impl fmt::Display for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dxf_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_1252() {
        assert_eq!(CodePage::Ansi1252.encoding(), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(CodePage::Ansi1252.dxf_name(), "ANSI_1252");
    }

    #[test]
    fn test_utf8_needs_no_transcoding() {
        assert_eq!(CodePage::Utf8.encoding(), None);
        assert_eq!(CodePage::default(), CodePage::Utf8);
    }

    #[test]
    fn test_can_encode() {
        assert!(CodePage::Ansi1252.can_encode("Zone de sécurité"));
        assert!(!CodePage::Ansi1252.can_encode("滑走路"));
        assert!(CodePage::Utf8.can_encode("滑走路"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(CodePage::from_name("ANSI_1252"), CodePage::from_name("ansi_1252"));
        assert_eq!(CodePage::from_name("UTF8"), Some(CodePage::Utf8));
        assert_eq!(CodePage::from_name("KOI8-R"), None);
    }
}
