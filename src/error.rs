//! Error types for kml2dxf

use std::io;
use thiserror::Error;

/// Fatal conversion errors
///
/// Any of these aborts the run before output files are written.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The source document is not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Neither `Document/Folder` nor any `Folder` element was found
    #[error("Parse error: no top-level folders found in document")]
    NoFolders,

    /// Folder nesting exceeds the configured limit
    #[error("Parse error: folder nesting depth {depth} exceeds limit {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    /// A rule table pattern failed to compile
    #[error("Invalid rule pattern `{pattern}`: {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration file could not be deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Text could not be represented in the output code page
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for kml2dxf operations
pub type Result<T> = std::result::Result<T, ConvertError>;

impl From<String> for ConvertError {
    fn from(s: String) -> Self {
        ConvertError::Custom(s)
    }
}

impl From<&str> for ConvertError {
    fn from(s: &str) -> Self {
        ConvertError::Custom(s.to_string())
    }
}

/// Per-feature failures
///
/// These never abort a run: the feature is dropped and counted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// A coordinate record is not `lon,lat[,elevation]`
    #[error("invalid coordinate record `{record}`")]
    InvalidCoordinates { record: String },

    /// Coordinate text holds no records at all
    #[error("no coordinates")]
    EmptyCoordinates,
}
