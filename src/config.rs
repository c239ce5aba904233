//! Converter configuration
//!
//! Everything is optional: a missing file or a missing key falls back to the
//! compiled defaults, which reproduce the standard aerodrome survey rules.
//!
//! ```toml
//! projections = ["WGS84", "Lambert93"]
//! max_depth = 64
//!
//! [output]
//! labels = true
//! close_polylines = true
//! code_page = "ANSI_1252"
//!
//! [rules]
//! exclusion_tokens = ["cotation"]
//!
//! [rules.renames]
//! AERODROME = "Runway"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::RuleTable;
use crate::emitter::EmitOptions;
use crate::error::{ConvertError, Result};
use crate::kml::DEFAULT_MAX_DEPTH;
use crate::projection::Projection;

/// Complete converter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Output projections, one drawing each
    pub projections: Vec<Projection>,
    /// Folder nesting limit of the reader
    pub max_depth: usize,
    pub output: EmitOptions,
    pub rules: RuleTable,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            projections: Projection::ALL.to_vec(),
            max_depth: DEFAULT_MAX_DEPTH,
            output: EmitOptions::default(),
            rules: RuleTable::default(),
        }
    }
}

impl ConverterConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load a TOML file if one is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Show the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConvertError::Custom(format!("serialize config: {e}")))
    }
}
