//! # kml2dxf
//!
//! Converts KML survey exports into DXF drawings with one layer per logical
//! group of features.
//!
//! A KML file describes its features as placemarks inside nested folders.
//! The folder names encode what the features are (runway strips, approach
//! surfaces, left/right halves, old/new versions). `kml2dxf` turns that path
//! into a CAD layer name with a configurable rule table, then writes one DXF
//! per output projection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kml2dxf::{Converter, ConverterConfig};
//!
//! let converter = Converter::new(ConverterConfig::default())?;
//! let report = converter.convert("LFML.kml", "out", "LFML")?;
//! for path in report.output_paths() {
//!     println!("wrote {}", path.display());
//! }
//! # Ok::<(), kml2dxf::error::ConvertError>(())
//! ```
//!
//! ## Pipeline
//!
//! - [`KmlReader`] - KML text to a [`FolderTree`]
//! - [`Classifier`] - folder paths to layer keys, merged into a [`LayerMap`]
//! - [`Emitter`] - layer map plus a [`CoordinateTransform`] to a [`DxfDocument`]
//! - [`DxfWriter`] - drawing to DXF text

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classify;
pub mod config;
pub mod convert;
pub mod document;
pub mod emitter;
pub mod entities;
pub mod error;
pub mod io;
pub mod kml;
pub mod layers;
pub mod projection;
pub mod types;

// Re-export commonly used types
pub use error::{ConvertError, FeatureError, Result};
pub use types::{BoundingBox2D, Handle, Vector2};

// Re-export entity types
pub use entities::{Entity, EntityType, LwPolyline, Point, Text};

// Re-export the pipeline
pub use classify::{Classifier, LayerRule, RuleTable};
pub use config::ConverterConfig;
pub use convert::{ConversionReport, Converter};
pub use document::DxfDocument;
pub use emitter::{sanitize_collisions, sanitize_layer_name, EmitOptions, EmitStats, Emitter};
pub use io::dxf::{CodePage, DxfWriter};
pub use kml::{Feature, Folder, FolderTree, KmlReader};
pub use layers::LayerMap;
pub use projection::{CoordinateTransform, Projection};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
