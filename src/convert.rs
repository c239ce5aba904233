//! End-to-end conversion
//!
//! Reads a KML file, classifies its placemarks once, then builds one drawing
//! per projection in parallel. Every drawing is serialized in memory before
//! the first file is created, so a failing projection leaves no partial set
//! of outputs behind.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::classify::Classifier;
use crate::config::ConverterConfig;
use crate::emitter::{EmitStats, Emitter};
use crate::error::Result;
use crate::io::dxf::DxfWriter;
use crate::kml::{FolderTree, KmlReader};
use crate::layers::LayerMap;
use crate::projection::Projection;

/// Output of one projection
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionOutput {
    pub projection: Projection,
    pub path: PathBuf,
    pub stats: EmitStats,
}

/// Summary of a conversion run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Layers after classification and renaming
    pub layers: usize,
    /// Placemarks read from the document
    pub features: usize,
    /// Placemarks removed by the exclusion rule
    pub excluded: usize,
    /// Placemarks without a coordinates element
    pub skipped_placemarks: usize,
    pub outputs: Vec<ProjectionOutput>,
}

impl ConversionReport {
    /// Most placemarks dropped from any one output
    ///
    /// Malformed coordinates drop a placemark from every output; a point a
    /// projection cannot map drops it from that output only.
    pub fn dropped_features(&self) -> usize {
        self.outputs.iter().map(|o| o.stats.dropped).max().unwrap_or(0)
    }

    /// Paths of the written drawings
    pub fn output_paths(&self) -> Vec<&Path> {
        self.outputs.iter().map(|o| o.path.as_path()).collect()
    }
}

/// `<out_dir>/<base>_<projection>.dxf`
pub fn output_path(out_dir: &Path, base_name: &str, projection: Projection) -> PathBuf {
    out_dir.join(format!("{}_{}.dxf", base_name, projection.name()))
}

/// KML to DXF converter
#[derive(Debug)]
pub struct Converter {
    config: ConverterConfig,
    classifier: Classifier,
    emitter: Emitter,
}

impl Converter {
    /// Compile the rule table and prepare the emitter
    pub fn new(config: ConverterConfig) -> Result<Self> {
        let classifier = Classifier::new(&config.rules)?;
        let emitter = Emitter::new(config.output.clone());
        Ok(Converter {
            config,
            classifier,
            emitter,
        })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Read a KML file with the configured depth limit
    pub fn read<P: AsRef<Path>>(&self, input: P) -> Result<FolderTree> {
        KmlReader::from_file(input)?
            .with_max_depth(self.config.max_depth)
            .read()
    }

    /// Classify a folder tree into layers
    pub fn classify(&self, tree: &FolderTree) -> LayerMap {
        self.classifier.classify_tree(tree)
    }

    /// Serialize one drawing per configured projection
    ///
    /// Projections are emitted in parallel; the first error aborts the lot.
    pub fn render(&self, layers: &LayerMap) -> Result<Vec<(Projection, Vec<u8>, EmitStats)>> {
        self.config
            .projections
            .par_iter()
            .map(|&projection| {
                let (document, stats) = self.emitter.emit_projection(layers, projection);
                let bytes = DxfWriter::new(&document).write_to_vec()?;
                debug!(%projection, entities = document.entity_count(), bytes = bytes.len(), "rendered drawing");
                Ok((projection, bytes, stats))
            })
            .collect()
    }

    /// Convert `input` into `<out_dir>/<base_name>_<projection>.dxf` files
    pub fn convert<P, Q>(&self, input: P, out_dir: Q, base_name: &str) -> Result<ConversionReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let tree = self.read(input)?;
        self.convert_tree(&tree, out_dir, base_name)
    }

    /// Convert an already parsed tree
    pub fn convert_tree<Q: AsRef<Path>>(
        &self,
        tree: &FolderTree,
        out_dir: Q,
        base_name: &str,
    ) -> Result<ConversionReport> {
        let layers = self.classify(tree);
        let features = tree.feature_count();
        info!(
            layers = layers.len(),
            features,
            classified = layers.feature_count(),
            "classified placemarks"
        );

        let rendered = self.render(&layers)?;

        let out_dir = out_dir.as_ref();
        fs::create_dir_all(out_dir)?;

        let mut outputs = Vec::with_capacity(rendered.len());
        for (projection, bytes, stats) in rendered {
            let path = output_path(out_dir, base_name, projection);
            fs::write(&path, bytes)?;
            info!(path = %path.display(), %projection, entities = stats.entity_count(), "wrote drawing");
            outputs.push(ProjectionOutput {
                projection,
                path,
                stats,
            });
        }

        Ok(ConversionReport {
            layers: layers.len(),
            features,
            excluded: features - layers.feature_count(),
            skipped_placemarks: tree.skipped_placemarks,
            outputs,
        })
    }
}
