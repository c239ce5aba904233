//! Geometry emission
//!
//! Turns a classified [`LayerMap`] into a [`DxfDocument`] for one coordinate
//! transform. Each placemark becomes, by number of parsed coordinates:
//!
//! | coordinates | entities                        |
//! |-------------|---------------------------------|
//! | 0           | none                            |
//! | 1           | POINT, plus a TEXT label if set |
//! | 2 or more   | LWPOLYLINE through all of them  |
//!
//! Placemarks with malformed coordinate text, or with a coordinate the
//! transform maps to NaN or infinity, are dropped and counted; the rest of
//! their layer is still emitted. A label the output code page cannot
//! represent is left out and counted, its POINT is kept.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::DxfDocument;
use crate::entities::{LwPolyline, Point, Text};
use crate::error::FeatureError;
use crate::io::dxf::CodePage;
use crate::kml::Feature;
use crate::layers::LayerMap;
use crate::projection::{CoordinateTransform, Projection};
use crate::types::Vector2;

/// Character substituted for anything outside `[A-Za-z0-9_-]`
pub const LAYER_NAME_SUBSTITUTE: char = '_';

/// Make a layer key safe to use as a DXF layer name
///
/// Every character outside `[A-Za-z0-9_-]` becomes `_`. An empty key becomes
/// a single `_`. Distinct keys may sanitize to the same name; see
/// [`sanitize_collisions`].
pub fn sanitize_layer_name(key: &str) -> String {
    if key.is_empty() {
        return LAYER_NAME_SUBSTITUTE.to_string();
    }
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                LAYER_NAME_SUBSTITUTE
            }
        })
        .collect()
}

/// Sanitized names shared by more than one distinct key
///
/// Returns each colliding name with its source keys, in first-seen order.
pub fn sanitize_collisions<'a, I>(keys: I) -> Vec<(String, Vec<String>)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    for key in keys {
        let sources = groups.entry(sanitize_layer_name(key)).or_default();
        if !sources.iter().any(|k| k == key) {
            sources.push(key.to_string());
        }
    }
    groups
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .collect()
}

/// Output options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Emit a TEXT label with the placemark name next to every POINT
    pub labels: bool,
    /// Label height in drawing units; per-projection default when unset
    pub text_height: Option<f64>,
    /// Set the closed flag on every LWPOLYLINE
    pub close_polylines: bool,
    /// Output text encoding
    pub code_page: CodePage,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            labels: true,
            text_height: None,
            close_polylines: true,
            code_page: CodePage::Utf8,
        }
    }
}

/// Counters for one emission run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub layers: usize,
    pub points: usize,
    pub polylines: usize,
    pub labels: usize,
    /// Placemarks with no coordinates
    pub empty: usize,
    /// Placemarks dropped for malformed coordinates or unprojectable points
    pub dropped: usize,
    /// Labels left out because the code page cannot represent the name
    pub unencodable_labels: usize,
}

impl EmitStats {
    /// Entities written to the document
    pub fn entity_count(&self) -> usize {
        self.points + self.polylines + self.labels
    }
}

/// Builds drawings from a layer map
#[derive(Debug, Clone)]
pub struct Emitter {
    options: EmitOptions,
}

impl Emitter {
    pub fn new(options: EmitOptions) -> Self {
        Emitter { options }
    }

    /// Emit a drawing through a built-in projection
    ///
    /// Sets `$INSUNITS` and the default label height from the projection.
    pub fn emit_projection(&self, layers: &LayerMap, projection: Projection) -> (DxfDocument, EmitStats) {
        let text_height = self
            .options
            .text_height
            .unwrap_or_else(|| projection.default_text_height());
        let (mut document, stats) = self.emit_with_height(layers, &projection, text_height);
        document.header.insertion_units = projection.insunits();
        (document, stats)
    }

    /// Emit a drawing through any coordinate transform
    pub fn emit<T>(&self, layers: &LayerMap, transform: &T) -> (DxfDocument, EmitStats)
    where
        T: CoordinateTransform + ?Sized,
    {
        let text_height = self.options.text_height.unwrap_or(1.0);
        self.emit_with_height(layers, transform, text_height)
    }

    fn emit_with_height<T>(&self, layers: &LayerMap, transform: &T, text_height: f64) -> (DxfDocument, EmitStats)
    where
        T: CoordinateTransform + ?Sized,
    {
        let mut document = DxfDocument::new();
        document.header.code_page = self.options.code_page;
        let mut stats = EmitStats::default();

        for collision in sanitize_collisions(layers.keys()) {
            warn!(layer = %collision.0, keys = ?collision.1, "distinct layers share a sanitized name");
        }

        for (key, features) in layers.iter() {
            let layer = sanitize_layer_name(key);
            for feature in features {
                self.emit_feature(&mut document, &mut stats, &layer, feature, transform, text_height);
            }
            stats.layers += 1;
        }

        debug!(
            layers = stats.layers,
            entities = stats.entity_count(),
            dropped = stats.dropped,
            "emitted drawing"
        );
        (document, stats)
    }

    fn emit_feature<T>(
        &self,
        document: &mut DxfDocument,
        stats: &mut EmitStats,
        layer: &str,
        feature: &Feature,
        transform: &T,
        text_height: f64,
    ) where
        T: CoordinateTransform + ?Sized,
    {
        let coordinates = match feature.coordinates() {
            Ok(coordinates) => coordinates,
            Err(FeatureError::EmptyCoordinates) => {
                stats.empty += 1;
                return;
            }
            Err(err) => {
                warn!(layer, feature = %feature.name, error = %err, "placemark dropped");
                stats.dropped += 1;
                return;
            }
        };

        let points: Vec<Vector2> = coordinates
            .iter()
            .map(|c| transform.transform(c.longitude, c.latitude))
            .collect();
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            warn!(
                layer,
                feature = %feature.name,
                coordinate = bad + 1,
                "placemark dropped, coordinate has no finite projection"
            );
            stats.dropped += 1;
            return;
        }

        match points.len() {
            0 => stats.empty += 1,
            1 => {
                let point = points[0];
                document.add_entity(Point::on_layer(layer, point));
                stats.points += 1;
                if !self.options.labels {
                    return;
                }
                if self.options.code_page.can_encode(&feature.name) {
                    document.add_entity(Text::label(layer, feature.name.as_str(), point, text_height));
                    stats.labels += 1;
                } else {
                    warn!(
                        layer,
                        feature = %feature.name,
                        code_page = %self.options.code_page,
                        "label left out, name not representable"
                    );
                    stats.unencodable_labels += 1;
                }
            }
            _ => {
                let mut polyline = LwPolyline::from_points(layer, points);
                polyline.set_closed(self.options.close_polylines);
                document.add_entity(polyline);
                stats.polylines += 1;
            }
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(EmitOptions::default())
    }
}
