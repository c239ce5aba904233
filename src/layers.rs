//! Layer aggregation
//!
//! A [`LayerMap`] groups classified placemarks by layer key. Keys keep their
//! first-insertion order and collisions always concatenate, never replace.

use indexmap::IndexMap;

use crate::kml::Feature;

/// Layer key → placemarks, in traversal order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerMap {
    layers: IndexMap<String, Vec<Feature>>,
}

impl LayerMap {
    /// Create a new empty map
    pub fn new() -> Self {
        LayerMap {
            layers: IndexMap::new(),
        }
    }

    /// Append a placemark to a layer, creating the layer if needed
    pub fn insert(&mut self, key: impl Into<String>, feature: Feature) {
        self.layers.entry(key.into()).or_default().push(feature);
    }

    /// Append a whole list of placemarks to a layer
    pub fn extend_layer(&mut self, key: impl Into<String>, features: Vec<Feature>) {
        self.layers.entry(key.into()).or_default().extend(features);
    }

    /// Union with another map, concatenating lists on shared keys
    pub fn merge(&mut self, other: LayerMap) {
        for (key, features) in other.layers {
            self.extend_layer(key, features);
        }
    }

    /// Merge any number of maps, in order
    pub fn aggregate<I>(maps: I) -> LayerMap
    where
        I: IntoIterator<Item = LayerMap>,
    {
        maps.into_iter().fold(LayerMap::new(), |mut acc, map| {
            acc.merge(map);
            acc
        })
    }

    /// Replace known keys by their display names
    ///
    /// Must run once on the fully aggregated map: a key renamed onto an
    /// existing one is merged with it.
    pub fn renamed(self, renames: &IndexMap<String, String>) -> LayerMap {
        if renames.is_empty() {
            return self;
        }
        let mut result = LayerMap::new();
        for (key, features) in self.layers {
            let key = renames.get(&key).cloned().unwrap_or(key);
            result.extend_layer(key, features);
        }
        result
    }

    /// Get the placemarks of a layer
    pub fn get(&self, key: &str) -> Option<&[Feature]> {
        self.layers.get(key).map(Vec::as_slice)
    }

    /// Check if a layer exists
    pub fn contains(&self, key: &str) -> bool {
        self.layers.contains_key(key)
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of placemarks over all layers
    pub fn feature_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Layer keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Iterate over `(key, placemarks)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Feature])> {
        self.layers
            .iter()
            .map(|(key, features)| (key.as_str(), features.as_slice()))
    }
}
