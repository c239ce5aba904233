//! Shared test utilities for kml2dxf integration tests.
//!
//! Every test crate imports this via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use kml2dxf::{Classifier, LayerMap, RuleTable};

/// An aerodrome survey export in the shape the classifier is tuned for
pub const AERODROME_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>LFML</name>
    <Folder>
      <name>AERODROME</name>
      <Placemark>
        <name>Axe piste 13L/31R</name>
        <LineString><coordinates>5.2010,43.4510,0 5.2290,43.4270,0</coordinates></LineString>
      </Placemark>
      <Placemark>
        <name>Cotation longueur</name>
        <Point><coordinates>5.2150,43.4390,0</coordinates></Point>
      </Placemark>
    </Folder>
    <Folder>
      <name>SITE</name>
      <Folder>
        <name>APPUI</name>
        <Placemark>
          <name>A1</name>
          <Point><coordinates>5.2150,43.4367,12.5</coordinates></Point>
        </Placemark>
        <Placemark>
          <name>A2</name>
          <Point><coordinates>5.2160,43.4371,12.8</coordinates></Point>
        </Placemark>
      </Folder>
      <Folder>
        <name>Piste_Gauche</name>
        <Folder>
          <name>Tronçon 1</name>
          <Placemark>
            <name>bord</name>
            <LineString><coordinates>5.20,43.45 5.21,43.44 5.22,43.43</coordinates></LineString>
          </Placemark>
        </Folder>
      </Folder>
      <Folder>
        <name>Piste_Droite</name>
        <Folder>
          <name>Tronçon 1</name>
          <Placemark>
            <name>bord</name>
            <LineString><coordinates>5.21,43.45 5.22,43.44</coordinates></LineString>
          </Placemark>
        </Folder>
      </Folder>
    </Folder>
    <Folder>
      <name>ZONE_OFZ</name>
      <Folder>
        <name>SUBGROUP</name>
        <Placemark>
          <name>limite</name>
          <LineString><coordinates>5.19,43.46 5.23,43.42</coordinates></LineString>
        </Placemark>
        <Placemark>
          <name>sans géométrie</name>
        </Placemark>
        <Placemark>
          <name>corrompu</name>
          <Point><coordinates>5.19;43.46</coordinates></Point>
        </Placemark>
      </Folder>
    </Folder>
  </Document>
</kml>
"#;

/// Pass-through transform
pub fn identity(lon: f64, lat: f64) -> (f64, f64) {
    (lon, lat)
}

/// Owned ancestor path from string literals
pub fn path(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|e| e.to_string()).collect()
}

/// Classifier over the compiled default rule table
pub fn default_classifier() -> Classifier {
    Classifier::new(&RuleTable::default()).expect("default rule table compiles")
}

/// Feature names of a layer, in order
pub fn feature_names(layers: &LayerMap, key: &str) -> Vec<String> {
    layers
        .get(key)
        .map(|features| features.iter().map(|f| f.name.clone()).collect())
        .unwrap_or_default()
}
