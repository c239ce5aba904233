//! Rule table: the tokens, patterns and suffixes driving classification
//!
//! Everything the classifier matches on is data here, so a survey with
//! different folder conventions only needs a different table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A pair of side tokens merged into one layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePair {
    pub left: String,
    pub right: String,
    /// Appended to the key once the side tokens are removed
    pub suffix: String,
}

impl SidePair {
    pub fn new(left: &str, right: &str, suffix: &str) -> Self {
        SidePair {
            left: left.to_string(),
            right: right.to_string(),
            suffix: suffix.to_string(),
        }
    }
}

/// Landing/takeoff split of curved procedure surfaces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurvedSplit {
    pub marker: String,
    pub landing_tokens: Vec<String>,
    pub landing_suffix: String,
    pub takeoff_tokens: Vec<String>,
    pub takeoff_suffix: String,
}

impl Default for CurvedSplit {
    fn default() -> Self {
        CurvedSplit {
            marker: "courbe".into(),
            landing_tokens: vec!["atterrissage".into()],
            landing_suffix: "_ATT".into(),
            takeoff_tokens: vec!["decollage".into(), "décollage".into()],
            takeoff_suffix: "_DEC".into(),
        }
    }
}

/// The complete classification rule table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleTable {
    /// Placemarks whose name contains one of these are dropped
    pub exclusion_tokens: Vec<String>,
    /// Case-insensitive regexes; a matching ancestor keeps the immediate folder
    pub keep_self_patterns: Vec<String>,
    /// Case-insensitive regex identifying recurring "recul" phase folders
    pub recul_phase_pattern: String,
    /// Ancestors containing one of these hand the layer to the next folder down
    pub structural_tokens: Vec<String>,
    pub curved: CurvedSplit,
    /// Compared against ancestors upper-cased with whitespace removed
    pub old_surface_markers: Vec<String>,
    pub new_surface_markers: Vec<String>,
    pub old_prefix: String,
    pub new_prefix: String,
    pub side_pairs: Vec<SidePair>,
    /// Keys containing one of these keep their side tokens
    pub side_merge_exemptions: Vec<String>,
    pub zone_marker: String,
    pub zone_prefix: String,
    /// Applied once to the aggregated layer map
    pub renames: IndexMap<String, String>,
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable {
            exclusion_tokens: vec!["cotation".into()],
            keep_self_patterns: [
                "appui",
                "horizontale",
                "conique",
                "bande",
                "cwy",
                "prolongement d[ée]gag[ée]",
                "swy",
                "prolongement d.arr[êe]t",
                "fato",
                "zone de s[ée]curit[ée]",
                "resa",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            recul_phase_pattern: r"^recul\b.*\b[a-z0-9]{2}$".into(),
            structural_tokens: ["section", "divergence", "rac", "lat-"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            curved: CurvedSplit::default(),
            old_surface_markers: vec![
                "OLDSURFACE".into(),
                "ANCIENNESSURFACES".into(),
                "ANCIENNESURFACE".into(),
            ],
            new_surface_markers: vec![
                "NEWSURFACE".into(),
                "NOUVELLESSURFACES".into(),
                "NOUVELLESURFACE".into(),
            ],
            old_prefix: "OLD_".into(),
            new_prefix: "NEW_".into(),
            side_pairs: vec![
                SidePair::new("gauche", "droite", "_GD"),
                SidePair::new("left", "right", "_LR"),
            ],
            side_merge_exemptions: vec!["appui".into()],
            zone_marker: "OFZ".into(),
            zone_prefix: "OFZ_".into(),
            renames: IndexMap::from([("AERODROME".to_string(), "Runway".to_string())]),
        }
    }
}
