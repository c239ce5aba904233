//! Classification rule stages
//!
//! Each stage is a pure function of the ancestor path, the placemark name and
//! the key produced by the previous stage. Stages run in a fixed order and
//! never stop the chain; only [`Exclusion`] can drop a placemark, and it runs
//! before the chain starts.

use std::fmt;
use std::ops::Range;

use regex::{Regex, RegexBuilder};

use super::table::RuleTable;
use crate::error::{ConvertError, Result};
use crate::kml::UNNAMED_FOLDER;

/// Ancestor folder names, kept alongside their lower-cased forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPath {
    names: Vec<String>,
    lowered: Vec<String>,
}

impl FolderPath {
    pub fn new(names: Vec<String>) -> Self {
        let lowered = names.iter().map(|n| n.to_lowercase()).collect();
        FolderPath { names, lowered }
    }

    /// This path extended by one folder
    pub fn child(&self, name: &str) -> FolderPath {
        let mut path = self.clone();
        path.names.push(name.to_string());
        path.lowered.push(name.to_lowercase());
        path
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn lowered(&self) -> &[String] {
        &self.lowered
    }
}

/// What a rule stage sees of the placemark being classified
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    path: &'a FolderPath,
    feature_name: &'a str,
}

impl<'a> RuleContext<'a> {
    pub fn new(path: &'a FolderPath, feature_name: &'a str) -> Self {
        RuleContext { path, feature_name }
    }

    /// Folder names from the top-level folder down to the placemark's parent
    pub fn path(&self) -> &'a [String] {
        self.path.names()
    }

    /// [`RuleContext::path`], lower-cased
    pub fn lowered(&self) -> &'a [String] {
        self.path.lowered()
    }

    pub fn feature_name(&self) -> &'a str {
        self.feature_name
    }

    /// Immediate parent folder name
    pub fn last(&self) -> &'a str {
        self.path().last().map(String::as_str).unwrap_or(UNNAMED_FOLDER)
    }

    /// Lower-cased path and placemark name joined by spaces
    pub fn combined_lowercase(&self) -> String {
        let mut text = self.lowered().join(" ");
        text.push(' ');
        text.push_str(&self.feature_name.to_lowercase());
        text
    }
}

/// One stage of the layer-key pipeline
pub trait LayerRule: fmt::Debug + Send + Sync {
    /// Short stage name, used in trace output
    fn name(&self) -> &'static str;

    /// Compute the next key from the current one
    fn apply(&self, ctx: &RuleContext<'_>, key: String) -> String;
}

fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConvertError::InvalidRule {
            pattern: pattern.to_string(),
            source,
        })
}

fn lowercase_all(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| t.to_lowercase()).collect()
}

fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '_' || c == '-'
}

/// Drops placemarks whose name contains an exclusion token
#[derive(Debug, Clone)]
pub struct Exclusion {
    tokens: Vec<String>,
}

impl Exclusion {
    pub fn new(tokens: &[String]) -> Self {
        Exclusion {
            tokens: lowercase_all(tokens),
        }
    }

    pub fn excludes(&self, feature_name: &str) -> bool {
        let name = feature_name.to_lowercase();
        self.tokens.iter().any(|t| name.contains(t.as_str()))
    }
}

/// Grandparent folder, or the parent when the path is a single folder
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseSelection;

impl LayerRule for BaseSelection {
    fn name(&self) -> &'static str {
        "base"
    }

    fn apply(&self, ctx: &RuleContext<'_>, _key: String) -> String {
        match ctx.path().len() {
            0 => UNNAMED_FOLDER.to_string(),
            1 => ctx.path()[0].clone(),
            n => ctx.path()[n - 2].clone(),
        }
    }
}

/// Self-significant folders keep their own name
#[derive(Debug, Clone)]
pub struct KeepSelf {
    patterns: Vec<Regex>,
}

impl KeepSelf {
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(KeepSelf {
            patterns: patterns.iter().map(|p| compile(p)).collect::<Result<_>>()?,
        })
    }
}

impl LayerRule for KeepSelf {
    fn name(&self) -> &'static str {
        "keep-self"
    }

    fn apply(&self, ctx: &RuleContext<'_>, key: String) -> String {
        let matched = ctx
            .path()
            .iter()
            .any(|entry| self.patterns.iter().any(|p| p.is_match(entry)));
        if matched {
            ctx.last().to_string()
        } else {
            key
        }
    }
}

/// Recurring "recul" phases stay separate layers
#[derive(Debug, Clone)]
pub struct PhaseSplit {
    pattern: Regex,
}

impl PhaseSplit {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(PhaseSplit {
            pattern: compile(pattern)?,
        })
    }
}

impl LayerRule for PhaseSplit {
    fn name(&self) -> &'static str {
        "phase-split"
    }

    fn apply(&self, ctx: &RuleContext<'_>, key: String) -> String {
        if ctx.path().iter().any(|entry| self.pattern.is_match(entry)) {
            ctx.last().to_string()
        } else {
            key
        }
    }
}

/// The folder right below a structural folder names the layer
#[derive(Debug, Clone)]
pub struct StructuralDescent {
    tokens: Vec<String>,
}

impl StructuralDescent {
    pub fn new(tokens: &[String]) -> Self {
        StructuralDescent {
            tokens: lowercase_all(tokens),
        }
    }
}

impl LayerRule for StructuralDescent {
    fn name(&self) -> &'static str {
        "structural-descent"
    }

    fn apply(&self, ctx: &RuleContext<'_>, key: String) -> String {
        let parents = ctx.lowered().len().saturating_sub(1);
        ctx.lowered()[..parents]
            .iter()
            .position(|entry| self.tokens.iter().any(|t| entry.contains(t.as_str())))
            .map(|i| ctx.path()[i + 1].clone())
            .unwrap_or(key)
    }
}

/// Curved surfaces split into landing and takeoff layers
#[derive(Debug, Clone)]
pub struct CurvedSuffix {
    marker: String,
    landing_tokens: Vec<String>,
    landing_suffix: String,
    takeoff_tokens: Vec<String>,
    takeoff_suffix: String,
}

impl CurvedSuffix {
    pub fn new(table: &super::table::CurvedSplit) -> Self {
        CurvedSuffix {
            marker: table.marker.to_lowercase(),
            landing_tokens: lowercase_all(&table.landing_tokens),
            landing_suffix: table.landing_suffix.clone(),
            takeoff_tokens: lowercase_all(&table.takeoff_tokens),
            takeoff_suffix: table.takeoff_suffix.clone(),
        }
    }
}

impl LayerRule for CurvedSuffix {
    fn name(&self) -> &'static str {
        "curved"
    }

    fn apply(&self, ctx: &RuleContext<'_>, key: String) -> String {
        if self.marker.is_empty() {
            return key;
        }
        let text = ctx.combined_lowercase();
        if !text.contains(self.marker.as_str()) {
            return key;
        }
        let has = |tokens: &[String]| tokens.iter().any(|t| text.contains(t.as_str()));
        if has(&self.landing_tokens) {
            key + &self.landing_suffix
        } else if has(&self.takeoff_tokens) {
            key + &self.takeoff_suffix
        } else {
            key
        }
    }
}

/// `OLD_` / `NEW_` prefix for superseded and projected surfaces
#[derive(Debug, Clone)]
pub struct VersionPrefix {
    old_markers: Vec<String>,
    new_markers: Vec<String>,
    old_prefix: String,
    new_prefix: String,
}

impl VersionPrefix {
    pub fn new(table: &RuleTable) -> Self {
        let normalize = |markers: &[String]| markers.iter().map(|m| squash(m)).collect();
        VersionPrefix {
            old_markers: normalize(&table.old_surface_markers),
            new_markers: normalize(&table.new_surface_markers),
            old_prefix: table.old_prefix.clone(),
            new_prefix: table.new_prefix.clone(),
        }
    }
}

impl LayerRule for VersionPrefix {
    fn name(&self) -> &'static str {
        "version"
    }

    fn apply(&self, ctx: &RuleContext<'_>, key: String) -> String {
        let squashed: Vec<String> = ctx.path().iter().map(|entry| squash(entry)).collect();
        let any_marker = |markers: &[String]| {
            squashed
                .iter()
                .any(|entry| markers.iter().any(|m| entry.contains(m.as_str())))
        };
        if any_marker(&self.old_markers) {
            format!("{}{key}", self.old_prefix)
        } else if any_marker(&self.new_markers) {
            format!("{}{key}", self.new_prefix)
        } else {
            key
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledSidePair {
    tokens: Regex,
    suffix: String,
}

/// Left and right variants of a surface share one layer
#[derive(Debug, Clone)]
pub struct SideMerge {
    pairs: Vec<CompiledSidePair>,
    exemptions: Vec<String>,
    separator_runs: Regex,
}

impl SideMerge {
    pub fn new(table: &RuleTable) -> Result<Self> {
        let pairs = table
            .side_pairs
            .iter()
            .map(|pair| {
                let pattern = format!(
                    "(?:{}|{})",
                    regex::escape(&pair.left),
                    regex::escape(&pair.right)
                );
                Ok(CompiledSidePair {
                    tokens: compile(&pattern)?,
                    suffix: pair.suffix.clone(),
                })
            })
            .collect::<Result<_>>()?;
        Ok(SideMerge {
            pairs,
            exemptions: lowercase_all(&table.side_merge_exemptions),
            separator_runs: compile(r"([\s_-])[\s_-]+")?,
        })
    }

    /// Whole-word occurrences: letters may not touch the token on either side
    fn token_ranges(tokens: &Regex, text: &str) -> Vec<Range<usize>> {
        tokens
            .find_iter(text)
            .filter(|m| {
                let before = text[..m.start()].chars().next_back();
                let after = text[m.end()..].chars().next();
                !before.is_some_and(char::is_alphabetic) && !after.is_some_and(char::is_alphabetic)
            })
            .map(|m| m.range())
            .collect()
    }

    fn merge_pair(&self, pair: &CompiledSidePair, key: String) -> String {
        let ranges = Self::token_ranges(&pair.tokens, &key);
        if ranges.is_empty() {
            return key;
        }

        let mut stripped = String::with_capacity(key.len());
        let mut last = 0;
        for range in ranges {
            stripped.push_str(&key[last..range.start]);
            last = range.end;
        }
        stripped.push_str(&key[last..]);

        let collapsed = self.separator_runs.replace_all(&stripped, "$1");
        let base = collapsed.trim_matches(is_separator);
        if base.is_empty() {
            pair.suffix.trim_start_matches(is_separator).to_string()
        } else {
            format!("{base}{}", pair.suffix)
        }
    }
}

impl LayerRule for SideMerge {
    fn name(&self) -> &'static str {
        "side-merge"
    }

    fn apply(&self, _ctx: &RuleContext<'_>, key: String) -> String {
        let lowered = key.to_lowercase();
        if self.exemptions.iter().any(|e| lowered.contains(e.as_str())) {
            return key;
        }
        self.pairs
            .iter()
            .fold(key, |key, pair| self.merge_pair(pair, key))
    }
}

/// `OFZ_` prefix for everything under an obstacle-free-zone folder
#[derive(Debug, Clone)]
pub struct ZonePrefix {
    marker: String,
    prefix: String,
}

impl ZonePrefix {
    pub fn new(marker: &str, prefix: &str) -> Self {
        ZonePrefix {
            marker: marker.to_uppercase(),
            prefix: prefix.to_string(),
        }
    }
}

impl LayerRule for ZonePrefix {
    fn name(&self) -> &'static str {
        "zone"
    }

    fn apply(&self, ctx: &RuleContext<'_>, key: String) -> String {
        if self.marker.is_empty() {
            return key;
        }
        let in_zone = ctx
            .path()
            .iter()
            .any(|entry| entry.to_uppercase().contains(self.marker.as_str()));
        if in_zone && !key.to_uppercase().contains(self.marker.as_str()) {
            format!("{}{key}", self.prefix)
        } else {
            key
        }
    }
}

/// Build the stages in application order
pub fn pipeline(table: &RuleTable) -> Result<Vec<Box<dyn LayerRule>>> {
    Ok(vec![
        Box::new(BaseSelection),
        Box::new(KeepSelf::new(&table.keep_self_patterns)?),
        Box::new(PhaseSplit::new(&table.recul_phase_pattern)?),
        Box::new(StructuralDescent::new(&table.structural_tokens)),
        Box::new(CurvedSuffix::new(&table.curved)),
        Box::new(VersionPrefix::new(table)),
        Box::new(SideMerge::new(table)?),
        Box::new(ZonePrefix::new(&table.zone_marker, &table.zone_prefix)),
    ])
}
