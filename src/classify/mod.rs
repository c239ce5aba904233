//! Layer classification
//!
//! The [`Classifier`] walks a folder tree depth-first and assigns every
//! placemark a layer key computed from its ancestor folder names and its own
//! name. The key is produced by a fixed pipeline of [`LayerRule`] stages built
//! from a [`RuleTable`]:
//!
//! 1. exclusion of annotation placemarks (`cotation`)
//! 2. base selection (grandparent folder)
//! 3. keep-self override
//! 4. recul-phase override
//! 5. structural descent
//! 6. curved landing/takeoff split
//! 7. `OLD_` / `NEW_` prefix
//! 8. left/right merge
//! 9. `OFZ_` prefix
//!
//! Per-folder results are merged bottom-up into a [`LayerMap`]; the rename
//! pass runs once on the aggregated map.

mod rules;
mod table;

pub use rules::{
    pipeline, BaseSelection, CurvedSuffix, Exclusion, FolderPath, KeepSelf, LayerRule,
    PhaseSplit, RuleContext, SideMerge, StructuralDescent, VersionPrefix, ZonePrefix,
};
pub use table::{CurvedSplit, RuleTable, SidePair};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::Result;
use crate::kml::{Folder, FolderTree};
use crate::layers::LayerMap;

/// Compiled rule table
///
/// Built once per run and shared by reference through the recursion.
#[derive(Debug)]
pub struct Classifier {
    exclusion: Exclusion,
    rules: Vec<Box<dyn LayerRule>>,
    renames: IndexMap<String, String>,
}

impl Classifier {
    /// Compile a rule table
    pub fn new(table: &RuleTable) -> Result<Self> {
        Ok(Classifier {
            exclusion: Exclusion::new(&table.exclusion_tokens),
            rules: pipeline(table)?,
            renames: table.renames.clone(),
        })
    }

    /// Layer key for a placemark, or `None` when it is excluded
    pub fn layer_key(&self, path: &[String], feature_name: &str) -> Option<String> {
        let path = FolderPath::new(path.to_vec());
        self.key_for(&RuleContext::new(&path, feature_name))
    }

    fn key_for(&self, ctx: &RuleContext<'_>) -> Option<String> {
        if self.exclusion.excludes(ctx.feature_name()) {
            trace!(feature = ctx.feature_name(), "excluded");
            return None;
        }
        let key = self.rules.iter().fold(String::new(), |key, rule| {
            let next = rule.apply(ctx, key);
            trace!(rule = rule.name(), key = %next);
            next
        });
        Some(key)
    }

    /// Classify a folder and everything below it
    ///
    /// `parent_path` holds the names of the folder's ancestors; it is empty
    /// for a top-level folder.
    pub fn classify_folder(&self, folder: &Folder, parent_path: &[String]) -> LayerMap {
        self.classify_under(folder, &FolderPath::new(parent_path.to_vec()))
    }

    fn classify_under(&self, folder: &Folder, parent: &FolderPath) -> LayerMap {
        let path = parent.child(&folder.name);

        let mut layers = LayerMap::new();
        for feature in &folder.items {
            let ctx = RuleContext::new(&path, &feature.name);
            if let Some(key) = self.key_for(&ctx) {
                layers.insert(key, feature.clone());
            }
        }

        for child in &folder.children {
            layers.merge(self.classify_under(child, &path));
        }

        layers
    }

    /// Classify a whole tree: per top-level folder, merged, then renamed once
    pub fn classify_tree(&self, tree: &FolderTree) -> LayerMap {
        let per_folder = tree.folders.iter().map(|folder| {
            let layers = self.classify_folder(folder, &[]);
            debug!(
                folder = %folder.name,
                layers = layers.len(),
                features = layers.feature_count(),
                "classified top-level folder"
            );
            layers
        });
        LayerMap::aggregate(per_folder).renamed(&self.renames)
    }
}
