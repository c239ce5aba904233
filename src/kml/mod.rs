//! KML folder tree
//!
//! The reader turns a KML document into a tree of [`Folder`]s holding
//! [`Feature`]s. The tree is read-only once built; classification borrows it.

mod coordinates;
mod reader;

pub use coordinates::{parse_coordinates, Coordinate};
pub use reader::{KmlReader, DEFAULT_MAX_DEPTH, KML_NAMESPACE};

use std::fmt::Write as _;

/// Name given to folders without a `<name>` element
pub const UNNAMED_FOLDER: &str = "unnamed";

/// Name given to placemarks without a `<name>` element
pub const UNKNOWN_FEATURE: &str = "unknown";

/// A named placemark with its unparsed coordinate text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feature {
    pub name: String,
    /// `lon,lat[,elevation]` records separated by whitespace
    pub raw_coordinates: String,
}

impl Feature {
    pub fn new(name: impl Into<String>, raw_coordinates: impl Into<String>) -> Self {
        Feature {
            name: name.into(),
            raw_coordinates: raw_coordinates.into(),
        }
    }

    /// Parse the coordinate text
    pub fn coordinates(&self) -> Result<Vec<Coordinate>, crate::error::FeatureError> {
        parse_coordinates(&self.raw_coordinates)
    }
}

/// A KML folder: placemarks plus nested folders, both in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folder {
    pub name: String,
    pub items: Vec<Feature>,
    pub children: Vec<Folder>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Folder {
            name: name.into(),
            items: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style feature append
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.items.push(feature);
        self
    }

    /// Builder-style subfolder append
    pub fn with_child(mut self, child: Folder) -> Self {
        self.children.push(child);
        self
    }

    /// Number of features in this folder and all subfolders
    pub fn feature_count(&self) -> usize {
        self.items.len() + self.children.iter().map(Folder::feature_count).sum::<usize>()
    }
}

/// The top-level folders of a KML document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FolderTree {
    pub folders: Vec<Folder>,
    /// Placemarks left out because they had no `<coordinates>` element
    pub skipped_placemarks: usize,
}

impl FolderTree {
    pub fn new(folders: Vec<Folder>) -> Self {
        FolderTree {
            folders,
            skipped_placemarks: 0,
        }
    }

    /// Total number of features in the tree
    pub fn feature_count(&self) -> usize {
        self.folders.iter().map(Folder::feature_count).sum()
    }

    /// Render the hierarchy as an indented outline
    ///
    /// Folders are listed by name, placemarks are prefixed with `- `.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for folder in &self.folders {
            write_outline(&mut out, folder, 0);
        }
        out
    }
}

fn write_outline(out: &mut String, folder: &Folder, level: usize) {
    let indent = "  ".repeat(level);
    let _ = writeln!(out, "{indent}{}/", folder.name);
    for feature in &folder.items {
        let _ = writeln!(out, "{indent}  - {}", feature.name);
    }
    for child in &folder.children {
        write_outline(out, child, level + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Folder {
        Folder::new("SITE")
            .with_feature(Feature::new("Seuil 13L", "5.2,43.4,0"))
            .with_child(
                Folder::new("APPUI")
                    .with_feature(Feature::new("A1", "5.1,43.4,0"))
                    .with_feature(Feature::new("A2", "5.1,43.5,0")),
            )
    }

    #[test]
    fn test_feature_count() {
        assert_eq!(sample().feature_count(), 3);
        let tree = FolderTree::new(vec![sample(), Folder::new("EMPTY")]);
        assert_eq!(tree.feature_count(), 3);
    }

    #[test]
    fn test_outline() {
        let tree = FolderTree::new(vec![sample()]);
        assert_eq!(
            tree.outline(),
            "SITE/\n  - Seuil 13L\n  APPUI/\n    - A1\n    - A2\n"
        );
    }
}
