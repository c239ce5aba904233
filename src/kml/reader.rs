//! KML document reader

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, info};

use super::{Feature, Folder, FolderTree, UNKNOWN_FEATURE, UNNAMED_FOLDER};
use crate::error::{ConvertError, Result};

/// Namespace assumed when the root element does not declare one
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Default folder nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// KML reader
///
/// ```rust,ignore
/// let tree = KmlReader::from_file("survey.kml")?.read()?;
/// println!("{}", tree.outline());
/// ```
#[derive(Debug, Clone)]
pub struct KmlReader {
    source: String,
    max_depth: usize,
}

impl KmlReader {
    /// Create a reader over KML text
    pub fn from_str(source: impl Into<String>) -> Self {
        KmlReader {
            source: source.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a reader over a KML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = fs::read_to_string(path.as_ref())?;
        info!(path = %path.as_ref().display(), bytes = source.len(), "loaded KML");
        Ok(Self::from_str(source))
    }

    /// Set the folder nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the document into a folder tree
    pub fn read(&self) -> Result<FolderTree> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(&self.source, options)?;
        let root = document.root_element();

        // Elements are matched in the root's namespace. A bare root also
        // accepts KML 2.2 elements below it.
        let namespace = root.tag_name().namespace();
        let parser = TreeParser {
            namespace,
            fallback: namespace.is_none().then_some(KML_NAMESPACE),
            max_depth: self.max_depth,
        };

        let mut top_folders = parser.document_folders(&document);
        if top_folders.is_empty() {
            debug!("no Document/Folder elements, falling back to outermost folders");
            top_folders = parser.outermost_folders(&document);
        }
        if top_folders.is_empty() {
            return Err(ConvertError::NoFolders);
        }

        let mut skipped = 0;
        let folders = top_folders
            .iter()
            .map(|node| parser.parse_folder(node, 1, &mut skipped))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            namespace = namespace.unwrap_or(KML_NAMESPACE),
            top_folders = folders.len(),
            skipped_placemarks = skipped,
            "parsed folder tree"
        );

        Ok(FolderTree {
            folders,
            skipped_placemarks: skipped,
        })
    }
}

struct TreeParser<'ns> {
    namespace: Option<&'ns str>,
    fallback: Option<&'static str>,
    max_depth: usize,
}

impl TreeParser<'_> {
    fn is_kml(&self, node: &Node, local_name: &str) -> bool {
        if !node.is_element() || node.tag_name().name() != local_name {
            return false;
        }
        let namespace = node.tag_name().namespace();
        namespace == self.namespace || (self.fallback.is_some() && namespace == self.fallback)
    }

    /// `Folder` elements directly under any `Document`
    fn document_folders<'a, 'input>(&self, document: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
        document
            .descendants()
            .filter(|node| self.is_kml(node, "Document"))
            .flat_map(move |doc| doc.children().filter(move |child| self.is_kml(child, "Folder")))
            .collect()
    }

    /// `Folder` elements with no `Folder` ancestor
    fn outermost_folders<'a, 'input>(&self, document: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
        document
            .descendants()
            .filter(|node| self.is_kml(node, "Folder"))
            .filter(|node| !node.ancestors().skip(1).any(|a| self.is_kml(&a, "Folder")))
            .collect()
    }

    fn name_of(&self, node: &Node) -> Option<String> {
        let name = node.children().find(|child| self.is_kml(child, "name"))?;
        let text = collect_text(&name);
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn parse_folder(&self, node: &Node, depth: usize, skipped: &mut usize) -> Result<Folder> {
        if depth > self.max_depth {
            return Err(ConvertError::NestingTooDeep {
                depth,
                limit: self.max_depth,
            });
        }

        let mut folder = Folder::new(self.name_of(node).unwrap_or_else(|| UNNAMED_FOLDER.to_string()));

        for child in node.children().filter(Node::is_element) {
            if self.is_kml(&child, "Placemark") {
                match self.parse_placemark(&child) {
                    Some(feature) => folder.items.push(feature),
                    None => *skipped += 1,
                }
            } else if self.is_kml(&child, "Folder") {
                folder.children.push(self.parse_folder(&child, depth + 1, skipped)?);
            }
        }

        Ok(folder)
    }

    fn parse_placemark(&self, node: &Node) -> Option<Feature> {
        let name = self
            .name_of(node)
            .unwrap_or_else(|| UNKNOWN_FEATURE.to_string());

        let coordinates = node
            .descendants()
            .find(|n| self.is_kml(n, "coordinates"))
            .or_else(|| {
                node.descendants()
                    .find(|n| n.is_element() && n.tag_name().name() == "coordinates")
            });

        match coordinates {
            Some(element) => Some(Feature::new(name, collect_text(&element).trim())),
            None => {
                debug!(placemark = %name, "placemark without coordinates skipped");
                None
            }
        }
    }
}

fn collect_text(node: &Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}
