//! Builders that turn in-memory folder trees back into KML text.

#![allow(dead_code)]

use kml2dxf::{Feature, Folder, FolderTree};

/// Escape text for use inside an XML element
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Serialize a folder tree as a KML 2.2 document
pub fn to_kml(tree: &FolderTree) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n<Document>\n",
    );
    for folder in &tree.folders {
        write_folder(&mut out, folder);
    }
    out.push_str("</Document>\n</kml>\n");
    out
}

fn write_folder(out: &mut String, folder: &Folder) {
    out.push_str(&format!("<Folder><name>{}</name>\n", escape(&folder.name)));
    for feature in &folder.items {
        write_placemark(out, feature);
    }
    for child in &folder.children {
        write_folder(out, child);
    }
    out.push_str("</Folder>\n");
}

fn write_placemark(out: &mut String, feature: &Feature) {
    out.push_str(&format!(
        "<Placemark><name>{}</name><LineString><coordinates>{}</coordinates></LineString></Placemark>\n",
        escape(&feature.name),
        escape(&feature.raw_coordinates)
    ));
}

/// A single top-level folder holding one placemark per coordinate string
pub fn flat_folder(name: &str, coordinates: &[&str]) -> Folder {
    coordinates
        .iter()
        .enumerate()
        .fold(Folder::new(name), |folder, (i, coords)| {
            folder.with_feature(Feature::new(format!("f{i}"), *coords))
        })
}
