use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kml2dxf::{
    Classifier, Emitter, Feature, Folder, FolderTree, KmlReader, Projection, RuleTable,
};

const SECTIONS: [&str; 6] = [
    "APPUI",
    "Piste_Gauche",
    "Piste_Droite",
    "Section 2",
    "Courbe atterrissage",
    "Anciennes surfaces",
];

fn survey(top_folders: usize, features_per_folder: usize) -> FolderTree {
    let folders = (0..top_folders)
        .map(|i| {
            SECTIONS.iter().fold(Folder::new(format!("SITE {i}")), |site, section| {
                let leaf = (0..features_per_folder).fold(Folder::new("Tronçon"), |folder, j| {
                    let lon = 5.2 + j as f64 * 1e-4;
                    folder.with_feature(Feature::new(
                        format!("P{j}"),
                        format!("{lon},43.43,0 {lon},43.44,0"),
                    ))
                });
                site.with_child(Folder::new(*section).with_child(leaf))
            })
        })
        .collect();
    FolderTree::new(folders)
}

fn to_kml(tree: &FolderTree) -> String {
    fn folder(out: &mut String, f: &Folder) {
        out.push_str(&format!("<Folder><name>{}</name>", f.name));
        for feature in &f.items {
            out.push_str(&format!(
                "<Placemark><name>{}</name><LineString><coordinates>{}</coordinates></LineString></Placemark>",
                feature.name, feature.raw_coordinates
            ));
        }
        for child in &f.children {
            folder(out, child);
        }
        out.push_str("</Folder>");
    }
    let mut out = String::from(r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>"#);
    for f in &tree.folders {
        folder(&mut out, f);
    }
    out.push_str("</Document></kml>");
    out
}

fn bench_classify(c: &mut Criterion) {
    let classifier = Classifier::new(&RuleTable::default()).unwrap();
    let tree = survey(20, 50);

    c.bench_function("classify_tree 6000 placemarks", |b| {
        b.iter(|| classifier.classify_tree(black_box(&tree)))
    });

    c.bench_function("compile default rule table", |b| {
        b.iter(|| Classifier::new(black_box(&RuleTable::default())).unwrap())
    });
}

fn bench_read(c: &mut Criterion) {
    let kml = to_kml(&survey(20, 50));
    c.bench_function("read 6000 placemarks", |b| {
        b.iter(|| KmlReader::from_str(black_box(kml.as_str())).read().unwrap())
    });
}

fn bench_emit(c: &mut Criterion) {
    let classifier = Classifier::new(&RuleTable::default()).unwrap();
    let layers = classifier.classify_tree(&survey(20, 50));
    let emitter = Emitter::default();

    c.bench_function("emit Lambert93", |b| {
        b.iter(|| emitter.emit_projection(black_box(&layers), Projection::Lambert93))
    });
}

criterion_group!(benches, bench_classify, bench_read, bench_emit);
criterion_main!(benches);
