//! End-to-end conversion: KML in, DXF files out

mod common;

use std::fs;

use common::{identity, AERODROME_KML};
use kml2dxf::convert::output_path;
use kml2dxf::{
    CodePage, ConvertError, Converter, ConverterConfig, DxfWriter, EmitOptions, Emitter,
    EntityType, Feature, LayerMap, Projection, Vector2,
};

fn write_sample(dir: &std::path::Path) -> std::path::PathBuf {
    let input = dir.join("LFML.kml");
    fs::write(&input, AERODROME_KML).unwrap();
    input
}

/// Group code / value pairs of a DXF text file
fn pairs(dxf: &str) -> Vec<(i32, String)> {
    let lines: Vec<&str> = dxf.lines().collect();
    lines
        .chunks(2)
        .map(|pair| (pair[0].trim().parse().unwrap(), pair[1].to_string()))
        .collect()
}

#[test]
fn two_point_feature_becomes_polyline() {
    let mut layers = LayerMap::new();
    layers.insert("Runway", Feature::new("axe", "1.0,2.0,0 1.1,2.1,0"));

    let (document, stats) = Emitter::default().emit(&layers, &identity);
    assert_eq!(stats.polylines, 1);

    let entities: Vec<&EntityType> = document.entities().collect();
    match entities.as_slice() {
        [EntityType::LwPolyline(poly)] => {
            assert_eq!(poly.vertices, vec![Vector2::new(1.0, 2.0), Vector2::new(1.1, 2.1)]);
            assert_eq!(poly.common.layer, "Runway");
        }
        other => panic!("expected one polyline, got {:?}", other),
    }

    let dxf = String::from_utf8(DxfWriter::new(&document).write_to_vec().unwrap()).unwrap();
    let pairs = pairs(&dxf);
    let start = pairs
        .iter()
        .position(|(code, value)| *code == 0 && value == "LWPOLYLINE")
        .unwrap();
    let vertices: Vec<&str> = pairs[start..]
        .iter()
        .filter(|(code, _)| *code == 10 || *code == 20)
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(vertices, vec!["1.0", "2.0", "1.1", "2.1"]);
}

#[test]
fn convert_sample_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());
    let out_dir = dir.path().join("out");

    let converter = Converter::new(ConverterConfig::default()).unwrap();
    let report = converter.convert(&input, &out_dir, "LFML").unwrap();

    assert_eq!(report.layers, 4);
    assert_eq!(report.features, 8);
    assert_eq!(report.excluded, 1);
    assert_eq!(report.skipped_placemarks, 1);
    assert_eq!(report.dropped_features(), 1);

    let expected: Vec<_> = Projection::ALL
        .iter()
        .map(|p| output_path(&out_dir, "LFML", *p))
        .collect();
    assert_eq!(report.output_paths(), expected.iter().map(|p| p.as_path()).collect::<Vec<_>>());

    for output in &report.outputs {
        assert_eq!(output.stats.points, 2);
        assert_eq!(output.stats.labels, 2);
        assert_eq!(output.stats.polylines, 4);

        let dxf = fs::read_to_string(&output.path).unwrap();
        let pairs = pairs(&dxf);
        assert_eq!(pairs.last(), Some(&(0, "EOF".to_string())));

        let layers: Vec<&str> = pairs
            .iter()
            .filter(|(code, _)| *code == 8)
            .map(|(_, value)| value.as_str())
            .collect();
        for layer in ["Runway", "APPUI", "Piste_GD", "ZONE_OFZ"] {
            assert!(layers.contains(&layer), "missing layer {layer}");
        }
        assert!(pairs.contains(&(1, "A1".to_string())));
    }
}

#[test]
fn lambert_output_is_in_metres() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());

    let config = ConverterConfig {
        projections: vec![Projection::Lambert93],
        ..ConverterConfig::default()
    };
    let report = Converter::new(config)
        .unwrap()
        .convert(&input, dir.path(), "LFML")
        .unwrap();
    assert_eq!(report.outputs.len(), 1);

    let dxf = fs::read_to_string(&report.outputs[0].path).unwrap();
    let pairs = pairs(&dxf);
    let insunits = pairs
        .iter()
        .position(|(code, value)| *code == 9 && value == "$INSUNITS")
        .unwrap();
    assert_eq!(pairs[insunits + 1], (70, "6".to_string()));

    // Every easting lands in the Lambert-93 range around Marseille
    let extmin = pairs
        .iter()
        .position(|(code, value)| *code == 9 && value == "$EXTMIN")
        .unwrap();
    let x: f64 = pairs[extmin + 1].1.parse().unwrap();
    assert!((870_000.0..890_000.0).contains(&x), "easting {x}");
}

#[test]
fn windows_1252_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path());

    let config = ConverterConfig {
        projections: vec![Projection::Wgs84],
        output: EmitOptions {
            code_page: CodePage::Ansi1252,
            ..EmitOptions::default()
        },
        ..ConverterConfig::default()
    };
    let report = Converter::new(config)
        .unwrap()
        .convert(&input, dir.path(), "LFML")
        .unwrap();

    let bytes = fs::read(&report.outputs[0].path).unwrap();
    let text: String = bytes.iter().map(|&b| b as char).collect();
    assert!(text.contains("ANSI_1252"));
}

#[test]
fn unmappable_label_is_left_out_and_the_point_kept() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cjk.kml");
    fs::write(
        &input,
        r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document><Folder><name>SITE</name>
          <Placemark><name>滑走路</name><Point><coordinates>5.2,43.4</coordinates></Point></Placemark>
          <Placemark><name>Sécurité</name><Point><coordinates>5.3,43.5</coordinates></Point></Placemark>
        </Folder></Document></kml>"#,
    )
    .unwrap();
    let out_dir = dir.path().join("out");

    let config = ConverterConfig {
        projections: vec![Projection::Wgs84],
        output: EmitOptions {
            code_page: CodePage::Ansi1252,
            ..EmitOptions::default()
        },
        ..ConverterConfig::default()
    };
    let report = Converter::new(config)
        .unwrap()
        .convert(&input, &out_dir, "cjk")
        .unwrap();

    let stats = report.outputs[0].stats;
    assert_eq!((stats.points, stats.labels, stats.unencodable_labels), (2, 1, 1));

    let bytes = fs::read(&report.outputs[0].path).unwrap();
    assert!(bytes.windows(9).any(|w| w == b"S\xE9curit\xE9\n"));
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Converter::new(ConverterConfig::default())
        .unwrap()
        .convert(dir.path().join("nope.kml"), dir.path(), "nope")
        .unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
}

#[test]
fn document_without_folders_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.kml");
    fs::write(
        &input,
        r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
          <Placemark><name>p</name><Point><coordinates>1,2</coordinates></Point></Placemark>
        </Document></kml>"#,
    )
    .unwrap();

    let err = Converter::new(ConverterConfig::default())
        .unwrap()
        .convert(&input, dir.path(), "flat")
        .unwrap_err();
    assert!(matches!(err, ConvertError::NoFolders));
}

#[test]
fn tree_outline_of_sample() {
    let tree = kml2dxf::KmlReader::from_str(AERODROME_KML).read().unwrap();
    let outline = tree.outline();
    assert!(outline.starts_with("AERODROME/\n  - Axe piste 13L/31R\n"));
    assert!(outline.contains("SITE/\n  APPUI/\n    - A1\n    - A2\n"));
}
