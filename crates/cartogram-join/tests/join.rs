//! Integration tests for the region table join.

use std::fs;
use std::path::{Path, PathBuf};

use cartogram_ingest::GeoJsonSource;
use cartogram_join::{JoinConfig, JoinError, join_region_csv};

const REGION_MAP: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "name": "A", "pop": 10, "label": "alpha" }, "geometry": null },
    { "type": "Feature", "properties": { "name": "B", "pop": 20, "label": "beta" }, "geometry": null }
  ]
}"#;

struct Fixture {
    _dir: tempfile::TempDir,
    source_csv: PathBuf,
    output_csv: PathBuf,
}

fn fixture(csv: &str) -> Fixture {
    let dir = tempfile::tempdir().expect("temp dir");
    let source_csv = dir.path().join("region_data.csv");
    let output_csv = dir.path().join("region_data_processed.csv");
    fs::write(&source_csv, csv).expect("write source csv");
    Fixture {
        _dir: dir,
        source_csv,
        output_csv,
    }
}

fn regions() -> GeoJsonSource {
    GeoJsonSource::from_json_str(REGION_MAP).expect("parse map")
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read output")
}

#[test]
fn joins_and_scales_region_values() {
    let fx = fixture("Region Id,Region Data,Region Name\n1,0,A\n2,0,B\n");
    let config = JoinConfig::new("name", "pop").with_scaling(2.0);

    let summary =
        join_region_csv(&regions(), &fx.source_csv, &fx.output_csv, &config).expect("join");

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.mapped_regions, 2);
    assert!(summary.unused_regions.is_empty());
    insta::assert_snapshot!(read(&fx.output_csv), @r"
    Region Id,Region Data,Region Name
    1,20,A
    2,40,B
    ");
}

#[test]
fn columns_are_taken_by_position_not_by_header() {
    let fx = fixture("name,id,value\n7,999,B\n");
    let config = JoinConfig::new("name", "pop");

    join_region_csv(&regions(), &fx.source_csv, &fx.output_csv, &config).expect("join");

    assert_eq!(read(&fx.output_csv), "name,id,value\n7,20,B\n");
}

#[test]
fn byte_order_mark_header_is_written_back_unchanged() {
    let fx = fixture("\u{feff}id,data,name\n1,0,A\n");

    join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "pop"),
    )
    .expect("join");

    assert_eq!(read(&fx.output_csv), "\u{feff}id,data,name\n1,10,A\n");
}

#[test]
fn large_integer_values_are_not_rounded() {
    let map = r#"{
      "type": "FeatureCollection",
      "features": [
        { "type": "Feature", "properties": { "name": "A", "pop": 9007199254740993 }, "geometry": null }
      ]
    }"#;
    let source = GeoJsonSource::from_json_str(map).expect("parse map");
    let fx = fixture("id,data,name\n1,0,A\n");

    join_region_csv(&source, &fx.source_csv, &fx.output_csv, &JoinConfig::new("name", "pop"))
        .expect("join");

    assert_eq!(read(&fx.output_csv), "id,data,name\n1,9007199254740993,A\n");
}

#[test]
fn source_csv_is_left_untouched() {
    let original = "id,data,name\n1,5,A\n";
    let fx = fixture(original);

    join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "pop"),
    )
    .expect("join");

    assert_eq!(read(&fx.source_csv), original);
}

#[test]
fn reports_regions_no_row_referenced() {
    let fx = fixture("id,data,name\n1,0,B\n");

    let summary = join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "pop"),
    )
    .expect("join");

    assert_eq!(summary.unused_regions, vec!["A".to_string()]);
}

#[test]
fn text_value_attribute_fails_before_writing() {
    let fx = fixture("id,data,name\n1,0,A\n");

    let error = join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "label"),
    )
    .expect_err("label is text");

    assert_eq!(
        error.to_string(),
        "cannot handle 'label' because it is of type 'str'; valid types are: 'int', 'float'"
    );
    assert!(!fx.output_csv.exists());
}

#[test]
fn unknown_region_fails_without_output() {
    let fx = fixture("id,data,name\n1,0,A\n2,0,Atlantis\n");

    let error = join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "pop"),
    )
    .expect_err("Atlantis is not on the map");

    match &error {
        JoinError::UnknownRegion { name, line } => {
            assert_eq!(name, "Atlantis");
            assert_eq!(*line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!fx.output_csv.exists());
}

#[test]
fn unknown_region_leaves_existing_destination_alone() {
    let fx = fixture("id,data,name\n1,0,Nowhere\n");
    fs::write(&fx.output_csv, "previous run\n").expect("write stale output");

    join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "pop"),
    )
    .expect_err("unknown region");

    assert_eq!(read(&fx.output_csv), "previous run\n");
}

#[test]
fn header_must_have_three_columns() {
    let fx = fixture("id,name\n1,A\n");

    let error = join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "pop"),
    )
    .expect_err("two columns");

    assert!(matches!(error, JoinError::HeaderShape { found: 2, .. }));
}

#[test]
fn rows_must_have_three_fields() {
    let fx = fixture("id,data,name\n1,0,A\n2,0\n");

    let error = join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "pop"),
    )
    .expect_err("short row");

    assert!(matches!(error, JoinError::RowShape { line: 3, found: 2 }));
    assert!(!fx.output_csv.exists());
}

#[test]
fn configuration_is_checked_before_any_io() {
    let missing = PathBuf::from("definitely/not/here.csv");

    let error = join_region_csv(
        &regions(),
        &missing,
        &missing,
        &JoinConfig::new("", "pop"),
    )
    .expect_err("blank name field");

    assert!(matches!(error, JoinError::MissingNameAttribute));
}

#[test]
fn missing_source_csv_is_an_ingest_error() {
    let fx = fixture("id,data,name\n");
    fs::remove_file(&fx.source_csv).expect("remove source");

    let error = join_region_csv(
        &regions(),
        &fx.source_csv,
        &fx.output_csv,
        &JoinConfig::new("name", "pop"),
    )
    .expect_err("no source csv");

    assert!(matches!(error, JoinError::Ingest(_)));
}
