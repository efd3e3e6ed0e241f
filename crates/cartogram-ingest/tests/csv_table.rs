use std::fs;

use cartogram_ingest::read_csv_table;

#[test]
fn reads_headers_rows_and_line_numbers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("region_data.csv");
    fs::write(&path, "Region Id,Region Data,Region Name\n1,0,A\n2,0,B\n").expect("write csv");

    let table = read_csv_table(&path).expect("read csv");

    assert_eq!(table.headers, vec!["Region Id", "Region Data", "Region Name"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[0].fields, vec!["1", "0", "A"]);
    assert_eq!(table.rows[0].line, 2);
    assert_eq!(table.rows[1].line, 3);
    assert!(!table.byte_order_mark);
}

#[test]
fn keeps_ragged_rows_and_untrimmed_cells() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("ragged.csv");
    fs::write(&path, "a,b,c\n1, x ,y\n2,z\n").expect("write csv");

    let table = read_csv_table(&path).expect("read csv");

    assert_eq!(table.rows[0].fields, vec!["1", " x ", "y"]);
    assert_eq!(table.rows[1].fields, vec!["2", "z"]);
}

#[test]
fn strips_byte_order_mark_from_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bom.csv");
    fs::write(&path, "\u{feff}id,value,name\n1,0,A\n").expect("write csv");

    let table = read_csv_table(&path).expect("read csv");

    assert_eq!(table.headers[0], "id");
    assert!(table.byte_order_mark);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = read_csv_table(&dir.path().join("absent.csv")).expect_err("missing file");
    assert!(error.to_string().contains("absent.csv"));
}
