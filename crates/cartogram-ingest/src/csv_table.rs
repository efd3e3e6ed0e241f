use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A CSV file read verbatim: header names and data rows, with the 1-based
/// line number of each row kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Header names without a leading byte order mark.
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
    /// Whether the file started with a UTF-8 byte order mark.
    pub byte_order_mark: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: u64,
    pub fields: Vec<String>,
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

/// Read a headed CSV file. Rows may have any number of fields; callers
/// decide which shapes they accept. Cell values are not trimmed.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buffered = BufReader::new(file);
    let byte_order_mark = buffered
        .fill_buf()
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .starts_with(UTF8_BOM);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(buffered);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, csv::Position::line);
        rows.push(CsvRow {
            line,
            fields: record.iter().map(str::to_string).collect(),
        });
    }
    debug!(
        source = %path.display(),
        column_count = headers.len(),
        row_count = rows.len(),
        byte_order_mark,
        "read csv table"
    );
    Ok(CsvTable {
        headers,
        rows,
        byte_order_mark,
    })
}
