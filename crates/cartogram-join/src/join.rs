//! Positional rewrite of a region table against an attribute mapping.
//!
//! The three columns of the region table are consumed by position, whatever
//! their header text says: identifier first, data value second, region name
//! third. Identifier and name pass through unchanged; the data value is
//! replaced by the scaled mapping value for the row's region name.
//!
//! Every row is reconciled in memory before the destination is created, so a
//! failed join never leaves a partially written file behind.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::{debug, info};

use cartogram_ingest::{CsvTable, read_csv_table};
use cartogram_model::{FeatureSource, RegionEntry};

use crate::config::JoinConfig;
use crate::error::{JoinError, Result};
use crate::mapping::AttributeMapping;

const REGION_COLUMNS: usize = 3;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A region table whose data column has been replaced by mapped values.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedTable {
    pub headers: Vec<String>,
    pub entries: Vec<RegionEntry>,
    /// Written back ahead of the header when the source table carried one.
    pub byte_order_mark: bool,
}

/// Outcome of a completed join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinSummary {
    /// Rows written to the destination.
    pub rows: usize,
    /// Distinct region names in the mapping.
    pub mapped_regions: usize,
    /// Mapped region names that no row referenced, sorted.
    pub unused_regions: Vec<String>,
}

/// Reconcile every row of `table` against `mapping`.
pub fn join_table(
    table: &CsvTable,
    source_path: &Path,
    mapping: &AttributeMapping,
) -> Result<JoinedTable> {
    if table.headers.len() != REGION_COLUMNS {
        return Err(JoinError::HeaderShape {
            path: source_path.to_path_buf(),
            found: table.headers.len(),
        });
    }
    let mut entries = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let [identifier, _data, name] = row.fields.as_slice() else {
            return Err(JoinError::RowShape {
                line: row.line,
                found: row.fields.len(),
            });
        };
        let value = mapping
            .get(name)
            .ok_or_else(|| JoinError::UnknownRegion {
                name: name.clone(),
                line: row.line,
            })?;
        entries.push(RegionEntry::new(identifier.as_str(), value, name.as_str()));
    }
    Ok(JoinedTable {
        headers: table.headers.clone(),
        entries,
        byte_order_mark: table.byte_order_mark,
    })
}

/// Write a joined table with its original header, byte order mark included.
pub fn write_joined_csv(path: &Path, joined: &JoinedTable) -> Result<()> {
    let write_error = |source: csv::Error| JoinError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(|error| write_error(csv::Error::from(error)))?;
    if joined.byte_order_mark {
        file.write_all(UTF8_BOM)
            .map_err(|error| write_error(csv::Error::from(error)))?;
    }
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);
    writer.write_record(&joined.headers).map_err(write_error)?;
    for entry in &joined.entries {
        writer.write_record(entry.to_record()).map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|error| write_error(csv::Error::from(error)))?;
    Ok(())
}

/// Build the attribute mapping from `source`, rewrite `csv_path` against it
/// and write the result to `output_path`.
///
/// The configuration is validated before any file is read. On error the
/// destination is neither created nor modified.
pub fn join_region_csv<S>(
    source: &S,
    csv_path: &Path,
    output_path: &Path,
    config: &JoinConfig,
) -> Result<JoinSummary>
where
    S: FeatureSource + ?Sized,
{
    config.validate()?;
    let mapping = AttributeMapping::build(source, config)?;
    debug!(
        name_field = %config.name_field,
        value_field = %config.value_field,
        scaling = config.scaling,
        region_count = mapping.len(),
        "built attribute mapping"
    );

    let table = read_csv_table(csv_path)?;
    let joined = join_table(&table, csv_path, &mapping)?;
    write_joined_csv(output_path, &joined)?;

    let referenced: BTreeSet<&str> = joined
        .entries
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    let unused_regions: Vec<String> = mapping
        .names()
        .filter(|name| !referenced.contains(name))
        .map(str::to_string)
        .collect();
    info!(
        source = %csv_path.display(),
        output = %output_path.display(),
        row_count = joined.entries.len(),
        unused_count = unused_regions.len(),
        "joined region table"
    );
    Ok(JoinSummary {
        rows: joined.entries.len(),
        mapped_regions: mapping.len(),
        unused_regions,
    })
}
