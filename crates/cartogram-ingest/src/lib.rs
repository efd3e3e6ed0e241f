//! Input loading for the cartogram pipeline.

pub mod csv_table;
pub mod error;
pub mod geojson;

pub use csv_table::{CsvRow, CsvTable, read_csv_table};
pub use error::{IngestError, Result};
pub use geojson::{GeoJsonSource, to_attribute};
