//! Error types for the attribute join.

use std::path::PathBuf;

use thiserror::Error;

use cartogram_ingest::IngestError;
use cartogram_model::AttributeType;

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("need an attribute for 'Region Name'")]
    MissingNameAttribute,

    #[error("need an attribute for 'Region Data'")]
    MissingValueAttribute,

    #[error("scaling factor must be a finite number, got {scaling}")]
    InvalidScaling { scaling: f64 },

    #[error("feature {feature} has no attribute '{attribute}'")]
    MissingAttribute { attribute: String, feature: usize },

    #[error(
        "cannot handle '{attribute}' because it is of type '{found}'; valid types are: {}",
        AttributeType::numeric_names()
    )]
    TypeMismatch {
        attribute: String,
        found: AttributeType,
    },

    #[error("{} must have exactly 3 columns (id, data, name), found {found}", path.display())]
    HeaderShape { path: PathBuf, found: usize },

    #[error("line {line}: expected 3 fields (id, data, name), found {found}")]
    RowShape { line: u64, found: usize },

    #[error("line {line}: region '{name}' has no matching feature in the map")]
    UnknownRegion { name: String, line: u64 },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, JoinError>;
