//! Attribute join between map features and a region table.
//!
//! The join builds a region name to value mapping from the features of a
//! normalized map, scales the values, and rewrites the region table so its
//! data column carries the mapped values.

pub mod config;
pub mod error;
pub mod join;
pub mod mapping;

pub use config::JoinConfig;
pub use error::{JoinError, Result};
pub use join::{JoinSummary, JoinedTable, join_region_csv, join_table, write_joined_csv};
pub use mapping::AttributeMapping;
