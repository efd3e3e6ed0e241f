//! Shared types for the cartogram pipeline.

pub mod attribute;
pub mod error;
pub mod feature;
pub mod paths;
pub mod policy;
pub mod region;

pub use attribute::{AttributeType, AttributeValue, NumericValue};
pub use error::{ModelError, Result};
pub use feature::{Feature, FeatureSource, Schema};
pub use paths::DerivedPaths;
pub use policy::FailurePolicy;
pub use region::RegionEntry;
