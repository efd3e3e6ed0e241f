//! GeoJSON feature source.
//!
//! Only feature properties are read; geometries are skipped without being
//! materialized. A document may be a `FeatureCollection` or a single
//! `Feature`. The attribute schema is inferred from the property values of
//! all features.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use cartogram_model::{AttributeValue, Feature, FeatureSource, Schema};

use crate::error::{IngestError, Result};

const INLINE_ORIGIN: &str = "<inline>";

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// Features and schema loaded from a GeoJSON document.
#[derive(Debug, Clone)]
pub struct GeoJsonSource {
    origin: PathBuf,
    features: Vec<Feature>,
    schema: Schema,
}

impl GeoJsonSource {
    /// Read a GeoJSON file from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse a GeoJSON document; `origin` is only used for messages.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let document: RawDocument =
            serde_json::from_reader(reader).map_err(|source| IngestError::Json {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::from_document(document, origin)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes(), Path::new(INLINE_ORIGIN))
    }

    /// Build a source from features that are already in memory.
    pub fn from_features(features: Vec<Feature>) -> Self {
        let schema = Schema::infer(&features);
        Self {
            origin: PathBuf::from(INLINE_ORIGIN),
            features,
            schema,
        }
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    fn from_document(document: RawDocument, origin: &Path) -> Result<Self> {
        let features: Vec<Feature> = match document.kind.as_str() {
            "FeatureCollection" => document
                .features
                .into_iter()
                .map(|raw| convert_properties(raw.properties))
                .collect(),
            "Feature" => vec![convert_properties(document.properties)],
            other => {
                return Err(IngestError::UnsupportedDocument {
                    path: origin.to_path_buf(),
                    kind: other.to_string(),
                });
            }
        };
        let schema = Schema::infer(&features);
        debug!(
            source = %origin.display(),
            feature_count = features.len(),
            attribute_count = schema.len(),
            "loaded geojson features"
        );
        Ok(Self {
            origin: origin.to_path_buf(),
            features,
            schema,
        })
    }
}

impl FeatureSource for GeoJsonSource {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}

fn convert_properties(properties: Option<Map<String, Value>>) -> Feature {
    properties
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, to_attribute(value)))
        .collect()
}

/// Map a JSON value onto the attribute model. Arrays and objects are kept
/// as their JSON text.
pub fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(flag) => AttributeValue::Bool(flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => AttributeValue::Int(int),
            None => AttributeValue::Float(number.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(text) => AttributeValue::Str(text),
        other @ (Value::Array(_) | Value::Object(_)) => AttributeValue::Str(other.to_string()),
    }
}
