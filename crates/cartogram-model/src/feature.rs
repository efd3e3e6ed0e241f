//! Map features and the attribute schema derived from them.

use std::collections::BTreeMap;

use crate::attribute::{AttributeType, AttributeValue};

/// One geometry record of a map. Only the attributes are kept; the
/// geometry itself is the external binary's business.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    pub properties: BTreeMap<String, AttributeValue>,
}

impl Feature {
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.properties.get(name)
    }
}

impl<K, I> FromIterator<(K, I)> for Feature
where
    K: Into<String>,
    I: Into<AttributeValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// Declared type per attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    properties: BTreeMap<String, AttributeType>,
}

impl Schema {
    /// Infer the schema by merging the observed type of every attribute
    /// across all features.
    pub fn infer<'a, I>(features: I) -> Self
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        let mut properties: BTreeMap<String, AttributeType> = BTreeMap::new();
        for feature in features {
            for (name, value) in &feature.properties {
                let observed = value.attribute_type();
                properties
                    .entry(name.clone())
                    .and_modify(|declared| *declared = declared.merge(observed))
                    .or_insert(observed);
            }
        }
        Self { properties }
    }

    pub fn declared_type(&self, name: &str) -> Option<AttributeType> {
        self.properties.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Anything that can enumerate map features together with their schema.
pub trait FeatureSource {
    fn features(&self) -> &[Feature];

    fn schema(&self) -> &Schema;

    fn feature_count(&self) -> usize {
        self.features().len()
    }
}
