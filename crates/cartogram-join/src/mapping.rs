//! Region name to scaled value lookup built from map features.

use std::collections::BTreeMap;

use tracing::debug;

use cartogram_model::{AttributeValue, FeatureSource, NumericValue};

use crate::config::JoinConfig;
use crate::error::{JoinError, Result};

/// Scaled value per region name, built once from every feature of a map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMapping {
    values: BTreeMap<String, NumericValue>,
}

impl AttributeMapping {
    /// Build the mapping `name -> value * scaling` over all features.
    ///
    /// The value attribute must be declared `int` or `float`. Integer
    /// values stay exact under an integral scaling factor. When two features
    /// share a region name the later one wins.
    pub fn build<S>(source: &S, config: &JoinConfig) -> Result<Self>
    where
        S: FeatureSource + ?Sized,
    {
        if let Some(declared) = source.schema().declared_type(&config.value_field)
            && !declared.is_numeric()
        {
            return Err(JoinError::TypeMismatch {
                attribute: config.value_field.clone(),
                found: declared,
            });
        }

        let mut values = BTreeMap::new();
        for (index, feature) in source.features().iter().enumerate() {
            let name = feature
                .get(&config.name_field)
                .and_then(AttributeValue::as_text)
                .ok_or_else(|| JoinError::MissingAttribute {
                    attribute: config.name_field.clone(),
                    feature: index,
                })?;
            let raw = feature
                .get(&config.value_field)
                .ok_or_else(|| JoinError::MissingAttribute {
                    attribute: config.value_field.clone(),
                    feature: index,
                })?;
            let value = raw.as_numeric().ok_or_else(|| JoinError::TypeMismatch {
                attribute: config.value_field.clone(),
                found: raw.attribute_type(),
            })?;
            if let Some(previous) = values.insert(name.clone(), value.scale(config.scaling)) {
                debug!(region = %name, %previous, "duplicate region name, keeping later feature");
            }
        }
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<NumericValue> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Region names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartogram_ingest::GeoJsonSource;
    use cartogram_model::{AttributeType, Feature};

    fn source(rows: &[(&str, AttributeValue)]) -> GeoJsonSource {
        GeoJsonSource::from_features(
            rows.iter()
                .map(|(name, pop)| {
                    Feature::from_iter([("name", AttributeValue::from(*name)), ("pop", pop.clone())])
                })
                .collect(),
        )
    }

    #[test]
    fn scales_every_value() {
        let source = source(&[("A", 10_i64.into()), ("B", 2.5.into())]);
        let mapping =
            AttributeMapping::build(&source, &JoinConfig::new("name", "pop").with_scaling(2.0))
                .unwrap();
        assert_eq!(mapping.get("A"), Some(NumericValue::Int(20)));
        assert_eq!(mapping.get("B"), Some(NumericValue::Float(5.0)));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn fractional_scaling_turns_integers_into_floats() {
        let source = source(&[("A", 3_i64.into())]);
        let mapping =
            AttributeMapping::build(&source, &JoinConfig::new("name", "pop").with_scaling(0.5))
                .unwrap();
        assert_eq!(mapping.get("A"), Some(NumericValue::Float(1.5)));
    }

    #[test]
    fn later_duplicate_wins() {
        let source = source(&[("A", 1_i64.into()), ("A", 7_i64.into())]);
        let mapping = AttributeMapping::build(&source, &JoinConfig::new("name", "pop")).unwrap();
        assert_eq!(mapping.get("A"), Some(NumericValue::Int(7)));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn text_values_are_a_type_mismatch() {
        let source = source(&[("A", "many".into())]);
        let error = AttributeMapping::build(&source, &JoinConfig::new("name", "pop")).unwrap_err();
        match error {
            JoinError::TypeMismatch { attribute, found } => {
                assert_eq!(attribute, "pop");
                assert_eq!(found, AttributeType::Str);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_value_in_numeric_column_is_a_type_mismatch() {
        let source = source(&[("A", 1_i64.into()), ("B", AttributeValue::Null)]);
        let error = AttributeMapping::build(&source, &JoinConfig::new("name", "pop")).unwrap_err();
        assert!(matches!(
            error,
            JoinError::TypeMismatch {
                found: AttributeType::Null,
                ..
            }
        ));
    }

    #[test]
    fn missing_name_attribute_names_the_feature() {
        let source = GeoJsonSource::from_features(vec![Feature::from_iter([(
            "pop",
            AttributeValue::from(3_i64),
        )])]);
        let error = AttributeMapping::build(&source, &JoinConfig::new("name", "pop")).unwrap_err();
        assert_eq!(error.to_string(), "feature 0 has no attribute 'name'");
    }

    #[test]
    fn numeric_names_are_joinable_as_text() {
        let source = GeoJsonSource::from_features(vec![Feature::from_iter([
            ("code", AttributeValue::from(42_i64)),
            ("pop", AttributeValue::from(3_i64)),
        ])]);
        let mapping = AttributeMapping::build(&source, &JoinConfig::new("code", "pop")).unwrap();
        assert_eq!(mapping.get("42"), Some(NumericValue::Int(3)));
    }
}
