//! Tests for cartogram-model types.

use std::path::Path;

use cartogram_model::{
    AttributeType, AttributeValue, DerivedPaths, FailurePolicy, Feature, FeatureSource, Schema,
};

struct VecSource {
    features: Vec<Feature>,
    schema: Schema,
}

impl FeatureSource for VecSource {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}

#[test]
fn feature_source_reports_count_and_schema() {
    let features = vec![
        Feature::from_iter([("name", AttributeValue::from("A")), ("pop", 10_i64.into())]),
        Feature::from_iter([("name", AttributeValue::from("B")), ("pop", 20_i64.into())]),
    ];
    let schema = Schema::infer(&features);
    let source = VecSource { features, schema };

    assert_eq!(source.feature_count(), 2);
    assert_eq!(source.schema().declared_type("pop"), Some(AttributeType::Int));
    assert_eq!(
        source.features()[1].get("name"),
        Some(&AttributeValue::Str("B".to_string()))
    );
}

#[test]
fn derived_paths_cover_all_three_files() {
    let paths = DerivedPaths::from_dataset(Path::new("region.json")).expect("derive paths");
    let names: Vec<String> = paths
        .all()
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "region_data.csv",
            "region_data_processed.csv",
            "region_processedmap.json"
        ]
    );
}

#[test]
fn failure_policy_defaults_to_continue() {
    assert_eq!(FailurePolicy::default(), FailurePolicy::Continue);
    assert!(!FailurePolicy::Continue.halts());
    assert!(FailurePolicy::Halt.halts());
    assert_eq!(FailurePolicy::Halt.to_string(), "halt");
}
