use crate::attribute::NumericValue;

/// One reconciled row of the region table: identifier, scaled data value,
/// region name, in that column order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionEntry {
    pub identifier: String,
    pub value: NumericValue,
    pub name: String,
}

impl RegionEntry {
    pub fn new(
        identifier: impl Into<String>,
        value: impl Into<NumericValue>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            value: value.into(),
            name: name.into(),
        }
    }

    /// Fields in positional CSV order.
    pub fn to_record(&self) -> [String; 3] {
        [
            self.identifier.clone(),
            self.value.to_string(),
            self.name.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_positional_order() {
        let entry = RegionEntry::new("1", 20.0, "A");
        assert_eq!(entry.to_record(), ["1".to_string(), "20".to_string(), "A".to_string()]);
    }

    #[test]
    fn large_integers_are_written_exactly() {
        let entry = RegionEntry::new("7", 9_007_199_254_740_993_i64, "B");
        assert_eq!(entry.to_record()[1], "9007199254740993");
    }
}
