use std::fmt;

/// A single feature property value as read from a geometry source.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
}

impl AttributeValue {
    /// Declared type of this value.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::Float(_) => AttributeType::Float,
            AttributeValue::Str(_) => AttributeType::Str,
            AttributeValue::Bool(_) => AttributeType::Bool,
            AttributeValue::Null => AttributeType::Null,
        }
    }

    /// Numeric view of the value; only `Int` and `Float` qualify.
    pub fn as_numeric(&self) -> Option<NumericValue> {
        match self {
            AttributeValue::Int(value) => Some(NumericValue::Int(*value)),
            AttributeValue::Float(value) => Some(NumericValue::Float(*value)),
            _ => None,
        }
    }

    /// Textual view used as a region name. `Null` has no text.
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttributeValue::Int(value) => Some(value.to_string()),
            AttributeValue::Float(value) => Some(value.to_string()),
            AttributeValue::Str(value) => Some(value.clone()),
            AttributeValue::Bool(value) => Some(value.to_string()),
            AttributeValue::Null => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

/// A numeric attribute value. Integers stay exact for as long as the
/// arithmetic allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Int(i64),
    Float(f64),
}

impl NumericValue {
    /// Multiply by `factor`. An integer times an integral factor stays an
    /// integer unless the product overflows `i64`; everything else is float.
    pub fn scale(self, factor: f64) -> NumericValue {
        match self {
            NumericValue::Int(value) => integral_factor(factor)
                .and_then(|factor| value.checked_mul(factor))
                .map_or_else(|| NumericValue::Float(self.as_f64() * factor), NumericValue::Int),
            NumericValue::Float(value) => NumericValue::Float(value * factor),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            NumericValue::Int(value) => value as f64,
            NumericValue::Float(value) => value,
        }
    }
}

fn integral_factor(factor: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    let in_range = factor >= i64::MIN as f64 && factor < i64::MAX as f64;
    (factor.fract() == 0.0 && in_range).then_some(factor as i64)
}

/// Integers are written as digits, floats in their shortest round-trip form
/// (`20`, not `20.0`).
impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Int(value) => write!(f, "{value}"),
            NumericValue::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        NumericValue::Int(value)
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        NumericValue::Float(value)
    }
}

/// Declared attribute type, named the way geospatial schemas name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeType {
    Int,
    Float,
    Str,
    Bool,
    Null,
}

impl AttributeType {
    /// Types accepted for the value attribute of a join.
    pub const NUMERIC: [AttributeType; 2] = [AttributeType::Int, AttributeType::Float];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Int => "int",
            AttributeType::Float => "float",
            AttributeType::Str => "str",
            AttributeType::Bool => "bool",
            AttributeType::Null => "null",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeType::Int | AttributeType::Float)
    }

    /// Combine two observed types into the declared type of a column.
    ///
    /// `Null` never overrides a concrete type, `int` widens to `float`,
    /// and any other disagreement falls back to `str`.
    pub fn merge(self, other: AttributeType) -> AttributeType {
        match (self, other) {
            (left, right) if left == right => left,
            (AttributeType::Null, other) | (other, AttributeType::Null) => other,
            (AttributeType::Int, AttributeType::Float)
            | (AttributeType::Float, AttributeType::Int) => AttributeType::Float,
            _ => AttributeType::Str,
        }
    }

    /// Quoted, comma-separated list of the numeric type names.
    pub fn numeric_names() -> String {
        Self::NUMERIC
            .iter()
            .map(|kind| format!("'{kind}'"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_widens_int_to_float() {
        assert_eq!(
            AttributeType::Int.merge(AttributeType::Float),
            AttributeType::Float
        );
        assert_eq!(
            AttributeType::Float.merge(AttributeType::Int),
            AttributeType::Float
        );
    }

    #[test]
    fn merge_ignores_null() {
        assert_eq!(AttributeType::Null.merge(AttributeType::Int), AttributeType::Int);
        assert_eq!(AttributeType::Str.merge(AttributeType::Null), AttributeType::Str);
    }

    #[test]
    fn merge_mixed_kinds_falls_back_to_str() {
        assert_eq!(AttributeType::Int.merge(AttributeType::Str), AttributeType::Str);
        assert_eq!(AttributeType::Bool.merge(AttributeType::Float), AttributeType::Str);
    }

    #[test]
    fn integers_above_float_precision_scale_exactly() {
        let value = NumericValue::Int(9_007_199_254_740_993);
        assert_eq!(value.scale(1.0), NumericValue::Int(9_007_199_254_740_993));
        assert_eq!(value.scale(1.0).to_string(), "9007199254740993");
        assert_eq!(NumericValue::Int(-4).scale(3.0), NumericValue::Int(-12));
    }

    #[test]
    fn fractional_or_overflowing_factors_fall_back_to_float() {
        assert_eq!(NumericValue::Int(3).scale(0.5), NumericValue::Float(1.5));
        assert_eq!(
            NumericValue::Int(i64::MAX).scale(2.0),
            NumericValue::Float(i64::MAX as f64 * 2.0)
        );
        assert_eq!(NumericValue::Int(1).scale(1e19), NumericValue::Float(1e19));
        assert_eq!(NumericValue::Float(2.5).scale(2.0), NumericValue::Float(5.0));
    }

    #[test]
    fn numeric_display_drops_integral_fraction() {
        assert_eq!(NumericValue::Float(20.0).to_string(), "20");
        assert_eq!(NumericValue::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(NumericValue::Int(-3).to_string(), "-3");
    }

    #[test]
    fn numeric_names_lists_accepted_types() {
        assert_eq!(AttributeType::numeric_names(), "'int', 'float'");
    }

    #[test]
    fn text_view_of_values() {
        assert_eq!(AttributeValue::Int(7).as_text().as_deref(), Some("7"));
        assert_eq!(AttributeValue::Float(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(AttributeValue::Null.as_text(), None);
        assert_eq!(AttributeValue::Str("A".into()).as_numeric(), None);
        assert_eq!(
            AttributeValue::Int(7).as_numeric(),
            Some(NumericValue::Int(7))
        );
    }
}
