use crate::error::{JoinError, Result};

/// Which feature attributes to join on and how to scale the values.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinConfig {
    /// Feature attribute holding the region name.
    pub name_field: String,
    /// Feature attribute holding the numeric region value.
    pub value_field: String,
    /// Factor applied to every value.
    pub scaling: f64,
}

impl JoinConfig {
    pub fn new(name_field: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            name_field: name_field.into(),
            value_field: value_field.into(),
            scaling: 1.0,
        }
    }

    #[must_use]
    pub fn with_scaling(mut self, scaling: f64) -> Self {
        self.scaling = scaling;
        self
    }

    /// Check the configuration before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.name_field.trim().is_empty() {
            return Err(JoinError::MissingNameAttribute);
        }
        if self.value_field.trim().is_empty() {
            return Err(JoinError::MissingValueAttribute);
        }
        if !self.scaling.is_finite() {
            return Err(JoinError::InvalidScaling {
                scaling: self.scaling,
            });
        }
        Ok(())
    }
}
