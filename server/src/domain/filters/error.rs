//! Filter binding errors

use thiserror::Error;

/// Failure while binding query parameters into a filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A present parameter could not be coerced into its declared type
    #[error("invalid value for parameter '{name}': '{value}'")]
    InvalidParameterValue { name: String, value: String },

    /// The filter table declares a field type the binder cannot handle
    #[error("unsupported filter type {type_name} for field {field_name}")]
    UnsupportedFilterType {
        type_name: &'static str,
        field_name: &'static str,
    },
}

impl BindError {
    pub(crate) fn invalid(name: &str, value: &str) -> Self {
        Self::InvalidParameterValue {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// True when the error reflects a bad filter table rather than bad input
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::UnsupportedFilterType { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = BindError::invalid("startDate", "yesterday");
        assert_eq!(
            err.to_string(),
            "invalid value for parameter 'startDate': 'yesterday'"
        );
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_unsupported_type_display() {
        let err = BindError::UnsupportedFilterType {
            type_name: "f64",
            field_name: "weight",
        };
        assert_eq!(err.to_string(), "unsupported filter type f64 for field weight");
        assert!(err.is_configuration_error());
    }
}
