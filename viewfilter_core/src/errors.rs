//! Error types for decoding and validating filters

use std::fmt;

/// Errors reported when decoding or validating a filter.
///
/// Compilation itself never fails; these only surface from
/// [`crate::AdvancedFilter::from_json`] and the `validate` methods.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The persisted filter is not valid JSON for the expected shape
    Malformed(String),
    /// The condition names a field the catalog does not list
    UnknownField { field: String },
    /// Operator is not supported for the field's type
    UnsupportedOperator {
        field: String,
        field_type: String,
        operator: String,
        supported: Vec<String>,
    },
    /// A single-value operator without a value
    MissingValue { field: String, operator: String },
    /// A range operator missing one or both ends
    IncompleteRange { field: String, operator: String },
    /// A relative-date condition with a key outside the period vocabulary
    UnknownPeriod { field: String, key: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::Malformed(message) => write!(f, "Malformed filter: {}", message),
            FilterError::UnknownField { field } => write!(f, "Unknown field '{}'", field),
            FilterError::UnsupportedOperator {
                field,
                field_type,
                operator,
                supported,
            } => {
                write!(
                    f,
                    "Cannot use '{}' operator on {} field '{}'. Supported: {}",
                    operator,
                    field_type,
                    field,
                    supported.join(", ")
                )
            }
            FilterError::MissingValue { field, operator } => {
                write!(f, "Operator '{}' on field '{}' needs a value", operator, field)
            }
            FilterError::IncompleteRange { field, operator } => {
                write!(
                    f,
                    "Operator '{}' on field '{}' needs both a start and an end value",
                    operator, field
                )
            }
            FilterError::UnknownPeriod { field, key } => {
                write!(f, "Unknown relative period '{}' on field '{}'", key, field)
            }
        }
    }
}

impl std::error::Error for FilterError {}

impl From<serde_json::Error> for FilterError {
    fn from(error: serde_json::Error) -> Self {
        FilterError::Malformed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operator_message() {
        let error = FilterError::UnsupportedOperator {
            field: "age".to_string(),
            field_type: "number".to_string(),
            operator: "contains".to_string(),
            supported: vec!["equals".to_string(), "between".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Cannot use 'contains' operator on number field 'age'. Supported: equals, between"
        );
    }

    #[test]
    fn test_json_errors_are_malformed() {
        let error: FilterError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(error, FilterError::Malformed(_)));
    }
}
