use log::debug;

use super::condition::{Condition, ConditionValue};
use super::group::AdvancedFilter;
use super::types::{FilterValue, ValueArity};
use crate::FilterError;
use crate::catalog::{operator_supported, supported_operator_keys};
use crate::field::FieldCatalog;
use crate::period::RelativePeriod;

pub type ValidationResult = Result<(), Vec<FilterError>>;

impl AdvancedFilter {
    /// Checks every non-blank condition against the field catalog, collecting all problems
    pub fn validate(&self, catalog: &FieldCatalog) -> ValidationResult {
        let mut errors = Vec::new();
        for condition in self.groups.iter().flat_map(|group| group.all_conditions()) {
            if let Err(condition_errors) = condition.validate(catalog) {
                errors.extend(condition_errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            debug!("Filter failed validation with {} errors", errors.len());
            Err(errors)
        }
    }
}

impl Condition {
    /// Validates one condition; blank rows are always valid
    pub fn validate(&self, catalog: &FieldCatalog) -> ValidationResult {
        if self.is_blank() {
            return Ok(());
        }
        let field = self.field.trim();
        debug!("Validating condition '{}' on field '{}'", self.id, field);

        let Some(descriptor) = catalog.get(field) else {
            return Err(vec![FilterError::UnknownField {
                field: field.to_string(),
            }]);
        };

        let field_type = descriptor.field_type;
        if !operator_supported(field_type, &self.operator) {
            return Err(vec![FilterError::UnsupportedOperator {
                field: field.to_string(),
                field_type: field_type.to_string(),
                operator: self.operator.key().to_string(),
                supported: supported_operator_keys(field_type),
            }]);
        }

        let operator = self.operator.key().to_string();
        let error = match (self.operator.arity(), &self.value) {
            (ValueArity::None, _) => None,
            (ValueArity::Single, ConditionValue::Single(value)) if !value.is_blank() => None,
            (ValueArity::Single, _) => Some(FilterError::MissingValue {
                field: field.to_string(),
                operator,
            }),
            (ValueArity::Range, ConditionValue::Range { from, to })
                if is_present(from.as_ref()) && is_present(to.as_ref()) =>
            {
                None
            }
            (ValueArity::Range, _) => Some(FilterError::IncompleteRange {
                field: field.to_string(),
                operator,
            }),
            (ValueArity::Relative, ConditionValue::Relative(key)) if !key.trim().is_empty() => {
                key.parse::<RelativePeriod>()
                    .err()
                    .map(|_| FilterError::UnknownPeriod {
                        field: field.to_string(),
                        key: key.clone(),
                    })
            }
            (ValueArity::Relative, _) => Some(FilterError::MissingValue {
                field: field.to_string(),
                operator,
            }),
        };

        match error {
            Some(error) => Err(vec![error]),
            None => Ok(()),
        }
    }
}

fn is_present(value: Option<&FilterValue>) -> bool {
    value.is_some_and(|value| !value.is_blank())
}
