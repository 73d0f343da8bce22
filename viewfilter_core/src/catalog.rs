//! Operator catalog: which operators each field type offers

use serde::Serialize;

use crate::field::FieldType;
use crate::filter::Operator;

/// Catalog entry describing one operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDescriptor {
    #[serde(rename = "value")]
    pub operator: Operator,
    pub label: String,
    pub requires_value: bool,
    pub requires_range: bool,
}

impl From<Operator> for OperatorDescriptor {
    fn from(operator: Operator) -> Self {
        let arity = operator.arity();
        Self {
            label: operator.label().to_string(),
            requires_value: arity.requires_value(),
            requires_range: arity.requires_range(),
            operator,
        }
    }
}

const TEXT_OPERATORS: &[Operator] = &[
    Operator::Contains,
    Operator::NotContains,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Equals,
    Operator::NotEquals,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const NUMBER_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqual,
    Operator::LessThan,
    Operator::LessThanOrEqual,
    Operator::Between,
    Operator::NotBetween,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const DATE_OPERATORS: &[Operator] = &[
    Operator::DateIs,
    Operator::DateIsNot,
    Operator::DateBefore,
    Operator::DateAfter,
    Operator::DateBetween,
    Operator::DateThisWeek,
    Operator::DateThisMonth,
    Operator::DateThisYear,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Equals, Operator::NotEquals];

const SELECT_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::In,
    Operator::NotIn,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

fn editor_operators(field_type: FieldType) -> &'static [Operator] {
    match field_type.semantic() {
        FieldType::Number => NUMBER_OPERATORS,
        FieldType::Date => DATE_OPERATORS,
        FieldType::Boolean => BOOLEAN_OPERATORS,
        FieldType::Select => SELECT_OPERATORS,
        _ => TEXT_OPERATORS,
    }
}

/// The operators offered for a field type, default first
pub fn operators_for_field_type(field_type: FieldType) -> Vec<OperatorDescriptor> {
    editor_operators(field_type)
        .iter()
        .cloned()
        .map(OperatorDescriptor::from)
        .collect()
}

/// The operator assigned when a field is freshly selected
pub fn default_operator(field_type: FieldType) -> Operator {
    editor_operators(field_type)
        .first()
        .cloned()
        .unwrap_or(Operator::Contains)
}

/// Whether a condition on a field of this type may use the operator.
///
/// Accepts the editor set plus the conveniences only persisted filters use:
/// relative dates on date fields and `is_true`/`is_false` on booleans.
pub fn operator_supported(field_type: FieldType, operator: &Operator) -> bool {
    editor_operators(field_type).contains(operator)
        || matches!(
            (field_type.semantic(), operator),
            (FieldType::Date, Operator::DateIsRelative)
                | (FieldType::Boolean, Operator::IsTrue | Operator::IsFalse)
        )
}

/// Keys of the operators a field type offers, for error messages
pub fn supported_operator_keys(field_type: FieldType) -> Vec<String> {
    editor_operators(field_type)
        .iter()
        .map(|operator| operator.key().to_string())
        .collect()
}
