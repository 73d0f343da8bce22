//! The atomic field/operator/value predicate

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{FilterValue, Operator, ValueArity};
use crate::id::new_id;

/// The value(s) a condition carries, shaped by its operator's arity
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConditionValue {
    #[default]
    None,
    Single(FilterValue),
    /// Either end may be missing while the row is being edited
    Range {
        from: Option<FilterValue>,
        to: Option<FilterValue>,
    },
    /// A relative period key such as `last_7_days`
    Relative(String),
}

impl ConditionValue {
    /// The initial value for a freshly selected operator
    pub fn for_arity(arity: ValueArity) -> Self {
        match arity {
            ValueArity::None => ConditionValue::None,
            ValueArity::Single => ConditionValue::Single(FilterValue::String(String::new())),
            ValueArity::Range => ConditionValue::Range {
                from: None,
                to: None,
            },
            ValueArity::Relative => ConditionValue::Relative(String::new()),
        }
    }

    pub fn arity(&self) -> ValueArity {
        match self {
            ConditionValue::None => ValueArity::None,
            ConditionValue::Single(_) => ValueArity::Single,
            ConditionValue::Range { .. } => ValueArity::Range,
            ConditionValue::Relative(_) => ValueArity::Relative,
        }
    }

    pub fn single(&self) -> Option<&FilterValue> {
        match self {
            ConditionValue::Single(value) => Some(value),
            _ => None,
        }
    }

    /// Both ends of a range, when both are present
    pub fn range(&self) -> Option<(&FilterValue, &FilterValue)> {
        match self {
            ConditionValue::Range {
                from: Some(from),
                to: Some(to),
            } => Some((from, to)),
            _ => None,
        }
    }

    pub fn relative(&self) -> Option<&str> {
        match self {
            ConditionValue::Relative(key) => Some(key),
            _ => None,
        }
    }
}

/// A filter condition: one field, one operator, and the operator's value(s)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConditionRecord", into = "ConditionRecord")]
pub struct Condition {
    pub id: String,
    /// Attribute name; dots address nested attributes (`social.linkedIn`)
    pub field: String,
    pub operator: Operator,
    pub value: ConditionValue,
}

impl Condition {
    /// Create a new condition with a fresh id
    pub fn new(field: impl Into<String>, operator: Operator, value: ConditionValue) -> Self {
        Self {
            id: new_id(),
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn single(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self::new(field, operator, ConditionValue::Single(value.into()))
    }

    pub fn range(
        field: impl Into<String>,
        operator: Operator,
        from: impl Into<FilterValue>,
        to: impl Into<FilterValue>,
    ) -> Self {
        Self::new(
            field,
            operator,
            ConditionValue::Range {
                from: Some(from.into()),
                to: Some(to.into()),
            },
        )
    }

    pub fn relative(field: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(
            field,
            Operator::DateIsRelative,
            ConditionValue::Relative(key.into()),
        )
    }

    pub fn no_value(field: impl Into<String>, operator: Operator) -> Self {
        Self::new(field, operator, ConditionValue::None)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// A condition without a field constrains nothing
    pub fn is_blank(&self) -> bool {
        self.field.trim().is_empty()
    }
}

/// Flat wire shape of a condition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConditionRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    field: String,
    #[serde(default)]
    operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_from: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_to: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_relative: Option<Value>,
}

impl ConditionRecord {
    fn relative_key(&self) -> Option<String> {
        self.date_relative
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn range(&self) -> (Option<FilterValue>, Option<FilterValue>) {
        (
            self.value_from.as_ref().and_then(FilterValue::from_json),
            self.value_to.as_ref().and_then(FilterValue::from_json),
        )
    }

    fn single(&self) -> Option<FilterValue> {
        self.value.as_ref().and_then(FilterValue::from_json)
    }

    /// Picks whichever value slot is populated, for operators we cannot classify
    fn populated(&self) -> ConditionValue {
        if let Some(key) = self.relative_key() {
            return ConditionValue::Relative(key);
        }
        match self.range() {
            (None, None) => self
                .single()
                .map(ConditionValue::Single)
                .unwrap_or_default(),
            (from, to) => ConditionValue::Range { from, to },
        }
    }
}

impl From<ConditionRecord> for Condition {
    fn from(record: ConditionRecord) -> Self {
        let operator = Operator::from(record.operator.as_str());
        let value = match (&operator, operator.arity()) {
            (Operator::Unknown(_), _) => record.populated(),
            (_, ValueArity::None) => ConditionValue::None,
            (_, ValueArity::Single) => record
                .single()
                .map(ConditionValue::Single)
                .unwrap_or_default(),
            (_, ValueArity::Range) => {
                let (from, to) = record.range();
                ConditionValue::Range { from, to }
            }
            (_, ValueArity::Relative) => {
                ConditionValue::Relative(record.relative_key().unwrap_or_default())
            }
        };
        Condition {
            id: record.id,
            field: record.field,
            operator,
            value,
        }
    }
}

impl From<Condition> for ConditionRecord {
    fn from(condition: Condition) -> Self {
        let mut record = ConditionRecord {
            id: condition.id,
            field: condition.field,
            operator: condition.operator.key().to_string(),
            ..Default::default()
        };
        match condition.value {
            ConditionValue::None => {}
            ConditionValue::Single(value) => record.value = Some(value.to_json()),
            ConditionValue::Range { from, to } => {
                record.value_from = from.map(|value| value.to_json());
                record.value_to = to.map(|value| value.to_json());
            }
            ConditionValue::Relative(key) => record.date_relative = Some(Value::String(key)),
        }
        record
    }
}
