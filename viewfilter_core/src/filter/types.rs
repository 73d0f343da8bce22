//! Filter type definitions

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Logical operator applied uniformly across the children of a group,
/// or across the top-level groups of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn toggled(self) -> Self {
        match self {
            LogicalOperator::And => LogicalOperator::Or,
            LogicalOperator::Or => LogicalOperator::And,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        }
    }
}

// Anything other than "or" reads as "and" so a corrupted view still loads
impl From<String> for LogicalOperator {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("or") {
            LogicalOperator::Or
        } else {
            LogicalOperator::And
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Values used in filter conditions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    Number(Number),
    String(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Read a persisted JSON value; `null` and objects carry no filter value
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Object(_) => None,
            Value::Bool(b) => Some(FilterValue::Boolean(*b)),
            Value::Number(n) => Some(FilterValue::Number(n.clone())),
            Value::String(s) => Some(FilterValue::String(s.clone())),
            Value::Array(items) => Some(FilterValue::List(
                items.iter().filter_map(FilterValue::from_json).collect(),
            )),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Boolean(b) => Value::Bool(*b),
            FilterValue::Number(n) => Value::Number(n.clone()),
            FilterValue::String(s) => Value::String(s.clone()),
            FilterValue::List(items) => {
                Value::Array(items.iter().map(FilterValue::to_json).collect())
            }
        }
    }

    /// Numeric coercion; blank or non-numeric text yields `None`
    pub fn as_f64(&self) -> Option<f64> {
        let number = match self {
            FilterValue::Number(n) => n.as_f64()?,
            FilterValue::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        number.is_finite().then_some(number)
    }

    /// Text form of a scalar value
    pub fn as_text(&self) -> Option<String> {
        match self {
            FilterValue::String(s) => Some(s.clone()),
            FilterValue::Number(n) => Some(n.to_string()),
            FilterValue::Boolean(b) => Some(b.to_string()),
            FilterValue::List(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FilterValue::Boolean(b) => Some(*b),
            FilterValue::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
            FilterValue::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// The value as a list: lists as-is, scalars wrapped
    pub fn items(&self) -> Vec<FilterValue> {
        match self {
            FilterValue::List(items) => items.clone(),
            scalar => vec![scalar.clone()],
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FilterValue::String(s) => s.trim().is_empty(),
            FilterValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(Number::from(value))
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Number(Number::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => FilterValue::Number(n),
            None => FilterValue::String(value.to_string()),
        }
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Boolean(b) => write!(f, "{}", b),
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::String(s) => write!(f, "{}", s),
            FilterValue::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

/// How many values an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueArity {
    None,
    Single,
    Range,
    Relative,
}

impl ValueArity {
    pub fn requires_value(self) -> bool {
        self != ValueArity::None
    }

    pub fn requires_range(self) -> bool {
        self == ValueArity::Range
    }
}

/// Comparison operators for filtering
///
/// Keys that are not recognised are kept verbatim in [`Operator::Unknown`] so a
/// persisted filter survives a decode/encode cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Equals,
    NotEquals,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Between,
    NotBetween,
    DateIs,
    DateIsNot,
    DateBefore,
    DateAfter,
    DateBetween,
    DateThisWeek,
    DateThisMonth,
    DateThisYear,
    DateIsRelative,
    IsTrue,
    IsFalse,
    In,
    NotIn,
    Unknown(String),
}

impl Operator {
    /// Every operator the compiler understands
    pub const KNOWN: &'static [Operator] = &[
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Equals,
        Operator::NotEquals,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::Between,
        Operator::NotBetween,
        Operator::DateIs,
        Operator::DateIsNot,
        Operator::DateBefore,
        Operator::DateAfter,
        Operator::DateBetween,
        Operator::DateThisWeek,
        Operator::DateThisMonth,
        Operator::DateThisYear,
        Operator::DateIsRelative,
        Operator::IsTrue,
        Operator::IsFalse,
        Operator::In,
        Operator::NotIn,
    ];

    /// The operator of a freshly created row, before a field is chosen
    pub fn blank() -> Self {
        Operator::Unknown(String::new())
    }

    pub fn is_blank(&self) -> bool {
        self.key().trim().is_empty()
    }

    pub fn key(&self) -> &str {
        match self {
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::IsEmpty => "is_empty",
            Operator::IsNotEmpty => "is_not_empty",
            Operator::GreaterThan => "greater_than",
            Operator::GreaterThanOrEqual => "greater_than_or_equal",
            Operator::LessThan => "less_than",
            Operator::LessThanOrEqual => "less_than_or_equal",
            Operator::Between => "between",
            Operator::NotBetween => "not_between",
            Operator::DateIs => "date_is",
            Operator::DateIsNot => "date_is_not",
            Operator::DateBefore => "date_before",
            Operator::DateAfter => "date_after",
            Operator::DateBetween => "date_between",
            Operator::DateThisWeek => "date_this_week",
            Operator::DateThisMonth => "date_this_month",
            Operator::DateThisYear => "date_this_year",
            Operator::DateIsRelative => "date_is_relative",
            Operator::IsTrue => "is_true",
            Operator::IsFalse => "is_false",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Unknown(key) => key,
        }
    }

    /// Human-readable verb phrase shown next to the field name
    pub fn label(&self) -> &str {
        match self {
            Operator::Contains => "contains",
            Operator::NotContains => "does not contain",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
            Operator::Equals | Operator::DateIs => "is",
            Operator::NotEquals | Operator::DateIsNot => "is not",
            Operator::IsEmpty => "is empty",
            Operator::IsNotEmpty => "is not empty",
            Operator::GreaterThan => "greater than",
            Operator::GreaterThanOrEqual => "greater than or equal to",
            Operator::LessThan => "less than",
            Operator::LessThanOrEqual => "less than or equal to",
            Operator::Between => "between",
            Operator::NotBetween => "not between",
            Operator::DateBefore => "is before",
            Operator::DateAfter => "is after",
            Operator::DateBetween => "is between",
            Operator::DateThisWeek => "is this week",
            Operator::DateThisMonth => "is this month",
            Operator::DateThisYear => "is this year",
            Operator::DateIsRelative => "is within",
            Operator::IsTrue => "is true",
            Operator::IsFalse => "is false",
            Operator::In => "is any of",
            Operator::NotIn => "is none of",
            Operator::Unknown(key) => key,
        }
    }

    pub fn arity(&self) -> ValueArity {
        match self {
            Operator::IsEmpty
            | Operator::IsNotEmpty
            | Operator::DateThisWeek
            | Operator::DateThisMonth
            | Operator::DateThisYear
            | Operator::IsTrue
            | Operator::IsFalse
            | Operator::Unknown(_) => ValueArity::None,
            Operator::Between | Operator::NotBetween | Operator::DateBetween => ValueArity::Range,
            Operator::DateIsRelative => ValueArity::Relative,
            _ => ValueArity::Single,
        }
    }
}

impl From<&str> for Operator {
    fn from(key: &str) -> Self {
        let key = key.trim();
        Operator::KNOWN
            .iter()
            .find(|operator| operator.key() == key)
            .cloned()
            .unwrap_or_else(|| Operator::Unknown(key.to_string()))
    }
}

impl From<String> for Operator {
    fn from(key: String) -> Self {
        Operator::from(key.as_str())
    }
}

impl From<Operator> for String {
    fn from(operator: Operator) -> Self {
        operator.key().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
