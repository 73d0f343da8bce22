//! Compiled predicates
//!
//! A [`Predicate`] is what the compiler produces: field tests joined by
//! `And`/`Or`, with [`Predicate::Any`] as the "no constraint" identity. It
//! renders to a document-store query with [`Predicate::to_document`] and can
//! be evaluated against in-memory JSON records with [`Predicate::matches`].

mod eval;

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::filter::{FilterValue, LogicalOperator};

/// Largest integer an `f64` holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A literal inside a field test
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    List(Vec<Operand>),
}

impl Operand {
    pub fn to_json(&self) -> Value {
        match self {
            Operand::Null => Value::Null,
            Operand::Boolean(b) => Value::Bool(*b),
            Operand::Number(n) => number_json(*n),
            Operand::String(s) => Value::String(s.clone()),
            Operand::Date(date) => {
                json!({ "$date": date.to_rfc3339_opts(SecondsFormat::Millis, true) })
            }
            Operand::List(items) => Value::Array(items.iter().map(Operand::to_json).collect()),
        }
    }
}

// Whole numbers render as integers so a persisted `30` compiles to `30`, not `30.0`
fn number_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl From<&FilterValue> for Operand {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::Boolean(b) => Operand::Boolean(*b),
            FilterValue::Number(n) => n.as_f64().map(Operand::Number).unwrap_or(Operand::Null),
            FilterValue::String(s) => Operand::String(s.clone()),
            FilterValue::List(items) => Operand::List(items.iter().map(Operand::from).collect()),
        }
    }
}

/// A regular expression test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub source: String,
    pub case_insensitive: bool,
}

impl Pattern {
    /// Case-insensitive substring match of literal text
    pub fn contains(text: &str) -> Self {
        Self {
            source: regex::escape(text),
            case_insensitive: true,
        }
    }

    pub fn starts_with(text: &str) -> Self {
        Self {
            source: format!("^{}", regex::escape(text)),
            case_insensitive: true,
        }
    }

    pub fn ends_with(text: &str) -> Self {
        Self {
            source: format!("{}$", regex::escape(text)),
            case_insensitive: true,
        }
    }

    fn to_json(&self) -> Value {
        let mut document = Map::new();
        document.insert("$regex".to_string(), Value::String(self.source.clone()));
        if self.case_insensitive {
            document.insert("$options".to_string(), Value::String("i".to_string()));
        }
        Value::Object(document)
    }
}

/// A test applied to a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTest {
    Eq(Operand),
    Ne(Operand),
    Gt(Operand),
    Gte(Operand),
    Lt(Operand),
    Lte(Operand),
    /// Inclusive on both ends
    Range { gte: Operand, lte: Operand },
    Regex(Pattern),
    NotRegex(Pattern),
    Exists(bool),
    In(Vec<Operand>),
    Nin(Vec<Operand>),
}

impl FieldTest {
    fn to_json(&self) -> Value {
        match self {
            FieldTest::Eq(operand) => json!({ "$eq": operand.to_json() }),
            FieldTest::Ne(operand) => json!({ "$ne": operand.to_json() }),
            FieldTest::Gt(operand) => json!({ "$gt": operand.to_json() }),
            FieldTest::Gte(operand) => json!({ "$gte": operand.to_json() }),
            FieldTest::Lt(operand) => json!({ "$lt": operand.to_json() }),
            FieldTest::Lte(operand) => json!({ "$lte": operand.to_json() }),
            FieldTest::Range { gte, lte } => {
                json!({ "$gte": gte.to_json(), "$lte": lte.to_json() })
            }
            FieldTest::Regex(pattern) => pattern.to_json(),
            FieldTest::NotRegex(pattern) => json!({ "$not": pattern.to_json() }),
            FieldTest::Exists(exists) => json!({ "$exists": exists }),
            FieldTest::In(items) => json!({ "$in": operands_json(items) }),
            FieldTest::Nin(items) => json!({ "$nin": operands_json(items) }),
        }
    }
}

fn operands_json(items: &[Operand]) -> Vec<Value> {
    items.iter().map(Operand::to_json).collect()
}

/// A compiled filter fragment
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Predicate {
    /// No constraint; the identity for both `And` and `Or`
    #[default]
    Any,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Field { path: String, test: FieldTest },
}

impl Predicate {
    pub fn field(path: impl Into<String>, test: FieldTest) -> Self {
        Predicate::Field {
            path: path.into(),
            test,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Predicate::Any)
    }

    /// Combine fragments with `operator`, dropping identities.
    ///
    /// No survivors yields [`Predicate::Any`]; a single survivor is returned as is.
    pub fn join(operator: LogicalOperator, parts: impl IntoIterator<Item = Predicate>) -> Self {
        let mut parts: Vec<Predicate> = parts.into_iter().filter(|part| !part.is_any()).collect();
        if parts.len() <= 1 {
            return parts.pop().unwrap_or_default();
        }
        match operator {
            LogicalOperator::And => Predicate::And(parts),
            LogicalOperator::Or => Predicate::Or(parts),
        }
    }

    /// Render as a query document; `Any` renders as `{}`
    pub fn to_document(&self) -> Value {
        match self {
            Predicate::Any => Value::Object(Map::new()),
            Predicate::And(parts) => json!({ "$and": documents(parts) }),
            Predicate::Or(parts) => json!({ "$or": documents(parts) }),
            Predicate::Field { path, test } => {
                let mut document = Map::new();
                document.insert(path.clone(), test.to_json());
                Value::Object(document)
            }
        }
    }
}

fn documents(parts: &[Predicate]) -> Vec<Value> {
    parts.iter().map(Predicate::to_document).collect()
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}
