//! In-memory evaluation of compiled predicates against JSON records
//!
//! Follows document-store semantics: a missing field equals `null`, `Ne` and
//! `NotRegex` match missing fields, and a scalar test against an array field
//! matches when any element does.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use regex::RegexBuilder;
use serde_json::Value;

use super::{FieldTest, Operand, Pattern, Predicate};

impl Predicate {
    /// Check if a record matches this predicate
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Predicate::Any => true,
            Predicate::And(parts) => parts.iter().all(|part| part.matches(record)),
            Predicate::Or(parts) => parts.iter().any(|part| part.matches(record)),
            Predicate::Field { path, test } => test.matches(lookup(record, path)),
        }
    }
}

/// Resolve a dotted path; `None` when any segment is missing
fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| current.as_object()?.get(segment))
}

impl FieldTest {
    fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            FieldTest::Exists(expected) => value.is_some() == *expected,
            FieldTest::Eq(operand) => equals(value, operand),
            FieldTest::Ne(operand) => !equals(value, operand),
            FieldTest::Gt(operand) => {
                any_element(value, |v| compare(v, operand) == Some(Ordering::Greater))
            }
            FieldTest::Gte(operand) => any_element(value, |v| {
                matches!(compare(v, operand), Some(Ordering::Greater | Ordering::Equal))
            }),
            FieldTest::Lt(operand) => {
                any_element(value, |v| compare(v, operand) == Some(Ordering::Less))
            }
            FieldTest::Lte(operand) => any_element(value, |v| {
                matches!(compare(v, operand), Some(Ordering::Less | Ordering::Equal))
            }),
            FieldTest::Range { gte, lte } => any_element(value, |v| {
                matches!(compare(v, gte), Some(Ordering::Greater | Ordering::Equal))
                    && matches!(compare(v, lte), Some(Ordering::Less | Ordering::Equal))
            }),
            FieldTest::Regex(pattern) => regex_matches(value, pattern),
            FieldTest::NotRegex(pattern) => !regex_matches(value, pattern),
            FieldTest::In(items) => items.iter().any(|operand| equals(value, operand)),
            FieldTest::Nin(items) => !items.iter().any(|operand| equals(value, operand)),
        }
    }
}

fn any_element(value: Option<&Value>, test: impl Fn(&Value) -> bool) -> bool {
    match value {
        None => false,
        Some(Value::Array(items)) => items.iter().any(test),
        Some(v) => test(v),
    }
}

fn equals(value: Option<&Value>, operand: &Operand) -> bool {
    match value {
        None => matches!(operand, Operand::Null),
        Some(Value::Array(items)) if !matches!(operand, Operand::List(_)) => {
            items.iter().any(|item| scalar_equals(item, operand))
        }
        Some(v) => scalar_equals(v, operand),
    }
}

fn scalar_equals(value: &Value, operand: &Operand) -> bool {
    match (operand, value) {
        (Operand::Null, Value::Null) => true,
        (Operand::Boolean(expected), Value::Bool(actual)) => expected == actual,
        (Operand::Number(expected), Value::Number(actual)) => actual.as_f64() == Some(*expected),
        (Operand::String(expected), Value::String(actual)) => expected == actual,
        (Operand::Date(expected), v) => read_date(v) == Some(*expected),
        (Operand::List(expected), Value::Array(actual)) => {
            expected.len() == actual.len()
                && expected
                    .iter()
                    .zip(actual)
                    .all(|(operand, item)| scalar_equals(item, operand))
        }
        _ => false,
    }
}

fn compare(value: &Value, operand: &Operand) -> Option<Ordering> {
    match operand {
        Operand::Number(n) => value.as_f64()?.partial_cmp(n),
        Operand::String(s) => Some(value.as_str()?.cmp(s.as_str())),
        Operand::Date(date) => Some(read_date(value)?.cmp(date)),
        _ => None,
    }
}

/// Dates are stored as RFC 3339 strings, plain `YYYY-MM-DD` days, or `{"$date": ...}`
fn read_date(value: &Value) -> Option<DateTime<Utc>> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("$date")?.as_str()?,
        _ => return None,
    };
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc())
}

fn regex_matches(value: Option<&Value>, pattern: &Pattern) -> bool {
    let Ok(regex) = RegexBuilder::new(&pattern.source)
        .case_insensitive(pattern.case_insensitive)
        .build()
    else {
        return false;
    };
    any_element(value, |v| v.as_str().is_some_and(|s| regex.is_match(s)))
}
