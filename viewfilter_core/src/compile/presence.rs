//! Emptiness tests for filters
//!
//! `is_not_empty` is spelled out as a conjunction of negated checks rather than
//! a negation of `is_empty`, so it needs no compound-negation support from the
//! query engine.

use crate::predicate::{FieldTest, Operand, Predicate};

/// Absent, null, empty string or empty array
pub(super) fn is_empty(path: &str) -> Predicate {
    Predicate::Or(vec![
        Predicate::field(path, FieldTest::Exists(false)),
        Predicate::field(path, FieldTest::Eq(Operand::Null)),
        Predicate::field(path, FieldTest::Eq(Operand::String(String::new()))),
        Predicate::field(path, FieldTest::Eq(Operand::List(Vec::new()))),
    ])
}

/// Present, and neither null, empty string nor empty array
pub(super) fn is_not_empty(path: &str) -> Predicate {
    Predicate::And(vec![
        Predicate::field(path, FieldTest::Exists(true)),
        Predicate::field(path, FieldTest::Ne(Operand::Null)),
        Predicate::field(path, FieldTest::Ne(Operand::String(String::new()))),
        Predicate::field(path, FieldTest::Ne(Operand::List(Vec::new()))),
    ])
}
