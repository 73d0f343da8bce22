//! Boolean flags for filters

use crate::filter::Operator;
use crate::predicate::{FieldTest, Operand, Predicate};

/// Compile `is_true` / `is_false` as direct equality
pub(super) fn compile_flag(path: &str, operator: &Operator) -> Option<Predicate> {
    let flag = match operator {
        Operator::IsTrue => true,
        Operator::IsFalse => false,
        _ => return None,
    };
    Some(Predicate::field(path, FieldTest::Eq(Operand::Boolean(flag))))
}
