//! Set membership for filters

use crate::filter::Operator;
use crate::predicate::{FieldTest, Operand, Predicate};

/// Compile `in` / `not_in`; an empty set constrains nothing
pub(super) fn compile_membership(
    path: &str,
    operator: &Operator,
    items: Vec<Operand>,
) -> Option<Predicate> {
    if items.is_empty() {
        return None;
    }
    let test = match operator {
        Operator::In => FieldTest::In(items),
        Operator::NotIn => FieldTest::Nin(items),
        _ => return None,
    };
    Some(Predicate::field(path, test))
}
