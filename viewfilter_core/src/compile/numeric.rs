//! Numeric comparisons and ranges for filters

use crate::filter::{FilterValue, Operator};
use crate::predicate::{FieldTest, Operand, Predicate};

/// Compile `>`, `>=`, `<` or `<=` after numeric coercion of the value
pub(super) fn compile_comparison(
    path: &str,
    operator: &Operator,
    value: Option<&FilterValue>,
) -> Option<Predicate> {
    let number = Operand::Number(value?.as_f64()?);
    let test = match operator {
        Operator::GreaterThan => FieldTest::Gt(number),
        Operator::GreaterThanOrEqual => FieldTest::Gte(number),
        Operator::LessThan => FieldTest::Lt(number),
        Operator::LessThanOrEqual => FieldTest::Lte(number),
        _ => return None,
    };
    Some(Predicate::field(path, test))
}

/// Compile an inclusive range, or its complement as below-or-above
pub(super) fn compile_range(
    path: &str,
    operator: &Operator,
    range: Option<(&FilterValue, &FilterValue)>,
) -> Option<Predicate> {
    let (from, to) = range?;
    let (low, high) = (from.as_f64()?, to.as_f64()?);
    match operator {
        Operator::Between => Some(Predicate::field(
            path,
            FieldTest::Range {
                gte: Operand::Number(low),
                lte: Operand::Number(high),
            },
        )),
        Operator::NotBetween => Some(Predicate::Or(vec![
            Predicate::field(path, FieldTest::Lt(Operand::Number(low))),
            Predicate::field(path, FieldTest::Gt(Operand::Number(high))),
        ])),
        _ => None,
    }
}
