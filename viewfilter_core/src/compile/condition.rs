use log::debug;

use super::{Compiler, boolean, datetime, field_path, list, numeric, presence, string};
use crate::filter::{Condition, FilterValue, Operator};
use crate::period::RelativePeriod;
use crate::predicate::{FieldTest, Operand, Predicate};

impl Compiler {
    /// Compile one condition into a predicate fragment.
    ///
    /// Blank fields, blank or unknown operators, blank values and values the
    /// operator cannot use all compile to [`Predicate::Any`].
    pub fn condition_to_predicate(&self, condition: &Condition, prefix: &str) -> Predicate {
        let field = condition.field.trim();
        if field.is_empty() || condition.operator.is_blank() {
            return Predicate::Any;
        }

        let path = field_path(prefix, field);
        let value = &condition.value;
        let single = value.single().filter(|single| !single.is_blank());
        let now = &self.now;
        let week_start = self.options.week_start;

        let compiled = match &condition.operator {
            Operator::Contains
            | Operator::NotContains
            | Operator::StartsWith
            | Operator::EndsWith => string::compile_text(&path, &condition.operator, single),
            Operator::Equals | Operator::NotEquals => {
                self.compile_equality(field, &path, &condition.operator, single)
            }
            Operator::IsEmpty => Some(presence::is_empty(&path)),
            Operator::IsNotEmpty => Some(presence::is_not_empty(&path)),
            Operator::GreaterThan
            | Operator::GreaterThanOrEqual
            | Operator::LessThan
            | Operator::LessThanOrEqual => {
                numeric::compile_comparison(&path, &condition.operator, single)
            }
            Operator::Between | Operator::NotBetween => {
                numeric::compile_range(&path, &condition.operator, value.range())
            }
            Operator::DateIs | Operator::DateIsNot | Operator::DateBefore | Operator::DateAfter => {
                datetime::compile_day(&path, &condition.operator, single, now)
            }
            Operator::DateBetween => datetime::compile_days_between(&path, value.range(), now),
            Operator::DateThisWeek => {
                datetime::compile_period(&path, RelativePeriod::ThisWeek, now, week_start)
            }
            Operator::DateThisMonth => {
                datetime::compile_period(&path, RelativePeriod::ThisMonth, now, week_start)
            }
            Operator::DateThisYear => {
                datetime::compile_period(&path, RelativePeriod::ThisYear, now, week_start)
            }
            Operator::DateIsRelative => {
                datetime::compile_relative(&path, value.relative(), now, week_start)
            }
            Operator::IsTrue | Operator::IsFalse => {
                boolean::compile_flag(&path, &condition.operator)
            }
            Operator::In | Operator::NotIn => single
                .and_then(|value| self.operands(field, value))
                .and_then(|items| list::compile_membership(&path, &condition.operator, items)),
            Operator::Unknown(key) => {
                debug!(
                    "Skipping condition '{}' on '{}': unknown operator '{}'",
                    condition.id, field, key
                );
                return Predicate::Any;
            }
        };

        compiled.unwrap_or_else(|| {
            debug!(
                "Skipping condition '{}' on '{}': no usable value for '{}'",
                condition.id, field, condition.operator
            );
            Predicate::Any
        })
    }

    fn compile_equality(
        &self,
        field: &str,
        path: &str,
        operator: &Operator,
        value: Option<&FilterValue>,
    ) -> Option<Predicate> {
        let operand = self.operand(field, value?)?;
        let test = match operator {
            Operator::Equals => FieldTest::Eq(operand),
            Operator::NotEquals => FieldTest::Ne(operand),
            _ => return None,
        };
        Some(Predicate::field(path, test))
    }

    /// Every item of a membership set; `None` when any item fails its field's type
    fn operands(&self, field: &str, value: &FilterValue) -> Option<Vec<Operand>> {
        value
            .items()
            .iter()
            .map(|item| self.operand(field, item))
            .collect()
    }
}
