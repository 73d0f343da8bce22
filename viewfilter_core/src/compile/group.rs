use log::trace;

use super::Compiler;
use crate::filter::{AdvancedFilter, Condition, FilterGroup, expand};
use crate::predicate::Predicate;

impl Compiler {
    /// Compile a group: conditions first, then nested groups, joined by the
    /// group's operator. Empty fragments drop out, so a group with nothing
    /// usable compiles to [`Predicate::Any`].
    pub fn group_to_predicate(&self, group: &FilterGroup, prefix: &str) -> Predicate {
        let conditions = group
            .conditions
            .iter()
            .map(|condition| self.condition_to_predicate(condition, prefix));
        let nested = group
            .groups
            .iter()
            .map(|nested| self.group_to_predicate(nested, prefix));

        let compiled = Predicate::join(group.logical_operator, conditions.chain(nested));
        trace!("Compiled group '{}' to {}", group.id, compiled);
        compiled
    }

    /// Compile the whole filter with the configured field prefix
    pub fn advanced_filter_to_predicate(&self, filter: &AdvancedFilter) -> Predicate {
        let prefix = self.options.field_prefix.as_str();
        Predicate::join(
            filter.global_logical_operator,
            filter
                .groups
                .iter()
                .map(|group| self.group_to_predicate(group, prefix)),
        )
    }

    /// Compile a simple filter list as one implicit AND group
    pub fn conditions_to_predicate(&self, conditions: &[Condition]) -> Predicate {
        self.advanced_filter_to_predicate(&expand(conditions.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{LogicalOperator, Operator};
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    fn compiler() -> Compiler {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 12, 15, 0, 0)
            .unwrap();
        Compiler::new(now)
    }

    fn status(value: &str) -> Condition {
        Condition::single("status", Operator::Equals, value)
    }

    #[test]
    fn test_empty_group_is_identity() {
        let group = FilterGroup::new(LogicalOperator::Or);
        assert_eq!(compiler().group_to_predicate(&group, ""), Predicate::Any);
    }

    #[test]
    fn test_single_fragment_is_unwrapped() {
        let group = FilterGroup::new(LogicalOperator::Or)
            .with_condition(status("active"))
            .with_condition(Condition::single("", Operator::Equals, "ignored"));
        assert_eq!(
            compiler().group_to_predicate(&group, "").to_document(),
            json!({"status": {"$eq": "active"}})
        );
    }

    #[test]
    fn test_nested_groups_follow_conditions() {
        let nested = FilterGroup::new(LogicalOperator::And)
            .with_condition(status("lead"))
            .with_condition(Condition::no_value("email", Operator::IsNotEmpty));
        let group = FilterGroup::new(LogicalOperator::Or)
            .with_group(nested)
            .with_condition(status("active"));

        let document = compiler().group_to_predicate(&group, "").to_document();
        assert_eq!(document["$or"][0], json!({"status": {"$eq": "active"}}));
        assert_eq!(document["$or"][1]["$and"][0], json!({"status": {"$eq": "lead"}}));
    }

    #[test]
    fn test_root_drops_identity_groups() {
        let filter = AdvancedFilter::new(LogicalOperator::Or)
            .with_group(FilterGroup::new(LogicalOperator::And))
            .with_group(FilterGroup::new(LogicalOperator::And).with_condition(status("active")));
        assert_eq!(
            compiler().advanced_filter_to_predicate(&filter).to_document(),
            json!({"status": {"$eq": "active"}})
        );
    }

    #[test]
    fn test_deep_nesting() {
        let mut group = FilterGroup::new(LogicalOperator::And).with_condition(status("active"));
        for _ in 0..200 {
            group = FilterGroup::new(LogicalOperator::And).with_group(group);
        }
        let filter = AdvancedFilter::default().with_group(group);
        assert_eq!(
            compiler().advanced_filter_to_predicate(&filter).to_document(),
            json!({"status": {"$eq": "active"}})
        );
    }

    #[test]
    fn test_conditions_list_is_and() {
        let compiled = compiler().conditions_to_predicate(&[
            status("active"),
            Condition::single("age", Operator::GreaterThan, 30),
        ]);
        assert_eq!(
            compiled.to_document(),
            json!({"$and": [{"status": {"$eq": "active"}}, {"age": {"$gt": 30}}]})
        );
    }

    #[test]
    fn test_empty_conditions_list_is_identity() {
        assert_eq!(compiler().conditions_to_predicate(&[]), Predicate::Any);
    }
}
