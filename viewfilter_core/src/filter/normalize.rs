//! Conversion between the advanced filter tree and the flat "simple" list

use super::condition::Condition;
use super::group::{AdvancedFilter, FilterGroup};
use super::types::LogicalOperator;

/// Every condition of every top-level group, nested ones included, in order
pub fn flatten(filter: &AdvancedFilter) -> Vec<Condition> {
    filter
        .groups
        .iter()
        .flat_map(FilterGroup::all_conditions)
        .cloned()
        .collect()
}

/// Wrap a flat list into one AND group under an AND root.
///
/// An empty list still yields one blank row so the editor has something to show.
pub fn expand(conditions: Vec<Condition>) -> AdvancedFilter {
    let conditions = if conditions.is_empty() {
        vec![Condition::blank()]
    } else {
        conditions
    };
    let group = FilterGroup {
        conditions,
        ..FilterGroup::new(LogicalOperator::And)
    };
    AdvancedFilter::new(LogicalOperator::And).with_group(group)
}
