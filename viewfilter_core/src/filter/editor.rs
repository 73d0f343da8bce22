//! Structural edits the filter editor performs.
//!
//! Every edit consumes the filter and returns the new one. Edits addressing an
//! id that does not exist return the filter unchanged.

use log::debug;

use super::condition::{Condition, ConditionValue};
use super::group::{AdvancedFilter, FilterGroup};
use super::types::{FilterValue, LogicalOperator, Operator, ValueArity};
use crate::catalog::default_operator;
use crate::field::FieldDescriptor;
use crate::id::new_id;

impl Condition {
    /// An empty row with a fresh id
    pub fn blank() -> Self {
        Self {
            id: new_id(),
            field: String::new(),
            operator: Operator::blank(),
            value: ConditionValue::None,
        }
    }

    /// Select a field: its type's default operator with a fresh value
    pub fn with_field(mut self, descriptor: &FieldDescriptor) -> Self {
        let operator = default_operator(descriptor.field_type);
        self.value = ConditionValue::for_arity(operator.arity());
        self.field = descriptor.field.clone();
        self.operator = operator;
        self
    }

    /// Select an operator, keeping the current value when it still fits
    pub fn with_operator(mut self, operator: Operator) -> Self {
        let arity = operator.arity();
        if self.value.arity() != arity {
            self.value = ConditionValue::for_arity(arity);
        }
        self.operator = operator;
        self
    }

    pub fn with_value(self, value: impl Into<FilterValue>) -> Self {
        self.with_shaped_value(ValueArity::Single, ConditionValue::Single(value.into()))
    }

    pub fn with_range(self, from: Option<FilterValue>, to: Option<FilterValue>) -> Self {
        self.with_shaped_value(ValueArity::Range, ConditionValue::Range { from, to })
    }

    pub fn with_relative(self, key: impl Into<String>) -> Self {
        self.with_shaped_value(ValueArity::Relative, ConditionValue::Relative(key.into()))
    }

    fn with_shaped_value(mut self, arity: ValueArity, value: ConditionValue) -> Self {
        if self.operator.arity() == arity {
            self.value = value;
        } else {
            debug!(
                "Ignoring {:?} value for condition '{}': operator '{}' takes {:?}",
                arity,
                self.id,
                self.operator,
                self.operator.arity()
            );
        }
        self
    }
}

impl FilterGroup {
    fn find_mut(&mut self, group_id: &str) -> Option<&mut FilterGroup> {
        if self.id == group_id {
            return Some(self);
        }
        self.groups
            .iter_mut()
            .find_map(|group| group.find_mut(group_id))
    }

    /// Removes matching conditions here and below; reports whether any matched
    fn remove_condition(&mut self, condition_id: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|condition| condition.id != condition_id);
        let removed = self.conditions.len() != before;
        remove_from_groups(&mut self.groups, condition_id) || removed
    }

    fn remove_group(&mut self, group_id: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|group| group.id != group_id);
        if self.groups.len() != before {
            return true;
        }
        self.groups
            .iter_mut()
            .any(|group| group.remove_group(group_id))
    }

    fn find_condition_mut(&mut self, condition_id: &str) -> Option<&mut Condition> {
        if let Some(condition) = self
            .conditions
            .iter_mut()
            .find(|condition| condition.id == condition_id)
        {
            return Some(condition);
        }
        self.groups
            .iter_mut()
            .find_map(|group| group.find_condition_mut(condition_id))
    }
}

impl AdvancedFilter {
    fn find_group_mut(&mut self, group_id: &str) -> Option<&mut FilterGroup> {
        self.groups
            .iter_mut()
            .find_map(|group| group.find_mut(group_id))
    }

    /// Append a group at the top level, or inside `parent_id` when given
    pub fn add_group(mut self, group: FilterGroup, parent_id: Option<&str>) -> Self {
        match parent_id {
            None => self.groups.push(group),
            Some(parent_id) => match self.find_group_mut(parent_id) {
                Some(parent) => parent.groups.push(group),
                None => debug!("Cannot add group '{}': no group '{}'", group.id, parent_id),
            },
        }
        self
    }

    pub fn remove_group(mut self, group_id: &str) -> Self {
        let before = self.groups.len();
        self.groups.retain(|group| group.id != group_id);
        let removed = self.groups.len() != before
            || self
                .groups
                .iter_mut()
                .any(|group| group.remove_group(group_id));
        if !removed {
            debug!("Cannot remove group '{}': not found", group_id);
        }
        self
    }

    pub fn add_condition(mut self, group_id: &str, condition: Condition) -> Self {
        match self.find_group_mut(group_id) {
            Some(group) => group.conditions.push(condition),
            None => debug!(
                "Cannot add condition '{}': no group '{}'",
                condition.id, group_id
            ),
        }
        self
    }

    /// Remove a condition; a group the removal leaves empty goes too
    pub fn remove_condition(mut self, condition_id: &str) -> Self {
        if !remove_from_groups(&mut self.groups, condition_id) {
            debug!("Cannot remove condition '{}': not found", condition_id);
        }
        self
    }

    /// Replace the condition carrying the same id
    pub fn update_condition(mut self, condition: Condition) -> Self {
        let target = self
            .groups
            .iter_mut()
            .find_map(|group| group.find_condition_mut(&condition.id));
        match target {
            Some(target) => *target = condition,
            None => debug!("Cannot update condition '{}': not found", condition.id),
        }
        self
    }

    pub fn set_group_operator(mut self, group_id: &str, operator: LogicalOperator) -> Self {
        match self.find_group_mut(group_id) {
            Some(group) => group.logical_operator = operator,
            None => debug!("Cannot set operator of group '{}': not found", group_id),
        }
        self
    }

    pub fn toggle_group_operator(mut self, group_id: &str) -> Self {
        match self.find_group_mut(group_id) {
            Some(group) => group.logical_operator = group.logical_operator.toggled(),
            None => debug!("Cannot toggle operator of group '{}': not found", group_id),
        }
        self
    }

    pub fn set_global_operator(mut self, operator: LogicalOperator) -> Self {
        self.global_logical_operator = operator;
        self
    }

    /// Drop every group, keeping the global operator
    pub fn clear(mut self) -> Self {
        self.groups.clear();
        self
    }
}

/// Removes the condition from each group, dropping only the groups it emptied
fn remove_from_groups(groups: &mut Vec<FilterGroup>, condition_id: &str) -> bool {
    let mut removed = false;
    groups.retain_mut(|group| {
        if group.remove_condition(condition_id) {
            removed = true;
            !group.is_empty()
        } else {
            true
        }
    });
    removed
}
