//! Filter groups and the advanced filter root

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::types::LogicalOperator;
use crate::FilterError;
use crate::id::new_id;

/// Conditions and nested groups combined by one logical operator.
///
/// The operator applies to every child alike; mixing AND with OR needs a
/// nested group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<FilterGroup>,
}

impl FilterGroup {
    pub fn new(logical_operator: LogicalOperator) -> Self {
        Self {
            id: new_id(),
            logical_operator,
            conditions: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// No conditions and no nested groups
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.groups.is_empty()
    }

    /// Whether any condition here or below names a field
    pub fn is_active(&self) -> bool {
        self.conditions.iter().any(|condition| !condition.is_blank())
            || self.groups.iter().any(FilterGroup::is_active)
    }

    /// Own conditions first, then those of nested groups, depth-first
    pub fn all_conditions(&self) -> Vec<&Condition> {
        let mut conditions: Vec<&Condition> = self.conditions.iter().collect();
        for group in &self.groups {
            conditions.extend(group.all_conditions());
        }
        conditions
    }

    fn pruned(&self) -> Option<FilterGroup> {
        let conditions: Vec<Condition> = self
            .conditions
            .iter()
            .filter(|condition| !condition.is_blank())
            .cloned()
            .collect();
        let groups: Vec<FilterGroup> = self.groups.iter().filter_map(FilterGroup::pruned).collect();

        if conditions.is_empty() && groups.is_empty() {
            return None;
        }
        Some(FilterGroup {
            id: self.id.clone(),
            logical_operator: self.logical_operator,
            conditions,
            groups,
        })
    }
}

/// The root of a filter: top-level groups combined by one global operator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedFilter {
    #[serde(default)]
    pub groups: Vec<FilterGroup>,
    #[serde(default)]
    pub global_logical_operator: LogicalOperator,
}

impl AdvancedFilter {
    pub fn new(global_logical_operator: LogicalOperator) -> Self {
        Self {
            groups: Vec::new(),
            global_logical_operator,
        }
    }

    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Decode a filter persisted inside a view record
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// A filter is active when at least one condition names a field
    pub fn is_active(&self) -> bool {
        self.groups.iter().any(FilterGroup::is_active)
    }

    /// The filter as it should be persisted: blank rows and empty groups
    /// removed, or `None` when nothing remains
    pub fn pruned(&self) -> Option<AdvancedFilter> {
        let groups: Vec<FilterGroup> = self.groups.iter().filter_map(FilterGroup::pruned).collect();
        if groups.is_empty() {
            None
        } else {
            Some(AdvancedFilter {
                groups,
                global_logical_operator: self.global_logical_operator,
            })
        }
    }
}
