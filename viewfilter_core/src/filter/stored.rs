use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::group::AdvancedFilter;
use super::normalize::expand;
use crate::FilterError;

/// The `filters` attribute of a persisted view: an advanced filter, or a
/// simple condition list from the non-advanced editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredFilters {
    Simple(Vec<Condition>),
    Advanced(AdvancedFilter),
}

impl StoredFilters {
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_active(&self) -> bool {
        match self {
            StoredFilters::Simple(conditions) => {
                conditions.iter().any(|condition| !condition.is_blank())
            }
            StoredFilters::Advanced(filter) => filter.is_active(),
        }
    }

    pub fn into_advanced(self) -> AdvancedFilter {
        match self {
            StoredFilters::Simple(conditions) => expand(conditions),
            StoredFilters::Advanced(filter) => filter,
        }
    }
}

impl From<AdvancedFilter> for StoredFilters {
    fn from(filter: AdvancedFilter) -> Self {
        StoredFilters::Advanced(filter)
    }
}

impl From<Vec<Condition>> for StoredFilters {
    fn from(conditions: Vec<Condition>) -> Self {
        StoredFilters::Simple(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_decode_simple_list() {
        let stored = StoredFilters::from_json(
            r#"[{"id": "c1", "field": "status", "operator": "equals", "value": "active"}]"#,
        )
        .unwrap();
        assert_matches!(stored, StoredFilters::Simple(ref conditions) if conditions.len() == 1);
        assert!(stored.is_active());
    }

    #[test]
    fn test_decode_advanced() {
        let stored = StoredFilters::from_json(
            r#"{"groups": [], "globalLogicalOperator": "or"}"#,
        )
        .unwrap();
        assert_matches!(stored, StoredFilters::Advanced(_));
        assert!(!stored.is_active());
    }

    #[test]
    fn test_decode_empty_list() {
        let stored = StoredFilters::from_json("[]").unwrap();
        assert_eq!(stored, StoredFilters::Simple(Vec::new()));
    }

    #[test]
    fn test_decode_neither_shape() {
        assert_matches!(StoredFilters::from_json("42"), Err(FilterError::Malformed(_)));
    }

    #[test]
    fn test_simple_into_advanced() {
        let stored = StoredFilters::from_json(
            r#"[{"id": "c1", "field": "status", "operator": "equals", "value": "active"}]"#,
        )
        .unwrap();
        let filter = stored.into_advanced();
        assert_eq!(filter.groups.len(), 1);
        assert_eq!(filter.groups[0].conditions[0].id, "c1");
    }
}
