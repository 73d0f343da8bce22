//! One-line labels for the filter chips shown above a list

use super::condition::{Condition, ConditionValue};
use super::group::AdvancedFilter;
use super::types::FilterValue;
use crate::field::FieldCatalog;
use crate::period::RelativePeriod;

const MISSING: &str = "?";

impl Condition {
    /// Chip label such as `Age between 30 and 40`; `None` for a blank row
    pub fn summary(&self, catalog: &FieldCatalog) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        let header = catalog.header(self.field.trim());
        if self.operator.is_blank() {
            return Some(header);
        }

        let label = self.operator.label();
        let summary = match &self.value {
            ConditionValue::None => format!("{} {}", header, label),
            ConditionValue::Single(value) => {
                format!("{} {} {}", header, label, display(Some(value)))
            }
            ConditionValue::Range { from, to } => format!(
                "{} {} {} and {}",
                header,
                label,
                display(from.as_ref()),
                display(to.as_ref())
            ),
            ConditionValue::Relative(key) => {
                let period = key
                    .parse::<RelativePeriod>()
                    .map(RelativePeriod::label)
                    .unwrap_or(MISSING);
                format!("{} {} {}", header, label, period)
            }
        };
        Some(summary)
    }
}

fn display(value: Option<&FilterValue>) -> String {
    match value {
        Some(value) if !value.is_blank() => value.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Chip labels for every non-blank condition, in tree order
pub fn summaries(filter: &AdvancedFilter, catalog: &FieldCatalog) -> Vec<String> {
    filter
        .groups
        .iter()
        .flat_map(|group| group.all_conditions())
        .filter_map(|condition| condition.summary(catalog))
        .collect()
}
