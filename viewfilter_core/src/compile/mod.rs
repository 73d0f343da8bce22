//! Compilation of filter trees into predicates
//!
//! The compiler is pure and never fails: blank, unknown or unparseable
//! conditions compile to [`Predicate::Any`] and drop out when their group is
//! combined, so one bad row can never void a whole query.

mod boolean;
mod condition;
mod datetime;
mod group;
mod list;
mod numeric;
mod presence;
mod search;
mod string;

pub use search::{build_search_predicate, combine};

use chrono::{DateTime, FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

use crate::field::{FieldCatalog, FieldType};
use crate::filter::{FilterValue, StoredFilters};
use crate::predicate::{Operand, Predicate};

/// Tunables a host may load from its own configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Joined with `.` in front of every field path
    pub field_prefix: String,
    /// First day of a week for the week periods
    pub week_start: Weekday,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            field_prefix: String::new(),
            week_start: Weekday::Sun,
        }
    }
}

impl CompileOptions {
    pub fn with_field_prefix(mut self, field_prefix: impl Into<String>) -> Self {
        self.field_prefix = field_prefix.into();
        self
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }
}

/// Compiles conditions, groups and whole filters against one fixed `now`
#[derive(Debug, Clone)]
pub struct Compiler {
    now: DateTime<FixedOffset>,
    options: CompileOptions,
    catalog: Option<FieldCatalog>,
}

impl Compiler {
    /// Create a compiler; `now`'s offset decides where local days begin
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now,
            options: CompileOptions::default(),
            catalog: None,
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a catalog so equality and membership operands follow field types
    pub fn with_catalog(mut self, catalog: FieldCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Compile stored view filters and free-text search into one predicate
    pub fn compile_query(
        &self,
        filters: &StoredFilters,
        search_text: &str,
        search_fields: &[String],
    ) -> Predicate {
        let filter = match filters {
            StoredFilters::Advanced(filter) => self.advanced_filter_to_predicate(filter),
            StoredFilters::Simple(conditions) => self.conditions_to_predicate(conditions),
        };
        let prefix = self.options.field_prefix.as_str();
        let search_paths: Vec<String> = search_fields
            .iter()
            .map(|field| field_path(prefix, field))
            .collect();
        combine(filter, build_search_predicate(search_text, &search_paths))
    }

    /// The operand a value compares as, following the field's declared type.
    ///
    /// `None` when a number or boolean field holds a value of another kind.
    fn operand(&self, field: &str, value: &FilterValue) -> Option<Operand> {
        let field_type = self
            .catalog
            .as_ref()
            .map(|catalog| catalog.field_type(field).semantic());
        match field_type {
            Some(FieldType::Number) => value.as_f64().map(Operand::Number),
            Some(FieldType::Boolean) => value.as_bool().map(Operand::Boolean),
            _ => Some(Operand::from(value)),
        }
    }
}

/// Field path with the prefix applied
fn field_path(prefix: &str, field: &str) -> String {
    let prefix = prefix.trim().trim_end_matches('.');
    let field = field.trim();
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}
