//! Composable view filters for CRM record lists.
//!
//! A view's filter is a tree of [`FilterGroup`]s holding [`Condition`]s. The
//! [`Compiler`] turns that tree, optionally combined with free-text search,
//! into a [`Predicate`] that renders as a document-store query. The
//! [`catalog`] module says which operators each [`FieldType`] offers, and
//! [`period`] resolves relative date periods against a fixed `now`.

pub mod catalog;
pub mod compile;
pub mod defaults;
pub mod field;
pub mod filter;
pub mod period;
pub mod predicate;

mod errors;
mod id;

pub use catalog::{OperatorDescriptor, default_operator, operators_for_field_type};
pub use compile::{CompileOptions, Compiler, build_search_predicate, combine};
pub use errors::FilterError;
pub use field::{FieldCatalog, FieldDescriptor, FieldType};
pub use filter::{
    AdvancedFilter, Condition, ConditionValue, FilterGroup, FilterValue, LogicalOperator,
    Operator, StoredFilters, ValidationResult, expand, flatten,
};
pub use period::{DateRange, RelativePeriod, resolve_period};
pub use predicate::{FieldTest, Operand, Predicate};
