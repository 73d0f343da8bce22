//! The filter model: conditions, groups, the advanced filter root and the
//! operations the editor performs on them

mod condition;
mod editor;
mod group;
mod normalize;
mod stored;
mod summary;
mod types;
mod validation;

pub use condition::*;
pub use group::*;
pub use normalize::{expand, flatten};
pub use stored::StoredFilters;
pub use summary::summaries;
pub use types::*;
pub use validation::ValidationResult;
