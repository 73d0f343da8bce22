//! Free-text search and its merge with structured filters

use crate::filter::LogicalOperator;
use crate::predicate::{FieldTest, Pattern, Predicate};

/// Case-insensitive substring search of `text` across `fields`, joined by OR.
///
/// Blank text or no named fields constrains nothing.
pub fn build_search_predicate<S: AsRef<str>>(text: &str, fields: &[S]) -> Predicate {
    let text = text.trim();
    let fields: Vec<&str> = fields
        .iter()
        .map(|field| field.as_ref().trim())
        .filter(|field| !field.is_empty())
        .collect();
    if text.is_empty() || fields.is_empty() {
        return Predicate::Any;
    }

    let pattern = Pattern::contains(text);
    Predicate::Or(
        fields
            .into_iter()
            .map(|field| Predicate::field(field, FieldTest::Regex(pattern.clone())))
            .collect(),
    )
}

/// Merge a structured filter with a search; both survive as direct children
/// of one AND so search always narrows the filter's results
pub fn combine(filter: Predicate, search: Predicate) -> Predicate {
    Predicate::join(LogicalOperator::And, [filter, search])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Operand;
    use serde_json::json;

    #[test]
    fn test_search_across_fields() {
        let search = build_search_predicate("Ada", &["name", "email"]);
        assert_eq!(
            search.to_document(),
            json!({"$or": [
                {"name": {"$regex": "Ada", "$options": "i"}},
                {"email": {"$regex": "Ada", "$options": "i"}}
            ]})
        );
    }

    #[test]
    fn test_single_field_search_is_still_a_disjunction() {
        let search = build_search_predicate("ada", &["name"]);
        assert!(matches!(search, Predicate::Or(ref parts) if parts.len() == 1));
    }

    #[test]
    fn test_blank_search_is_identity() {
        assert_eq!(build_search_predicate("   ", &["name"]), Predicate::Any);
        assert_eq!(build_search_predicate::<&str>("ada", &[]), Predicate::Any);
        assert_eq!(build_search_predicate("ada", &[" "]), Predicate::Any);
    }

    #[test]
    fn test_search_text_is_literal() {
        let search = build_search_predicate("a+b", &["name"]);
        assert!(search.matches(&json!({"name": "A+B Consulting"})));
        assert!(!search.matches(&json!({"name": "aab"})));
    }

    #[test]
    fn test_combine_keeps_both_as_children() {
        let filter = Predicate::Or(vec![
            Predicate::field("status", FieldTest::Eq(Operand::String("lead".to_string()))),
            Predicate::field("status", FieldTest::Eq(Operand::String("active".to_string()))),
        ]);
        let search = build_search_predicate("ada", &["name"]);

        assert_eq!(
            combine(filter.clone(), search.clone()),
            Predicate::And(vec![filter, search])
        );
    }

    #[test]
    fn test_combine_with_identities() {
        let search = build_search_predicate("ada", &["name"]);
        assert_eq!(combine(Predicate::Any, search.clone()), search);
        assert_eq!(combine(Predicate::Any, Predicate::Any), Predicate::Any);
    }
}
