//! Text matching for filters

use crate::filter::{FilterValue, Operator};
use crate::predicate::{FieldTest, Pattern, Predicate};

/// Compile a substring, prefix or suffix match (case-insensitive)
pub(super) fn compile_text(
    path: &str,
    operator: &Operator,
    value: Option<&FilterValue>,
) -> Option<Predicate> {
    let text = value?.as_text()?;
    let test = match operator {
        Operator::Contains => FieldTest::Regex(Pattern::contains(&text)),
        Operator::NotContains => FieldTest::NotRegex(Pattern::contains(&text)),
        Operator::StartsWith => FieldTest::Regex(Pattern::starts_with(&text)),
        Operator::EndsWith => FieldTest::Regex(Pattern::ends_with(&text)),
        _ => return None,
    };
    Some(Predicate::field(path, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(operator: Operator, value: &str) -> serde_json::Value {
        compile_text("email", &operator, Some(&FilterValue::from(value)))
            .unwrap()
            .to_document()
    }

    #[test]
    fn test_contains() {
        assert_eq!(
            document(Operator::Contains, "acme"),
            json!({"email": {"$regex": "acme", "$options": "i"}})
        );
    }

    #[test]
    fn test_not_contains() {
        assert_eq!(
            document(Operator::NotContains, "acme"),
            json!({"email": {"$not": {"$regex": "acme", "$options": "i"}}})
        );
    }

    #[test]
    fn test_starts_with_is_anchored() {
        assert_eq!(
            document(Operator::StartsWith, "ada"),
            json!({"email": {"$regex": "^ada", "$options": "i"}})
        );
    }

    #[test]
    fn test_ends_with_is_anchored() {
        assert_eq!(
            document(Operator::EndsWith, ".io"),
            json!({"email": {"$regex": "\\.io$", "$options": "i"}})
        );
    }

    #[test]
    fn test_numbers_match_as_text() {
        let compiled = compile_text("phone", &Operator::Contains, Some(&FilterValue::from(555)));
        assert!(compiled.is_some());
    }

    #[test]
    fn test_missing_or_list_value() {
        assert_eq!(compile_text("email", &Operator::Contains, None), None);
        let list = FilterValue::from(vec!["a", "b"]);
        assert_eq!(compile_text("email", &Operator::Contains, Some(&list)), None);
    }

    #[test]
    fn test_unsupported_operator() {
        let value = FilterValue::from("acme");
        assert_eq!(compile_text("email", &Operator::GreaterThan, Some(&value)), None);
    }
}
