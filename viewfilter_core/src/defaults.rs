use serde::{Deserialize, Serialize};

use crate::field::{FieldCatalog, FieldDescriptor, FieldType};

/// The record kinds a view can be defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    People,
    Companies,
    Deals,
}

/// Instantiates the default catalog for a record kind.
pub fn catalog_for(kind: RecordKind) -> FieldCatalog {
    match kind {
        RecordKind::People => people(),
        RecordKind::Companies => companies(),
        RecordKind::Deals => deals(),
    }
}

/// An individual person tracked in the CRM.
pub fn people() -> FieldCatalog {
    FieldCatalog::default()
        .with_field(FieldDescriptor::new("name", FieldType::Text))
        .with_field(FieldDescriptor::new("email", FieldType::Email))
        .with_field(FieldDescriptor::new("phone", FieldType::Phone))
        .with_field(FieldDescriptor::new("jobTitle", FieldType::Text))
        .with_field(FieldDescriptor::new("status", FieldType::Select))
        .with_field(FieldDescriptor::new("age", FieldType::Number))
        .with_field(FieldDescriptor::new("social.linkedIn", FieldType::Url).with_header("LinkedIn"))
        .with_field(FieldDescriptor::new("social.twitter", FieldType::Url).with_header("Twitter"))
        .with_field(FieldDescriptor::new("isFavorite", FieldType::Boolean).with_header("Favorite"))
        .with_field(FieldDescriptor::new("createdAt", FieldType::Date).with_header("Created"))
}

/// An organization the CRM holds relationships with.
pub fn companies() -> FieldCatalog {
    FieldCatalog::default()
        .with_field(FieldDescriptor::new("name", FieldType::Text))
        .with_field(FieldDescriptor::new("domain", FieldType::Url))
        .with_field(FieldDescriptor::new("industry", FieldType::Select))
        .with_field(FieldDescriptor::new("employees", FieldType::Number))
        .with_field(FieldDescriptor::new("logo", FieldType::Image))
        .with_field(FieldDescriptor::new("address.city", FieldType::Text).with_header("City"))
        .with_field(FieldDescriptor::new("address.country", FieldType::Text).with_header("Country"))
        .with_field(FieldDescriptor::new("createdAt", FieldType::Date).with_header("Created"))
}

/// A sales opportunity moving through a pipeline.
pub fn deals() -> FieldCatalog {
    FieldCatalog::default()
        .with_field(FieldDescriptor::new("name", FieldType::Text))
        .with_field(FieldDescriptor::new("stage", FieldType::Select))
        .with_field(FieldDescriptor::new("amount", FieldType::Number))
        .with_field(FieldDescriptor::new("probability", FieldType::Number))
        .with_field(FieldDescriptor::new("closeDate", FieldType::Date))
        .with_field(FieldDescriptor::new("isWon", FieldType::Boolean).with_header("Won"))
        .with_field(FieldDescriptor::new("companyId", FieldType::Id).with_header("Company"))
        .with_field(FieldDescriptor::new("createdAt", FieldType::Date).with_header("Created"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_catalog() {
        for kind in [RecordKind::People, RecordKind::Companies, RecordKind::Deals] {
            let catalog = catalog_for(kind);
            assert!(!catalog.is_empty());
            assert_eq!(catalog.field_type("createdAt"), FieldType::Date);
        }
    }

    #[test]
    fn test_people_searchable_fields() {
        assert_eq!(
            people().searchable_fields(),
            vec!["name", "email", "phone", "jobTitle", "social.linkedIn", "social.twitter"]
        );
    }

    #[test]
    fn test_record_kind_wire_names() {
        let kind: RecordKind = serde_json::from_str("\"companies\"").unwrap();
        assert_eq!(kind, RecordKind::Companies);
    }
}
