//! Field catalog: the attributes a record kind exposes to filtering

use std::fmt;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// Declared type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
    Select,
    Email,
    Phone,
    Url,
    Id,
    Image,
    Object,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Select => "select",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Url => "url",
            FieldType::Id => "id",
            FieldType::Image => "image",
            FieldType::Object => "object",
        }
    }

    /// Collapses aliases onto the semantic type that decides the operator set.
    ///
    /// Email, phone, url, id, image and object fields all filter as text.
    pub fn semantic(self) -> FieldType {
        match self {
            FieldType::Number | FieldType::Date | FieldType::Boolean | FieldType::Select => self,
            _ => FieldType::Text,
        }
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "boolean" => FieldType::Boolean,
            "select" => FieldType::Select,
            "email" => FieldType::Email,
            "phone" => FieldType::Phone,
            "url" => FieldType::Url,
            "id" => FieldType::Id,
            "image" => FieldType::Image,
            "object" => FieldType::Object,
            _ => FieldType::Text,
        }
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        FieldType::from(value.as_str())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a field catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub field: String,
    #[serde(default)]
    pub header_name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
}

impl FieldDescriptor {
    /// Create a descriptor with a header derived from the field path
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        let field = field.into();
        let header_name = header_from_path(&field);
        Self {
            field,
            header_name,
            field_type,
        }
    }

    pub fn with_header(mut self, header_name: impl Into<String>) -> Self {
        self.header_name = header_name.into();
        self
    }

    /// The display header, falling back to the derived one when blank
    pub fn header(&self) -> String {
        if self.header_name.trim().is_empty() {
            header_from_path(&self.field)
        } else {
            self.header_name.clone()
        }
    }
}

/// Title-cases the last segment of a dotted field path (`social.linkedIn` -> `Linked In`).
pub fn header_from_path(path: &str) -> String {
    let last = path.rsplit('.').next().unwrap_or(path);
    last.to_case(Case::Title)
}

/// Ordered list of the fields one record kind exposes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    pub fn with_field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|descriptor| descriptor.field == field)
    }

    /// Declared type of a field; unlisted fields are text
    pub fn field_type(&self, field: &str) -> FieldType {
        self.get(field)
            .map(|descriptor| descriptor.field_type)
            .unwrap_or_default()
    }

    pub fn header(&self, field: &str) -> String {
        match self.get(field) {
            Some(descriptor) => descriptor.header(),
            None => header_from_path(field),
        }
    }

    /// Fields free-text search runs against by default
    pub fn searchable_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|descriptor| {
                matches!(
                    descriptor.field_type,
                    FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Url
                )
            })
            .map(|descriptor| descriptor.field.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
