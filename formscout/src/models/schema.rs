use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inferred type of a sampled field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Date,
    Array,
    Object,
    ObjectId,
    Email,
    Phone,
    Url,
    Null,
}

impl TypeTag {
    /// Suggested form control for a field of this type, used when rendering
    /// the inferred schema into the generation prompt.
    pub fn suggested_control(&self) -> &'static str {
        match self {
            Self::String => "text",
            Self::Number => "number",
            Self::Boolean => "checkbox",
            Self::Date => "date",
            Self::Array => "select",
            Self::Object => "textarea",
            Self::ObjectId => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Null => "text",
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Array => "array",
            Self::Object => "object",
            Self::ObjectId => "objectId",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Null => "null",
        };
        write!(f, "{name}")
    }
}

/// Per-field descriptor merged across all sampled documents for one key.
///
/// `occurrence_count` increments on every document that contains the key and
/// is purely descriptive; the type and sample come from the merge policy in
/// use (see `inference::sampler::MergePolicy`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    pub sample_value: Value,
    pub occurrence_count: u64,
}

/// Inferred schema of one collection. Keyed by field name; iteration order is
/// lexicographic and deterministic.
pub type CollectionSchema = BTreeMap<String, FieldSchema>;
