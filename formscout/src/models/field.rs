use serde::{Deserialize, Serialize};

use super::relationship::DetectedRelationship;

/// Lookup configuration attached to a field backed by another collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupConfig {
    pub collection: String,
    pub display_field: String,
    pub value_field: String,
    pub searchable: bool,
    pub preload_options: bool,
}

impl LookupConfig {
    /// Lookup settings for a confirmed relationship: values come from `_id`,
    /// labels from the relationship's display field.
    pub fn for_relationship(relationship: &DetectedRelationship) -> Self {
        Self {
            collection: relationship.target_collection.clone(),
            display_field: relationship.display_field.clone(),
            value_field: "_id".to_string(),
            searchable: true,
            preload_options: true,
        }
    }
}

/// One field of a generated form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupConfig>,
}

/// Wrapper for the LLM field-list response that can handle both array and
/// object formats. LLMs sometimes return `[...]` and sometimes
/// `{"fields": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedFieldsResponse {
    /// Direct array response: [...]
    Array(Vec<FormField>),
    /// Wrapped object response: {"fields": [...]}
    Wrapped {
        #[serde(alias = "formFields", alias = "results")]
        fields: Vec<FormField>,
    },
}

impl GeneratedFieldsResponse {
    /// Extract the fields regardless of wrapper format
    pub fn into_fields(self) -> Vec<FormField> {
        match self {
            Self::Array(fields) => fields,
            Self::Wrapped { fields } => fields,
        }
    }
}

/// Derive a human-readable label from a field name: `camelCase` and
/// `snake_case` both become Title Case words.
pub fn humanize_field_name(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
