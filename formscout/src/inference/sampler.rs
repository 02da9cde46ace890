//! Schema inference over sampled documents.
//!
//! Type precedence, first match wins:
//! 1. null
//! 2. array
//! 3. object carrying an ObjectId marker (`_bsontype == "ObjectId"` or `$oid`)
//! 4. object carrying a `$date` wrapper
//! 5. other object
//! 6. string: email, phone, url, ISO date prefix, plain string (in that order)
//! 7. number / boolean

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::models::{CollectionSchema, FieldSchema, SampledDocument, TypeTag};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{10,}$").expect("phone pattern"));
static DATE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("date prefix pattern"));

/// How observations of the same key across multiple documents are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Type and sample come from the first document that carries the key;
    /// later documents only increment the occurrence count. Order-dependent:
    /// a leading `null` observation pins the field's type to `null`.
    #[default]
    FirstObservation,
    /// Like `FirstObservation`, except a `null` first observation is upgraded
    /// by the first later non-null value. A concrete type never changes once
    /// recorded.
    MostSpecificNonNull,
}

/// Infer the type tag of a single sampled value.
pub fn infer_type(value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Null,
        Value::Array(_) => TypeTag::Array,
        Value::Object(map) => {
            if map.get("_bsontype").and_then(Value::as_str) == Some("ObjectId")
                || map.contains_key("$oid")
            {
                TypeTag::ObjectId
            } else if map.contains_key("$date") {
                TypeTag::Date
            } else {
                TypeTag::Object
            }
        }
        Value::String(s) => {
            if EMAIL_RE.is_match(s) {
                TypeTag::Email
            } else if PHONE_RE.is_match(s) {
                TypeTag::Phone
            } else if s.starts_with("http://") || s.starts_with("https://") {
                TypeTag::Url
            } else if DATE_PREFIX_RE.is_match(s) {
                TypeTag::Date
            } else {
                TypeTag::String
            }
        }
        Value::Number(_) => TypeTag::Number,
        Value::Bool(_) => TypeTag::Boolean,
    }
}

/// Infer a per-field schema from a document sample with the default
/// `FirstObservation` merge policy.
pub fn infer_schema(documents: &[SampledDocument]) -> CollectionSchema {
    infer_schema_with_policy(documents, MergePolicy::default())
}

/// Infer a per-field schema from a document sample. Documents are processed
/// in slice order; heterogeneous shapes are expected and merged. Infallible;
/// an empty sample yields an empty schema.
pub fn infer_schema_with_policy(
    documents: &[SampledDocument],
    policy: MergePolicy,
) -> CollectionSchema {
    let mut schema = CollectionSchema::new();

    for document in documents {
        for (field, value) in document {
            match schema.get_mut(field) {
                None => {
                    schema.insert(
                        field.clone(),
                        FieldSchema {
                            type_tag: infer_type(value),
                            sample_value: value.clone(),
                            occurrence_count: 1,
                        },
                    );
                }
                Some(existing) => {
                    existing.occurrence_count += 1;
                    if policy == MergePolicy::MostSpecificNonNull
                        && existing.type_tag == TypeTag::Null
                        && !value.is_null()
                    {
                        existing.type_tag = infer_type(value);
                        existing.sample_value = value.clone();
                    }
                }
            }
        }
    }

    schema
}
