use serde::{Deserialize, Serialize};

use super::schema::TypeTag;

/// A foreign-key-like reference guessed from a sampled schema, pending user
/// confirmation. Created per generation session, mutated by user toggles,
/// discarded on session close or re-sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedRelationship {
    /// Field in the sampled collection that looks like a reference
    pub field_name: String,
    /// The field's inferred type
    pub field_type: TypeTag,
    /// Collection the reference points at; always drawn from the known
    /// collection list, never fabricated
    pub target_collection: String,
    /// Chosen human-readable field in the target collection
    pub display_field: String,
    /// Fields the user may choose the display field from. When non-empty,
    /// `display_field` is one of them.
    pub display_field_options: Vec<String>,
    /// Whether the user has kept this relationship for generation
    pub confirmed: bool,
    /// Up to 3 preview values read from the target sample, each capped at 50
    /// characters
    pub sample_values: Vec<String>,
}
