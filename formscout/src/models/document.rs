use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One document retrieved from a collection sample. Keys are unique, order is
/// irrelevant; values may be primitives, arrays, nested objects, or extended
/// JSON markers (`$oid`, `$date`).
pub type SampledDocument = serde_json::Map<String, Value>;

/// A bounded sample of one collection, as returned by the document-sampling
/// endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleBatch {
    #[serde(default)]
    pub documents: Vec<SampledDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// A collection known to the store, as returned by the list-collections
/// endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub collection_type: String,
}

/// Render a document value for human display, capped at `max_chars`.
/// Strings render verbatim; everything else renders as JSON.
pub fn preview_string(value: &Value, max_chars: usize) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    rendered.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sample_batch_deserializes_without_total_count() {
        let json = r#"{"documents": [{"name": "Jane"}]}"#;
        let batch: SampleBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.documents.len(), 1);
        assert_eq!(batch.total_count, None);
    }

    #[test]
    fn test_sample_batch_deserializes_with_total_count() {
        let json = r#"{"documents": [], "totalCount": 42}"#;
        let batch: SampleBatch = serde_json::from_str(json).unwrap();
        assert!(batch.documents.is_empty());
        assert_eq!(batch.total_count, Some(42));
    }

    #[test]
    fn test_collection_info_maps_type_key() {
        let json = r#"{"name": "books", "type": "collection"}"#;
        let info: CollectionInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.name, "books");
        assert_eq!(info.collection_type, "collection");
    }

    #[test]
    fn test_preview_string_renders_strings_verbatim() {
        assert_eq!(preview_string(&json!("Jane Doe"), 50), "Jane Doe");
    }

    #[test]
    fn test_preview_string_renders_other_values_as_json() {
        assert_eq!(preview_string(&json!(42), 50), "42");
        assert_eq!(preview_string(&json!({"a": 1}), 50), r#"{"a":1}"#);
    }

    #[test]
    fn test_preview_string_truncates_on_char_boundary() {
        let long = "å".repeat(60);
        let preview = preview_string(&json!(long), 50);
        assert_eq!(preview.chars().count(), 50);
    }
}
