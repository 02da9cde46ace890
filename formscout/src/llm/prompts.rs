//! Prompt templates for the form-generation service
//!
//! These templates use basic `format!()` interpolation for type safety.
//! Missing variables will cause compile-time errors.

use crate::models::{preview_string, CollectionSchema, DetectedRelationship};

const SAMPLE_PREVIEW_CHARS: usize = 40;

/// Render an inferred schema as a line-per-field summary for prompt
/// embedding. A field observed in every sampled document is marked as likely
/// required.
///
/// # Example
/// ```
/// use formscout::inference::infer_schema;
/// use formscout::llm::prompts::schema_summary;
///
/// let docs = vec![serde_json::json!({"title": "Dune"}).as_object().unwrap().clone()];
/// let schema = infer_schema(&docs);
/// let summary = schema_summary(&schema, docs.len());
/// assert!(summary.contains("title"));
/// assert!(summary.contains("likely required"));
/// ```
pub fn schema_summary(schema: &CollectionSchema, document_count: usize) -> String {
    schema
        .iter()
        .map(|(name, field)| {
            let mut line = format!(
                "- {name} ({}, control: {}, e.g. {})",
                field.type_tag,
                field.type_tag.suggested_control(),
                preview_string(&field.sample_value, SAMPLE_PREVIEW_CHARS)
            );
            if document_count > 0 && field.occurrence_count == document_count as u64 {
                line.push_str(" [likely required]");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate a prompt instructing the service to produce a form definition
/// for `collection`, honoring the confirmed relationships as lookup fields.
///
/// Returns a prompt that asks for a JSON array of field objects with
/// "name", "label", "type", and "required" keys.
pub fn form_generation_prompt(
    description: &str,
    collection: &str,
    schema: &CollectionSchema,
    document_count: usize,
    relationships: &[DetectedRelationship],
) -> String {
    let summary = schema_summary(schema, document_count);

    let lookup_instructions = relationships
        .iter()
        .filter(|relationship| relationship.confirmed)
        .map(|relationship| {
            format!(
                "- \"{}\" must be a lookup field backed by the \"{}\" collection, displaying its \"{}\" field.",
                relationship.field_name,
                relationship.target_collection,
                relationship.display_field
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let relationship_section = if lookup_instructions.is_empty() {
        String::new()
    } else {
        format!(
            "\nConfirmed relationships (these fields MUST use type \"lookup\"):\n{lookup_instructions}\n"
        )
    };

    format!(
        r#"Design a data-entry form for the "{collection}" collection.

Purpose: {description}

The collection's sampled schema:
{summary}

Field types available: text, textarea, number, checkbox, date, email, phone, url, select, lookup.
{relationship_section}
Skip the "_id" field. Use clear human-readable labels. Mark a field required
only when the sampled schema says it is likely required.

Respond with valid JSON only. Example format:
[
  {{"name": "title", "label": "Title", "type": "text", "required": true}},
  {{"name": "publishedAt", "label": "Published At", "type": "date", "required": false}}
]"#
    )
}
