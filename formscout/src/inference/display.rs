//! Display-field selection for relationship targets.

use crate::models::{CollectionSchema, TypeTag};

/// Fields tried first when building the candidate list, in priority order.
const STRING_PRIORITY_FIELDS: &[&str] = &[
    "name",
    "title",
    "label",
    "displayName",
    "display_name",
    "email",
    "username",
];

/// Ranking used to pick the single display field out of the candidate list.
/// Deliberately ordered differently from the candidate priority: a `title`
/// beats a `name` when both are present.
const DISPLAY_FIELD_RANKING: &[&str] = &[
    "title",
    "name",
    "label",
    "displayName",
    "display_name",
    "email",
    "username",
];

/// Build the ordered display-field candidate list for a target schema:
/// priority fields typed `string`, then other `string` fields (excluding
/// `_id`) in schema order, then — only if still empty — anything that is not
/// an `object`, `array`, or `_id`.
pub fn display_field_candidates(schema: &CollectionSchema) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for name in STRING_PRIORITY_FIELDS {
        if schema
            .get(*name)
            .is_some_and(|field| field.type_tag == TypeTag::String)
        {
            candidates.push((*name).to_string());
        }
    }

    for (name, field) in schema {
        if field.type_tag == TypeTag::String
            && name != "_id"
            && !candidates.iter().any(|existing| existing == name)
        {
            candidates.push(name.clone());
        }
    }

    if candidates.is_empty() {
        for (name, field) in schema {
            if name != "_id" && !matches!(field.type_tag, TypeTag::Object | TypeTag::Array) {
                candidates.push(name.clone());
            }
        }
    }

    candidates
}

/// Pick the display field: the highest-ranked name present in the candidate
/// list, else the first candidate, else the literal `"name"`.
pub fn choose_display_field(candidates: &[String]) -> String {
    for name in DISPLAY_FIELD_RANKING {
        if candidates.iter().any(|candidate| candidate == name) {
            return (*name).to_string();
        }
    }
    candidates
        .first()
        .cloned()
        .unwrap_or_else(|| "name".to_string())
}
