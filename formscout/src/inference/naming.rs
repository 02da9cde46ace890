//! Reference-field naming heuristics.
//!
//! English pluralization is inherently lossy; these helpers are kept pure and
//! isolated so a deployment that needs exact matches can swap them for a
//! lookup table without touching the detector.

use crate::models::TypeTag;

/// Suffixes that mark a field as a reference, longest first.
const REFERENCE_SUFFIXES: &[&str] = &["_id", "id", "_ref", "ref"];

/// Whether a field qualifies as a relationship candidate: `objectId`-typed, or
/// named with a reference suffix. The literal `_id` field identifies the
/// document itself and never qualifies.
pub fn is_reference_candidate(field_name: &str, field_type: TypeTag) -> bool {
    let lower = field_name.to_lowercase();
    if lower == "_id" {
        return false;
    }
    field_type == TypeTag::ObjectId || lower.ends_with("id") || lower.ends_with("ref")
}

/// Strip one reference suffix (case-insensitive) and lower-case the remainder.
/// A name without a reference suffix lower-cases whole.
pub fn reference_base_name(field_name: &str) -> String {
    let lower = field_name.to_lowercase();
    for suffix in REFERENCE_SUFFIXES {
        if let Some(base) = lower.strip_suffix(suffix) {
            if !base.is_empty() {
                return base.to_string();
            }
        }
    }
    lower
}

/// Collection-name guesses for a base name, in match-priority order.
fn collection_name_candidates(base_name: &str) -> Vec<String> {
    let mut candidates = vec![base_name.to_string(), format!("{base_name}s")];
    if let Some(singular) = base_name.strip_suffix('s') {
        candidates.push(singular.to_string());
    }
    candidates.push(format!("{base_name}es"));
    if let Some(stem) = base_name.strip_suffix('y') {
        candidates.push(format!("{stem}ies"));
    }
    candidates
}

/// Guess the collection a reference field points at. Tries the base name,
/// simple plural/singular variants, and the `y -> ies` form, in order, against
/// the known collection list (case-insensitive exact match). Returns the
/// collection's own spelling; `None` means the candidate is dropped.
pub fn infer_target_collection(field_name: &str, collections: &[String]) -> Option<String> {
    let base = reference_base_name(field_name);
    for candidate in collection_name_candidates(&base) {
        if let Some(hit) = collections
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&candidate))
        {
            return Some(hit.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_object_id_fields_qualify_without_suffix() {
        assert!(is_reference_candidate("author", TypeTag::ObjectId));
    }

    #[test]
    fn test_suffixed_fields_qualify_regardless_of_type() {
        assert!(is_reference_candidate("bookId", TypeTag::String));
        assert!(is_reference_candidate("book_id", TypeTag::String));
        assert!(is_reference_candidate("ownerRef", TypeTag::String));
        assert!(is_reference_candidate("owner_ref", TypeTag::String));
        assert!(is_reference_candidate("BOOKID", TypeTag::String));
    }

    #[test]
    fn test_plain_fields_never_qualify() {
        assert!(!is_reference_candidate("category", TypeTag::String));
        assert!(!is_reference_candidate("title", TypeTag::String));
    }

    #[test]
    fn test_literal_id_field_is_always_excluded() {
        assert!(!is_reference_candidate("_id", TypeTag::ObjectId));
        assert!(!is_reference_candidate("_id", TypeTag::String));
    }

    #[test]
    fn test_reference_base_name_strips_suffixes() {
        assert_eq!(reference_base_name("bookId"), "book");
        assert_eq!(reference_base_name("book_id"), "book");
        assert_eq!(reference_base_name("ownerRef"), "owner");
        assert_eq!(reference_base_name("owner_ref"), "owner");
        assert_eq!(reference_base_name("author"), "author");
    }

    #[test]
    fn test_reference_base_name_keeps_bare_suffix_words() {
        // "id" on its own would strip to nothing; keep it whole instead.
        assert_eq!(reference_base_name("id"), "id");
        assert_eq!(reference_base_name("ref"), "ref");
    }

    #[test]
    fn test_infer_target_collection_pluralizes() {
        let collections = names(&["books", "authors"]);
        assert_eq!(
            infer_target_collection("bookId", &collections),
            Some("books".to_string())
        );
    }

    #[test]
    fn test_infer_target_collection_exact_match_first() {
        let collections = names(&["book", "books"]);
        assert_eq!(
            infer_target_collection("bookId", &collections),
            Some("book".to_string())
        );
    }

    #[test]
    fn test_infer_target_collection_singularizes() {
        let collections = names(&["order"]);
        assert_eq!(
            infer_target_collection("ordersId", &collections),
            Some("order".to_string())
        );
    }

    #[test]
    fn test_infer_target_collection_es_plural() {
        let collections = names(&["boxes"]);
        assert_eq!(
            infer_target_collection("boxId", &collections),
            Some("boxes".to_string())
        );
    }

    #[test]
    fn test_infer_target_collection_y_to_ies() {
        let collections = names(&["categories"]);
        assert_eq!(
            infer_target_collection("categoryId", &collections),
            Some("categories".to_string())
        );
    }

    #[test]
    fn test_infer_target_collection_case_insensitive_match() {
        let collections = names(&["Books"]);
        assert_eq!(
            infer_target_collection("bookId", &collections),
            Some("Books".to_string())
        );
    }

    #[test]
    fn test_infer_target_collection_misses_irregular_plurals() {
        let collections = names(&["people"]);
        assert_eq!(infer_target_collection("personId", &collections), None);
    }
}
