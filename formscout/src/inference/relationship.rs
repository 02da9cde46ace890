use std::sync::Arc;

use crate::config::SamplingConfig;
use crate::inference::{display, naming, sampler};
use crate::models::{preview_string, CollectionSchema, DetectedRelationship, SampledDocument};
use crate::store::DocumentSource;

/// Walks a sampled schema, guesses which fields reference other collections,
/// and confirms each guess against a sample of the target collection.
pub struct RelationshipDetector {
    store: Arc<dyn DocumentSource>,
    target_sample_limit: usize,
    preview_limit: usize,
    preview_max_chars: usize,
}

impl RelationshipDetector {
    pub fn new(store: Arc<dyn DocumentSource>, config: &SamplingConfig) -> Self {
        Self {
            store,
            target_sample_limit: config.target_sample_limit,
            preview_limit: config.preview_limit,
            preview_max_chars: config.preview_max_chars,
        }
    }

    /// Detect relationships for every qualifying field in `schema`.
    ///
    /// One target sample is fetched per candidate, awaited sequentially. A
    /// candidate whose target fetch fails is logged and skipped; detection
    /// continues for the rest, so the result may be partial but the call
    /// itself never fails.
    pub async fn detect(
        &self,
        schema: &CollectionSchema,
        collections: &[String],
    ) -> Vec<DetectedRelationship> {
        let mut detected = Vec::new();

        for (field_name, field) in schema {
            if !naming::is_reference_candidate(field_name, field.type_tag) {
                continue;
            }

            let Some(target) = naming::infer_target_collection(field_name, collections) else {
                tracing::debug!(field = %field_name, "No collection matches reference field");
                continue;
            };

            let batch = match self
                .store
                .sample_documents(&target, self.target_sample_limit)
                .await
            {
                Ok(batch) => batch,
                Err(error) => {
                    tracing::warn!(
                        field = %field_name,
                        collection = %target,
                        error = %error,
                        "Target sample failed, skipping candidate"
                    );
                    continue;
                }
            };

            let target_schema = sampler::infer_schema(&batch.documents);
            let display_field_options = display::display_field_candidates(&target_schema);
            let display_field = display::choose_display_field(&display_field_options);
            let sample_values = self.preview_values(&batch.documents, &display_field);

            detected.push(DetectedRelationship {
                field_name: field_name.clone(),
                field_type: field.type_tag,
                target_collection: target,
                display_field,
                display_field_options,
                confirmed: true,
                sample_values,
            });
        }

        detected
    }

    fn preview_values(&self, documents: &[SampledDocument], display_field: &str) -> Vec<String> {
        documents
            .iter()
            .take(self.preview_limit)
            .filter_map(|document| document.get(display_field))
            .filter(|value| !value.is_null())
            .map(|value| preview_string(value, self.preview_max_chars))
            .collect()
    }
}
