use std::sync::Arc;

use crate::config::SamplingConfig;
use crate::error::{Result, ScoutError};
use crate::inference::{sampler, RelationshipDetector};
use crate::llm::{prompts, LlmProvider};
use crate::models::{
    humanize_field_name, CollectionSchema, DetectedRelationship, FormField,
    GeneratedFieldsResponse, LookupConfig,
};
use crate::store::DocumentSource;
use crate::wizard::state::{reduce, WizardEvent, WizardState};

/// One generation run: sample a collection, detect relationships, take user
/// toggles, generate a field list, and fold the confirmed relationships in.
/// Owns its state exclusively; dropping the session discards everything.
pub struct GenerationSession {
    store: Arc<dyn DocumentSource>,
    llm: LlmProvider,
    sampling: SamplingConfig,
    state: WizardState,
}

impl GenerationSession {
    pub fn new(store: Arc<dyn DocumentSource>, llm: LlmProvider, sampling: SamplingConfig) -> Self {
        Self {
            store,
            llm,
            sampling,
            state: WizardState::Idle,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    fn apply(&mut self, event: WizardEvent) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    /// Sample the primary collection and infer its schema. Failures surface
    /// to the caller and block the rest of the flow. Re-sampling discards any
    /// previously detected relationships.
    pub async fn sample(&mut self, collection: &str) -> Result<&CollectionSchema> {
        let batch = self
            .store
            .sample_documents(collection, self.sampling.sample_limit)
            .await?;
        let collections = self
            .store
            .list_collections()
            .await?
            .into_iter()
            .map(|info| info.name)
            .collect::<Vec<_>>();

        let document_count = batch.documents.len();
        let schema = sampler::infer_schema(&batch.documents);
        tracing::info!(
            collection = %collection,
            documents = document_count,
            fields = schema.len(),
            "Sampled collection schema"
        );

        self.apply(WizardEvent::SampleCompleted {
            collection: collection.to_string(),
            schema,
            collections,
            document_count,
        });

        if let WizardState::Sampled { schema, .. } = &self.state {
            Ok(schema)
        } else {
            Err(ScoutError::Validation(
                "sampling did not reach the sampled state".to_string(),
            ))
        }
    }

    /// Detect relationships for the sampled schema. Partial results are
    /// expected when target samples fail; see `RelationshipDetector`.
    pub async fn detect_relationships(&mut self) -> Result<&[DetectedRelationship]> {
        let (schema, collections) = match &self.state {
            WizardState::Sampled {
                schema, collections, ..
            } => (schema.clone(), collections.clone()),
            _ => {
                return Err(ScoutError::Validation(
                    "relationship detection requires a sampled schema".to_string(),
                ))
            }
        };

        self.apply(WizardEvent::DetectionStarted);

        let detector = RelationshipDetector::new(self.store.clone(), &self.sampling);
        let relationships = detector.detect(&schema, &collections).await;
        tracing::info!(count = relationships.len(), "Detected relationships");

        self.apply(WizardEvent::DetectionCompleted { relationships });

        if let WizardState::Detected { relationships, .. } = &self.state {
            Ok(relationships)
        } else {
            Err(ScoutError::Validation(
                "detection did not reach the detected state".to_string(),
            ))
        }
    }

    /// Keep or drop a detected relationship for generation.
    pub fn confirm_relationship(&mut self, field_name: &str, confirmed: bool) {
        self.apply(WizardEvent::RelationshipToggled {
            field_name: field_name.to_string(),
            confirmed,
        });
    }

    /// Choose a different display field for a detected relationship. The
    /// value must be one of the relationship's display-field options.
    pub fn set_display_field(&mut self, field_name: &str, display_field: &str) -> Result<()> {
        let valid = match &self.state {
            WizardState::Detected { relationships, .. } => relationships
                .iter()
                .find(|relationship| relationship.field_name == field_name)
                .map(|relationship| {
                    relationship
                        .display_field_options
                        .iter()
                        .any(|option| option == display_field)
                }),
            _ => None,
        };

        match valid {
            Some(true) => {
                self.apply(WizardEvent::DisplayFieldChanged {
                    field_name: field_name.to_string(),
                    display_field: display_field.to_string(),
                });
                Ok(())
            }
            Some(false) => Err(ScoutError::Validation(format!(
                "'{display_field}' is not a display field option for '{field_name}'"
            ))),
            None => Err(ScoutError::Validation(format!(
                "no detected relationship for field '{field_name}'"
            ))),
        }
    }

    /// Generate the form field list and apply confirmed relationships. The
    /// state rolls back to detected on failure so the caller can retry.
    pub async fn generate(&mut self, description: &str) -> Result<&[FormField]> {
        if !self.llm.is_available() {
            return Err(ScoutError::LlmUnavailable(
                "form generation requires an LLM configuration".to_string(),
            ));
        }

        let (collection, schema, document_count, relationships) = match &self.state {
            WizardState::Detected {
                collection,
                schema,
                document_count,
                relationships,
            } => (
                collection.clone(),
                schema.clone(),
                *document_count,
                relationships.clone(),
            ),
            _ => {
                return Err(ScoutError::Validation(
                    "generation requires detected relationships".to_string(),
                ))
            }
        };

        self.apply(WizardEvent::GenerationStarted);

        let prompt = prompts::form_generation_prompt(
            description,
            &collection,
            &schema,
            document_count,
            &relationships,
        );

        match self
            .llm
            .complete_structured::<GeneratedFieldsResponse>(&prompt)
            .await
        {
            Ok(response) => {
                let fields = apply_relationships(response.into_fields(), &relationships);
                self.apply(WizardEvent::GenerationCompleted { fields });

                if let WizardState::Generated { fields } = &self.state {
                    Ok(fields)
                } else {
                    Err(ScoutError::Validation(
                        "generation did not reach the generated state".to_string(),
                    ))
                }
            }
            Err(error) => {
                tracing::error!(error = %error, "Form generation failed");
                self.apply(WizardEvent::GenerationFailed);
                Err(error)
            }
        }
    }
}

/// Post-process a generated field list: fill missing labels and force any
/// field matching a confirmed relationship to a lookup backed by the
/// relationship's target, overriding whatever the generation step returned.
pub fn apply_relationships(
    fields: Vec<FormField>,
    relationships: &[DetectedRelationship],
) -> Vec<FormField> {
    fields
        .into_iter()
        .map(|mut field| {
            if field.label.is_empty() {
                field.label = humanize_field_name(&field.name);
            }
            if let Some(relationship) = relationships
                .iter()
                .filter(|relationship| relationship.confirmed)
                .find(|relationship| relationship.field_name == field.name)
            {
                field.field_type = "lookup".to_string();
                field.lookup = Some(LookupConfig::for_relationship(relationship));
            }
            field
        })
        .collect()
}
