//! Wizard state machine: a pure reducer over the linear generation flow
//! `Idle -> Sampled -> Detecting -> Detected -> Generating -> Generated`,
//! with re-sampling as the only backward transition. No IO, no logging;
//! sequencing is testable without any surrounding runtime.

use crate::models::{CollectionSchema, DetectedRelationship, FormField};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WizardState {
    #[default]
    Idle,
    Sampled {
        collection: String,
        schema: CollectionSchema,
        collections: Vec<String>,
        document_count: usize,
    },
    Detecting {
        collection: String,
        schema: CollectionSchema,
        collections: Vec<String>,
        document_count: usize,
    },
    Detected {
        collection: String,
        schema: CollectionSchema,
        document_count: usize,
        relationships: Vec<DetectedRelationship>,
    },
    Generating {
        collection: String,
        schema: CollectionSchema,
        document_count: usize,
        relationships: Vec<DetectedRelationship>,
    },
    Generated {
        fields: Vec<FormField>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// A fresh sample always restarts the forward flow, whatever the current
    /// state; prior schema and relationships are discarded.
    SampleCompleted {
        collection: String,
        schema: CollectionSchema,
        collections: Vec<String>,
        document_count: usize,
    },
    DetectionStarted,
    DetectionCompleted {
        relationships: Vec<DetectedRelationship>,
    },
    RelationshipToggled {
        field_name: String,
        confirmed: bool,
    },
    /// Rejected (state unchanged) when the value is not among that
    /// relationship's display-field options.
    DisplayFieldChanged {
        field_name: String,
        display_field: String,
    },
    GenerationStarted,
    GenerationCompleted {
        fields: Vec<FormField>,
    },
    GenerationFailed,
    /// Backward transition: discard everything and return to `Idle`.
    Resampled,
}

/// Advance the wizard. Events that do not apply to the current state leave it
/// unchanged.
pub fn reduce(state: WizardState, event: WizardEvent) -> WizardState {
    match (state, event) {
        (
            _,
            WizardEvent::SampleCompleted {
                collection,
                schema,
                collections,
                document_count,
            },
        ) => WizardState::Sampled {
            collection,
            schema,
            collections,
            document_count,
        },

        (_, WizardEvent::Resampled) => WizardState::Idle,

        (
            WizardState::Sampled {
                collection,
                schema,
                collections,
                document_count,
            },
            WizardEvent::DetectionStarted,
        ) => WizardState::Detecting {
            collection,
            schema,
            collections,
            document_count,
        },

        (
            WizardState::Detecting {
                collection,
                schema,
                document_count,
                ..
            },
            WizardEvent::DetectionCompleted { relationships },
        ) => WizardState::Detected {
            collection,
            schema,
            document_count,
            relationships,
        },

        (
            WizardState::Detected {
                collection,
                schema,
                document_count,
                mut relationships,
            },
            WizardEvent::RelationshipToggled {
                field_name,
                confirmed,
            },
        ) => {
            if let Some(relationship) = relationships
                .iter_mut()
                .find(|relationship| relationship.field_name == field_name)
            {
                relationship.confirmed = confirmed;
            }
            WizardState::Detected {
                collection,
                schema,
                document_count,
                relationships,
            }
        }

        (
            WizardState::Detected {
                collection,
                schema,
                document_count,
                mut relationships,
            },
            WizardEvent::DisplayFieldChanged {
                field_name,
                display_field,
            },
        ) => {
            if let Some(relationship) = relationships
                .iter_mut()
                .find(|relationship| relationship.field_name == field_name)
            {
                if relationship
                    .display_field_options
                    .iter()
                    .any(|option| option == &display_field)
                {
                    relationship.display_field = display_field;
                }
            }
            WizardState::Detected {
                collection,
                schema,
                document_count,
                relationships,
            }
        }

        (
            WizardState::Detected {
                collection,
                schema,
                document_count,
                relationships,
            },
            WizardEvent::GenerationStarted,
        ) => WizardState::Generating {
            collection,
            schema,
            document_count,
            relationships,
        },

        (WizardState::Generating { .. }, WizardEvent::GenerationCompleted { fields }) => {
            WizardState::Generated { fields }
        }

        (
            WizardState::Generating {
                collection,
                schema,
                document_count,
                relationships,
            },
            WizardEvent::GenerationFailed,
        ) => WizardState::Detected {
            collection,
            schema,
            document_count,
            relationships,
        },

        (unchanged, _) => unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TypeTag;
    use pretty_assertions::assert_eq;

    fn sample_event() -> WizardEvent {
        WizardEvent::SampleCompleted {
            collection: "books".to_string(),
            schema: CollectionSchema::new(),
            collections: vec!["authors".to_string()],
            document_count: 3,
        }
    }

    fn relationship(field: &str, options: &[&str]) -> DetectedRelationship {
        DetectedRelationship {
            field_name: field.to_string(),
            field_type: TypeTag::ObjectId,
            target_collection: "authors".to_string(),
            display_field: options.first().unwrap_or(&"name").to_string(),
            display_field_options: options.iter().map(|s| s.to_string()).collect(),
            confirmed: true,
            sample_values: vec![],
        }
    }

    fn detected_state(relationships: Vec<DetectedRelationship>) -> WizardState {
        WizardState::Detected {
            collection: "books".to_string(),
            schema: CollectionSchema::new(),
            document_count: 3,
            relationships,
        }
    }

    #[test]
    fn test_happy_path_walks_every_state() {
        let state = reduce(WizardState::Idle, sample_event());
        assert!(matches!(state, WizardState::Sampled { .. }));

        let state = reduce(state, WizardEvent::DetectionStarted);
        assert!(matches!(state, WizardState::Detecting { .. }));

        let state = reduce(
            state,
            WizardEvent::DetectionCompleted {
                relationships: vec![relationship("authorId", &["name"])],
            },
        );
        assert!(matches!(state, WizardState::Detected { .. }));

        let state = reduce(state, WizardEvent::GenerationStarted);
        assert!(matches!(state, WizardState::Generating { .. }));

        let state = reduce(state, WizardEvent::GenerationCompleted { fields: vec![] });
        assert!(matches!(state, WizardState::Generated { .. }));
    }

    #[test]
    fn test_resample_discards_from_every_state() {
        let detected = detected_state(vec![relationship("authorId", &["name"])]);
        assert_eq!(reduce(detected, WizardEvent::Resampled), WizardState::Idle);

        let generated = WizardState::Generated { fields: vec![] };
        assert_eq!(reduce(generated, WizardEvent::Resampled), WizardState::Idle);
    }

    #[test]
    fn test_fresh_sample_restarts_from_any_state() {
        let generated = WizardState::Generated { fields: vec![] };
        let state = reduce(generated, sample_event());
        assert!(matches!(state, WizardState::Sampled { .. }));
    }

    #[test]
    fn test_out_of_order_events_leave_state_unchanged() {
        let state = reduce(WizardState::Idle, WizardEvent::DetectionStarted);
        assert_eq!(state, WizardState::Idle);

        let state = reduce(
            WizardState::Idle,
            WizardEvent::GenerationCompleted { fields: vec![] },
        );
        assert_eq!(state, WizardState::Idle);
    }

    #[test]
    fn test_toggle_updates_matching_relationship() {
        let state = detected_state(vec![
            relationship("authorId", &["name"]),
            relationship("editorId", &["name"]),
        ]);

        let state = reduce(
            state,
            WizardEvent::RelationshipToggled {
                field_name: "authorId".to_string(),
                confirmed: false,
            },
        );

        let WizardState::Detected { relationships, .. } = state else {
            panic!("expected detected state");
        };
        assert!(!relationships[0].confirmed);
        assert!(relationships[1].confirmed);
    }

    #[test]
    fn test_display_field_change_respects_options() {
        let state = detected_state(vec![relationship("authorId", &["name", "email"])]);

        let state = reduce(
            state,
            WizardEvent::DisplayFieldChanged {
                field_name: "authorId".to_string(),
                display_field: "email".to_string(),
            },
        );
        let WizardState::Detected { relationships, .. } = state.clone() else {
            panic!("expected detected state");
        };
        assert_eq!(relationships[0].display_field, "email");

        // A value outside the options is rejected.
        let state = reduce(
            state,
            WizardEvent::DisplayFieldChanged {
                field_name: "authorId".to_string(),
                display_field: "secret".to_string(),
            },
        );
        let WizardState::Detected { relationships, .. } = state else {
            panic!("expected detected state");
        };
        assert_eq!(relationships[0].display_field, "email");
    }

    #[test]
    fn test_generation_failure_rolls_back_to_detected() {
        let state = detected_state(vec![relationship("authorId", &["name"])]);
        let state = reduce(state, WizardEvent::GenerationStarted);
        let state = reduce(state, WizardEvent::GenerationFailed);

        let WizardState::Detected { relationships, .. } = state else {
            panic!("expected detected state");
        };
        assert_eq!(relationships.len(), 1);
    }
}
