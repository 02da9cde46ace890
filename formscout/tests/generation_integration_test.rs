//! End-to-end wizard runs against mocked store and LLM endpoints: sample,
//! detect, toggle, generate, and fold confirmed relationships into the
//! returned field list.

use std::sync::Arc;

use formscout::config::{LlmConfig, SamplingConfig, StoreConfig};
use formscout::llm::LlmProvider;
use formscout::store::HttpDocumentSource;
use formscout::wizard::{GenerationSession, WizardState};
use formscout::ScoutError;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_config(base_url: String) -> StoreConfig {
    StoreConfig {
        base_url,
        connection_string: "mongodb://localhost:27017".to_string(),
        database: "library".to_string(),
        timeout_secs: 5,
    }
}

fn llm_provider(base_url: String) -> LlmProvider {
    let config = LlmConfig {
        model: "openai/gpt-4o-mini".to_string(),
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url),
        timeout_secs: 5,
        max_retries: 0,
    };
    LlmProvider::new(Some(&config))
}

fn llm_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": 20,
            "total_tokens": 30
        }
    })
}

/// Store with a "books" primary collection referencing "authors".
async fn library_store(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/sample-documents"))
        .and(body_partial_json(json!({"collection": "books"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {"_id": {"$oid": "507f1f77bcf86cd799439011"},
                 "title": "Dune",
                 "authorId": {"$oid": "507f1f77bcf86cd799439021"}},
                {"_id": {"$oid": "507f1f77bcf86cd799439012"},
                 "title": "Foundation",
                 "authorId": {"$oid": "507f1f77bcf86cd799439022"}}
            ],
            "totalCount": 2
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/sample-documents"))
        .and(body_partial_json(json!({"collection": "authors"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {"_id": {"$oid": "507f1f77bcf86cd799439021"}, "name": "Jane"},
                {"_id": {"$oid": "507f1f77bcf86cd799439022"}, "name": "Amir"}
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/list-collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": [
                {"name": "books", "type": "collection"},
                {"name": "authors", "type": "collection"}
            ]
        })))
        .mount(server)
        .await;
}

async fn session_with_llm(
    store_server: &MockServer,
    llm_server: &MockServer,
) -> GenerationSession {
    let source =
        HttpDocumentSource::new(&store_config(store_server.uri())).expect("source builds");
    GenerationSession::new(
        Arc::new(source),
        llm_provider(llm_server.uri()),
        SamplingConfig::default(),
    )
}

#[tokio::test]
async fn test_generate_forces_confirmed_relationships_to_lookup() {
    let store_server = MockServer::start().await;
    library_store(&store_server).await;

    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(llm_response(
            r#"[{"name": "title", "label": "Title", "type": "text", "required": true},
                {"name": "authorId", "label": "Author", "type": "text"}]"#,
        )))
        .mount(&llm_server)
        .await;

    let mut session = session_with_llm(&store_server, &llm_server).await;

    session.sample("books").await.expect("sample should succeed");
    let relationships = session
        .detect_relationships()
        .await
        .expect("detection should succeed");
    assert_eq!(relationships.len(), 1);
    assert_eq!(relationships[0].field_name, "authorId");

    let fields = session
        .generate("a book intake form")
        .await
        .expect("generation should succeed")
        .to_vec();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].field_type, "text");

    let author = &fields[1];
    assert_eq!(author.field_type, "lookup");
    let lookup = author.lookup.as_ref().expect("lookup should be set");
    assert_eq!(lookup.collection, "authors");
    assert_eq!(lookup.display_field, "name");
    assert_eq!(lookup.value_field, "_id");
    assert!(lookup.searchable);
    assert!(lookup.preload_options);
}

#[tokio::test]
async fn test_unconfirmed_relationship_is_not_forced() {
    let store_server = MockServer::start().await;
    library_store(&store_server).await;

    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(llm_response(
            r#"[{"name": "authorId", "label": "Author", "type": "text"}]"#,
        )))
        .mount(&llm_server)
        .await;

    let mut session = session_with_llm(&store_server, &llm_server).await;

    session.sample("books").await.expect("sample should succeed");
    session
        .detect_relationships()
        .await
        .expect("detection should succeed");
    session.confirm_relationship("authorId", false);

    let fields = session
        .generate("a book intake form")
        .await
        .expect("generation should succeed")
        .to_vec();

    assert_eq!(fields[0].field_type, "text");
    assert!(fields[0].lookup.is_none());
}

#[tokio::test]
async fn test_generation_failure_rolls_back_and_can_retry() {
    let store_server = MockServer::start().await;
    library_store(&store_server).await;

    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(llm_response("not json at all")))
        .expect(1)
        .mount(&llm_server)
        .await;

    let mut session = session_with_llm(&store_server, &llm_server).await;
    session.sample("books").await.expect("sample should succeed");
    session
        .detect_relationships()
        .await
        .expect("detection should succeed");

    let result = session.generate("a book intake form").await;
    assert!(matches!(result, Err(ScoutError::Llm(_))));
    assert!(matches!(session.state(), WizardState::Detected { .. }));

    // A second attempt is legal from the rolled-back state.
    llm_server.reset().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(llm_response(
            r#"{"fields": [{"name": "title", "type": "text"}]}"#,
        )))
        .mount(&llm_server)
        .await;

    let fields = session
        .generate("a book intake form")
        .await
        .expect("retry should succeed")
        .to_vec();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].label, "Title");
}

#[tokio::test]
async fn test_generate_without_llm_is_unavailable() {
    let store_server = MockServer::start().await;
    library_store(&store_server).await;

    let source =
        HttpDocumentSource::new(&store_config(store_server.uri())).expect("source builds");
    let mut session = GenerationSession::new(
        Arc::new(source),
        LlmProvider::unavailable("test"),
        SamplingConfig::default(),
    );

    session.sample("books").await.expect("sample should succeed");
    session
        .detect_relationships()
        .await
        .expect("detection should succeed");

    let result = session.generate("a form").await;
    assert!(matches!(result, Err(ScoutError::LlmUnavailable(_))));
}

#[tokio::test]
async fn test_generate_before_detection_is_rejected() {
    let store_server = MockServer::start().await;
    library_store(&store_server).await;

    let llm_server = MockServer::start().await;
    let mut session = session_with_llm(&store_server, &llm_server).await;

    session.sample("books").await.expect("sample should succeed");

    let result = session.generate("a form").await;
    assert!(matches!(result, Err(ScoutError::Validation(_))));
}

#[tokio::test]
async fn test_primary_sample_failure_surfaces() {
    let store_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sample-documents"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&store_server)
        .await;

    let llm_server = MockServer::start().await;
    let mut session = session_with_llm(&store_server, &llm_server).await;

    let result = session.sample("books").await;
    assert!(matches!(result, Err(ScoutError::Store(_))));
    assert!(matches!(session.state(), WizardState::Idle));
}
