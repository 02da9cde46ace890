use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{Result, ScoutError};
use crate::models::{CollectionInfo, SampleBatch};

use super::traits::DocumentSource;

/// Document store reached through the surrounding application's sampling and
/// collection-listing endpoints.
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: reqwest::Client,
    base_url: String,
    connection_string: String,
    database: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SampleDocumentsRequest<'a> {
    connection_string: &'a str,
    database: &'a str,
    collection: &'a str,
    limit: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListCollectionsRequest<'a> {
    connection_string: &'a str,
    database: &'a str,
}

#[derive(Deserialize)]
struct ListCollectionsResponse {
    #[serde(default)]
    collections: Vec<CollectionInfo>,
}

impl HttpDocumentSource {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                ScoutError::Store(format!("Failed to create store HTTP client: {error}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            connection_string: config.connection_string.clone(),
            database: config.database.clone(),
        })
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn sample_documents(&self, collection: &str, limit: usize) -> Result<SampleBatch> {
        let url = format!("{}/api/sample-documents", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SampleDocumentsRequest {
                connection_string: &self.connection_string,
                database: &self.database,
                collection,
                limit,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScoutError::Store(format!(
                "Sampling '{collection}' failed with status {}",
                response.status()
            )));
        }

        Ok(response.json::<SampleBatch>().await?)
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let url = format!("{}/api/list-collections", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ListCollectionsRequest {
                connection_string: &self.connection_string,
                database: &self.database,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScoutError::Store(format!(
                "Listing collections failed with status {}",
                response.status()
            )));
        }

        Ok(response.json::<ListCollectionsResponse>().await?.collections)
    }
}
