use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CollectionInfo, SampleBatch};

/// Read-only access to the external document store. One connection and
/// database are fixed per source; collections are addressed by name.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch up to `limit` documents from `collection`.
    async fn sample_documents(&self, collection: &str, limit: usize) -> Result<SampleBatch>;

    /// List the collections available in the source's database.
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;
}
