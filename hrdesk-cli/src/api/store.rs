//! Core store types: records and the repository seam

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One document in a store collection: a server-assigned id plus a flat
/// field map. The id is owned by the store and never generated client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Repository interface to a document store.
///
/// The contract matches what the screens need and nothing more: read the
/// whole collection, create one record, patch one record, delete one record.
/// No pagination or filtering is pushed down; callers slice in memory.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read every record in the collection, in store order.
    async fn list_all(&self, collection: &str) -> Result<Vec<Record>>;

    /// Create a record and return its store-assigned id.
    async fn create(&self, collection: &str, fields: Map<String, Value>) -> Result<String>;

    /// Merge the given fields into an existing record. Fields not named are
    /// left untouched (last write wins, no version check).
    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> Result<()>;

    /// Delete a record by id.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}
