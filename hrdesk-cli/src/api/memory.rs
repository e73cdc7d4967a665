//! In-memory document store used by tests

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::store::{DocumentStore, Record};

/// Store backed by a mutex-guarded map of collections. Ids are freshly
/// generated UUIDs, like the real store's server-assigned ids.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Record>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn create(&self, collection: &str, fields: Map<String, Value>) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Record::new(id.clone(), fields));
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        let record = collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| r.id == id));

        match record {
            Some(record) => {
                for (key, value) in fields {
                    record.fields.insert(key, value);
                }
                Ok(())
            }
            None => bail!("No document {} in {}", id, collection),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| anyhow::anyhow!("No collection {}", collection))?;

        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            bail!("No document {} in {}", id, collection);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.create("Departments", fields(&[("name", "Engineering")])).await.unwrap();
        let b = store.create("Departments", fields(&[("name", "Sales")])).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.list_all("Departments").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .create("Departments", fields(&[("name", "Engineering"), ("managerId", "M1")]))
            .await
            .unwrap();

        store
            .update("Departments", &id, fields(&[("managerId", "M2")]))
            .await
            .unwrap();

        let records = store.list_all("Departments").await.unwrap();
        assert_eq!(records[0].fields["name"], "Engineering");
        assert_eq!(records[0].fields["managerId"], "M2");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails() {
        let store = MemoryStore::new();
        store.create("Departments", fields(&[("name", "Engineering")])).await.unwrap();

        assert!(store.delete("Departments", "missing").await.is_err());
        assert_eq!(store.list_all("Departments").await.unwrap().len(), 1);
    }
}
