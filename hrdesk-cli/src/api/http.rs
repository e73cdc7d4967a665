//! reqwest-backed implementation of the document store contract
//!
//! Speaks the store's REST surface: collections live under
//! `/v1/collections/{name}`, documents under `/v1/collections/{name}/{id}`,
//! all bodies JSON, auth via bearer token when configured.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::store::{DocumentStore, Record};
use crate::config::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    documents: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

impl HttpStore {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.store_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("{} {}", method, url);
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Record>> {
        let response: ListResponse = self
            .request(Method::GET, &format!("v1/collections/{}", collection))
            .send()
            .await
            .with_context(|| format!("Failed to reach store for collection {}", collection))?
            .error_for_status()
            .with_context(|| format!("Store rejected list of {}", collection))?
            .json()
            .await
            .with_context(|| format!("Failed to decode {} listing", collection))?;

        log::debug!("Loaded {} records from {}", response.documents.len(), collection);
        Ok(response.documents)
    }

    async fn create(&self, collection: &str, fields: Map<String, Value>) -> Result<String> {
        let response: CreateResponse = self
            .request(Method::POST, &format!("v1/collections/{}", collection))
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .with_context(|| format!("Failed to reach store for collection {}", collection))?
            .error_for_status()
            .with_context(|| format!("Store rejected create in {}", collection))?
            .json()
            .await
            .context("Failed to decode create response")?;

        Ok(response.id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> Result<()> {
        self.request(Method::PATCH, &format!("v1/collections/{}/{}", collection, id))
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .with_context(|| format!("Failed to reach store for collection {}", collection))?
            .error_for_status()
            .with_context(|| format!("Store rejected update of {}/{}", collection, id))?;

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.request(Method::DELETE, &format!("v1/collections/{}/{}", collection, id))
            .send()
            .await
            .with_context(|| format!("Failed to reach store for collection {}", collection))?
            .error_for_status()
            .with_context(|| format!("Store rejected delete of {}/{}", collection, id))?;

        Ok(())
    }
}
