//! Typed REST client for the two backend collections
//!
//! Issues `GET`/`POST`/`DELETE` against `/users` and `/creativity-paths`
//! on the configured base URL. The client is stateless; the session
//! layer owns the cached replicas.

use crate::models::{Collection, CreativityPathRecord, PathDraft, RecordId, UserDraft, UserRecord};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for backend requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the creativity backend
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ResourceClient {
    /// Create a client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    fn record_url(&self, collection: Collection, id: &RecordId) -> String {
        format!("{}/{}/{}", self.base_url, collection.path(), id)
    }

    /// Fetch the full current contents of `/users`
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.list(Collection::Users).await
    }

    /// Fetch the full current contents of `/creativity-paths`
    pub async fn list_paths(&self) -> Result<Vec<CreativityPathRecord>> {
        self.list(Collection::CreativityPaths).await
    }

    /// Create a user; the backend assigns the identity
    pub async fn create_user(&self, draft: &UserDraft) -> Result<UserRecord> {
        self.create(Collection::Users, draft).await
    }

    /// Create a creativity path; the backend assigns the identity
    pub async fn create_path(&self, draft: &PathDraft) -> Result<CreativityPathRecord> {
        self.create(Collection::CreativityPaths, draft).await
    }

    /// Remove a record by identity
    ///
    /// Idempotent from the caller's perspective: the backend either
    /// rejects an unknown id or succeeds vacuously; either outcome is
    /// passed through unchanged.
    pub async fn delete(&self, collection: Collection, id: &RecordId) -> Result<()> {
        let url = self.record_url(collection, id);
        debug!(collection = %collection, id = %id, "deleting record");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(status.as_u16(), body));
        }

        Ok(())
    }

    async fn list<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let url = self.collection_url(collection);
        debug!(collection = %collection, "fetching collection");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(status.as_u16(), body));
        }

        response.json().await.map_err(|e| Error::Parse(e.to_string()))
    }

    async fn create<D, T>(&self, collection: Collection, draft: &D) -> Result<T>
    where
        D: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.collection_url(collection);
        debug!(collection = %collection, "creating record");

        let response = self
            .http
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(status.as_u16(), body));
        }

        response.json().await.map_err(|e| Error::Parse(e.to_string()))
    }
}
