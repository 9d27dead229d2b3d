//! services/api/src/adapters/storage.rs
//!
//! This module contains the object-storage adapter, the concrete
//! implementation of the `StorageService` port from the core crate. The
//! bucket is plain HTTPS-readable, so "storage access" is a GET plus a JSON
//! parse; the two failure modes map onto `PortError::Fetch` and
//! `PortError::Parse` respectively.

use async_trait::async_trait;
use questionnaire_core::domain::{FileIndex, Questionnaire};
use questionnaire_core::export::FILE_INDEX_FILENAME;
use questionnaire_core::ports::{PortError, PortResult, StorageService};
use serde::de::DeserializeOwned;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that implements the `StorageService` port over HTTPS.
#[derive(Clone)]
pub struct HttpStorageAdapter {
    client: reqwest::Client,
    root_url: String,
}

impl HttpStorageAdapter {
    /// Creates a new `HttpStorageAdapter` reading from `root_url`.
    pub fn new(client: reqwest::Client, root_url: String) -> Self {
        Self {
            client,
            root_url: root_url.trim_end_matches('/').to_string(),
        }
    }

    /// GETs an arbitrary URL and returns its JSON body verbatim. Used by the
    /// raw proxy endpoint, which forwards whatever the bucket serves.
    pub async fn fetch_json(&self, url: &str) -> PortResult<serde_json::Value> {
        fetch_parsed(&self.client, url).await
    }

    async fn fetch_object<T: DeserializeOwned>(&self, filename: &str) -> PortResult<T> {
        let url = format!("{}/{}", self.root_url, filename);
        fetch_parsed(&self.client, &url).await
    }
}

/// GET a URL and decode its JSON body, splitting transport/status failures
/// from body-decode failures.
async fn fetch_parsed<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> PortResult<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PortError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(PortError::Fetch(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| PortError::Fetch(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| PortError::Parse(e.to_string()))
}

//=========================================================================================
// `StorageService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StorageService for HttpStorageAdapter {
    async fn fetch_file_index(&self) -> PortResult<FileIndex> {
        self.fetch_object(FILE_INDEX_FILENAME).await
    }

    async fn fetch_questionnaire(&self, filename: &str) -> PortResult<Questionnaire> {
        self.fetch_object(filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_url_trailing_slash_is_normalized() {
        let adapter = HttpStorageAdapter::new(
            reqwest::Client::new(),
            "https://bucket.example.com/".to_string(),
        );
        assert_eq!(adapter.root_url, "https://bucket.example.com");
    }
}
