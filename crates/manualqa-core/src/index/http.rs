//! HTTP client for the document sidecar's vector search endpoint

use super::{IndexMatch, SearchResponse, VectorIndex};
use crate::config::VectorIndexConfig;
use crate::error::{ManualQaError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Vector index reached through `POST {url}/v1/pinecone/search`
pub struct HttpVectorIndex {
    http_client: reqwest::Client,
    config: VectorIndexConfig,
}

impl HttpVectorIndex {
    /// Create new client from configuration
    pub fn new(config: VectorIndexConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(VectorIndexConfig::default())
    }

    pub fn default_namespace(&self) -> &str {
        &self.config.namespace
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    top_k: usize,
    namespace: &'a str,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a serde_json::Value>,
}

#[derive(Deserialize)]
struct SidecarResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    matches: Vec<IndexMatch>,
    #[serde(default)]
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn search_filtered(
        &self,
        query: &str,
        namespace: &str,
        top_k: usize,
        filter: Option<&serde_json::Value>,
    ) -> Result<SearchResponse> {
        let request = SearchRequest {
            query,
            top_k,
            namespace,
            include_metadata: true,
            filter,
        };

        let url = format!("{}/v1/pinecone/search", self.config.url.trim_end_matches('/'));
        tracing::debug!("Vector search: namespace={} top_k={} url={}", namespace, top_k, url);

        let mut req = self.http_client.post(&url).json(&request);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ManualQaError::ExternalError(format!(
                "Vector index error (HTTP {}): {}",
                status, body
            )));
        }

        let body: SidecarResponse = response.json().await?;

        if !body.success {
            return Err(ManualQaError::VectorIndex(
                body.error
                    .unwrap_or_else(|| "search reported failure".to_string()),
            ));
        }

        Ok(SearchResponse {
            matches: body.matches,
        })
    }

    fn name(&self) -> &str {
        &self.config.url
    }
}
