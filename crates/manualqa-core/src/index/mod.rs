//! Vector index collaborator
//!
//! Provides:
//! - The [`VectorIndex`] trait the retriever queries
//! - The [`IndexMatch`] wire type and the single adapter into [`Chunk`]
//! - An HTTP client for the document sidecar and a static in-memory index

mod chunk;
mod http;
mod static_index;

pub use chunk::{Chunk, SourceDocument};
pub use http::HttpVectorIndex;
pub use static_index::StaticVectorIndex;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Nearest-neighbour search over embedded manual chunks
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Search `namespace` for the `top_k` chunks closest to `query`
    async fn search(&self, query: &str, namespace: &str, top_k: usize) -> Result<SearchResponse> {
        self.search_filtered(query, namespace, top_k, None).await
    }

    /// Search with an optional metadata equality filter
    async fn search_filtered(
        &self,
        query: &str,
        namespace: &str,
        top_k: usize,
        filter: Option<&serde_json::Value>,
    ) -> Result<SearchResponse>;

    /// Get index name for logging
    fn name(&self) -> &str;
}

/// Matches returned by a search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub matches: Vec<IndexMatch>,
}

/// One raw match, in whatever shape the upstream producer wrote it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMatch {
    pub id: String,

    /// Similarity in [0, 1], higher is closer
    #[serde(default)]
    pub score: f64,

    #[serde(default)]
    pub metadata: serde_json::Value,

    /// Producer-specific top-level fields (`content`, `chunk`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IndexMatch {
    /// Match carrying its content and provenance in `metadata`
    pub fn new(id: impl Into<String>, score: f64, metadata: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            score,
            metadata,
            extra: serde_json::Map::new(),
        }
    }
}
