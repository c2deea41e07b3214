//! Spec-biased retrieval
//!
//! Pulls the top-K neighbours from the vector index, drops matches under the
//! similarity floor, then prefers chunks that carry unit-bearing content.
//! When nothing spec-like survives the floor, the floor-passing set is used
//! instead so the caller still gets evidence.

use super::spec_filter::filter_spec_like;
use crate::config::RetrievalConfig;
use crate::index::{Chunk, VectorIndex};
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Counts describing one retrieval call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMeta {
    pub raw_count: usize,
    pub passed_floor_count: usize,
    pub filtered_count: usize,
    pub used_fallback: bool,
    pub floor: f64,
    pub top_k: usize,
}

/// Evidence chosen for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub finalists: Vec<Chunk>,
    pub meta: RetrievalMeta,
}

impl RetrievalResult {
    /// Result with no evidence and all counts zero
    pub fn empty(floor: f64, top_k: usize) -> Self {
        Self {
            finalists: Vec::new(),
            meta: RetrievalMeta {
                raw_count: 0,
                passed_floor_count: 0,
                filtered_count: 0,
                used_fallback: false,
                floor,
                top_k,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.finalists.is_empty()
    }

    /// Copy of this result with the finalists replaced by a reordering of them
    pub fn with_finalists(&self, finalists: Vec<Chunk>) -> Self {
        Self {
            finalists,
            meta: self.meta.clone(),
        }
    }
}

/// Retriever that biases evidence toward specification content
pub struct SpecBiasedRetriever {
    index: Arc<dyn VectorIndex>,
    config: RetrievalConfig,
}

impl SpecBiasedRetriever {
    pub fn new(index: Arc<dyn VectorIndex>, config: RetrievalConfig) -> Self {
        Self { index, config }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Retrieve evidence for `query`. Never fails: index errors yield an
    /// empty result.
    pub async fn retrieve_with_spec_bias(
        &self,
        query: &str,
        namespace: &str,
        top_k: Option<usize>,
    ) -> RetrievalResult {
        self.retrieve_filtered(query, namespace, top_k, None).await
    }

    /// Same as [`retrieve_with_spec_bias`](Self::retrieve_with_spec_bias),
    /// restricted by a metadata filter
    pub async fn retrieve_filtered(
        &self,
        query: &str,
        namespace: &str,
        top_k: Option<usize>,
        filter: Option<&serde_json::Value>,
    ) -> RetrievalResult {
        let top_k = top_k.filter(|k| *k > 0).unwrap_or(self.config.top_k);
        let floor = self.config.similarity_floor;

        if query.trim().is_empty() {
            tracing::debug!("Blank query, skipping vector search");
            return RetrievalResult::empty(floor, top_k);
        }

        let outcome = Outcome::from_result(
            self.index
                .search_filtered(query, namespace, top_k, filter)
                .await,
        );

        let mut matches = match outcome {
            Outcome::Ok(response) => response.matches,
            Outcome::Degraded(reason) => {
                tracing::warn!(
                    "Vector search on {} failed ({}), answering without evidence",
                    self.index.name(),
                    reason
                );
                return RetrievalResult::empty(floor, top_k);
            }
        };
        matches.truncate(top_k);
        let raw_count = matches.len();

        let mut passed: Vec<Chunk> = matches
            .iter()
            .filter_map(|m| {
                let chunk = Chunk::from_match(m);
                if chunk.is_none() {
                    tracing::warn!("Dropping match {} with non-numeric score", m.id);
                }
                chunk
            })
            .filter(|c| c.similarity_score >= floor)
            .collect();
        passed.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let passed_floor_count = passed.len();

        let filtered = filter_spec_like(&passed);
        let filtered_count = filtered.len();

        let used_fallback = filtered_count == 0 && passed_floor_count > 0;
        let mut finalists = if used_fallback { passed } else { filtered };
        finalists.truncate(self.config.finalist_limit);

        tracing::debug!(
            "Retrieval '{}': raw={} floor_passed={} spec_like={} fallback={} finalists={}",
            query,
            raw_count,
            passed_floor_count,
            filtered_count,
            used_fallback,
            finalists.len()
        );

        RetrievalResult {
            finalists,
            meta: RetrievalMeta {
                raw_count,
                passed_floor_count,
                filtered_count,
                used_fallback,
                floor,
                top_k,
            },
        }
    }
}
