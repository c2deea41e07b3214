//! Fixed in-memory vector index
//!
//! Serves a pre-recorded list of matches, e.g. a saved sidecar response.
//! The query text is ignored; matches come back best-first.

use super::{IndexMatch, SearchResponse, VectorIndex};
use crate::error::{ManualQaError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Vector index backed by a fixed match list
pub struct StaticVectorIndex {
    name: String,
    matches: Vec<IndexMatch>,
}

impl StaticVectorIndex {
    pub fn new(matches: Vec<IndexMatch>) -> Self {
        Self {
            name: "static".to_string(),
            matches,
        }
    }

    /// Load matches from a JSON file holding `{"matches": [...]}` or a bare array
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ManualQaError::FixtureNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let matches: Vec<IndexMatch> = match value {
            serde_json::Value::Array(_) => serde_json::from_value(value)?,
            _ => serde_json::from_value::<SearchResponse>(value)?.matches,
        };

        Ok(Self {
            name: path.display().to_string(),
            matches,
        })
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

fn passes_filter(m: &IndexMatch, filter: Option<&serde_json::Value>) -> bool {
    let Some(conditions) = filter.and_then(|f| f.as_object()) else {
        return true;
    };

    conditions.iter().all(|(field, expected)| {
        m.metadata
            .get(field)
            .map(|actual| match (actual.as_str(), expected.as_str()) {
                (Some(a), Some(e)) => a.eq_ignore_ascii_case(e),
                _ => actual == expected,
            })
            .unwrap_or(false)
    })
}

#[async_trait]
impl VectorIndex for StaticVectorIndex {
    async fn search_filtered(
        &self,
        _query: &str,
        _namespace: &str,
        top_k: usize,
        filter: Option<&serde_json::Value>,
    ) -> Result<SearchResponse> {
        let mut matches: Vec<IndexMatch> = self
            .matches
            .iter()
            .filter(|m| passes_filter(m, filter))
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_k);

        Ok(SearchResponse { matches })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn fixture() -> Vec<IndexMatch> {
        vec![
            IndexMatch::new("low", 0.2, json!({"manufacturer": "Spectra"})),
            IndexMatch::new("high", 0.9, json!({"manufacturer": "Village Marine"})),
            IndexMatch::new("mid", 0.5, json!({"manufacturer": "spectra"})),
        ]
    }

    #[tokio::test]
    async fn test_sorted_and_truncated() {
        let index = StaticVectorIndex::new(fixture());
        let response = index.search("anything", "NS", 2).await.unwrap();
        let ids: Vec<_> = response.matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid"]);
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive() {
        let index = StaticVectorIndex::new(fixture());
        let filter = json!({"manufacturer": "SPECTRA"});
        let response = index
            .search_filtered("q", "NS", 10, Some(&filter))
            .await
            .unwrap();
        assert_eq!(response.matches.len(), 2);
    }

    #[test]
    fn test_from_file_shapes() {
        let dir = TempDir::new().unwrap();

        let wrapped = dir.path().join("wrapped.json");
        std::fs::write(
            &wrapped,
            r#"{"success": true, "matches": [{"id": "a", "score": 0.4, "metadata": {}}]}"#,
        )
        .unwrap();
        assert_eq!(StaticVectorIndex::from_file(&wrapped).unwrap().len(), 1);

        let bare = dir.path().join("bare.json");
        std::fs::write(&bare, r#"[{"id": "a", "score": 0.4}, {"id": "b", "score": 0.1}]"#)
            .unwrap();
        assert_eq!(StaticVectorIndex::from_file(&bare).unwrap().len(), 2);

        let missing = StaticVectorIndex::from_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ManualQaError::FixtureNotFound(_))));
    }
}
