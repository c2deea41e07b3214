//! Configuration management

use crate::error::{ManualQaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration (reranking and summaries)
    #[serde(default)]
    pub llm_service: LLMServiceConfig,

    /// Vector index sidecar configuration
    #[serde(default)]
    pub vector_index: VectorIndexConfig,

    /// Retrieval tuning
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Answer synthesis tuning
    #[serde(default)]
    pub synthesis: SynthesisConfig,
}

/// LLM service configuration for an OpenAI-compatible endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the chat completions service
    #[serde(default = "default_llm_url")]
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// Completion length cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: default_llm_url(),
            model: default_chat_model(),
            api_key: std::env::var("MANUALQA_LLM_API_KEY").ok(),
            timeout_secs: default_llm_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_llm_url() -> String {
    std::env::var("MANUALQA_LLM_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

fn default_chat_model() -> String {
    std::env::var("MANUALQA_LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

fn default_llm_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    512
}

/// Vector index sidecar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndexConfig {
    /// Base URL of the search sidecar
    #[serde(default = "default_index_url")]
    pub url: String,

    /// Namespace used when a question carries none
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_index_timeout")]
    pub timeout_secs: u64,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            url: default_index_url(),
            namespace: default_namespace(),
            api_key: std::env::var("MANUALQA_INDEX_API_KEY").ok(),
            timeout_secs: default_index_timeout(),
        }
    }
}

fn default_index_url() -> String {
    std::env::var("MANUALQA_INDEX_URL").unwrap_or_else(|_| "http://localhost:8001".to_string())
}

fn default_namespace() -> String {
    std::env::var("MANUALQA_INDEX_NAMESPACE").unwrap_or_else(|_| "REIMAGINEDDOCS".to_string())
}

fn default_index_timeout() -> u64 {
    15
}

/// Retrieval tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Nearest neighbours requested from the index
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Minimum similarity a match needs to be considered at all
    #[serde(default = "default_similarity_floor")]
    pub similarity_floor: f64,

    /// Finalists handed to reranking and synthesis
    #[serde(default = "default_finalist_limit")]
    pub finalist_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            similarity_floor: default_similarity_floor(),
            finalist_limit: default_finalist_limit(),
        }
    }
}

fn default_top_k() -> usize {
    std::env::var("MANUALQA_TOP_K")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(40)
}

fn default_similarity_floor() -> f64 {
    std::env::var("MANUALQA_SIMILARITY_FLOOR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.05)
}

fn default_finalist_limit() -> usize {
    5
}

/// Answer synthesis tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Characters of each chunk shown to the reranker
    #[serde(default = "default_rerank_excerpt_chars")]
    pub rerank_excerpt_chars: usize,

    /// Characters per bullet in the categorized breakdown
    #[serde(default = "default_bullet_chars")]
    pub bullet_chars: usize,

    /// Characters per quoted excerpt in operating-value answers
    #[serde(default = "default_quote_chars")]
    pub quote_chars: usize,

    /// Characters of each chunk shown to the summarizer
    #[serde(default = "default_summary_excerpt_chars")]
    pub summary_excerpt_chars: usize,

    #[serde(default = "default_true")]
    pub enable_summary: bool,

    #[serde(default = "default_true")]
    pub enable_rerank: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            rerank_excerpt_chars: default_rerank_excerpt_chars(),
            bullet_chars: default_bullet_chars(),
            quote_chars: default_quote_chars(),
            summary_excerpt_chars: default_summary_excerpt_chars(),
            enable_summary: true,
            enable_rerank: true,
        }
    }
}

fn default_rerank_excerpt_chars() -> usize {
    800
}

fn default_bullet_chars() -> usize {
    300
}

fn default_quote_chars() -> usize {
    600
}

fn default_summary_excerpt_chars() -> usize {
    1200
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from `MANUALQA_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::resolved_path())
    }

    /// `MANUALQA_CONFIG` when set, otherwise [`Config::default_path`]
    pub fn resolved_path() -> PathBuf {
        std::env::var("MANUALQA_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path())
    }

    /// Load config from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str::<Config>(&content)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Reject values the retrieval math cannot work with
    pub fn validate(&self) -> Result<()> {
        let floor = self.retrieval.similarity_floor;
        if !(0.0..=1.0).contains(&floor) {
            return Err(ManualQaError::Config(format!(
                "similarity_floor must be within [0, 1], got {}",
                floor
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(ManualQaError::Config("top_k must be positive".to_string()));
        }
        if self.retrieval.finalist_limit == 0 {
            return Err(ManualQaError::Config(
                "finalist_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
