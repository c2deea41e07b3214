//! CLI command handlers

pub mod ask;
pub mod config;
pub mod retrieve;
pub mod style;

use crate::app::BackendArgs;
use anyhow::Result;
use manualqa_core::{
    AnswerPipeline, Config, DisabledLLMClient, HttpLLMClient, HttpVectorIndex, LLMClient,
    StaticVectorIndex, VectorIndex,
};
use std::path::Path;
use std::sync::Arc;

/// Load and validate the configuration file
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}

pub fn build_index(config: &Config, matches: Option<&Path>) -> Result<Arc<dyn VectorIndex>> {
    Ok(match matches {
        Some(path) => {
            let index = StaticVectorIndex::from_file(path)?;
            tracing::debug!("Serving {} matches from {}", index.len(), path.display());
            Arc::new(index)
        }
        None => Arc::new(HttpVectorIndex::new(config.vector_index.clone())?),
    })
}

pub fn build_llm(config: &Config, no_llm: bool) -> Result<Arc<dyn LLMClient>> {
    Ok(if no_llm {
        Arc::new(DisabledLLMClient)
    } else {
        Arc::new(HttpLLMClient::new(config.llm_service.clone())?)
    })
}

pub fn build_pipeline(config: &Config, backend: &BackendArgs) -> Result<AnswerPipeline> {
    let index = build_index(config, backend.matches.as_deref())?;
    let llm = build_llm(config, backend.no_llm)?;
    Ok(AnswerPipeline::new(index, llm, config))
}

/// Apply a `--top-k` override; 0 keeps the configured value
pub fn with_top_k(mut config: Config, top_k: Option<usize>) -> Config {
    if let Some(k) = top_k.filter(|k| *k > 0) {
        config.retrieval.top_k = k;
    }
    config
}
