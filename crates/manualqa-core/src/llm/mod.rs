//! LLM integration
//!
//! Provides traits and implementations for:
//! - Chat completion via external OpenAI-compatible services
//! - Reranking retrieved chunks
//! - Summarizing retrieved evidence

mod client;
mod reranker;
mod summarizer;

pub use client::{
    parse_json_object, ChatMessage, CompletionOptions, DisabledLLMClient, HttpLLMClient, LLMClient,
};
pub use reranker::{assign_rank_scores, promote, LlmReranker, RankedChunk, RerankChoice};
pub use summarizer::Summarizer;
