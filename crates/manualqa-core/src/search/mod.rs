//! Retrieval
//!
//! Provides:
//! - Spec-like content detection over canonical chunks
//! - Floor-then-bias retrieval with fallback
//! - Excerpt helpers shared by prompts and answers

mod retriever;
pub mod snippet;
mod spec_filter;

pub use retriever::{RetrievalMeta, RetrievalResult, SpecBiasedRetriever};
pub use snippet::{collapse_whitespace, excerpt, extract_snippet, Snippet};
pub use spec_filter::{
    filter_spec_like, find_pressure_value, is_spec_like, mentions_pressure_value, tag_spec_like,
    SpecTaggedChunk,
};
