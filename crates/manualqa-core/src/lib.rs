//! Manualqa Core Library
//!
//! Question understanding and spec-biased retrieval over equipment manuals.
//!
//! # Features
//! - Keyword decision-table style classification of operator questions
//! - Vector retrieval with a similarity floor and a bias toward unit-bearing chunks
//! - LLM reranking that degrades to the retrieval order when the model is unavailable
//! - Answer synthesis with verbatim quoting for operating-pressure questions

pub mod answer;
pub mod config;
pub mod error;
pub mod index;
pub mod llm;
pub mod outcome;
pub mod query;
pub mod search;

pub use answer::{
    generate_response, AnswerPipeline, AssistantResponse, ChunkCategory, SourceRef,
    NO_EVIDENCE_MESSAGE,
};
pub use config::{Config, LLMServiceConfig, RetrievalConfig, SynthesisConfig, VectorIndexConfig};
pub use error::{Error, ManualQaError, Result};
pub use index::{
    Chunk, HttpVectorIndex, IndexMatch, SearchResponse, SourceDocument, StaticVectorIndex,
    VectorIndex,
};
pub use llm::{
    ChatMessage, CompletionOptions, DisabledLLMClient, HttpLLMClient, LLMClient, LlmReranker,
    RankedChunk, Summarizer,
};
pub use outcome::{DegradeReason, Outcome};
pub use query::{decide_style, decide_style_opt, ConversationTurn, Question, QuestionScope, StyleTag};
pub use search::{
    filter_spec_like, is_spec_like, tag_spec_like, RetrievalMeta, RetrievalResult,
    SpecBiasedRetriever, SpecTaggedChunk,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "manualqa";
