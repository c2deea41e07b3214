//! End-to-end question answering
//!
//! classify -> retrieve -> rerank -> summarize -> synthesize. Every stage
//! that touches an external service degrades instead of failing, so
//! [`AnswerPipeline::answer`] always produces a response.

use super::synthesizer::{AssistantResponse, ResponseSynthesizer};
use crate::config::{Config, RetrievalConfig, SynthesisConfig};
use crate::error::Result;
use crate::index::{HttpVectorIndex, VectorIndex};
use crate::llm::{HttpLLMClient, LLMClient, LlmReranker, Summarizer};
use crate::outcome::Outcome;
use crate::query::{decide_style, Question};
use crate::search::{RetrievalResult, SpecBiasedRetriever};
use std::sync::Arc;
use std::time::Instant;

/// Wires the retriever, reranker, summarizer and synthesizer together
pub struct AnswerPipeline {
    retriever: SpecBiasedRetriever,
    reranker: LlmReranker,
    summarizer: Summarizer,
    synthesizer: ResponseSynthesizer,
    default_namespace: String,
    synthesis: SynthesisConfig,
}

impl AnswerPipeline {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        llm: Arc<dyn LLMClient>,
        config: &Config,
    ) -> Self {
        let synthesis = config.synthesis.clone();
        Self {
            retriever: SpecBiasedRetriever::new(index, config.retrieval.clone()),
            reranker: LlmReranker::new(llm.clone(), synthesis.rerank_excerpt_chars),
            summarizer: Summarizer::new(llm, synthesis.summary_excerpt_chars),
            synthesizer: ResponseSynthesizer::new(synthesis.clone()),
            default_namespace: config.vector_index.namespace.clone(),
            synthesis,
        }
    }

    /// Pipeline backed by the HTTP vector index and LLM service
    pub fn from_config(config: &Config) -> Result<Self> {
        let index = HttpVectorIndex::new(config.vector_index.clone())?;
        let llm = HttpLLMClient::new(config.llm_service.clone())?;
        Ok(Self::new(Arc::new(index), Arc::new(llm), config))
    }

    pub fn retrieval_config(&self) -> &RetrievalConfig {
        self.retriever.config()
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Answer a bare question string
    pub async fn answer_question(&self, text: &str, namespace: Option<&str>) -> AssistantResponse {
        let mut question = Question::new(text);
        if let Some(ns) = namespace {
            question = question.with_namespace(ns);
        }
        self.answer(&question).await
    }

    /// Retrieval only, honoring the question's namespace and scope
    pub async fn retrieve(&self, question: &Question) -> RetrievalResult {
        let namespace = question
            .namespace
            .as_deref()
            .filter(|ns| !ns.trim().is_empty())
            .unwrap_or(&self.default_namespace);
        let filter = question.scope.to_filter();

        self.retriever
            .retrieve_filtered(&question.text, namespace, None, filter.as_ref())
            .await
    }

    /// Answer a question. Never fails.
    pub async fn answer(&self, question: &Question) -> AssistantResponse {
        let started = Instant::now();
        let style = decide_style(&question.text);

        if question.is_blank() {
            let empty = RetrievalResult::empty(
                self.retriever.config().similarity_floor,
                self.retriever.config().top_k,
            );
            return self
                .synthesizer
                .generate_response(&question.text, style, &empty, None);
        }

        let retrieval = self.retrieve(question).await;
        let retrieval = self.rerank(&question.text, retrieval).await;
        let summary = self.summary_for(question, &retrieval).await;

        let response = self.synthesizer.generate_response(
            &question.text,
            style,
            &retrieval,
            summary.as_deref(),
        );

        tracing::info!(
            "Answered in {}ms: style={} finalists={} fallback={} summary={} sources={}",
            started.elapsed().as_millis(),
            style,
            retrieval.finalists.len(),
            retrieval.meta.used_fallback,
            summary.is_some(),
            response.sources.len()
        );

        response
    }

    async fn rerank(&self, question: &str, retrieval: RetrievalResult) -> RetrievalResult {
        if !self.synthesis.enable_rerank || retrieval.finalists.len() <= 1 {
            return retrieval;
        }

        let ranked = self
            .reranker
            .rerank_chunks(question, retrieval.finalists.clone())
            .await;
        retrieval.with_finalists(ranked.into_iter().map(|r| r.chunk).collect())
    }

    async fn summary_for(
        &self,
        question: &Question,
        retrieval: &RetrievalResult,
    ) -> Option<String> {
        if !self.synthesis.enable_summary
            || retrieval.is_empty()
            || self.synthesizer.answers_directly(&question.text, retrieval)
        {
            return None;
        }

        match self.summarizer.summarize(question, &retrieval.finalists).await {
            Outcome::Ok(summary) => Some(summary),
            Outcome::Degraded(reason) => {
                tracing::warn!("Summary unavailable ({}), answering without it", reason);
                None
            }
        }
    }
}
