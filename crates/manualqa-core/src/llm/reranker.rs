//! LLM reranker that promotes the single most on-point chunk

use super::LLMClient;
use crate::index::Chunk;
use crate::outcome::{DegradeReason, Outcome};
use crate::search::snippet::excerpt;
use serde::Serialize;
use std::sync::Arc;

/// Rank-score decay per position
const RANK_STEP: f64 = 0.01;

const RERANK_SYSTEM_PROMPT: &str = "You select the manual excerpt that best answers an operator's question. \
Respond ONLY with a JSON object: {\"best_index\": <1-based integer>, \"reason\": \"<short justification>\"}";

/// Chunk with its position-derived rank score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedChunk {
    pub chunk: Chunk,
    /// Strictly decreasing with position; not a probability
    pub rank_score: f64,
}

/// The model's pick, already validated
#[derive(Debug, Clone, PartialEq)]
pub struct RerankChoice {
    /// 1-based index into the candidate list
    pub index: usize,
    pub reason: Option<String>,
    /// False when the model's index was unusable and 1 was substituted
    pub valid: bool,
}

/// Reranker backed by one JSON completion
pub struct LlmReranker {
    client: Arc<dyn LLMClient>,
    excerpt_chars: usize,
}

impl LlmReranker {
    pub fn new(client: Arc<dyn LLMClient>, excerpt_chars: usize) -> Self {
        Self {
            client,
            excerpt_chars,
        }
    }

    /// Reorder `chunks` so the model's pick comes first. Never fails: on any
    /// LLM error the input order is kept.
    pub async fn rerank_chunks(&self, question: &str, chunks: Vec<Chunk>) -> Vec<RankedChunk> {
        if chunks.len() <= 1 {
            return assign_rank_scores(chunks);
        }

        match self.choose(question, &chunks).await {
            Outcome::Ok(choice) => {
                if !choice.valid {
                    tracing::debug!("Reranker index out of range, keeping first candidate");
                }
                tracing::debug!(
                    "Reranker picked {} of {}: {}",
                    choice.index,
                    chunks.len(),
                    choice.reason.as_deref().unwrap_or("-")
                );
                assign_rank_scores(promote(chunks, choice.index - 1))
            }
            Outcome::Degraded(reason) => {
                tracing::warn!("Reranking degraded ({}), keeping retrieval order", reason);
                assign_rank_scores(chunks)
            }
        }
    }

    /// Ask the model for the best candidate
    pub async fn choose(&self, question: &str, chunks: &[Chunk]) -> Outcome<RerankChoice> {
        if chunks.is_empty() {
            return Outcome::Degraded(DegradeReason::Skipped("no candidates".to_string()));
        }

        let prompt = build_rerank_prompt(question, chunks, self.excerpt_chars);
        Outcome::from_result(self.client.complete_json(RERANK_SYSTEM_PROMPT, &prompt).await)
            .map(|value| parse_choice(&value, chunks.len()))
    }
}

fn build_rerank_prompt(question: &str, chunks: &[Chunk], excerpt_chars: usize) -> String {
    let mut prompt = format!("Question: \"{}\"\n\nCandidates:\n", question.trim());

    for (idx, chunk) in chunks.iter().enumerate() {
        let page = chunk
            .page
            .map(|p| format!(", p. {}", p))
            .unwrap_or_default();
        prompt.push_str(&format!(
            "[{}] ({} {}{}) {}\n",
            idx + 1,
            chunk.source.manufacturer,
            chunk.source.model,
            page,
            excerpt(&chunk.content, excerpt_chars)
        ));
    }

    prompt.push_str(&format!(
        "\nReturn the number (1-{}) of the single candidate that most directly answers the question.",
        chunks.len()
    ));
    prompt
}

/// Validate the model's index; anything but an integer in `[1, len]` is 1
fn parse_choice(value: &serde_json::Value, len: usize) -> RerankChoice {
    let raw = value.get("best_index").or_else(|| value.get("index"));
    let index = raw
        .and_then(|v| v.as_u64())
        .and_then(|i| usize::try_from(i).ok())
        .filter(|i| (1..=len).contains(i));

    RerankChoice {
        index: index.unwrap_or(1),
        reason: value
            .get("reason")
            .and_then(|v| v.as_str())
            .map(String::from),
        valid: index.is_some(),
    }
}

/// Move the chunk at `pick` to the front; others keep their relative order
pub fn promote(mut chunks: Vec<Chunk>, pick: usize) -> Vec<Chunk> {
    if pick > 0 && pick < chunks.len() {
        let chosen = chunks.remove(pick);
        chunks.insert(0, chosen);
    }
    chunks
}

/// Attach `1 - position * 0.01` to every chunk in order
pub fn assign_rank_scores(chunks: Vec<Chunk>) -> Vec<RankedChunk> {
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| RankedChunk {
            chunk,
            rank_score: 1.0 - i as f64 * RANK_STEP,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ManualQaError, Result};
    use crate::index::SourceDocument;
    use crate::llm::{ChatMessage, CompletionOptions};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::Mutex;

    /// Replies with a fixed string and records prompts
    struct ScriptedClient {
        reply: Result<String>,
        calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedClient {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(ManualQaError::ExternalError("timeout".to_string())),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LLMClient for ScriptedClient {
        async fn chat_completion(
            &self,
            messages: Vec<ChatMessage>,
            options: &CompletionOptions,
        ) -> Result<String> {
            assert!(options.json_mode);
            assert_eq!(options.temperature, 0.0);
            self.calls.lock().unwrap().push(messages);
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(ManualQaError::ExternalError(e.to_string())),
            }
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn chunks(n: usize) -> Vec<Chunk> {
        (0..n)
            .map(|i| Chunk {
                id: format!("c{}", i),
                content: format!("excerpt {} {}", i, "x".repeat(2000)),
                page: Some(i as u32 + 1),
                source: SourceDocument {
                    manufacturer: "Spectra".to_string(),
                    model: "Newport 400".to_string(),
                    filename: "newport.pdf".to_string(),
                    document_id: "doc".to_string(),
                },
                similarity_score: 0.5,
            })
            .collect()
    }

    fn ids(ranked: &[RankedChunk]) -> Vec<String> {
        ranked.iter().map(|r| r.chunk.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_chosen_chunk_promoted() {
        let client = Arc::new(ScriptedClient::replying(
            r#"{"best_index": 3, "reason": "states the feed pressure"}"#,
        ));
        let reranker = LlmReranker::new(client.clone(), 800);

        let ranked = reranker.rerank_chunks("feed pressure?", chunks(4)).await;
        assert_eq!(ids(&ranked), vec!["c2", "c0", "c1", "c3"]);
        assert_eq!(ranked[0].rank_score, 1.0);
        assert!((ranked[3].rank_score - 0.97).abs() < 1e-9);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_excerpts_bounded() {
        let client = Arc::new(ScriptedClient::replying(r#"{"best_index": 1}"#));
        let reranker = LlmReranker::new(client.clone(), 100);
        reranker.rerank_chunks("q", chunks(2)).await;

        let calls = client.calls.lock().unwrap();
        let user_prompt = &calls[0][1].content;
        assert!(user_prompt.contains("[1] (Spectra Newport 400, p. 1)"));
        assert!(user_prompt.len() < 600);
    }

    #[tokio::test]
    async fn test_out_of_range_defaults_to_first() {
        for reply in [
            r#"{"best_index": 9}"#,
            r#"{"best_index": 0}"#,
            r#"{"best_index": -2}"#,
            r#"{"best_index": "2"}"#,
            r#"{"best_index": 1.5}"#,
            r#"{"reason": "none"}"#,
        ] {
            let reranker = LlmReranker::new(Arc::new(ScriptedClient::replying(reply)), 800);
            let ranked = reranker.rerank_chunks("q", chunks(3)).await;
            assert_eq!(ids(&ranked), vec!["c0", "c1", "c2"], "reply {}", reply);
        }
    }

    #[tokio::test]
    async fn test_llm_failure_keeps_order() {
        let reranker = LlmReranker::new(Arc::new(ScriptedClient::failing()), 800);
        let ranked = reranker.rerank_chunks("q", chunks(3)).await;
        assert_eq!(ids(&ranked), vec!["c0", "c1", "c2"]);
        assert!(ranked.windows(2).all(|w| w[0].rank_score > w[1].rank_score));
    }

    #[tokio::test]
    async fn test_malformed_reply_keeps_order() {
        let reranker = LlmReranker::new(Arc::new(ScriptedClient::replying("I think #2")), 800);
        let ranked = reranker.rerank_chunks("q", chunks(2)).await;
        assert_eq!(ids(&ranked), vec!["c0", "c1"]);
    }

    #[tokio::test]
    async fn test_single_chunk_skips_llm() {
        let client = Arc::new(ScriptedClient::failing());
        let reranker = LlmReranker::new(client.clone(), 800);

        let ranked = reranker.rerank_chunks("q", chunks(1)).await;
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rank_score, 1.0);
        assert!(reranker.rerank_chunks("q", Vec::new()).await.is_empty());
        assert_eq!(client.call_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_promote_preserves_set(n in 0usize..12, pick in 0usize..15) {
            let input = chunks(n);
            let ranked = assign_rank_scores(promote(input.clone(), pick));

            let mut before: Vec<String> = input.iter().map(|c| c.id.clone()).collect();
            let mut after = ids(&ranked);
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);

            if let Some(first) = ranked.first() {
                prop_assert!(ranked.iter().all(|r| r.rank_score <= first.rank_score));
                if pick < n {
                    prop_assert_eq!(&first.chunk.id, &format!("c{}", pick));
                }
            }
        }
    }
}
