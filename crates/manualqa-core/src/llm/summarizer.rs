//! Optional short LLM summary of retrieved evidence

use super::LLMClient;
use crate::index::Chunk;
use crate::outcome::{DegradeReason, Outcome};
use crate::query::Question;
use crate::search::snippet::excerpt;
use std::sync::Arc;

/// Summarizes the finalists for the top of a generic answer
pub struct Summarizer {
    client: Arc<dyn LLMClient>,
    excerpt_chars: usize,
}

impl Summarizer {
    pub fn new(client: Arc<dyn LLMClient>, excerpt_chars: usize) -> Self {
        Self {
            client,
            excerpt_chars,
        }
    }

    /// Two or three sentences answering the question from `chunks` only
    pub async fn summarize(&self, question: &Question, chunks: &[Chunk]) -> Outcome<String> {
        if chunks.is_empty() {
            return Outcome::Degraded(DegradeReason::Skipped("no evidence".to_string()));
        }

        let prompt = build_summary_prompt(question, chunks, self.excerpt_chars);
        match Outcome::from_result(self.client.complete_text(&prompt).await) {
            Outcome::Ok(text) if text.trim().is_empty() => {
                Outcome::Degraded(DegradeReason::Malformed("empty summary".to_string()))
            }
            other => other.map(|text| text.trim().to_string()),
        }
    }
}

fn build_summary_prompt(question: &Question, chunks: &[Chunk], excerpt_chars: usize) -> String {
    let mut prompt = String::from(
        "Answer the operator's question in two or three sentences using ONLY the manual excerpts below. \
         Copy numbers and units exactly as written. If the excerpts do not answer it, say so.\n\n",
    );

    let recent = question.recent_context();
    if !recent.is_empty() {
        prompt.push_str("Conversation so far:\n");
        for turn in recent {
            prompt.push_str(&format!("{}: {}\n", turn.role, excerpt(&turn.content, 300)));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("Question: {}\n\nExcerpts:\n", question.text.trim()));
    for (idx, chunk) in chunks.iter().enumerate() {
        prompt.push_str(&format!(
            "[{}] {} {} ({}): {}\n",
            idx + 1,
            chunk.source.manufacturer,
            chunk.source.model,
            chunk.source.filename,
            excerpt(&chunk.content, excerpt_chars)
        ));
    }

    prompt
}
