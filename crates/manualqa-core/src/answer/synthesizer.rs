//! Answer synthesis
//!
//! Two paths:
//! - Operating-pressure questions with pressure values in the evidence are
//!   answered by quoting those chunks verbatim, numbered.
//! - Everything else gets the optional summary followed by the finalists
//!   grouped into fixed categories.
//!
//! Both end with a sources section carrying relevance percentages.

use super::categories::{categorize, ChunkCategory};
use crate::config::SynthesisConfig;
use crate::index::Chunk;
use crate::query::StyleTag;
use crate::search::snippet::{excerpt, extract_snippet};
use crate::search::{find_pressure_value, mentions_pressure_value, RetrievalResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Returned when retrieval produced no evidence
pub const NO_EVIDENCE_MESSAGE: &str = "I couldn't find matching documentation for that question. \
Please try refining it, for example by naming the manufacturer, model, or component.";

lazy_static! {
    static ref PRESSURE_QUESTION_RE: Regex = Regex::new(
        r"(?i)\b(?:pressures?|psi[ga]?|bar|kpa|operating\s+(?:values?|range|point)|operates?\s+at)\b"
    )
    .unwrap();
}

/// Final answer for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub content: String,
    pub sources: Vec<SourceRef>,
    pub style_detected: Option<StyleTag>,
}

/// One document that contributed evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub document_id: String,
    pub manufacturer: String,
    pub model: String,
    pub filename: String,
    /// Contributing pages, ascending
    pub pages: Vec<u32>,
    /// Best similarity among the contributing chunks
    pub similarity_score: f64,
}

impl SourceRef {
    /// `similarity_score` as a percentage with one decimal
    pub fn relevance_percent(&self) -> String {
        format!("{:.1}%", self.similarity_score * 100.0)
    }

    fn label(&self) -> String {
        let mut label = format!("{} {} ({})", self.manufacturer, self.model, self.filename);
        match self.pages.as_slice() {
            [] => {}
            [page] => label.push_str(&format!(", p. {}", page)),
            pages => {
                let list: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
                label.push_str(&format!(", pp. {}", list.join(", ")));
            }
        }
        label
    }
}

/// Whether the question asks for an operating pressure or similar value
pub fn is_pressure_question(question: &str) -> bool {
    PRESSURE_QUESTION_RE.is_match(question)
}

/// Builds [`AssistantResponse`]s from retrieval results
#[derive(Debug, Clone, Default)]
pub struct ResponseSynthesizer {
    config: SynthesisConfig,
}

impl ResponseSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Whether the answer will quote pressure values directly, in which case
    /// no summary is used
    pub fn answers_directly(&self, question: &str, retrieval: &RetrievalResult) -> bool {
        is_pressure_question(question)
            && retrieval
                .finalists
                .iter()
                .any(|c| mentions_pressure_value(&c.content))
    }

    pub fn generate_response(
        &self,
        question: &str,
        style: StyleTag,
        retrieval: &RetrievalResult,
        summary: Option<&str>,
    ) -> AssistantResponse {
        if retrieval.is_empty() {
            return AssistantResponse {
                content: NO_EVIDENCE_MESSAGE.to_string(),
                sources: Vec::new(),
                style_detected: Some(style),
            };
        }

        if self.answers_directly(question, retrieval) {
            let quoted: Vec<&Chunk> = retrieval
                .finalists
                .iter()
                .filter(|c| mentions_pressure_value(&c.content))
                .collect();
            let sources = build_sources(&quoted);
            return AssistantResponse {
                content: self.quote_pressure_values(&quoted, &sources),
                sources,
                style_detected: Some(style),
            };
        }

        let used: Vec<&Chunk> = retrieval.finalists.iter().collect();
        let sources = build_sources(&used);
        AssistantResponse {
            content: self.categorized_answer(style, &used, summary, &sources),
            sources,
            style_detected: Some(style),
        }
    }

    fn quote_pressure_values(&self, chunks: &[&Chunk], sources: &[SourceRef]) -> String {
        let mut content = String::from("**Operating pressure from the documentation:**\n\n");

        for (idx, chunk) in chunks.iter().enumerate() {
            let collapsed = crate::search::collapse_whitespace(&chunk.content);
            let center = find_pressure_value(&collapsed).unwrap_or(0);
            let snippet = extract_snippet(&collapsed, center, self.config.quote_chars);
            content.push_str(&format!(
                "{}. \"{}\" ({})\n",
                idx + 1,
                snippet.snippet,
                chunk_citation(chunk)
            ));
        }

        content.push('\n');
        content.push_str(&format_sources(sources));
        content
    }

    fn categorized_answer(
        &self,
        style: StyleTag,
        chunks: &[&Chunk],
        summary: Option<&str>,
        sources: &[SourceRef],
    ) -> String {
        let mut content = String::new();

        if let Some(frame) = style.frame() {
            content.push_str(frame);
            content.push_str("\n\n");
        }

        if let Some(summary) = summary.map(str::trim).filter(|s| !s.is_empty()) {
            content.push_str(summary);
            content.push_str("\n\n");
        }

        let categorized: Vec<(ChunkCategory, &Chunk)> =
            chunks.iter().map(|c| (categorize(&c.content), *c)).collect();

        for category in ChunkCategory::ALL {
            let bullets: Vec<String> = categorized
                .iter()
                .filter(|(cat, _)| *cat == category)
                .map(|(_, chunk)| {
                    let page = chunk
                        .page
                        .map(|p| format!(" (p. {})", p))
                        .unwrap_or_default();
                    format!("- {}{}", excerpt(&chunk.content, self.config.bullet_chars), page)
                })
                .collect();

            if bullets.is_empty() {
                continue;
            }

            content.push_str(&format!("**{}**\n", category.title()));
            for bullet in bullets {
                content.push_str(&bullet);
                content.push('\n');
            }
            content.push('\n');
        }

        content.push_str(&format_sources(sources));
        content
    }
}

/// Synthesize with default budgets
pub fn generate_response(
    question: &str,
    style: StyleTag,
    retrieval: &RetrievalResult,
    summary: Option<&str>,
) -> AssistantResponse {
    ResponseSynthesizer::default().generate_response(question, style, retrieval, summary)
}

fn chunk_citation(chunk: &Chunk) -> String {
    let mut citation = format!(
        "{} {}, {}",
        chunk.source.manufacturer, chunk.source.model, chunk.source.filename
    );
    if let Some(page) = chunk.page {
        citation.push_str(&format!(", p. {}", page));
    }
    citation
}

/// One source per document, in order of first appearance
fn build_sources(chunks: &[&Chunk]) -> Vec<SourceRef> {
    let mut sources: Vec<SourceRef> = Vec::new();

    for chunk in chunks {
        let doc = &chunk.source;
        match sources.iter_mut().find(|s| s.document_id == doc.document_id) {
            Some(existing) => {
                if let Some(page) = chunk.page {
                    if !existing.pages.contains(&page) {
                        existing.pages.push(page);
                        existing.pages.sort_unstable();
                    }
                }
                if chunk.similarity_score > existing.similarity_score {
                    existing.similarity_score = chunk.similarity_score;
                }
            }
            None => sources.push(SourceRef {
                document_id: doc.document_id.clone(),
                manufacturer: doc.manufacturer.clone(),
                model: doc.model.clone(),
                filename: doc.filename.clone(),
                pages: chunk.page.into_iter().collect(),
                similarity_score: chunk.similarity_score,
            }),
        }
    }

    sources
}

fn format_sources(sources: &[SourceRef]) -> String {
    let mut out = String::from("**Sources:**\n");
    for source in sources {
        out.push_str(&format!(
            "- {} (relevance {})\n",
            source.label(),
            source.relevance_percent()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SourceDocument;
    use crate::search::RetrievalMeta;

    fn chunk(id: &str, doc: &str, page: Option<u32>, score: f64, content: &str) -> Chunk {
        Chunk {
            id: id.to_string(),
            content: content.to_string(),
            page,
            source: SourceDocument {
                manufacturer: "Spectra".to_string(),
                model: "LB-200".to_string(),
                filename: format!("{}.pdf", doc),
                document_id: doc.to_string(),
            },
            similarity_score: score,
        }
    }

    fn result(finalists: Vec<Chunk>) -> RetrievalResult {
        let n = finalists.len();
        RetrievalResult {
            finalists,
            meta: RetrievalMeta {
                raw_count: n,
                passed_floor_count: n,
                filtered_count: n,
                used_fallback: false,
                floor: 0.05,
                top_k: 40,
            },
        }
    }

    #[test]
    fn test_pressure_question_quotes_values() {
        let retrieval = result(vec![
            chunk("a", "doc1", Some(12), 0.9, "Normal   feed pressure is 15 psi\nat the gauge."),
            chunk("b", "doc1", Some(14), 0.6, "Clean the strainer monthly."),
        ]);
        let response = generate_response(
            "what pressure does my watermaker operate at?",
            StyleTag::SpecBrief,
            &retrieval,
            Some("ignored summary"),
        );

        assert!(response.content.starts_with("**Operating pressure"));
        assert!(response
            .content
            .contains("1. \"Normal feed pressure is 15 psi at the gauge.\" (Spectra LB-200, doc1.pdf, p. 12)"));
        assert!(!response.content.contains("ignored summary"));
        assert!(!response.content.contains("strainer"));
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].pages, vec![12]);
        assert!(response.content.contains("relevance 90.0%"));
        assert_eq!(response.style_detected, Some(StyleTag::SpecBrief));
    }

    #[test]
    fn test_pressure_question_without_values_uses_generic_path() {
        let retrieval = result(vec![chunk(
            "a",
            "doc1",
            None,
            0.5,
            "Check the pressure gauge daily.",
        )]);
        let synth = ResponseSynthesizer::default();
        assert!(!synth.answers_directly("what is the pressure?", &retrieval));

        let response = synth.generate_response(
            "what is the pressure?",
            StyleTag::SpecBrief,
            &retrieval,
            None,
        );
        assert!(response.content.starts_with("Here are the specifications I found:"));
        assert!(response.content.contains("**Specifications**\n- Check the pressure gauge daily."));
    }

    #[test]
    fn test_generic_answer_sections_and_summary() {
        let retrieval = result(vec![
            chunk("a", "doc1", Some(3), 0.8, "Press the START button."),
            chunk("b", "doc2", Some(9), 0.7, "WARNING: disconnect power first."),
            chunk("c", "doc1", Some(1), 0.4, "Thank you for choosing us."),
        ]);
        let response = generate_response(
            "how do I start it?",
            StyleTag::Steps,
            &retrieval,
            Some("  Press START after priming.  "),
        );

        let content = &response.content;
        assert!(content.starts_with(
            "Here is what the documentation says about this procedure:\n\nPress START after priming.\n\n"
        ));
        let op = content.find("**Operation & Usage**").unwrap();
        let safety = content.find("**Safety**").unwrap();
        let general = content.find("**General**").unwrap();
        assert!(op < safety && safety < general);
        assert!(!content.contains("**Specifications**"));
        assert!(content.contains("- Press the START button. (p. 3)"));

        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[0].document_id, "doc1");
        assert_eq!(response.sources[0].pages, vec![1, 3]);
        assert_eq!(response.sources[0].similarity_score, 0.8);
        assert!(content.contains("Spectra LB-200 (doc1.pdf), pp. 1, 3 (relevance 80.0%)"));
    }

    #[test]
    fn test_bullets_truncated_with_marker() {
        let long = "word ".repeat(200);
        let retrieval = result(vec![chunk("a", "doc1", None, 0.5, &long)]);
        let synth = ResponseSynthesizer::new(SynthesisConfig {
            bullet_chars: 40,
            ..SynthesisConfig::default()
        });
        let response = synth.generate_response("tell me", StyleTag::Brief, &retrieval, None);

        let bullet = response
            .content
            .lines()
            .find(|l| l.starts_with("- word"))
            .unwrap();
        assert!(bullet.ends_with("..."));
        assert!(bullet.len() <= 2 + 40 + 3);
    }

    #[test]
    fn test_no_evidence() {
        let empty = RetrievalResult::empty(0.05, 40);
        let response = generate_response("anything", StyleTag::Brief, &empty, Some("summary"));
        assert_eq!(response.content, NO_EVIDENCE_MESSAGE);
        assert!(response.sources.is_empty());
    }

    #[test]
    fn test_pressure_question_detection() {
        assert!(is_pressure_question("What PSI should the feed be?"));
        assert!(is_pressure_question("what does it operate at"));
        assert!(!is_pressure_question("how do I replace the filter"));
    }
}
