//! Output formatters

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::app::OutputFormat;
use manualqa_core::{AssistantResponse, RetrievalResult};

/// Format an answer
pub fn format_response(response: &AssistantResponse, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_response(response),
        OutputFormat::Md => markdown::format_response(response),
        OutputFormat::Cli => terminal::format_response(response),
    }
}

/// Format retrieval counts and finalists
pub fn format_retrieval(result: &RetrievalResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_retrieval(result),
        OutputFormat::Md => markdown::format_retrieval(result),
        OutputFormat::Cli => terminal::format_retrieval(result),
    }
}
