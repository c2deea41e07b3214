//! JSON output formatter

use manualqa_core::{tag_spec_like, AssistantResponse, RetrievalResult};

pub fn format_response(response: &AssistantResponse) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

pub fn format_retrieval(result: &RetrievalResult) -> String {
    let output = serde_json::json!({
        "meta": result.meta,
        "finalists": tag_spec_like(&result.finalists),
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string()) + "\n"
}
