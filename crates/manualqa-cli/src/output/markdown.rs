//! Markdown output formatter

use manualqa_core::{is_spec_like, AssistantResponse, RetrievalResult};

pub fn format_response(response: &AssistantResponse) -> String {
    let mut output = String::from("# Answer\n\n");
    output.push_str(response.content.trim_end());
    output.push('\n');

    if let Some(style) = response.style_detected {
        output.push_str(&format!("\n---\n\n*Style: `{}`*\n", style));
    }

    output
}

pub fn format_retrieval(result: &RetrievalResult) -> String {
    let meta = &result.meta;
    let mut output = String::from("# Retrieval\n\n");
    output.push_str("| raw | floor passed | spec-like | fallback | floor | top_k |\n");
    output.push_str("|-----|--------------|-----------|----------|-------|-------|\n");
    output.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} |\n\n",
        meta.raw_count,
        meta.passed_floor_count,
        meta.filtered_count,
        meta.used_fallback,
        meta.floor,
        meta.top_k
    ));

    for (i, chunk) in result.finalists.iter().enumerate() {
        output.push_str(&format!(
            "## {}. {} {} (Score: {:.2})\n\n",
            i + 1,
            chunk.source.manufacturer,
            chunk.source.model,
            chunk.similarity_score
        ));
        output.push_str(&format!("- **File**: `{}`\n", chunk.source.filename));
        if let Some(page) = chunk.page {
            output.push_str(&format!("- **Page**: {}\n", page));
        }
        output.push_str(&format!("- **Spec-like**: {}\n", is_spec_like(&chunk.content)));
        output.push_str("\n---\n\n");
    }

    if result.finalists.is_empty() {
        output.push_str("*No finalists*\n");
    }

    output
}
