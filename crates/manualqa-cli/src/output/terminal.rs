//! Terminal output formatter

use manualqa_core::search::excerpt;
use manualqa_core::{tag_spec_like, AssistantResponse, RetrievalResult};

pub fn format_response(response: &AssistantResponse) -> String {
    format!("{}\n", response.content.trim_end())
}

pub fn format_retrieval(result: &RetrievalResult) -> String {
    let meta = &result.meta;
    let mut output = format!(
        "raw={} floor_passed={} spec_like={} fallback={} (floor {}, top_k {})\n",
        meta.raw_count,
        meta.passed_floor_count,
        meta.filtered_count,
        meta.used_fallback,
        meta.floor,
        meta.top_k
    );

    for tagged in tag_spec_like(&result.finalists) {
        let chunk = &tagged.chunk;
        let score_pct = (chunk.similarity_score * 100.0) as u32;
        let page = chunk.page.map(|p| format!(" p.{}", p)).unwrap_or_default();
        let marker = if tagged.is_spec_like { " [spec]" } else { "" };
        output.push_str(&format!(
            "{:>3}% {} {}{} #{}{}\n",
            score_pct, chunk.source.manufacturer, chunk.source.model, page, chunk.id, marker
        ));
        output.push_str(&format!("  {}\n", excerpt(&chunk.content, 160)));
    }

    output
}
