//! Excerpt extraction for prompts and answer bullets

/// Marker appended where text was cut
pub const ELLIPSIS: &str = "...";

/// Extracted snippet with metadata
#[derive(Debug, Clone)]
pub struct Snippet {
    pub snippet: String,
    pub start_pos: usize,
    pub end_pos: usize,
    pub truncated: bool,
}

/// Collapse every run of whitespace into a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-collapsed text cut to `max_chars` characters, with an
/// ellipsis marker when anything was dropped
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let cut = byte_index_of_char(&collapsed, max_chars);
    let (start, end) = adjust_to_word_boundaries(&collapsed, 0, cut, true);
    format!("{}{}", collapsed[start..end].trim_end(), ELLIPSIS)
}

/// Window of at most `max_chars` characters of collapsed `content`,
/// centered on byte offset `center` of the collapsed text
pub fn extract_snippet(content: &str, center: usize, max_chars: usize) -> Snippet {
    let collapsed = collapse_whitespace(content);
    let total_chars = collapsed.chars().count();

    if total_chars <= max_chars {
        return Snippet {
            end_pos: collapsed.len(),
            snippet: collapsed,
            start_pos: 0,
            truncated: false,
        };
    }

    let center = floor_char_boundary(&collapsed, center.min(collapsed.len()));
    let center_char = collapsed[..center].chars().count();

    // Calculate window in characters, then map back to bytes
    let half = max_chars / 2;
    let mut start_char = center_char.saturating_sub(half);
    let end_char = (start_char + max_chars).min(total_chars);
    if end_char == total_chars {
        start_char = end_char.saturating_sub(max_chars);
    }

    let start = byte_index_of_char(&collapsed, start_char);
    let end = byte_index_of_char(&collapsed, end_char);
    let (start, end) = adjust_to_word_boundaries(&collapsed, start, end, false);

    let mut snippet = collapsed[start..end].trim().to_string();
    if start > 0 {
        snippet = format!("{}{}", ELLIPSIS, snippet);
    }
    if end < collapsed.len() {
        snippet = format!("{}{}", snippet, ELLIPSIS);
    }

    Snippet {
        snippet,
        start_pos: start,
        end_pos: end,
        truncated: true,
    }
}

fn byte_index_of_char(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Shrink the window inward so it does not split words. Falls back to the
/// raw cut when a single word spans the whole window.
fn adjust_to_word_boundaries(text: &str, start: usize, end: usize, keep_start: bool) -> (usize, usize) {
    let bytes = text.as_bytes();

    let mut new_start = start;
    if !keep_start && start > 0 && !bytes[start - 1].is_ascii_whitespace() {
        if let Some(offset) = text[start..end].find(' ') {
            new_start = start + offset + 1;
        }
    }

    let mut new_end = end;
    if end < bytes.len() && !bytes[end].is_ascii_whitespace() {
        if let Some(offset) = text[new_start..end].rfind(' ') {
            new_end = new_start + offset;
        }
    }

    if new_end <= new_start {
        (start, end)
    } else {
        (new_start, new_end)
    }
}
