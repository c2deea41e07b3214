//! Canonical retrieved chunk and the adapter from raw index matches

use super::IndexMatch;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const UNKNOWN: &str = "Unknown";

/// Document a chunk was cut from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceDocument {
    pub manufacturer: String,
    pub model: String,
    pub filename: String,
    pub document_id: String,
}

/// One unit of retrieved evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub content: String,
    pub page: Option<u32>,
    pub source: SourceDocument,
    /// Similarity in [0, 1]
    pub similarity_score: f64,
}

impl Chunk {
    /// Normalize a raw match into a chunk.
    ///
    /// Content is read from `content`, then `chunk.content`, then
    /// `metadata.content`; the first non-empty string wins. Returns `None`
    /// only when the score is not a finite number.
    pub fn from_match(raw: &IndexMatch) -> Option<Self> {
        if !raw.score.is_finite() {
            return None;
        }

        let metadata = &raw.metadata;
        let content = non_empty_str(raw.extra.get("content"))
            .or_else(|| non_empty_str(raw.extra.get("chunk").and_then(|c| c.get("content"))))
            .or_else(|| non_empty_str(metadata.get("content")))
            .unwrap_or_default()
            .to_string();

        let page = [
            raw.extra.get("page"),
            metadata.get("page"),
            metadata.get("page_number"),
        ]
        .into_iter()
        .find_map(as_page);

        let document_id = first_str(metadata, &["doc_id", "document_id", "documentId"])
            .unwrap_or(raw.id.as_str())
            .to_string();

        let source = SourceDocument {
            manufacturer: first_str(metadata, &["manufacturer"])
                .unwrap_or(UNKNOWN)
                .to_string(),
            model: first_str(metadata, &["model"]).unwrap_or(UNKNOWN).to_string(),
            filename: first_str(metadata, &["filename", "file_name", "source"])
                .unwrap_or(UNKNOWN)
                .to_string(),
            document_id,
        };

        Some(Self {
            id: raw.id.clone(),
            content,
            page,
            source,
            similarity_score: raw.score.clamp(0.0, 1.0),
        })
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn first_str<'a>(metadata: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| non_empty_str(metadata.get(*k)))
}

/// Pages are 1-based; producers write 0 for "unknown"
fn as_page(value: Option<&Value>) -> Option<u32> {
    let value = value?;
    let page = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(page).ok().filter(|p| *p > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> IndexMatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_content_lookup_priority() {
        let top = raw(json!({
            "id": "a", "score": 0.5,
            "content": "top level",
            "chunk": {"content": "nested"},
            "metadata": {"content": "meta"}
        }));
        assert_eq!(Chunk::from_match(&top).unwrap().content, "top level");

        let nested = raw(json!({
            "id": "b", "score": 0.5,
            "content": "  ",
            "chunk": {"content": "nested"},
            "metadata": {"content": "meta"}
        }));
        assert_eq!(Chunk::from_match(&nested).unwrap().content, "nested");

        let meta = raw(json!({"id": "c", "score": 0.5, "metadata": {"content": "meta"}}));
        assert_eq!(Chunk::from_match(&meta).unwrap().content, "meta");

        let none = raw(json!({"id": "d", "score": 0.5}));
        assert_eq!(Chunk::from_match(&none).unwrap().content, "");
    }

    #[test]
    fn test_source_document_aliases() {
        let m = raw(json!({
            "id": "chunk-9",
            "score": 0.8,
            "metadata": {
                "manufacturer": "Spectra",
                "model": "Ventura 150",
                "file_name": "ventura.pdf",
                "documentId": "doc-1",
                "page": "12"
            }
        }));
        let chunk = Chunk::from_match(&m).unwrap();
        assert_eq!(chunk.source.manufacturer, "Spectra");
        assert_eq!(chunk.source.filename, "ventura.pdf");
        assert_eq!(chunk.source.document_id, "doc-1");
        assert_eq!(chunk.page, Some(12));
    }

    #[test]
    fn test_missing_fields_default() {
        let m = raw(json!({"id": "x", "score": 1.7, "metadata": {"page": 0}}));
        let chunk = Chunk::from_match(&m).unwrap();
        assert_eq!(chunk.source.manufacturer, UNKNOWN);
        assert_eq!(chunk.source.document_id, "x");
        assert_eq!(chunk.page, None);
        assert_eq!(chunk.similarity_score, 1.0);
    }

    #[test]
    fn test_float_page_numbers() {
        let whole = raw(json!({"id": "f", "score": 0.7, "metadata": {"page": 22.0}}));
        assert_eq!(Chunk::from_match(&whole).unwrap().page, Some(22));

        let fractional = raw(json!({"id": "g", "score": 0.7, "metadata": {"page": 22.5}}));
        assert_eq!(Chunk::from_match(&fractional).unwrap().page, None);

        let zero = raw(json!({"id": "h", "score": 0.7, "metadata": {"page_number": 0.0}}));
        assert_eq!(Chunk::from_match(&zero).unwrap().page, None);
    }

    #[test]
    fn test_non_finite_score_dropped() {
        let m = IndexMatch::new("nan", f64::NAN, json!({}));
        assert!(Chunk::from_match(&m).is_none());
    }
}
