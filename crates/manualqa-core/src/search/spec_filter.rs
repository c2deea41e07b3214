//! Detection of unit-bearing specification content

use crate::index::Chunk;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Number followed by a unit written in words or multi-letter symbols
    static ref UNIT_VALUE_RE: Regex = Regex::new(
        r"(?i)\b\d+(?:[.,]\d+)?\s*(?:psi[ga]?|bar|kpa|mpa|hz|khz|°\s?[cf]|deg(?:rees)?\s*[cf]|kw|watts?|volts?|vac|vdc|amps?|rpm|gpm|gph|lpm|lph|l/min|l/h|ft[-\s]?lbs?)\b"
    )
    .unwrap();

    /// Electrical and torque symbols; a lowercase `a` must touch its number
    static ref UNIT_SYMBOL_RE: Regex =
        Regex::new(r"\b\d+(?:\.\d+)?(?:(?i:\s*(?:v|w|kw|ma|nm))|(?i:a)|\s+A)\b").unwrap();

    static ref SPEC_KEYWORD_RE: Regex = Regex::new(
        r"(?i)\b(?:pressure|voltage|current|amperage|frequency|temperature|wattage|flow\s*rate|torque)\b"
    )
    .unwrap();

    static ref PRESSURE_VALUE_RE: Regex =
        Regex::new(r"(?i)\b\d+(?:[.,]\d+)?\s*(?:psi[ga]?|bar|kpa|mpa)\b").unwrap();
}

/// Chunk with its derived spec-like flag; the chunk itself is untouched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecTaggedChunk {
    pub chunk: Chunk,
    pub is_spec_like: bool,
}

/// Whether text carries a unit-bearing value or specification keyword
pub fn is_spec_like(text: &str) -> bool {
    UNIT_VALUE_RE.is_match(text) || UNIT_SYMBOL_RE.is_match(text) || SPEC_KEYWORD_RE.is_match(text)
}

/// Whether text states a pressure value with its unit
pub fn mentions_pressure_value(text: &str) -> bool {
    PRESSURE_VALUE_RE.is_match(text)
}

/// Byte offset of the first pressure value, if any
pub fn find_pressure_value(text: &str) -> Option<usize> {
    PRESSURE_VALUE_RE.find(text).map(|m| m.start())
}

/// Subset of `chunks` with spec-like content, in original order
pub fn filter_spec_like(chunks: &[Chunk]) -> Vec<Chunk> {
    chunks
        .iter()
        .filter(|c| is_spec_like(&c.content))
        .cloned()
        .collect()
}

/// Copy each chunk alongside its spec-like flag
pub fn tag_spec_like(chunks: &[Chunk]) -> Vec<SpecTaggedChunk> {
    chunks
        .iter()
        .map(|c| SpecTaggedChunk {
            chunk: c.clone(),
            is_spec_like: is_spec_like(&c.content),
        })
        .collect()
}
