//! Chunk categories for the structured answer breakdown

use crate::query::rules::DecisionTable;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Section a finalist chunk is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkCategory {
    Specifications,
    Operation,
    Safety,
    Installation,
    /// Residual bucket for chunks no other row matched
    General,
}

impl ChunkCategory {
    /// Display order of sections
    pub const ALL: [ChunkCategory; 5] = [
        Self::Specifications,
        Self::Operation,
        Self::Safety,
        Self::Installation,
        Self::General,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Specifications => "Specifications",
            Self::Operation => "Operation & Usage",
            Self::Safety => "Safety",
            Self::Installation => "Installation & Setup",
            Self::General => "General",
        }
    }
}

lazy_static! {
    static ref CATEGORY_TABLE: DecisionTable<ChunkCategory> = DecisionTable::new(
        vec![
            (
                Regex::new(
                    r"(?i)\b(?:specifications?|specs?|rated|rating|capacity|dimensions?|weight|pressure|voltage|current|flow\s*rate|temperature|psi|bar|volts?|amps?|rpm|gpm|gph|hz)\b|\b\d+(?:\.\d+)?\s*(?:v|a|w|kw|°\s?[cf])\b"
                )
                .unwrap(),
                ChunkCategory::Specifications,
            ),
            (
                Regex::new(
                    r"(?i)\b(?:operat(?:e|es|ing|ion)|start(?:ing|up)?|stop(?:ping)?|shut\s*down|run(?:ning)?|use|using|mode|switch|press|button|turn\s+(?:on|off)|flush(?:ing)?|rinse|prim(?:e|ing))\b"
                )
                .unwrap(),
                ChunkCategory::Operation,
            ),
            (
                Regex::new(
                    r"(?i)\b(?:warnings?|cautions?|danger|safety|hazard(?:ous)?|injury|electric\s+shock|protective)\b"
                )
                .unwrap(),
                ChunkCategory::Safety,
            ),
            (
                Regex::new(
                    r"(?i)\b(?:install(?:ed|ation|ing)?|mount(?:ed|ing)?|set\s*up|setup|connect(?:ed|ion|ions)?|wiring|plumbing|hoses?|fittings?|brackets?)\b"
                )
                .unwrap(),
                ChunkCategory::Installation,
            ),
        ],
        ChunkCategory::General,
    );
}

/// Category of a chunk's text; first matching row wins
pub fn categorize(text: &str) -> ChunkCategory {
    CATEGORY_TABLE.decide(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            categorize("Maximum feed pressure 60 psi"),
            ChunkCategory::Specifications
        );
        assert_eq!(
            categorize("Press the START button to begin"),
            ChunkCategory::Operation
        );
        assert_eq!(
            categorize("WARNING: disconnect before servicing"),
            ChunkCategory::Safety
        );
        assert_eq!(
            categorize("Mount the bracket below the waterline"),
            ChunkCategory::Installation
        );
        assert_eq!(categorize("Congratulations on your purchase"), ChunkCategory::General);
    }

    #[test]
    fn test_first_row_wins() {
        // spec vocabulary outranks the safety warning
        assert_eq!(
            categorize("Warning: never exceed 1000 psi"),
            ChunkCategory::Specifications
        );
        assert_eq!(ChunkCategory::ALL.last(), Some(&ChunkCategory::General));
        assert_eq!(ChunkCategory::Operation.title(), "Operation & Usage");
    }
}
