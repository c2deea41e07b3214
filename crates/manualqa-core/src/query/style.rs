//! Response style classification
//!
//! Maps a raw operator question to a [`StyleTag`] with a fixed decision list:
//!
//! | Order | Tag          | Matches                                                   |
//! |-------|--------------|-----------------------------------------------------------|
//! | 1     | `spec_brief` | unit / quantity vocabulary (pressure, voltage, flow, ...) |
//! | 2     | `steps`      | leading how-to or imperative verb, or "steps"/"procedure" |
//! | 3     | `bullets3`   | failure and troubleshooting vocabulary                    |
//! | 4     | `technical`  | generic documentation vocabulary                          |
//! | -     | `brief`      | anything else, including empty input                      |

use super::rules::DecisionTable;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Presentation style of an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    /// Short numeric / specification answer
    SpecBrief,
    /// Ordered procedure
    Steps,
    /// Three troubleshooting bullets
    #[serde(rename = "bullets3")]
    Bullets3,
    /// Detailed technical reference
    Technical,
    /// Short plain answer
    Brief,
}

impl StyleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpecBrief => "spec_brief",
            Self::Steps => "steps",
            Self::Bullets3 => "bullets3",
            Self::Technical => "technical",
            Self::Brief => "brief",
        }
    }

    /// Heading line that frames a synthesized answer
    pub fn frame(&self) -> Option<&'static str> {
        match self {
            Self::SpecBrief => Some("Here are the specifications I found:"),
            Self::Steps => Some("Here is what the documentation says about this procedure:"),
            Self::Bullets3 => Some("Here are the most relevant troubleshooting notes:"),
            Self::Technical => Some("Technical details from the documentation:"),
            Self::Brief => None,
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleTag {
    type Err = crate::ManualQaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spec_brief" | "specbrief" => Ok(Self::SpecBrief),
            "steps" => Ok(Self::Steps),
            "bullets3" => Ok(Self::Bullets3),
            "technical" => Ok(Self::Technical),
            "brief" => Ok(Self::Brief),
            other => Err(crate::ManualQaError::InvalidInput(format!(
                "Unknown style tag: {}",
                other
            ))),
        }
    }
}

lazy_static! {
    static ref STYLE_TABLE: DecisionTable<StyleTag> = DecisionTable::new(
        vec![
            (
                Regex::new(
                    r"(?i)\b(?:pressures?|psi|voltages?|volts?|currents?|amps?|amperage|frequency|hz|temperatures?|power|flows?|gpm|torque|specifications?|specs?|dimensions?|capacity|weight|speed|rpm|rates?)\b"
                )
                .unwrap(),
                StyleTag::SpecBrief,
            ),
            (
                Regex::new(
                    r"(?i)^\s*(?:how\s+(?:do|to|can|should)\b|(?:reset|flush|prime|bleed|replace|install|set\s*up|setup|mount|start|stop|operate|use|run|configure)\b)|\b(?:steps?|procedure)\b"
                )
                .unwrap(),
                StyleTag::Steps,
            ),
            (
                Regex::new(
                    r"(?i)not\s+working|\berrors?\b|\balarms?\b|\bleak(?:s|ing|ed)?\b|\bnoisy\b|\bfail(?:s|ed|ing|ure)?\b|\bwon['’]?t\b|\bbroken\b|\bproblems?\b|\bissues?\b|\btroubleshoot(?:ing)?\b|\bfix\b|\brepair\b|\bdiagnos(?:e|is)\b|what['’]?s\s+wrong|why\s+(?:isn['’]?t|doesn['’]?t|is\s+not|does\s+not)"
                )
                .unwrap(),
                StyleTag::Bullets3,
            ),
            (
                Regex::new(
                    r"(?i)\b(?:technical|specifications?|specs?|details|parameters?|settings?|configuration|manuals?|documentation)\b"
                )
                .unwrap(),
                StyleTag::Technical,
            ),
        ],
        StyleTag::Brief,
    );
}

/// Classify a question into a response style. Never fails.
pub fn decide_style(question: &str) -> StyleTag {
    if question.trim().is_empty() {
        return StyleTag::Brief;
    }
    STYLE_TABLE.decide(question)
}

/// Classify an optional question; absent input is `Brief`
pub fn decide_style_opt(question: Option<&str>) -> StyleTag {
    question.map(decide_style).unwrap_or(StyleTag::Brief)
}
