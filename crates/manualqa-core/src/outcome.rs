//! Best-effort results for optional collaborator calls
//!
//! Retrieval, reranking and summarization never fail the request. Their
//! collaborator errors are folded into [`Outcome::Degraded`] at the component
//! boundary so call sites branch on degradation explicitly.

use crate::error::ManualQaError;
use std::fmt;

/// Result of a best-effort operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The collaborator produced a usable value
    Ok(T),
    /// The collaborator failed or produced nothing usable
    Degraded(DegradeReason),
}

/// Why a best-effort operation degraded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// Collaborator unreachable or returned an error status
    Unavailable(String),
    /// Collaborator answered, but the payload could not be used
    Malformed(String),
    /// Nothing to do (empty input, feature disabled)
    Skipped(String),
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "unavailable: {}", msg),
            Self::Malformed(msg) => write!(f, "malformed response: {}", msg),
            Self::Skipped(msg) => write!(f, "skipped: {}", msg),
        }
    }
}

impl From<&ManualQaError> for DegradeReason {
    fn from(err: &ManualQaError) -> Self {
        match err {
            ManualQaError::Serialization(_) | ManualQaError::Yaml(_) => {
                Self::Malformed(err.to_string())
            }
            ManualQaError::Llm(msg) if msg.contains("parse") => Self::Malformed(msg.clone()),
            _ => Self::Unavailable(err.to_string()),
        }
    }
}

impl<T> Outcome<T> {
    /// Fold a collaborator result into an outcome
    pub fn from_result(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Degraded(DegradeReason::from(&e)),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// Value if the operation succeeded
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Degraded(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Degraded(reason) => Outcome::Degraded(reason),
        }
    }

    /// Value on success, otherwise the fallback computed from the reason
    pub fn unwrap_or_else<F: FnOnce(&DegradeReason) -> T>(self, fallback: F) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Degraded(reason) => fallback(&reason),
        }
    }
}
