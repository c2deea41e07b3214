//! Question input type

use serde::{Deserialize, Serialize};

/// Prior conversation turns included in summary prompts
const MAX_CONTEXT_TURNS: usize = 4;

/// An operator question, alive for one request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Question {
    /// Raw question text
    pub text: String,

    /// Vector index namespace; the configured default applies when absent
    #[serde(default)]
    pub namespace: Option<String>,

    /// Prior conversation turns, oldest first
    #[serde(default)]
    pub context: Vec<ConversationTurn>,

    /// Optional manufacturer/model restriction
    #[serde(default)]
    pub scope: QuestionScope,
}

/// One prior turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Restricts retrieval to one manufacturer and/or model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionScope {
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl QuestionScope {
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none() && self.model.is_none()
    }

    /// Metadata filter understood by the vector index sidecar
    pub fn to_filter(&self) -> Option<serde_json::Value> {
        if self.is_empty() {
            return None;
        }

        let mut filter = serde_json::Map::new();
        if let Some(ref manufacturer) = self.manufacturer {
            filter.insert("manufacturer".to_string(), manufacturer.clone().into());
        }
        if let Some(ref model) = self.model {
            filter.insert("model".to_string(), model.clone().into());
        }
        Some(serde_json::Value::Object(filter))
    }
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_context(mut self, context: Vec<ConversationTurn>) -> Self {
        self.context = context;
        self
    }

    pub fn with_scope(mut self, scope: QuestionScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The most recent turns, oldest first
    pub fn recent_context(&self) -> &[ConversationTurn] {
        let start = self.context.len().saturating_sub(MAX_CONTEXT_TURNS);
        &self.context[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_filter() {
        assert!(QuestionScope::default().to_filter().is_none());

        let scope = QuestionScope {
            manufacturer: Some("Spectra".to_string()),
            model: None,
        };
        assert_eq!(
            scope.to_filter(),
            Some(serde_json::json!({"manufacturer": "Spectra"}))
        );
    }

    #[test]
    fn test_recent_context_keeps_last_turns() {
        let turns: Vec<_> = (0..6)
            .map(|i| ConversationTurn::user(format!("turn {}", i)))
            .collect();
        let question = Question::new("and the voltage?").with_context(turns);

        let recent = question.recent_context();
        assert_eq!(recent.len(), MAX_CONTEXT_TURNS);
        assert_eq!(recent[0].content, "turn 2");
        assert!(!question.is_blank());
        assert!(Question::new(" \n").is_blank());
    }
}
