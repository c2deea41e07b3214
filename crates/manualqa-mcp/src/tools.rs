//! MCP tool definitions and handlers

use crate::protocol::*;
use anyhow::{Context, Result};
use manualqa_core::{decide_style_opt, AnswerPipeline, ConversationTurn, Question, QuestionScope};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct AskManualArgs {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    manufacturer: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    context: Vec<ConversationTurn>,
}

#[derive(Debug, Deserialize)]
struct ClassifyArgs {
    #[serde(default)]
    question: Option<String>,
}

pub fn ask_manual_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "ask_manual",
        description: "Answer a question from indexed equipment manuals, citing the documents used",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "Operator question in natural language"
                },
                "namespace": {
                    "type": "string",
                    "description": "Vector index namespace (default: configured namespace)"
                },
                "manufacturer": {
                    "type": "string",
                    "description": "Restrict evidence to one manufacturer"
                },
                "model": {
                    "type": "string",
                    "description": "Restrict evidence to one model"
                },
                "context": {
                    "type": "array",
                    "description": "Prior conversation turns, oldest first",
                    "items": {
                        "type": "object",
                        "properties": {
                            "role": { "type": "string" },
                            "content": { "type": "string" }
                        },
                        "required": ["role", "content"]
                    }
                }
            },
            "required": ["question"]
        }),
    }
}

pub fn classify_question_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "classify_question",
        description: "Detect the answer style for a question (spec_brief, steps, bullets3, technical, brief)",
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "Question to classify"
                }
            },
            "required": ["question"]
        }),
    }
}

pub fn all_tool_definitions() -> Vec<ToolDefinition> {
    vec![ask_manual_tool_definition(), classify_question_tool_definition()]
}

pub async fn handle_ask_manual(pipeline: &AnswerPipeline, args: Value) -> Result<ToolResult> {
    let args: AskManualArgs =
        serde_json::from_value(args).context("ask_manual arguments must be an object")?;

    let mut question = Question::new(args.question.unwrap_or_default())
        .with_context(args.context)
        .with_scope(QuestionScope {
            manufacturer: args.manufacturer.filter(|m| !m.trim().is_empty()),
            model: args.model.filter(|m| !m.trim().is_empty()),
        });
    if let Some(namespace) = args.namespace {
        question = question.with_namespace(namespace);
    }

    let response = pipeline.answer(&question).await;
    let structured = serde_json::to_value(&response)?;
    Ok(ToolResult::text(response.content, Some(structured)))
}

pub async fn handle_classify_question(args: Value) -> Result<ToolResult> {
    let args: ClassifyArgs =
        serde_json::from_value(args).context("classify_question arguments must be an object")?;

    let style = decide_style_opt(args.question.as_deref());
    Ok(ToolResult::text(
        style.as_str(),
        Some(serde_json::json!({ "style": style })),
    ))
}
