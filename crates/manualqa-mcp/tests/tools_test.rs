//! Integration tests for the MCP tools and the stdio request loop

use manualqa_core::{
    AnswerPipeline, Config, DisabledLLMClient, IndexMatch, StaticVectorIndex, NO_EVIDENCE_MESSAGE,
};
use manualqa_mcp::tools::*;
use manualqa_mcp::McpServer;
use serde_json::{json, Value};
use std::sync::Arc;

fn pipeline() -> AnswerPipeline {
    let matches = vec![
        IndexMatch::new(
            "p1",
            0.92,
            json!({
                "content": "Normal operating pressure is 800 psi at the membrane.",
                "manufacturer": "Village Marine",
                "model": "LTM-800",
                "filename": "ltm800.pdf",
                "doc_id": "vm-ltm800",
                "page": 17
            }),
        ),
        IndexMatch::new(
            "p2",
            0.55,
            json!({
                "content": "Open the inlet valve before starting the pump.",
                "manufacturer": "Katadyn",
                "model": "PowerSurvivor 40E",
                "filename": "ps40e.pdf",
                "doc_id": "kat-ps40e",
                "page": 3
            }),
        ),
    ];
    AnswerPipeline::new(
        Arc::new(StaticVectorIndex::new(matches)),
        Arc::new(DisabledLLMClient),
        &Config::default(),
    )
}

#[tokio::test]
async fn test_ask_manual_returns_text_and_structured_response() {
    let pipeline = pipeline();
    let result = handle_ask_manual(
        &pipeline,
        json!({"question": "What is the operating pressure?"}),
    )
    .await
    .unwrap();

    assert!(result.is_error.is_none());
    let text = result.first_text().unwrap();
    assert!(text.contains("800 psi"));

    let structured = result.structured_content.unwrap();
    assert_eq!(structured["style_detected"], "spec_brief");
    assert_eq!(structured["sources"][0]["document_id"], "vm-ltm800");
}

#[tokio::test]
async fn test_ask_manual_scope_narrows_sources() {
    let pipeline = pipeline();
    let result = handle_ask_manual(
        &pipeline,
        json!({"question": "how do I start it", "manufacturer": "katadyn"}),
    )
    .await
    .unwrap();

    let structured = result.structured_content.unwrap();
    let sources = structured["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["manufacturer"], "Katadyn");
}

#[tokio::test]
async fn test_ask_manual_without_question_answers_brief() {
    let pipeline = pipeline();
    for args in [json!({"namespace": "X"}), json!({"question": null})] {
        let result = handle_ask_manual(&pipeline, args).await.unwrap();
        assert!(result.is_error.is_none());
        assert!(result.first_text().unwrap().contains(NO_EVIDENCE_MESSAGE));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["style_detected"], "brief");
        assert!(structured["sources"].as_array().unwrap().is_empty());
    }

    assert!(handle_ask_manual(&pipeline, json!("not an object")).await.is_err());
}

#[tokio::test]
async fn test_classify_question_tool() {
    let result = handle_classify_question(json!({"question": "my unit is leaking"}))
        .await
        .unwrap();
    assert_eq!(result.first_text(), Some("bullets3"));
    assert_eq!(result.structured_content.unwrap()["style"], "bullets3");

    let missing = handle_classify_question(json!({})).await.unwrap();
    assert_eq!(missing.first_text(), Some("brief"));
}

async fn exchange(input: &str) -> Vec<Value> {
    let pipeline = pipeline();
    let server = McpServer::new(&pipeline);
    let mut output: Vec<u8> = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn test_request_loop() {
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "not json",
        r#"{"jsonrpc":"2.0","id":3,"method":"does/not/exist"}"#,
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"classify_question","arguments":{"question":"pump voltage?"}}}"#,
    ]
    .join("\n");

    let responses = exchange(&input).await;
    assert_eq!(responses.len(), 6);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "manualqa");

    let tools: Vec<&str> = responses[1]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(tools, vec!["ask_manual", "classify_question"]);

    assert_eq!(responses[2]["error"]["code"], -32700);
    assert_eq!(responses[3]["error"]["code"], -32601);
    assert_eq!(responses[4]["result"]["isError"], true);
    assert_eq!(responses[5]["result"]["content"][0]["text"], "spec_brief");
}
