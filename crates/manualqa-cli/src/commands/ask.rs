//! Ask command

use super::{build_pipeline, load_config, with_top_k};
use crate::app::{AskArgs, OutputFormat};
use crate::output::format_response;
use anyhow::Result;
use manualqa_core::{Question, QuestionScope};

pub async fn run(args: AskArgs, format: OutputFormat) -> Result<()> {
    let config = with_top_k(load_config()?, args.top_k);
    let pipeline = build_pipeline(&config, &args.backend)?;

    let mut question = Question::new(args.question.join(" ")).with_scope(QuestionScope {
        manufacturer: args.manufacturer,
        model: args.model,
    });
    if let Some(namespace) = args.namespace {
        question = question.with_namespace(namespace);
    }

    let response = pipeline.answer(&question).await;
    print!("{}", format_response(&response, format));
    Ok(())
}
