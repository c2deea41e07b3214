//! Retrieve command

use super::{build_index, load_config, with_top_k};
use crate::app::{OutputFormat, RetrieveArgs};
use crate::output::format_retrieval;
use anyhow::Result;
use manualqa_core::SpecBiasedRetriever;

pub async fn run(args: RetrieveArgs, format: OutputFormat) -> Result<()> {
    let config = with_top_k(load_config()?, args.top_k);
    let index = build_index(&config, args.matches.as_deref())?;
    let namespace = args
        .namespace
        .unwrap_or_else(|| config.vector_index.namespace.clone());

    let retriever = SpecBiasedRetriever::new(index, config.retrieval.clone());
    let result = retriever
        .retrieve_with_spec_bias(&args.question.join(" "), &namespace, None)
        .await;

    print!("{}", format_retrieval(&result, format));
    Ok(())
}
