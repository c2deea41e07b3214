//! Style command

use crate::app::{OutputFormat, StyleArgs};
use anyhow::Result;
use manualqa_core::decide_style;

pub fn run(args: StyleArgs, format: OutputFormat) -> Result<()> {
    let question = args.question.join(" ");
    let style = decide_style(&question);

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "question": question, "style": style })
        ),
        OutputFormat::Md => println!("**Style:** `{}`", style),
        OutputFormat::Cli => println!("{}", style),
    }
    Ok(())
}
