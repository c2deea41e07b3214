//! Config command

use super::load_config;
use crate::app::{ConfigAction, ConfigArgs, OutputFormat};
use anyhow::Result;
use manualqa_core::Config;

pub fn run(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.action {
        ConfigAction::Path => {
            println!("{}", Config::resolved_path().display());
        }
        ConfigAction::Show => {
            let mut config = load_config()?;
            redact(&mut config);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
                _ => print!("{}", serde_yaml::to_string(&config)?),
            }
        }
    }
    Ok(())
}

fn redact(config: &mut Config) {
    for key in [
        &mut config.llm_service.api_key,
        &mut config.vector_index.api_key,
    ] {
        if key.is_some() {
            *key = Some("********".to_string());
        }
    }
}
