//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "manualqa")]
#[command(
    author,
    version,
    about = "Answer operator questions from equipment manuals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a question
    Ask(AskArgs),

    /// Show the detected answer style for a question
    Style(StyleArgs),

    /// Show retrieval counts and finalists for a question
    Retrieve(RetrieveArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Start MCP server
    Mcp(BackendArgs),
}

/// Where evidence and completions come from
#[derive(Args, Clone, Default)]
pub struct BackendArgs {
    /// Serve matches from a JSON file instead of the vector index service
    #[arg(long, value_name = "FILE")]
    pub matches: Option<PathBuf>,

    /// Skip the LLM service (no reranking, no summary)
    #[arg(long)]
    pub no_llm: bool,
}

#[derive(Args)]
pub struct AskArgs {
    /// Question text
    #[arg(required = true)]
    pub question: Vec<String>,

    /// Vector index namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Neighbours to request from the index
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Restrict to one manufacturer
    #[arg(long)]
    pub manufacturer: Option<String>,

    /// Restrict to one model
    #[arg(long)]
    pub model: Option<String>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args)]
pub struct StyleArgs {
    /// Question text
    pub question: Vec<String>,
}

#[derive(Args)]
pub struct RetrieveArgs {
    /// Question text
    #[arg(required = true)]
    pub question: Vec<String>,

    /// Vector index namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Neighbours to request from the index
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Serve matches from a JSON file instead of the vector index service
    #[arg(long, value_name = "FILE")]
    pub matches: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
    Md,
}
