use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deid")]
#[command(about = "Redact person names and gendered pronouns from text", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true, env = "DEID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Annotation record (default from config: results.json)
    #[arg(long, global = true)]
    pub results: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate a text file and save the annotation record
    Analyze(AnalyzeArgs),

    /// Substitute a saved annotation record (no annotator needed)
    Redact(RedactArgs),

    /// Analyze and redact in one invocation
    Run {
        #[command(flatten)]
        analyze: AnalyzeArgs,

        #[command(flatten)]
        redact: RedactArgs,
    },

    /// List possible misses from a saved annotation record
    Misses,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text file to analyze
    pub input: PathBuf,

    /// Precomputed annotator output (JSON) instead of running the annotator
    #[arg(long, conflicts_with = "provider_cmd")]
    pub annotations: Option<PathBuf>,

    /// Annotator program and its arguments, e.g. `--provider-cmd python3 annotate.py`.
    /// Consumes the rest of the command line; put INPUT first.
    #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "CMD")]
    pub provider_cmd: Option<Vec<String>>,

    /// Skip punctuation normalization
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args)]
pub struct RedactArgs {
    /// Replacement for person names (default from config: EMPLOYEE)
    #[arg(long)]
    pub replacement: Option<String>,

    /// Emit an HTML document with highlighted replacements
    #[arg(long, conflicts_with = "markdown")]
    pub html: bool,

    /// Bold replacements for Markdown
    #[arg(long)]
    pub markdown: bool,

    /// Write the redacted text here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
