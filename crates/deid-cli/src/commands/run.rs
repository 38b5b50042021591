use std::path::Path;

use anyhow::Result;
use deid_config::Config;

use crate::cli::{AnalyzeArgs, RedactArgs};

pub async fn handle(
    analyze: AnalyzeArgs,
    redact: RedactArgs,
    results: &Path,
    config: &Config,
) -> Result<()> {
    if let Some(output) = &redact.output
        && same_file(output, &analyze.input)
    {
        anyhow::bail!(
            "Refusing to overwrite the input file {}",
            analyze.input.display()
        );
    }

    eprintln!("starting deidentification...");
    let set = super::analyze::analyze(&analyze, results, config).await?;
    eprintln!(
        "deidentification results: entities={}, pronouns={}, possible_misses={}",
        set.entities.len(),
        set.pronouns.len(),
        set.possible_misses.len()
    );

    super::redact::handle(redact, results, config)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
