use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use deid_config::Config;
use deid_core::AnnotationSet;
use deid_engine::{AnalysisOptions, Analyzer};
use deid_sources::{
    AnnotationProvider, CommandProvider, FileProvider, decode_input, normalize_punctuation,
};
use deid_storage::AnnotationStore;

use crate::cli::AnalyzeArgs;

pub async fn handle(args: AnalyzeArgs, results: &Path, config: &Config) -> Result<()> {
    let set = analyze(&args, results, config).await?;

    println!("✓ Saved annotations: {}", results.display());
    println!("  Entities: {}", set.entities.len());
    println!("  Pronouns: {}", set.pronouns.len());
    println!("  Possible misses: {}", set.possible_misses.len());
    if !set.possible_misses.is_empty() {
        println!("  Run 'deid misses' to review them");
    }

    Ok(())
}

/// Read, normalize and annotate the input, then save the record
pub async fn analyze(args: &AnalyzeArgs, results: &Path, config: &Config) -> Result<AnnotationSet> {
    let bytes = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut message = decode_input(&bytes);
    if config.normalize && !args.raw {
        message = normalize_punctuation(&message);
    }

    let provider = provider(args, config)?;
    tracing::info!(
        input = %args.input.display(),
        provider = provider.name(),
        "starting analysis"
    );

    let analyzer = Analyzer::new(
        provider,
        AnalysisOptions {
            min_message_chars: config.min_message_chars,
        },
    );
    deid_engine::analyze_to(&analyzer, &message, &AnnotationStore::new(results)).await
}

fn provider(args: &AnalyzeArgs, config: &Config) -> Result<Arc<dyn AnnotationProvider>> {
    if let Some(path) = &args.annotations {
        return Ok(Arc::new(FileProvider::new(path)));
    }

    let argv = args
        .provider_cmd
        .as_deref()
        .unwrap_or(config.provider.command.as_slice());
    Ok(Arc::new(CommandProvider::from_argv(argv)?))
}
