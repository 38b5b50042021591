//! Analysis and substitution phases
//!
//! The two phases only meet through the annotation record: [`analyze_to`]
//! needs an annotator, [`redact_from`] does not.

pub mod analyzer;
pub mod html;
pub mod redactor;

use anyhow::{Context, Result};
use deid_core::AnnotationSet;
use deid_storage::AnnotationStore;

pub use analyzer::{AnalysisOptions, Analyzer};
pub use redactor::{RedactOptions, Redaction, Redactor};

/// Phase 1: annotate `message` and persist the result
pub async fn analyze_to(
    analyzer: &Analyzer,
    message: &str,
    store: &AnnotationStore,
) -> Result<AnnotationSet> {
    let set = analyzer.analyze(message).await?;
    store
        .save(&set)
        .with_context(|| format!("Failed to save annotations to {}", store.path().display()))?;
    Ok(set)
}

/// Phase 2: load a persisted record and substitute it
pub fn redact_from(store: &AnnotationStore, redactor: &Redactor) -> Result<Redaction> {
    let set = store
        .load()
        .with_context(|| format!("Failed to load annotations from {}", store.path().display()))?;
    Ok(redactor.redact(&set)?)
}
