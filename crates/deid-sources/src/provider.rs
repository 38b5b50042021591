//! Annotation provider trait

use async_trait::async_trait;
use deid_core::Token;
use serde::{Deserialize, Serialize};

/// A named entity as reported by the annotator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub text: String,
    /// Entity label, e.g. `PERSON`, `ORG`
    pub label: String,
    #[serde(alias = "start_char")]
    pub start: usize,
    #[serde(alias = "end_char")]
    pub end: usize,
}

/// Annotator output for one text. Offsets are char indices, both lists in
/// ascending document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotatedDoc {
    /// The text that was annotated, when the annotator echoes it back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl AnnotatedDoc {
    /// Check the doc was produced for `text`, if it says which text it was for
    pub fn ensure_matches(&self, text: &str) -> anyhow::Result<()> {
        match &self.text {
            Some(annotated) if annotated != text => anyhow::bail!(
                "annotations were produced for a different text ({} chars, expected {})",
                annotated.chars().count(),
                text.chars().count()
            ),
            _ => Ok(()),
        }
    }
}

/// Something that can annotate raw text with person entities and tagged
/// tokens. Constructed explicitly and handed to the analyzer.
#[async_trait]
pub trait AnnotationProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Annotate `text`
    async fn annotate(&self, text: &str) -> anyhow::Result<AnnotatedDoc>;
}
