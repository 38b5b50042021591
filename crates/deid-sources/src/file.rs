use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::provider::{AnnotatedDoc, AnnotationProvider};

/// Serves annotations that were computed ahead of time and saved as JSON
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    name: String,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl AnnotationProvider for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn annotate(&self, text: &str) -> Result<AnnotatedDoc> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read annotations {}", self.path.display()))?;
        let doc: AnnotatedDoc = serde_json::from_str(&content)
            .with_context(|| format!("Invalid annotations in {}", self.path.display()))?;
        doc.ensure_matches(text)?;
        Ok(doc)
    }
}
