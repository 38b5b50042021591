use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::provider::{AnnotatedDoc, AnnotationProvider};

/// Runs an external annotator (e.g. a spaCy script).
///
/// The text is written to the program's stdin; the program must print one
/// JSON [`AnnotatedDoc`] to stdout and exit 0.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a full command line, program first
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .context("Annotator command is empty")?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl AnnotationProvider for CommandProvider {
    fn name(&self) -> &str {
        &self.program
    }

    async fn annotate(&self, text: &str) -> Result<AnnotatedDoc> {
        tracing::debug!(program = %self.program, args = ?self.args, "spawning annotator");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start annotator `{}`", self.program))?;

        // Feed stdin concurrently so a chatty annotator cannot block on a full pipe
        let mut stdin = child.stdin.take().context("Annotator stdin unavailable")?;
        let input = text.to_owned();
        let writer = tokio::spawn(async move {
            stdin.write_all(input.as_bytes()).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("Failed to wait for annotator `{}`", self.program))?;
        let written = writer.await.context("Annotator stdin writer panicked")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "Annotator `{}` failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }
        written.with_context(|| format!("Failed to write text to annotator `{}`", self.program))?;

        let doc: AnnotatedDoc = serde_json::from_slice(&output.stdout)
            .with_context(|| format!("Annotator `{}` printed invalid JSON", self.program))?;
        doc.ensure_matches(text)?;

        tracing::debug!(
            entities = doc.entities.len(),
            tokens = doc.tokens.len(),
            "annotator finished"
        );

        Ok(doc)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandProvider {
        CommandProvider::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn test_reads_doc_from_stdout() {
        let provider = sh(
            r#"cat > /dev/null; echo '{"entities": [{"text": "Ann", "label": "PERSON", "start": 0, "end": 3}], "tokens": []}'"#,
        );

        let doc = provider.annotate("Ann left").await.unwrap();
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].text, "Ann");
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let provider = sh("cat > /dev/null; echo 'model not installed' >&2; exit 3");

        let err = provider.annotate("text").await.unwrap_err();
        assert!(err.to_string().contains("model not installed"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let provider = sh("cat > /dev/null; echo 'not json'");
        assert!(provider.annotate("text").await.is_err());
    }

    #[test]
    fn test_from_argv() {
        let argv = vec!["python3".to_string(), "annotate.py".to_string()];
        let provider = CommandProvider::from_argv(&argv).unwrap();
        assert_eq!(provider.name(), "python3");

        assert!(CommandProvider::from_argv(&[]).is_err());
    }
}
