pub mod analyze;
pub mod misses;
pub mod redact;
pub mod run;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write `content` to `path` via a temporary file in the same directory, so a
/// failed run never leaves a truncated output behind
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
