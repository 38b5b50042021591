//! Annotation record persistence

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use deid_core::AnnotationSet;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::{Result, StorageError};

/// A single annotation record on disk
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    path: PathBuf,
}

impl AnnotationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `set` with every list sorted by descending start.
    ///
    /// The record is written to a temporary file next to the destination and
    /// renamed over it, so readers see either the old record or the new one.
    /// An existing record keeps its permissions; a new one is created `0644`
    /// on Unix rather than with the temporary file's private `0600`.
    pub fn save(&self, set: &AnnotationSet) -> Result<()> {
        let mut sorted = set.clone();
        sorted.sort_descending();

        let bytes = to_json(&sorted)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
        tmp.write_all(&bytes)
            .and_then(|_| self.copy_permissions(tmp.as_file()))
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            entities = sorted.entities.len(),
            pronouns = sorted.pronouns.len(),
            possible_misses = sorted.possible_misses.len(),
            "saved annotation record"
        );

        Ok(())
    }

    fn copy_permissions(&self, file: &File) -> std::io::Result<()> {
        match std::fs::metadata(&self.path) {
            Ok(existing) => file.set_permissions(existing.permissions()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    file.set_permissions(std::fs::Permissions::from_mode(0o644))?;
                }
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Read the record back, re-sorting every list by descending start.
    pub fn load(&self) -> Result<AnnotationSet> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let mut set: AnnotationSet =
            serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        if !set.is_sorted_descending() {
            tracing::warn!(
                path = %self.path.display(),
                "annotation record was not sorted, re-sorting"
            );
        }
        set.sort_descending();

        Ok(set)
    }
}

/// Four-space indented JSON, non-ASCII kept as is
fn to_json(set: &AnnotationSet) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    set.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

pub fn save(set: &AnnotationSet, path: impl AsRef<Path>) -> Result<()> {
    AnnotationStore::new(path.as_ref()).save(set)
}

pub fn load(path: impl AsRef<Path>) -> Result<AnnotationSet> {
    AnnotationStore::new(path.as_ref()).load()
}
