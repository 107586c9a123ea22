use std::path::{Path, PathBuf};

use super::{read_optional, write_atomic, StorageResult};

/// Single plain-text notes blob, overwritten as a whole on save.
#[derive(Debug, Clone)]
pub struct NotesStore {
    path: PathBuf,
}

impl NotesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> String {
        match read_optional(&self.path) {
            Ok(Some(notes)) => {
                tracing::info!(path = %self.path.display(), bytes = notes.len(), "loaded notes");
                notes
            }
            Ok(None) => String::new(),
            Err(err) => {
                tracing::warn!(?err, "failed to load notes; starting blank");
                String::new()
            }
        }
    }

    pub fn save(&self, notes: &str) -> StorageResult<()> {
        write_atomic(&self.path, notes.as_bytes())?;
        tracing::info!(path = %self.path.display(), bytes = notes.len(), "saved notes");
        Ok(())
    }
}
