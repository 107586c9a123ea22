use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

mod notes;
mod settings;

pub use notes::NotesStore;
pub use settings::{Settings, SettingsStore, DEFAULT_ICON_PATH, DEFAULT_SHORTCUT_SOURCE_PATH};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings")]
    Serialize(#[source] serde_json::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

const TEMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Default, Clone)]
pub struct PruneReport {
    pub removed_files: usize,
}

/// Removes temp siblings left behind by writes that never reached the rename.
pub fn prune_stale_temp_files(dir: &Path, owned_files: &[&Path]) -> StorageResult<PruneReport> {
    let mut report = PruneReport::default();
    if !dir.is_dir() {
        return Ok(report);
    }

    let prefixes = owned_files
        .iter()
        .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
        .map(|name| format!("{name}."))
        .collect::<Vec<_>>();
    let entries = fs::read_dir(dir).map_err(|source| StorageError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let is_stale_temp = name.ends_with(TEMP_SUFFIX)
            && prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()));
        if !is_stale_temp || !path.is_file() {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => report.removed_files += 1,
            Err(err) => {
                tracing::warn!(path = %path.display(), ?err, "failed to remove stale temp file");
            }
        }
    }

    Ok(report)
}

/// Reads a whole file, mapping a missing file to `None`.
fn read_optional(path: &Path) -> StorageResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replaces `path` with `contents` through a temp sibling and a rename, so
/// readers never observe a half-written file.
fn write_atomic(path: &Path, contents: &[u8]) -> StorageResult<()> {
    let write_error = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let temp_path = temp_sibling(path);
    if let Err(err) = write_and_rename(&temp_path, path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(err));
    }
    Ok(())
}

fn write_and_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);
    fs::rename(temp_path, path)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("launcher"));
    name.push(format!(".{}{TEMP_SUFFIX}", std::process::id()));
    path.with_file_name(name)
}
