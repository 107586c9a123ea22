use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use thiserror::Error;

use super::{records_from_rows, ShortcutSheet};

/// Preferred worksheet; single-sheet workbooks fall back to their first sheet.
pub const BUTTONS_SHEET: &str = "Buttons";

#[derive(Debug, Error)]
pub enum ShortcutSourceError {
    #[error("failed to open shortcut source {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("shortcut source {path} has no worksheets")]
    NoSheets { path: PathBuf },
    #[error("failed to read sheet {sheet:?} of {path}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },
    #[error("shortcut source has no header row")]
    MissingHeader,
    #[error("shortcut source is missing the {column:?} column")]
    MissingColumn { column: &'static str },
}

pub type ShortcutSourceResult<T> = std::result::Result<T, ShortcutSourceError>;

/// Reads the shortcut workbook at `path`, keeping rows owned by `current_user`.
pub fn read_shortcuts(path: &Path, current_user: &str) -> ShortcutSourceResult<ShortcutSheet> {
    let mut workbook = open_workbook_auto(path).map_err(|source| ShortcutSourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet = pick_sheet(&sheet_names)
        .ok_or_else(|| ShortcutSourceError::NoSheets {
            path: path.to_path_buf(),
        })?
        .to_string();
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|source| ShortcutSourceError::Sheet {
            path: path.to_path_buf(),
            sheet: sheet.clone(),
            source,
        })?;
    tracing::info!(
        path = %path.display(),
        sheet = sheet.as_str(),
        rows = range.height(),
        columns = range.width(),
        "opened shortcut source"
    );

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
    let sheet = records_from_rows(rows, current_user)?;
    tracing::info!(
        accepted = sheet.records.len(),
        rejected = sheet.rejected.len(),
        other_users = sheet.other_users,
        user = current_user,
        "parsed shortcut rows"
    );
    Ok(sheet)
}

fn pick_sheet(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| name.as_str() == BUTTONS_SHEET)
        .or_else(|| names.first())
        .map(String::as_str)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        other => other.to_string(),
    }
}
