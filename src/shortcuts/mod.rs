use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

mod source;

pub use source::{read_shortcuts, ShortcutSourceError, ShortcutSourceResult, BUTTONS_SHEET};

pub const LABEL_COLUMN: &str = "Button";
pub const PATH_COLUMN: &str = "Path";
pub const TYPE_COLUMN: &str = "Type";
pub const USER_COLUMN: &str = "User";

/// Closed classification deciding container placement and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    App,
    Folder,
    EditorProject,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::App, Category::Folder, Category::EditorProject];

    /// Value used in the `Type` column.
    pub const fn source_value(self) -> &'static str {
        match self {
            Category::App => "App",
            Category::Folder => "Folder",
            Category::EditorProject => "VSCode",
        }
    }

    /// Layout identifier of the container holding this category's buttons.
    pub const fn container_id(self) -> &'static str {
        match self {
            Category::App => "frame_apps",
            Category::Folder => "frame_folders",
            Category::EditorProject => "frame_vscode",
        }
    }

    pub const fn icon_name(self) -> &'static str {
        match self {
            Category::App => "application-x-executable-symbolic",
            Category::Folder => "folder-symbolic",
            Category::EditorProject => "text-x-script-symbolic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shortcut type {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.source_value() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRecord {
    pub label: String,
    pub target_path: String,
    pub category: Category,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    #[error("empty Button cell")]
    MissingLabel,
    #[error("empty Path cell")]
    MissingTarget,
}

/// A row owned by the current user that could not become a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// 1-based row number within the sheet's used range.
    pub row: usize,
    pub reason: RejectReason,
}

/// Outcome of reading a shortcut source, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutSheet {
    pub records: Vec<ShortcutRecord>,
    pub rejected: Vec<RowRejection>,
    pub other_users: usize,
}

impl ShortcutSheet {
    pub fn records_in(&self, category: Category) -> impl Iterator<Item = &ShortcutRecord> {
        self.records
            .iter()
            .filter(move |record| record.category == category)
    }
}

/// Where shortcut rows come from; the workbook reader in production.
pub trait ShortcutSource {
    fn read(&self, path: &Path, current_user: &str) -> ShortcutSourceResult<ShortcutSheet>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WorkbookSource;

impl ShortcutSource for WorkbookSource {
    fn read(&self, path: &Path, current_user: &str) -> ShortcutSourceResult<ShortcutSheet> {
        read_shortcuts(path, current_user)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    label: usize,
    target: usize,
    category: usize,
    owner: usize,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> ShortcutSourceResult<Self> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|cell| cell.trim() == name)
                .ok_or(ShortcutSourceError::MissingColumn { column: name })
        };
        Ok(Self {
            label: find(LABEL_COLUMN)?,
            target: find(PATH_COLUMN)?,
            category: find(TYPE_COLUMN)?,
            owner: find(USER_COLUMN)?,
        })
    }

    fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
        row.get(index).map_or("", String::as_str)
    }

    fn record(&self, row: &[String]) -> Result<ShortcutRecord, RejectReason> {
        let category = Self::cell(row, self.category).parse::<Category>()?;
        let label = Self::cell(row, self.label);
        if label.trim().is_empty() {
            return Err(RejectReason::MissingLabel);
        }
        let target_path = Self::cell(row, self.target);
        if target_path.trim().is_empty() {
            return Err(RejectReason::MissingTarget);
        }
        Ok(ShortcutRecord {
            label: label.to_string(),
            target_path: target_path.to_string(),
            category,
            owner: Self::cell(row, self.owner).to_string(),
        })
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Turns raw sheet rows into shortcut records for `current_user`.
///
/// The first non-blank row is the header. Rows owned by other users are
/// dropped silently; malformed rows for this user are logged and listed in
/// [`ShortcutSheet::rejected`].
pub fn records_from_rows<I>(rows: I, current_user: &str) -> ShortcutSourceResult<ShortcutSheet>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut rows = rows
        .into_iter()
        .enumerate()
        .filter(|(_, row)| !is_blank(row));
    let (_, header) = rows.next().ok_or(ShortcutSourceError::MissingHeader)?;
    let columns = ColumnMap::from_header(&header)?;

    let mut sheet = ShortcutSheet::default();
    for (index, row) in rows {
        let row_number = index + 1;
        if ColumnMap::cell(&row, columns.owner) != current_user {
            sheet.other_users += 1;
            continue;
        }
        match columns.record(&row) {
            Ok(record) => {
                tracing::debug!(
                    row = row_number,
                    label = record.label.as_str(),
                    category = %record.category,
                    "accepted shortcut row"
                );
                sheet.records.push(record);
            }
            Err(reason) => {
                tracing::error!(row = row_number, %reason, "rejected shortcut row");
                sheet.rejected.push(RowRejection {
                    row: row_number,
                    reason,
                });
            }
        }
    }
    Ok(sheet)
}
