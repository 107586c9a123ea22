use std::path::PathBuf;

use crate::icon::WindowIcon;
use crate::shortcuts::{Category, ShortcutRecord};

mod controller;

pub use controller::{LauncherController, StartupReport};

/// Identifier prefix of design-time scaffold controls in the layout.
pub const PLACEHOLDER_PREFIX: &str = "pushButton";

/// Window surface the controller drives.
///
/// Implementations must keep placement a pure function of the record's
/// category and bind each added button to [`crate::launch::activate_shortcut`].
pub trait LauncherView {
    fn set_notes_text(&self, text: &str);
    fn notes_text(&self) -> String;
    fn set_window_icon(&self, icon: &WindowIcon);
    fn add_shortcut_button(&self, record: &ShortcutRecord);
    /// Returns how many controls were hidden.
    fn hide_placeholders(&self, category: Category, prefix: &str) -> usize;
    fn present(&self);
    fn notify(&self, message: &str);
    fn show_toast(&self, message: &str);
    fn show_error(&self, title: &str, message: &str);
    fn request_restart(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerFilter {
    Spreadsheets,
    Images,
}

impl PickerFilter {
    pub const fn label(self) -> &'static str {
        match self {
            PickerFilter::Spreadsheets => "Spreadsheets",
            PickerFilter::Images => "Images",
        }
    }

    /// Image patterns only name formats the icon loader can decode.
    pub const fn patterns(self) -> &'static [&'static str] {
        match self {
            PickerFilter::Spreadsheets => &["*.xlsx", "*.xlsm", "*.xls", "*.ods"],
            PickerFilter::Images => &[
                "*.png", "*.jpg", "*.jpeg", "*.ico", "*.bmp", "*.gif", "*.webp",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePickerRequest {
    pub title: &'static str,
    pub directory: PathBuf,
    pub filter: PickerFilter,
}
