use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{read_optional, write_atomic, StorageError, StorageResult};

pub const DEFAULT_SHORTCUT_SOURCE_PATH: &str = "inputs/buttons.xlsx";
pub const DEFAULT_ICON_PATH: &str = "assets/launcher_icon.png";

/// Contents of `settings.json`. Paths are relative to the application root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(
        rename = "rel_path_buttons_excel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    shortcut_source_path: Option<String>,
    #[serde(
        rename = "rel_path_icon",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    icon_path: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl Settings {
    pub fn is_empty(&self) -> bool {
        self.shortcut_source_path.is_none() && self.icon_path.is_none() && self.extra.is_empty()
    }

    pub fn shortcut_source_path(&self) -> &str {
        self.shortcut_source_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_SHORTCUT_SOURCE_PATH)
    }

    pub fn icon_path(&self) -> &str {
        self.icon_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_ICON_PATH)
    }

    pub fn with_shortcut_source_path(&self, path: impl Into<String>) -> Self {
        Self {
            shortcut_source_path: Some(path.into()),
            ..self.clone()
        }
    }

    pub fn with_icon_path(&self, path: impl Into<String>) -> Self {
        Self {
            icon_path: Some(path.into()),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing or unreadable document yields empty settings.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => {
                tracing::info!(path = %self.path.display(), ?settings, "loaded settings");
                settings
            }
            Ok(None) => {
                tracing::info!(
                    path = %self.path.display(),
                    "settings file not found; using defaults"
                );
                Settings::default()
            }
            Err(err) => {
                tracing::warn!(?err, "failed to load settings; using defaults");
                Settings::default()
            }
        }
    }

    pub fn try_load(&self) -> StorageResult<Option<Settings>> {
        let Some(contents) = read_optional(&self.path)? else {
            return Ok(None);
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    pub fn save(&self, settings: &Settings) -> StorageResult<()> {
        let serialized = serde_json::to_string_pretty(settings).map_err(StorageError::Serialize)?;
        write_atomic(&self.path, serialized.as_bytes())?;
        tracing::info!(path = %self.path.display(), ?settings, "saved settings");
        Ok(())
    }
}
