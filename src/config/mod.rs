use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const ROOT_ENV_VAR: &str = "SHORTCUT_LAUNCHER_ROOT";
const ROOT_FLAG: &str = "--root";

const SETTINGS_FILE: &str = "settings.json";
const NOTES_FILE: &str = "notes.txt";
const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "app.log";
const INPUTS_DIR: &str = "inputs";
const ASSETS_DIR: &str = "assets";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--root expects a directory argument")]
    MissingRootValue,
    #[error("failed to resolve current working directory")]
    CurrentDir(#[source] io::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Launch options resolved from argv and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub root: PathBuf,
}

impl StartupConfig {
    pub fn from_env() -> ConfigResult<Self> {
        let args = std::env::args_os().skip(1).collect::<Vec<_>>();
        let env_root = std::env::var_os(ROOT_ENV_VAR).map(PathBuf::from);
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_parts(&args, env_root.as_deref(), exe_dir.as_deref(), &cwd)
    }

    /// Root precedence: `--root`, then the environment, then the directory
    /// holding the executable, then the working directory.
    fn from_parts(
        args: &[OsString],
        env_root: Option<&Path>,
        exe_dir: Option<&Path>,
        cwd: &Path,
    ) -> ConfigResult<Self> {
        let root = match root_from_args(args)? {
            Some(root) => root,
            None => env_root
                .filter(|path| !path.as_os_str().is_empty())
                .or(exe_dir)
                .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf),
        };
        let root = if root.is_absolute() {
            root
        } else {
            cwd.join(root)
        };
        Ok(Self { root })
    }

    pub fn paths(&self) -> AppPaths {
        AppPaths::new(self.root.clone())
    }
}

fn root_from_args(args: &[OsString]) -> ConfigResult<Option<PathBuf>> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let Some(arg) = arg.to_str() else {
            continue;
        };
        if arg == ROOT_FLAG {
            let value = iter.next().ok_or(ConfigError::MissingRootValue)?;
            return Ok(Some(PathBuf::from(value)));
        }
        if let Some(value) = arg
            .strip_prefix(ROOT_FLAG)
            .and_then(|rest| rest.strip_prefix('='))
        {
            if value.is_empty() {
                return Err(ConfigError::MissingRootValue);
            }
            return Ok(Some(PathBuf::from(value)));
        }
    }
    Ok(None)
}

/// Fixed file locations under the application root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn notes_file(&self) -> PathBuf {
        self.root.join(NOTES_FILE)
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_DIR).join(LOG_FILE)
    }

    pub fn inputs_dir(&self) -> PathBuf {
        self.root.join(INPUTS_DIR)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    /// Absolute paths pass through unchanged.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Paths outside the root are kept absolute.
    pub fn relativize(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}
