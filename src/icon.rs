use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon file {path} does not exist")]
    Missing { path: PathBuf },
    #[error("icon file {path} is not a readable image")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type IconResult<T> = std::result::Result<T, IconError>;

/// An icon file that decoded successfully and can be handed to the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowIcon {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl WindowIcon {
    /// Icon themes look icons up by file stem.
    pub fn icon_name(&self) -> Option<&str> {
        self.path.file_stem().and_then(|stem| stem.to_str())
    }
}

pub fn load_window_icon(path: &Path) -> IconResult<WindowIcon> {
    if !path.is_file() {
        return Err(IconError::Missing {
            path: path.to_path_buf(),
        });
    }
    let (width, height) =
        image::image_dimensions(path).map_err(|source| IconError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(WindowIcon {
        path: path.to_path_buf(),
        width,
        height,
    })
}
