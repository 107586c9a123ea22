use std::io;

use crate::config::ConfigError;
use crate::state::StateError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to register bundled UI resources")]
    Resources(#[source] gtk4::glib::Error),
    #[error("layout is missing object {id:?}")]
    MissingLayoutObject { id: &'static str },
    #[error("failed to relaunch the launcher")]
    Relaunch(#[source] io::Error),
}

/// Flattens an error and its sources into one line for dialogs.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
