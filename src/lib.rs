pub mod app;
pub mod config;
pub mod error;
pub mod icon;
pub mod launch;
pub mod launcher;
pub mod logging;
pub mod notification;
pub mod shortcuts;
pub mod state;
pub mod storage;
pub mod ui;
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary.
pub fn run() -> AppResult<()> {
    let config = config::StartupConfig::from_env()?;
    logging::init(&config.paths().log_file());
    tracing::info!(root = %config.root.display(), "starting shortcut launcher");

    let mut app = app::App::new(config);
    app.start()?;

    tracing::info!("launcher exited");
    Ok(())
}
