use crate::config::{AppPaths, StartupConfig};
use crate::storage::prune_stale_temp_files;

pub(super) struct AppBootstrap {
    pub(super) paths: AppPaths,
    pub(super) current_user: String,
}

pub(super) fn bootstrap_app_runtime(config: &StartupConfig) -> AppBootstrap {
    let paths = config.paths();
    let current_user = gtk4::glib::user_name().to_string_lossy().into_owned();
    tracing::info!(
        root = %paths.root().display(),
        user = current_user.as_str(),
        "resolved launcher runtime"
    );

    let settings_file = paths.settings_file();
    let notes_file = paths.notes_file();
    match prune_stale_temp_files(paths.root(), &[settings_file.as_path(), notes_file.as_path()]) {
        Ok(report) if report.removed_files > 0 => {
            tracing::info!(removed = report.removed_files, "pruned stale temp files");
        }
        Ok(_) => {}
        Err(err) => tracing::warn!(?err, "failed to prune stale temp files"),
    }

    AppBootstrap {
        paths,
        current_user,
    }
}
