use std::path::{Path, PathBuf};

use crate::config::AppPaths;
use crate::error::error_chain;
use crate::icon::{load_window_icon, IconResult, WindowIcon};
use crate::shortcuts::{Category, ShortcutSheet, ShortcutSource, WorkbookSource};
use crate::state::{AppEvent, AppState, StateError, StateMachine, StateResult};
use crate::storage::{NotesStore, Settings, SettingsStore, StorageError};

use super::{FilePickerRequest, LauncherView, PickerFilter, PLACEHOLDER_PREFIX};

const NOTES_SAVED_TOAST: &str = "Notes saved";

/// What `initialize` put on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    pub source_path: PathBuf,
    pub source_readable: bool,
    pub apps: usize,
    pub folders: usize,
    pub editor_projects: usize,
    pub rejected_rows: usize,
    pub placeholders_hidden: usize,
    pub icon_applied: bool,
}

impl StartupReport {
    pub fn buttons(&self) -> usize {
        self.apps + self.folders + self.editor_projects
    }

    fn count_mut(&mut self, category: Category) -> &mut usize {
        match category {
            Category::App => &mut self.apps,
            Category::Folder => &mut self.folders,
            Category::EditorProject => &mut self.editor_projects,
        }
    }
}

pub struct LauncherController<V> {
    view: V,
    paths: AppPaths,
    settings_store: SettingsStore,
    notes_store: NotesStore,
    source: Box<dyn ShortcutSource>,
    settings: Settings,
    current_user: String,
    machine: StateMachine,
}

impl<V: LauncherView> LauncherController<V> {
    /// Loads `settings.json` from the application root before building.
    pub fn from_disk(view: V, paths: AppPaths, current_user: impl Into<String>) -> Self {
        let settings = SettingsStore::new(paths.settings_file()).load();
        Self::new(view, paths, settings, current_user)
    }

    pub fn new(
        view: V,
        paths: AppPaths,
        settings: Settings,
        current_user: impl Into<String>,
    ) -> Self {
        let mut machine = StateMachine::new();
        if let Err(err) = machine.transition(AppEvent::LoadSettings) {
            tracing::warn!(?err, "fresh state machine rejected settings load");
        }
        Self {
            view,
            settings_store: SettingsStore::new(paths.settings_file()),
            notes_store: NotesStore::new(paths.notes_file()),
            paths,
            source: Box::new(WorkbookSource),
            settings,
            current_user: current_user.into(),
            machine,
        }
    }

    pub fn with_source(mut self, source: impl ShortcutSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> AppState {
        self.machine.state()
    }

    pub fn shortcut_source_path(&self) -> PathBuf {
        self.paths.resolve(self.settings.shortcut_source_path())
    }

    pub fn initialize(&mut self) -> StateResult<StartupReport> {
        self.ensure_can(AppEvent::PopulateShortcuts)?;
        tracing::info!(
            root = %self.paths.root().display(),
            user = self.current_user.as_str(),
            "initializing launcher"
        );

        let notes = self.notes_store.load();
        self.view.set_notes_text(&notes);

        let mut report = StartupReport {
            icon_applied: self.apply_icon().is_ok(),
            source_path: self.shortcut_source_path(),
            ..StartupReport::default()
        };

        let sheet = self.load_shortcut_sheet(&report.source_path);
        report.source_readable = sheet.is_some();
        let sheet = sheet.unwrap_or_default();
        for record in &sheet.records {
            self.view.add_shortcut_button(record);
            *report.count_mut(record.category) += 1;
        }
        report.rejected_rows = sheet.rejected.len();
        self.machine.transition(AppEvent::PopulateShortcuts)?;

        report.placeholders_hidden = Category::ALL
            .into_iter()
            .map(|category| self.view.hide_placeholders(category, PLACEHOLDER_PREFIX))
            .sum();

        self.machine.transition(AppEvent::Present)?;
        self.view.present();
        tracing::info!(?report, "launcher visible");
        Ok(report)
    }

    pub fn shortcut_source_picker(&self) -> FilePickerRequest {
        FilePickerRequest {
            title: "Select Buttons File",
            directory: self.paths.inputs_dir(),
            filter: PickerFilter::Spreadsheets,
        }
    }

    pub fn icon_picker(&self) -> FilePickerRequest {
        FilePickerRequest {
            title: "Select Window Icon",
            directory: self.paths.assets_dir(),
            filter: PickerFilter::Images,
        }
    }

    /// Persists the chosen workbook and restarts. A `None` choice is a
    /// cancelled picker. Returns whether a restart was requested.
    pub fn select_new_shortcut_source(&mut self, choice: Option<PathBuf>) -> bool {
        let Some(chosen) = choice else {
            tracing::info!("shortcut source selection cancelled");
            return false;
        };
        let relative = self.paths.relativize(&chosen);
        tracing::info!(path = relative.as_str(), "selected new shortcut source");

        let next = self.settings.with_shortcut_source_path(relative);
        if !self.persist_settings(next) {
            return false;
        }
        self.restart()
    }

    /// Validates the chosen icon, persists it and applies it without a
    /// restart. Settings are left untouched when the file cannot be decoded.
    pub fn change_icon(&mut self, choice: Option<PathBuf>) -> bool {
        let Some(chosen) = choice else {
            tracing::info!("icon selection cancelled");
            return false;
        };
        let icon = match load_window_icon(&chosen) {
            Ok(icon) => icon,
            Err(err) => {
                tracing::error!(?err, "rejected selected window icon");
                self.view
                    .show_error("Could not change icon", &error_chain(&err));
                return false;
            }
        };
        let relative = self.paths.relativize(&chosen);
        tracing::info!(path = relative.as_str(), "selected new window icon");

        let next = self.settings.with_icon_path(relative);
        if !self.persist_settings(next) {
            return false;
        }
        self.view.set_window_icon(&icon);
        true
    }

    pub fn save_notes(&self) -> bool {
        let notes = self.view.notes_text();
        match self.notes_store.save(&notes) {
            Ok(()) => {
                self.view.show_toast(NOTES_SAVED_TOAST);
                true
            }
            Err(err) => {
                self.report_write_failure("Could not save notes", &err);
                false
            }
        }
    }

    /// Marks this instance as finished and asks the shell to relaunch.
    pub fn restart(&mut self) -> bool {
        if let Err(err) = self.machine.transition(AppEvent::Restart) {
            tracing::warn!(?err, "restart ignored");
            return false;
        }
        tracing::info!("restart requested");
        self.view.request_restart();
        true
    }

    fn ensure_can(&self, event: AppEvent) -> StateResult<()> {
        if self.machine.can_transition(event) {
            return Ok(());
        }
        Err(StateError::InvalidStateTransition {
            from: self.machine.state(),
            event,
        })
    }

    fn apply_icon(&self) -> IconResult<WindowIcon> {
        let path = self.paths.resolve(self.settings.icon_path());
        match load_window_icon(&path) {
            Ok(icon) => {
                self.view.set_window_icon(&icon);
                tracing::info!(
                    path = %icon.path.display(),
                    width = icon.width,
                    height = icon.height,
                    "applied window icon"
                );
                Ok(icon)
            }
            Err(err) => {
                tracing::error!(?err, "failed to apply window icon");
                Err(err)
            }
        }
    }

    fn load_shortcut_sheet(&self, path: &Path) -> Option<ShortcutSheet> {
        match self.source.read(path, &self.current_user) {
            Ok(sheet) => Some(sheet),
            Err(err) => {
                tracing::error!(?err, "failed to read shortcut source; showing no shortcuts");
                self.view.notify(&format!(
                    "Could not read shortcuts from {}",
                    path.display()
                ));
                None
            }
        }
    }

    fn persist_settings(&mut self, next: Settings) -> bool {
        match self.settings_store.save(&next) {
            Ok(()) => {
                self.settings = next;
                true
            }
            Err(err) => {
                self.report_write_failure("Could not save settings", &err);
                false
            }
        }
    }

    fn report_write_failure(&self, title: &str, err: &StorageError) {
        tracing::error!(?err, "{title}");
        self.view.show_error(title, &error_chain(err));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::fs;

    use super::*;
    use crate::shortcuts::{records_from_rows, ShortcutRecord, ShortcutSourceError};
    use crate::storage::fixtures::with_temp_root;

    #[derive(Default)]
    struct RecordingView {
        notes: RefCell<String>,
        icon: RefCell<Option<WindowIcon>>,
        buttons: RefCell<Vec<(Category, String, String)>>,
        placeholders: RefCell<HashMap<Category, Vec<(String, bool)>>>,
        presented: Cell<bool>,
        notifications: RefCell<Vec<String>>,
        toasts: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
        restart_requested: Cell<bool>,
    }

    impl RecordingView {
        fn with_layout_placeholders() -> Self {
            let view = Self::default();
            let mut placeholders = view.placeholders.borrow_mut();
            placeholders.insert(
                Category::App,
                vec![
                    ("pushButton".to_string(), true),
                    ("pushButton_2".to_string(), true),
                ],
            );
            placeholders.insert(Category::Folder, vec![("pushButton_3".to_string(), true)]);
            placeholders.insert(
                Category::EditorProject,
                vec![("pushButton_4".to_string(), true)],
            );
            drop(placeholders);
            view
        }

        fn labels_in(&self, category: Category) -> Vec<String> {
            self.buttons
                .borrow()
                .iter()
                .filter(|(placed, _, _)| *placed == category)
                .map(|(_, label, _)| label.clone())
                .collect()
        }
    }

    impl LauncherView for RecordingView {
        fn set_notes_text(&self, text: &str) {
            *self.notes.borrow_mut() = text.to_string();
        }

        fn notes_text(&self) -> String {
            self.notes.borrow().clone()
        }

        fn set_window_icon(&self, icon: &WindowIcon) {
            *self.icon.borrow_mut() = Some(icon.clone());
        }

        fn add_shortcut_button(&self, record: &ShortcutRecord) {
            self.buttons.borrow_mut().push((
                record.category,
                record.label.clone(),
                record.target_path.clone(),
            ));
        }

        fn hide_placeholders(&self, category: Category, prefix: &str) -> usize {
            let mut placeholders = self.placeholders.borrow_mut();
            let Some(controls) = placeholders.get_mut(&category) else {
                return 0;
            };
            let mut hidden = 0;
            for (id, visible) in controls.iter_mut() {
                if id.starts_with(prefix) && *visible {
                    *visible = false;
                    hidden += 1;
                }
            }
            hidden
        }

        fn present(&self) {
            self.presented.set(true);
        }

        fn notify(&self, message: &str) {
            self.notifications.borrow_mut().push(message.to_string());
        }

        fn show_toast(&self, message: &str) {
            self.toasts.borrow_mut().push(message.to_string());
        }

        fn show_error(&self, title: &str, message: &str) {
            self.errors.borrow_mut().push(format!("{title}: {message}"));
        }

        fn request_restart(&self) {
            self.restart_requested.set(true);
        }
    }

    /// In-memory workbook keyed by resolved path.
    #[derive(Default)]
    struct TableSource {
        tables: HashMap<PathBuf, Vec<Vec<String>>>,
    }

    impl TableSource {
        fn with_table(mut self, path: PathBuf, rows: &[[&str; 4]]) -> Self {
            let mut table = vec![vec![
                "Button".to_string(),
                "Path".to_string(),
                "Type".to_string(),
                "User".to_string(),
            ]];
            table.extend(
                rows.iter()
                    .map(|row| row.iter().map(|cell| cell.to_string()).collect()),
            );
            self.tables.insert(path, table);
            self
        }
    }

    impl ShortcutSource for TableSource {
        fn read(
            &self,
            path: &Path,
            current_user: &str,
        ) -> crate::shortcuts::ShortcutSourceResult<ShortcutSheet> {
            let rows = self
                .tables
                .get(path)
                .cloned()
                .ok_or_else(|| ShortcutSourceError::NoSheets {
                    path: path.to_path_buf(),
                })?;
            records_from_rows(rows, current_user)
        }
    }

    fn write_png(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbaImage::new(2, 2).save(path).unwrap();
    }

    fn controller(
        root: &Path,
        source: TableSource,
        user: &str,
    ) -> LauncherController<RecordingView> {
        LauncherController::from_disk(
            RecordingView::with_layout_placeholders(),
            AppPaths::new(root),
            user,
        )
        .with_source(source)
    }

    #[test]
    fn initialize_places_only_current_user_rows_in_matching_containers() {
        with_temp_root("controller-scenario", |root| {
            let source = TableSource::default().with_table(
                root.join("inputs/buttons.xlsx"),
                &[
                    ["Calc", "C:\\calc.exe", "App", "alice"],
                    ["Docs", "\\\\srv\\docs", "Folder", "bob"],
                ],
            );
            let mut controller = controller(root, source, "alice");

            let report = controller.initialize().unwrap();

            assert_eq!(controller.view().labels_in(Category::App), vec!["Calc"]);
            assert!(controller.view().labels_in(Category::Folder).is_empty());
            assert_eq!(report.apps, 1);
            assert_eq!(report.buttons(), 1);
            assert_eq!(
                controller.view().buttons.borrow()[0].2,
                "C:\\calc.exe".to_string()
            );
            assert_eq!(controller.state(), AppState::Visible);
        });
    }

    #[test]
    fn initialize_counts_rejected_rows_and_still_places_valid_ones() {
        with_temp_root("controller-rejects", |root| {
            let source = TableSource::default().with_table(
                root.join("inputs/buttons.xlsx"),
                &[
                    ["Repo", "/src/app", "VSCode", "alice"],
                    ["Weird", "/x", "Gadget", "alice"],
                    ["Home", "/home/alice", "Folder", "alice"],
                    ["Bad", "/y", "Widget", "alice"],
                ],
            );
            let mut controller = controller(root, source, "alice");

            let report = controller.initialize().unwrap();

            assert_eq!(report.rejected_rows, 2);
            assert_eq!(report.editor_projects, 1);
            assert_eq!(report.folders, 1);
            assert_eq!(
                controller.view().labels_in(Category::EditorProject),
                vec!["Repo"]
            );
        });
    }

    #[test]
    fn initialize_hides_every_placeholder_and_presents() {
        with_temp_root("controller-placeholders", |root| {
            let mut controller = controller(root, TableSource::default(), "alice");

            let report = controller.initialize().unwrap();

            assert_eq!(report.placeholders_hidden, 4);
            assert!(controller
                .view()
                .placeholders
                .borrow()
                .values()
                .flatten()
                .all(|(_, visible)| !visible));
            assert!(controller.view().presented.get());
        });
    }

    #[test]
    fn unreadable_source_degrades_to_empty_containers_with_notification() {
        with_temp_root("controller-no-source", |root| {
            let mut controller = controller(root, TableSource::default(), "alice");

            let report = controller.initialize().unwrap();

            assert!(!report.source_readable);
            assert_eq!(report.buttons(), 0);
            assert_eq!(report.source_path, root.join("inputs/buttons.xlsx"));
            assert_eq!(controller.view().notifications.borrow().len(), 1);
            assert!(controller.view().presented.get());
        });
    }

    #[test]
    fn missing_icon_is_reported_but_window_still_becomes_visible() {
        with_temp_root("controller-missing-icon", |root| {
            fs::write(
                root.join("settings.json"),
                r#"{"rel_path_icon": "assets/missing.png"}"#,
            )
            .unwrap();
            let mut controller = controller(root, TableSource::default(), "alice");

            let report = controller.initialize().unwrap();

            assert!(!report.icon_applied);
            assert!(controller.view().icon.borrow().is_none());
            assert_eq!(controller.state(), AppState::Visible);
            assert!(controller.view().presented.get());
        });
    }

    #[test]
    fn initialize_loads_notes_and_configured_icon() {
        with_temp_root("controller-notes-icon", |root| {
            fs::write(root.join("notes.txt"), "remember the milk").unwrap();
            write_png(&root.join("assets/launcher_icon.png"));
            let mut controller = controller(root, TableSource::default(), "alice");

            let report = controller.initialize().unwrap();

            assert!(report.icon_applied);
            assert_eq!(*controller.view().notes.borrow(), "remember the milk");
            assert_eq!(
                controller.view().icon.borrow().as_ref().map(|icon| icon.path.clone()),
                Some(root.join("assets/launcher_icon.png"))
            );
        });
    }

    #[test]
    fn initialize_twice_is_rejected_without_duplicating_buttons() {
        with_temp_root("controller-reinit", |root| {
            let source = TableSource::default().with_table(
                root.join("inputs/buttons.xlsx"),
                &[["Calc", "/usr/bin/calc", "App", "alice"]],
            );
            let mut controller = controller(root, source, "alice");
            controller.initialize().unwrap();

            let err = controller.initialize().unwrap_err();

            assert!(matches!(
                err,
                StateError::InvalidStateTransition {
                    from: AppState::Visible,
                    event: AppEvent::PopulateShortcuts
                }
            ));
            assert_eq!(controller.view().buttons.borrow().len(), 1);
        });
    }

    #[test]
    fn save_notes_then_fresh_instance_reads_same_text() {
        with_temp_root("controller-notes", |root| {
            let mut first = controller(root, TableSource::default(), "alice");
            first.initialize().unwrap();
            first.view().set_notes_text("line one\nline two");

            assert!(first.save_notes());
            assert_eq!(first.view().toasts.borrow().as_slice(), ["Notes saved"]);

            let mut second = controller(root, TableSource::default(), "alice");
            second.initialize().unwrap();
            assert_eq!(second.view().notes_text(), "line one\nline two");

            second.view().set_notes_text("");
            assert!(second.save_notes());
            let mut third = controller(root, TableSource::default(), "alice");
            third.view().set_notes_text("stale");
            third.initialize().unwrap();
            assert_eq!(third.view().notes_text(), "");
        });
    }

    #[test]
    fn save_notes_failure_is_shown_to_the_user() {
        with_temp_root("controller-notes-failure", |root| {
            fs::create_dir_all(root.join("notes.txt")).unwrap();
            let mut controller = controller(root, TableSource::default(), "alice");
            controller.initialize().unwrap();

            assert!(!controller.save_notes());
            let errors = controller.view().errors.borrow();
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("Could not save notes"));
        });
    }

    #[test]
    fn selecting_new_source_persists_restarts_and_next_instance_reads_it() {
        with_temp_root("controller-new-source", |root| {
            let new_source = root.join("inputs").join("team.xlsx");
            let source = || {
                TableSource::default()
                    .with_table(
                        root.join("inputs/buttons.xlsx"),
                        &[["Old", "/old", "App", "alice"]],
                    )
                    .with_table(new_source.clone(), &[["New", "/new", "Folder", "alice"]])
            };
            let mut first = controller(root, source(), "alice");
            first.initialize().unwrap();

            assert!(first.select_new_shortcut_source(Some(new_source.clone())));
            assert!(first.view().restart_requested.get());
            assert_eq!(first.state(), AppState::Restarting);
            assert_eq!(first.settings().shortcut_source_path(), "inputs/team.xlsx");

            let mut next = controller(root, source(), "alice");
            let report = next.initialize().unwrap();
            assert_eq!(report.source_path, new_source);
            assert_eq!(next.view().labels_in(Category::Folder), vec!["New"]);
            assert!(next.view().labels_in(Category::App).is_empty());
        });
    }

    #[test]
    fn cancelled_pickers_leave_settings_untouched() {
        with_temp_root("controller-cancel", |root| {
            let mut controller = controller(root, TableSource::default(), "alice");
            controller.initialize().unwrap();
            let before = controller.settings().clone();

            assert!(!controller.select_new_shortcut_source(None));
            assert!(!controller.change_icon(None));

            assert_eq!(controller.settings(), &before);
            assert!(!root.join("settings.json").exists());
            assert!(!controller.view().restart_requested.get());
            assert_eq!(controller.state(), AppState::Visible);
        });
    }

    #[test]
    fn change_icon_persists_and_applies_without_restart() {
        with_temp_root("controller-change-icon", |root| {
            let mut controller = controller(root, TableSource::default(), "alice");
            controller.initialize().unwrap();
            let icon_path = root.join("assets").join("earth.png");
            write_png(&icon_path);

            assert!(controller.change_icon(Some(icon_path.clone())));

            assert_eq!(
                controller.view().icon.borrow().as_ref().map(|icon| icon.path.clone()),
                Some(icon_path)
            );
            assert!(!controller.view().restart_requested.get());
            let reloaded = SettingsStore::new(root.join("settings.json")).load();
            assert_eq!(reloaded.icon_path(), "assets/earth.png");
        });
    }

    #[test]
    fn change_icon_to_unreadable_image_shows_error_dialog() {
        with_temp_root("controller-bad-icon", |root| {
            let mut controller = controller(root, TableSource::default(), "alice");
            controller.initialize().unwrap();
            let icon_path = root.join("assets").join("broken.png");
            fs::create_dir_all(icon_path.parent().unwrap()).unwrap();
            fs::write(&icon_path, b"nope").unwrap();

            assert!(!controller.change_icon(Some(icon_path)));

            let errors = controller.view().errors.borrow();
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("Could not change icon"));
            assert!(!root.join("settings.json").exists());
        });
    }

    #[test]
    fn change_icon_to_svg_is_rejected_before_settings_are_saved() {
        with_temp_root("controller-svg-icon", |root| {
            let mut controller = controller(root, TableSource::default(), "alice");
            controller.initialize().unwrap();
            let previous = root.join("assets").join("earth.png");
            write_png(&previous);
            assert!(controller.change_icon(Some(previous.clone())));

            let svg = root.join("assets").join("logo.svg");
            fs::write(
                &svg,
                br#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"/>"#,
            )
            .unwrap();

            assert!(!controller.change_icon(Some(svg)));

            assert!(controller.view().errors.borrow()[0].starts_with("Could not change icon"));
            assert_eq!(controller.settings().icon_path(), "assets/earth.png");
            let reloaded = SettingsStore::new(root.join("settings.json")).load();
            assert_eq!(reloaded.icon_path(), "assets/earth.png");
            assert_eq!(
                controller.view().icon.borrow().as_ref().map(|icon| icon.path.clone()),
                Some(previous)
            );
        });
    }

    #[test]
    fn settings_write_failure_blocks_restart_and_is_shown() {
        with_temp_root("controller-settings-failure", |root| {
            fs::create_dir_all(root.join("settings.json")).unwrap();
            let mut controller = controller(root, TableSource::default(), "alice");
            controller.initialize().unwrap();

            assert!(!controller.select_new_shortcut_source(Some(root.join("inputs/x.xlsx"))));

            assert!(!controller.view().restart_requested.get());
            assert_eq!(controller.state(), AppState::Visible);
            assert!(controller.view().errors.borrow()[0].starts_with("Could not save settings"));
            assert_eq!(
                controller.settings().shortcut_source_path(),
                crate::storage::DEFAULT_SHORTCUT_SOURCE_PATH
            );
        });
    }

    #[test]
    fn pickers_are_scoped_to_fixed_subdirectories() {
        let controller = LauncherController::new(
            RecordingView::default(),
            AppPaths::new("/opt/launcher"),
            Settings::default(),
            "alice",
        );

        let source = controller.shortcut_source_picker();
        assert_eq!(source.directory, PathBuf::from("/opt/launcher/inputs"));
        assert_eq!(source.filter, PickerFilter::Spreadsheets);

        let icon = controller.icon_picker();
        assert_eq!(icon.directory, PathBuf::from("/opt/launcher/assets"));
        assert_eq!(icon.filter, PickerFilter::Images);
        assert_eq!(controller.state(), AppState::SettingsLoaded);
    }
}
