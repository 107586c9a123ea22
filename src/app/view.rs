use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Box as GtkBox, Builder, Button, Image, Label, TextView};

use crate::error::{AppError, AppResult};
use crate::icon::WindowIcon;
use crate::launch::activate_shortcut;
use crate::launcher::LauncherView;
use crate::shortcuts::{Category, ShortcutRecord};
use crate::ui::{shortcut_button, StyleTokens};

use super::dialogs::show_error_dialog;
use super::toast::ToastLabel;

pub(super) const MAIN_VIEW_RESOURCE: &str = "/io/github/shortcut_launcher/main_view.ui";
const WINDOW_TITLE: &str = "Shortcut Launcher";

fn layout_object<T: IsA<gtk4::glib::Object>>(builder: &Builder, id: &'static str) -> AppResult<T> {
    builder
        .object::<T>(id)
        .ok_or(AppError::MissingLayoutObject { id })
}

/// Puts `icon_dir` first so the latest icon wins over same-named files
/// elsewhere, without letting the path list grow.
fn icon_search_path(icon_dir: &Path, current: Vec<PathBuf>) -> Vec<PathBuf> {
    std::iter::once(icon_dir.to_path_buf())
        .chain(current.into_iter().filter(|path| path != icon_dir))
        .collect()
}

#[derive(Clone)]
pub(super) struct CategoryContainers {
    apps: GtkBox,
    folders: GtkBox,
    editor_projects: GtkBox,
}

impl CategoryContainers {
    fn from_builder(builder: &Builder) -> AppResult<Self> {
        Ok(Self {
            apps: layout_object(builder, Category::App.container_id())?,
            folders: layout_object(builder, Category::Folder.container_id())?,
            editor_projects: layout_object(builder, Category::EditorProject.container_id())?,
        })
    }

    fn get(&self, category: Category) -> &GtkBox {
        match category {
            Category::App => &self.apps,
            Category::Folder => &self.folders,
            Category::EditorProject => &self.editor_projects,
        }
    }
}

/// Named controls the shell wires to controller operations.
#[derive(Clone)]
pub(super) struct LauncherControls {
    pub(super) save_notes: Button,
    pub(super) restart: Button,
    pub(super) select_source: Button,
    pub(super) change_icon: Button,
}

#[derive(Clone)]
pub(super) struct GtkLauncherView {
    app: Application,
    pub(super) window: ApplicationWindow,
    pub(super) controls: LauncherControls,
    header_icon: Image,
    containers: CategoryContainers,
    notes: TextView,
    toast: ToastLabel,
    style_tokens: StyleTokens,
    restart_requested: Rc<Cell<bool>>,
}

impl GtkLauncherView {
    pub(super) fn build(
        app: &Application,
        style_tokens: StyleTokens,
        restart_requested: Rc<Cell<bool>>,
    ) -> AppResult<Self> {
        let builder = Builder::from_resource(MAIN_VIEW_RESOURCE);
        let root: GtkBox = layout_object(&builder, "root")?;
        let toast_label: Label = layout_object(&builder, "toast_label")?;

        let window = ApplicationWindow::new(app);
        window.add_css_class("launcher-window");
        window.set_title(Some(WINDOW_TITLE));
        window.set_default_size(
            style_tokens.window_default_width,
            style_tokens.window_default_height,
        );
        window.set_child(Some(&root));

        Ok(Self {
            app: app.clone(),
            window,
            controls: LauncherControls {
                save_notes: layout_object(&builder, "btn_save_notes")?,
                restart: layout_object(&builder, "btn_restart")?,
                select_source: layout_object(&builder, "btn_select_buttons")?,
                change_icon: layout_object(&builder, "btn_change_icon")?,
            },
            header_icon: layout_object(&builder, "header_icon")?,
            containers: CategoryContainers::from_builder(&builder)?,
            notes: layout_object(&builder, "textbox_notes")?,
            toast: ToastLabel::new(&toast_label, style_tokens.toast_duration_ms),
            style_tokens,
            restart_requested,
        })
    }
}

impl LauncherView for GtkLauncherView {
    fn set_notes_text(&self, text: &str) {
        self.notes.buffer().set_text(text);
    }

    fn notes_text(&self) -> String {
        let buffer = self.notes.buffer();
        let (start, end) = buffer.bounds();
        buffer.text(&start, &end, false).to_string()
    }

    fn set_window_icon(&self, icon: &WindowIcon) {
        self.header_icon.set_from_file(Some(&icon.path));

        let (Some(dir), Some(icon_name)) = (icon.path.parent(), icon.icon_name()) else {
            return;
        };
        let Some(display) = gtk4::gdk::Display::default() else {
            tracing::warn!("no display available; window icon left unchanged");
            return;
        };
        let icon_theme = gtk4::IconTheme::for_display(&display);
        let search_path = icon_search_path(dir, icon_theme.search_path());
        icon_theme.set_search_path(&search_path.iter().map(PathBuf::as_path).collect::<Vec<_>>());
        self.window.set_icon_name(Some(icon_name));
    }

    fn add_shortcut_button(&self, record: &ShortcutRecord) {
        let button = shortcut_button(record, self.style_tokens);
        let record_for_click = record.clone();
        button.connect_clicked(move |_| activate_shortcut(&record_for_click));
        self.containers.get(record.category).append(&button);
        tracing::debug!(
            label = record.label.as_str(),
            container = record.category.container_id(),
            "added shortcut button"
        );
    }

    fn hide_placeholders(&self, category: Category, prefix: &str) -> usize {
        let container = self.containers.get(category);
        let mut hidden = 0;
        let mut child = container.first_child();
        while let Some(widget) = child {
            let is_placeholder = widget
                .buildable_id()
                .is_some_and(|id| id.starts_with(prefix));
            if is_placeholder {
                widget.set_visible(false);
                hidden += 1;
            }
            child = widget.next_sibling();
        }
        tracing::info!(
            container = category.container_id(),
            hidden,
            "hid placeholder controls"
        );
        hidden
    }

    fn present(&self) {
        self.window.present();
    }

    fn notify(&self, message: &str) {
        crate::notification::send(message);
    }

    fn show_toast(&self, message: &str) {
        self.toast.flash(message);
    }

    fn show_error(&self, title: &str, message: &str) {
        show_error_dialog(&self.window, self.style_tokens, title, message);
    }

    fn request_restart(&self) {
        self.restart_requested.set(true);
        self.app.quit();
    }
}
