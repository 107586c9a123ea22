use std::cell::{Cell, RefCell};
use std::ffi::OsString;
use std::rc::Rc;
use std::sync::Once;

use gtk4::prelude::*;
use gtk4::{Application, Button};

use crate::config::StartupConfig;
use crate::error::{AppError, AppResult};
use crate::launcher::LauncherController;
use crate::ui::{LAUNCHER_COLORS, LAYOUT_TOKENS};

mod bootstrap;
mod dialogs;
mod restart;
mod runtime_css;
mod toast;
mod view;

use self::bootstrap::bootstrap_app_runtime;
use self::dialogs::pick_file;
use self::restart::relaunch_current_process;
use self::runtime_css::install_runtime_css;
use self::view::GtkLauncherView;

const APP_ID: &str = "io.github.shortcut_launcher";

type SharedController = Rc<RefCell<LauncherController<GtkLauncherView>>>;

fn register_bundled_resources() -> AppResult<()> {
    static RESOURCES: Once = Once::new();
    let mut result = Ok(());
    RESOURCES.call_once(|| {
        result = gtk4::gio::resources_register_include!("launcher.gresource")
            .map_err(AppError::Resources);
    });
    result
}

// GTK only sees argv[0]; launcher flags such as --root are parsed by StartupConfig.
fn gtk_launch_args() -> Vec<OsString> {
    std::env::args_os().take(1).collect()
}

fn connect_controller_button<F>(button: &Button, controller: &SharedController, action: F)
where
    F: Fn(&SharedController) + 'static,
{
    let controller = controller.clone();
    button.connect_clicked(move |_| action(&controller));
}

fn connect_launcher_controls(view: &GtkLauncherView, controller: &SharedController) {
    connect_controller_button(&view.controls.save_notes, controller, |controller| {
        controller.borrow().save_notes();
    });
    connect_controller_button(&view.controls.restart, controller, |controller| {
        controller.borrow_mut().restart();
    });

    let window = view.window.clone();
    connect_controller_button(&view.controls.select_source, controller, move |controller| {
        let request = controller.borrow().shortcut_source_picker();
        let controller = controller.clone();
        pick_file(&window, &request, move |choice| {
            controller.borrow_mut().select_new_shortcut_source(choice);
        });
    });

    let window = view.window.clone();
    connect_controller_button(&view.controls.change_icon, controller, move |controller| {
        let request = controller.borrow().icon_picker();
        let controller = controller.clone();
        pick_file(&window, &request, move |choice| {
            controller.borrow_mut().change_icon(choice);
        });
    });
}

pub struct App {
    config: StartupConfig,
}

impl App {
    pub fn new(config: StartupConfig) -> Self {
        Self { config }
    }

    pub fn start(&mut self) -> AppResult<()> {
        let bootstrap = bootstrap_app_runtime(&self.config);
        register_bundled_resources()?;

        tracing::info!("starting gtk runtime");
        let application = Application::new(Some(APP_ID), gtk4::gio::ApplicationFlags::NON_UNIQUE);

        let restart_requested = Rc::new(Cell::new(false));
        let startup_error = Rc::new(RefCell::new(None::<AppError>));
        let controller_slot = Rc::new(RefCell::new(None::<SharedController>));
        let activate_once = Rc::new(Cell::new(false));

        {
            let restart_requested = restart_requested.clone();
            let startup_error = startup_error.clone();
            let controller_slot = controller_slot.clone();
            application.connect_activate(move |app| {
                if activate_once.replace(true) {
                    tracing::debug!("ignoring duplicate gtk activate signal");
                    return;
                }
                install_runtime_css(LAYOUT_TOKENS, &LAUNCHER_COLORS);

                let view =
                    match GtkLauncherView::build(app, LAYOUT_TOKENS, restart_requested.clone()) {
                        Ok(view) => view,
                        Err(err) => {
                            tracing::error!(?err, "failed to build launcher window");
                            startup_error.borrow_mut().replace(err);
                            app.quit();
                            return;
                        }
                    };

                let controller = Rc::new(RefCell::new(LauncherController::from_disk(
                    view.clone(),
                    bootstrap.paths.clone(),
                    bootstrap.current_user.clone(),
                )));
                connect_launcher_controls(&view, &controller);

                let initialized = controller.borrow_mut().initialize();
                match initialized {
                    Ok(report) => {
                        tracing::info!(buttons = report.buttons(), "launcher ready");
                    }
                    Err(err) => {
                        tracing::error!(?err, "launcher initialization failed");
                        startup_error.borrow_mut().replace(err.into());
                        app.quit();
                    }
                }
                controller_slot.borrow_mut().replace(controller);
            });
        }

        let launch_args: Vec<String> = gtk_launch_args()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        application.run_with_args(&launch_args);

        if let Some(controller) = controller_slot.borrow_mut().take() {
            tracing::info!(state = ?controller.borrow().state(), "gtk runtime stopped");
        }
        if let Some(err) = startup_error.borrow_mut().take() {
            return Err(err);
        }
        if restart_requested.get() {
            relaunch_current_process().map_err(AppError::Relaunch)?;
        }
        Ok(())
    }
}
