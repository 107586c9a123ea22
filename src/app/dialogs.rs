use std::cell::RefCell;
use std::path::PathBuf;

use gtk4::prelude::*;
use gtk4::{
    gio, ApplicationWindow, Box as GtkBox, Dialog, FileChooserAction, FileChooserDialog,
    FileFilter, Label, Orientation, ResponseType,
};

use crate::launcher::{FilePickerRequest, PickerFilter};
use crate::ui::StyleTokens;

pub(super) fn show_error_dialog(
    parent: &ApplicationWindow,
    style_tokens: StyleTokens,
    title: &str,
    message: &str,
) {
    let dialog = Dialog::new();
    dialog.add_css_class("launcher-dialog");
    dialog.set_title(Some(title));
    dialog.set_transient_for(Some(parent));
    dialog.set_modal(true);
    dialog.set_destroy_with_parent(true);
    dialog.add_button("OK", ResponseType::Ok);
    dialog.set_default_response(ResponseType::Ok);

    let body = Label::new(Some(message));
    body.set_wrap(true);
    body.set_xalign(0.0);
    body.set_selectable(true);

    let dialog_content = GtkBox::new(Orientation::Vertical, 0);
    dialog_content.set_margin_top(style_tokens.spacing_12);
    dialog_content.set_margin_bottom(style_tokens.spacing_12);
    dialog_content.set_margin_start(style_tokens.spacing_12);
    dialog_content.set_margin_end(style_tokens.spacing_12);
    dialog_content.append(&body);
    dialog.content_area().append(&dialog_content);

    dialog.connect_response(|dialog, _| dialog.close());
    dialog.present();
}

fn file_filter(filter: PickerFilter) -> FileFilter {
    let file_filter = FileFilter::new();
    file_filter.set_name(Some(filter.label()));
    for pattern in filter.patterns() {
        file_filter.add_pattern(pattern);
    }
    file_filter
}

/// Opens a modal picker; `on_pick` receives `None` when the user cancels.
pub(super) fn pick_file<F>(parent: &ApplicationWindow, request: &FilePickerRequest, on_pick: F)
where
    F: FnOnce(Option<PathBuf>) + 'static,
{
    let dialog = FileChooserDialog::new(
        Some(request.title),
        Some(parent),
        FileChooserAction::Open,
        &[("Cancel", ResponseType::Cancel), ("Open", ResponseType::Accept)],
    );
    dialog.set_modal(true);

    if request.directory.is_dir() {
        let folder = gio::File::for_path(&request.directory);
        if let Err(err) = dialog.set_current_folder(Some(&folder)) {
            tracing::warn!(
                ?err,
                directory = %request.directory.display(),
                "failed to scope file picker"
            );
        }
    }
    let filter = file_filter(request.filter);
    dialog.add_filter(&filter);
    dialog.set_filter(&filter);

    let on_pick = RefCell::new(Some(on_pick));
    dialog.connect_response(move |dialog, response| {
        let choice = if response == ResponseType::Accept {
            dialog.file().and_then(|file| file.path())
        } else {
            None
        };
        dialog.close();
        if let Some(on_pick) = on_pick.borrow_mut().take() {
            on_pick(choice);
        }
    });
    dialog.present();
}
