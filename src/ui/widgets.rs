use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, Image, Label, Orientation};

use crate::shortcuts::ShortcutRecord;

use super::StyleTokens;

/// Button showing the category icon next to the record's label.
pub fn shortcut_button(record: &ShortcutRecord, style_tokens: StyleTokens) -> Button {
    let icon = Image::from_icon_name(record.category.icon_name());
    icon.set_pixel_size(style_tokens.icon_size);

    let label = Label::new(Some(&record.label));
    label.set_halign(Align::Start);
    label.set_xalign(0.0);
    label.set_ellipsize(gtk4::pango::EllipsizeMode::End);

    let content = GtkBox::new(Orientation::Horizontal, style_tokens.spacing_8);
    content.append(&icon);
    content.append(&label);

    let button = Button::new();
    button.set_child(Some(&content));
    button.set_focus_on_click(false);
    button.set_tooltip_text(Some(&record.target_path));
    button.add_css_class("shortcut-button");
    button
}
