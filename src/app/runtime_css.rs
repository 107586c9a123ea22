use crate::ui::{ColorTokens, StyleTokens};
use gtk4::CssProvider;

fn runtime_css(tokens: StyleTokens, colors: &ColorTokens) -> String {
    format!(
        "
window.launcher-window {{
  background: {window_background};
  color: {text_color};
}}
.launcher-root label {{
  color: {text_color};
}}
.launcher-title {{
  font-weight: bold;
}}
.launcher-panel {{
  border-radius: {panel_radius}px;
  border: {border_width}px solid {panel_border};
  padding: {spacing_8}px;
}}
.launcher-panel > box {{
  padding: {spacing_4}px;
}}
button.shortcut-button {{
  border-radius: {control_radius}px;
  padding: {spacing_4}px {spacing_8}px;
}}
button.shortcut-button image {{
  -gtk-icon-size: {icon_size}px;
}}
.launcher-notes {{
  border-radius: {control_radius}px;
  padding: {spacing_8}px;
}}
.toast-badge {{
  border-radius: {control_radius}px;
  background: {toast_background};
  padding: {spacing_4}px {spacing_12}px;
}}
.launcher-dialog label {{
  margin-bottom: {spacing_16}px;
}}
",
        window_background = colors.window_background,
        text_color = colors.text_color,
        panel_border = colors.panel_border,
        toast_background = colors.toast_background,
        panel_radius = tokens.panel_radius,
        control_radius = tokens.control_radius,
        border_width = tokens.border_width,
        icon_size = tokens.icon_size,
        spacing_4 = tokens.spacing_4,
        spacing_8 = tokens.spacing_8,
        spacing_12 = tokens.spacing_12,
        spacing_16 = tokens.spacing_16,
    )
}

pub(super) fn install_runtime_css(tokens: StyleTokens, colors: &ColorTokens) {
    let css = runtime_css(tokens, colors);
    let provider = CssProvider::new();
    provider.load_from_data(&css);
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        tracing::warn!("no display available; runtime css not installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{LAUNCHER_COLORS, LAYOUT_TOKENS};

    #[test]
    fn runtime_css_paints_window_background_from_palette() {
        let css = runtime_css(LAYOUT_TOKENS, &LAUNCHER_COLORS);
        assert!(css.contains("window.launcher-window {\n  background: lightblue;"));
    }

    #[test]
    fn runtime_css_expands_every_placeholder() {
        let css = runtime_css(LAYOUT_TOKENS, &LAUNCHER_COLORS);
        assert!(css.contains("border-radius: 10px;"));
        assert!(css.contains("-gtk-icon-size: 16px;"));
        assert_eq!(css.matches('{').count(), css.matches('}').count());
    }
}
