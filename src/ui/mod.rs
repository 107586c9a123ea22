pub mod style;
pub mod widgets;

pub use style::{ColorTokens, StyleTokens, LAUNCHER_COLORS, LAYOUT_TOKENS};
pub use widgets::shortcut_button;
