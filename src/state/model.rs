/// Lifecycle of one launcher process.
///
/// `Restarting` is terminal: the next instance starts over at
/// `Uninitialized` in a fresh process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Uninitialized,
    SettingsLoaded,
    ShortcutsPopulated,
    Visible,
    Restarting,
}
