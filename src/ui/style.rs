/// Compile-time layout tokens; not user-overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTokens {
    pub spacing_4: i32,
    pub spacing_8: i32,
    pub spacing_12: i32,
    pub spacing_16: i32,
    pub panel_radius: u16,
    pub control_radius: u16,
    pub icon_size: i32,
    pub border_width: u16,
    pub window_default_width: i32,
    pub window_default_height: i32,
    pub toast_duration_ms: u32,
}

pub const LAYOUT_TOKENS: StyleTokens = StyleTokens {
    spacing_4: 4,
    spacing_8: 8,
    spacing_12: 12,
    spacing_16: 16,
    panel_radius: 10,
    control_radius: 6,
    icon_size: 16,
    border_width: 1,
    window_default_width: 520,
    window_default_height: 420,
    toast_duration_ms: 2_000,
};

/// Window palette; buttons keep the desktop theme's own styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTokens {
    pub window_background: &'static str,
    pub panel_border: &'static str,
    pub toast_background: &'static str,
    pub text_color: &'static str,
}

pub const LAUNCHER_COLORS: ColorTokens = ColorTokens {
    window_background: "lightblue",
    panel_border: "rgba(0, 0, 0, 0.18)",
    toast_background: "rgba(255, 255, 255, 0.92)",
    text_color: "#1b1f24",
};
