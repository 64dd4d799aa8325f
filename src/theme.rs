//! Color themes and semantic style roles for the visualizer.
//!
//! A [`ColorScheme`] is a passive table mapping semantic roles (labels,
//! status colors, borders) to display styles. Renderers look styles up here
//! and contain no color decisions of their own.
//!
//! A process-wide default scheme can be installed with [`set_theme`]; it is
//! read once per render call and never mutated mid-render.

use std::env;
use std::sync::RwLock;

use clap::ValueEnum;
use colored::Colorize;

// === Palette ===

pub const BLUE_RGB: (u8, u8, u8) = (97, 134, 255);
pub const CYAN_RGB: (u8, u8, u8) = (86, 214, 222);
pub const GREEN_RGB: (u8, u8, u8) = (74, 222, 128);
pub const YELLOW_RGB: (u8, u8, u8) = (250, 204, 21);
pub const RED_RGB: (u8, u8, u8) = (242, 63, 93);
pub const MAGENTA_RGB: (u8, u8, u8) = (228, 23, 127);
pub const SNOW_RGB: (u8, u8, u8) = (247, 248, 250);
pub const SILVER_RGB: (u8, u8, u8) = (201, 205, 212);
pub const SLATE_RGB: (u8, u8, u8) = (110, 118, 129);

// Light-background variants.
pub const DEEP_BLUE_RGB: (u8, u8, u8) = (32, 80, 170);
pub const DEEP_CYAN_RGB: (u8, u8, u8) = (14, 116, 144);
pub const DEEP_GREEN_RGB: (u8, u8, u8) = (22, 128, 61);
pub const DEEP_YELLOW_RGB: (u8, u8, u8) = (161, 98, 7);
pub const DEEP_RED_RGB: (u8, u8, u8) = (185, 28, 28);
pub const DEEP_MAGENTA_RGB: (u8, u8, u8) = (134, 25, 143);
pub const INK_RGB: (u8, u8, u8) = (24, 30, 37);

// === Styles ===

/// A single display style: truecolor RGB plus emphasis flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub rgb: (u8, u8, u8),
    pub bold: bool,
    pub italic: bool,
    pub dim: bool,
}

impl Style {
    #[must_use]
    pub const fn plain(rgb: (u8, u8, u8)) -> Self {
        Self {
            rgb,
            bold: false,
            italic: false,
            dim: false,
        }
    }

    #[must_use]
    pub const fn bold(rgb: (u8, u8, u8)) -> Self {
        Self {
            rgb,
            bold: true,
            italic: false,
            dim: false,
        }
    }

    #[must_use]
    pub const fn italic(rgb: (u8, u8, u8)) -> Self {
        Self {
            rgb,
            bold: false,
            italic: true,
            dim: false,
        }
    }

    #[must_use]
    pub const fn dim(rgb: (u8, u8, u8)) -> Self {
        Self {
            rgb,
            bold: false,
            italic: false,
            dim: true,
        }
    }

    /// Apply this style to `text`.
    ///
    /// Multi-line input is styled line by line so escape sequences never
    /// straddle the tree-guide prefixes inserted later.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        let styled: Vec<String> = text.split('\n').map(|line| self.paint_line(line)).collect();
        styled.join("\n")
    }

    fn paint_line(&self, line: &str) -> String {
        let (r, g, b) = self.rgb;
        let mut out = line.truecolor(r, g, b);
        if self.bold {
            out = out.bold();
        }
        if self.italic {
            out = out.italic();
        }
        if self.dim {
            out = out.dimmed();
        }
        out.to_string()
    }
}

// === Schemes ===

/// Semantic style table consumed by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub title: Style,
    pub role: Style,
    pub metadata_key: Style,
    pub content_label: Style,
    pub block_label: Style,
    pub text_label: Style,
    pub text_body: Style,
    pub json_body: Style,
    pub tool_use_label: Style,
    pub tool_name: Style,
    pub tool_id: Style,
    pub input_label: Style,
    pub tool_result_label: Style,
    pub success: Style,
    pub error: Style,
    pub output_label: Style,
    pub unknown_type: Style,
    pub tree_guide: Style,
    pub panel_border: Style,
    pub usage_border: Style,
    pub usage_header: Style,
    pub usage_metric: Style,
    pub usage_value: Style,
}

pub const DARK_SCHEME: ColorScheme = ColorScheme {
    title: Style::bold(BLUE_RGB),
    role: Style::italic(CYAN_RGB),
    metadata_key: Style::plain(SLATE_RGB),
    content_label: Style::bold(SNOW_RGB),
    block_label: Style::plain(SLATE_RGB),
    text_label: Style::plain(CYAN_RGB),
    text_body: Style::plain(SNOW_RGB),
    json_body: Style::plain(SILVER_RGB),
    tool_use_label: Style::plain(YELLOW_RGB),
    tool_name: Style::bold(YELLOW_RGB),
    tool_id: Style::plain(SLATE_RGB),
    input_label: Style::plain(GREEN_RGB),
    tool_result_label: Style::plain(YELLOW_RGB),
    success: Style::plain(GREEN_RGB),
    error: Style::plain(RED_RGB),
    output_label: Style::plain(CYAN_RGB),
    unknown_type: Style::plain(MAGENTA_RGB),
    tree_guide: Style::dim(SLATE_RGB),
    panel_border: Style::plain(BLUE_RGB),
    usage_border: Style::plain(MAGENTA_RGB),
    usage_header: Style::bold(MAGENTA_RGB),
    usage_metric: Style::plain(CYAN_RGB),
    usage_value: Style::plain(GREEN_RGB),
};

pub const LIGHT_SCHEME: ColorScheme = ColorScheme {
    title: Style::bold(DEEP_BLUE_RGB),
    role: Style::italic(DEEP_CYAN_RGB),
    metadata_key: Style::plain(INK_RGB),
    content_label: Style::bold(INK_RGB),
    block_label: Style::plain(INK_RGB),
    text_label: Style::plain(DEEP_CYAN_RGB),
    text_body: Style::plain(INK_RGB),
    json_body: Style::plain(INK_RGB),
    tool_use_label: Style::plain(DEEP_YELLOW_RGB),
    tool_name: Style::bold(DEEP_YELLOW_RGB),
    tool_id: Style::plain(INK_RGB),
    input_label: Style::plain(DEEP_GREEN_RGB),
    tool_result_label: Style::plain(DEEP_YELLOW_RGB),
    success: Style::plain(DEEP_GREEN_RGB),
    error: Style::plain(DEEP_RED_RGB),
    output_label: Style::plain(DEEP_CYAN_RGB),
    unknown_type: Style::plain(DEEP_MAGENTA_RGB),
    tree_guide: Style::dim(INK_RGB),
    panel_border: Style::plain(DEEP_BLUE_RGB),
    usage_border: Style::plain(DEEP_MAGENTA_RGB),
    usage_header: Style::bold(DEEP_MAGENTA_RGB),
    usage_metric: Style::plain(DEEP_CYAN_RGB),
    usage_value: Style::plain(DEEP_GREEN_RGB),
};

/// Brighter variant tuned for Jupyter and embedded terminal frontends.
pub const JUPYTER_SCHEME: ColorScheme = ColorScheme {
    title: Style::bold(CYAN_RGB),
    role: Style::italic(GREEN_RGB),
    metadata_key: Style::dim(SNOW_RGB),
    content_label: Style::bold(SNOW_RGB),
    block_label: Style::dim(SNOW_RGB),
    text_label: Style::plain(CYAN_RGB),
    text_body: Style::plain(SNOW_RGB),
    json_body: Style::plain(SILVER_RGB),
    tool_use_label: Style::plain(YELLOW_RGB),
    tool_name: Style::bold(YELLOW_RGB),
    tool_id: Style::dim(SNOW_RGB),
    input_label: Style::plain(GREEN_RGB),
    tool_result_label: Style::plain(YELLOW_RGB),
    success: Style::plain(GREEN_RGB),
    error: Style::plain(RED_RGB),
    output_label: Style::plain(CYAN_RGB),
    unknown_type: Style::plain(MAGENTA_RGB),
    tree_guide: Style::dim(SNOW_RGB),
    panel_border: Style::plain(CYAN_RGB),
    usage_border: Style::plain(MAGENTA_RGB),
    usage_header: Style::bold(MAGENTA_RGB),
    usage_metric: Style::plain(CYAN_RGB),
    usage_value: Style::plain(GREEN_RGB),
};

// === Selection ===

/// User-facing theme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    /// Detect the environment: Jupyter frontends get the brighter scheme,
    /// plain terminals the dark one.
    #[default]
    Auto,
    Dark,
    Light,
    #[value(alias = "jupyter-optimized")]
    Jupyter,
}

/// Resolve a theme selector to its style table.
#[must_use]
pub fn scheme_for(theme: Theme) -> ColorScheme {
    match theme {
        Theme::Dark => DARK_SCHEME,
        Theme::Light => LIGHT_SCHEME,
        Theme::Jupyter => JUPYTER_SCHEME,
        Theme::Auto => {
            if running_under_jupyter() {
                JUPYTER_SCHEME
            } else {
                DARK_SCHEME
            }
        }
    }
}

fn running_under_jupyter() -> bool {
    env::var_os("JPY_PARENT_PID").is_some() || env::var_os("JPY_SESSION_NAME").is_some()
}

// === Process-wide default ===

static CURRENT: RwLock<Option<ColorScheme>> = RwLock::new(None);

/// Install the process-wide default scheme.
pub fn set_theme(theme: Theme) {
    if let Ok(mut current) = CURRENT.write() {
        *current = Some(scheme_for(theme));
    }
}

/// The process-wide default scheme, resolving `Auto` when none was set.
#[must_use]
pub fn current_scheme() -> ColorScheme {
    CURRENT
        .read()
        .ok()
        .and_then(|current| *current)
        .unwrap_or_else(|| scheme_for(Theme::Auto))
}
