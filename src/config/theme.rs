//! Theme configuration for facad.
//!
//! The `[theme]` table picks when color is emitted and which colors decorate the
//! branch name and status markers. A [Theme] resolves to a [Palette] once the
//! output stream is known.

use crate::utils::parse_color;

use crossterm::style::Color;
use serde::Deserialize;

/// When to emit color escapes.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// color = "auto"
/// branch = "green"
/// status = "#50fa7b"
/// modified = "yellow"
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    color: ColorMode,
    #[serde(deserialize_with = "deserialize_color_field")]
    branch: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    status: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    modified: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            color: ColorMode::Auto,
            branch: Color::Green,
            status: Color::Green,
            modified: Color::Yellow,
        }
    }
}

impl Theme {
    /// Resolves the theme for an output stream.
    pub fn palette(&self, is_tty: bool) -> Palette {
        Palette {
            enabled: self.color.enabled(is_tty),
            branch: self.branch,
            status: self.status,
            modified: self.modified,
        }
    }
}

/// Colors used while emitting a listing. With `enabled` unset nothing is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub enabled: bool,
    pub branch: Color,
    pub status: Color,
    pub modified: Color,
}

impl Palette {
    /// Undecorated output.
    pub fn plain() -> Self {
        Palette {
            enabled: false,
            ..Theme::default().palette(true)
        }
    }

    /// Color for a status code. Directories flagged for changed contents use
    /// the `modified` color.
    pub fn marker_color(&self, code: char) -> Color {
        if code == '*' {
            self.modified
        } else {
            self.status
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}

/// Helper function to deserialize a color field from a string.
fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
