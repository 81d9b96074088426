//! Helpers for facad.
//!
//! Small utilities used throughout facad:
//! - Color parsing from strings or hex codes
//! - Home directory lookup for the config path
//! - Glob pattern detection for command line arguments

use crossterm::style::Color;
use std::path::PathBuf;

/// Parses a string (color name or hex) into a crossterm color.
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB).
/// Anything else resets to the terminal default.
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Grey,
        "darkgray" | "darkgrey" => Color::DarkGrey,
        _ => {
            if let Some(hex) = s.strip_prefix('#') {
                let expanded = match hex.len() {
                    6 => Some(hex.to_owned()),
                    3 => Some(hex.chars().flat_map(|c| [c, c]).collect()),
                    _ => None,
                };
                if let Some(rgb) = expanded.and_then(|h| u32::from_str_radix(&h, 16).ok()) {
                    return Color::Rgb {
                        r: ((rgb >> 16) & 0xFF) as u8,
                        g: ((rgb >> 8) & 0xFF) as u8,
                        b: (rgb & 0xFF) as u8,
                    };
                }
            }
            // fallback
            Color::Reset
        }
    }
}

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// True when the argument contains a glob metacharacter.
pub fn is_glob_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}
