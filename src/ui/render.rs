//! Text emission for a planned listing.
//!
//! [render] produces the whole block written to stdout: an optional header with the
//! listed directory (and branch), then the grid. Colors and bold come from
//! `crossterm::style` and are only applied here, after every width is known.

use crate::config::Palette;
use crate::core::Entry;
use crate::ui::layout::{Cell, Grid, plan};

use crossterm::style::Stylize;

use std::fmt::Write;
use std::path::Path;

/// Renders `entries` (already sorted) as a column grid `term_width` wide.
///
/// The header is emitted when `show_path` is set. Zero entries produce the header
/// only.
pub fn render(
    entries: &[Entry],
    term_width: usize,
    current_dir: &Path,
    show_path: bool,
    branch: Option<&str>,
    palette: &Palette,
    max_columns: usize,
) -> String {
    let mut out = String::new();
    if show_path {
        push_header(&mut out, current_dir, branch, palette);
    }
    push_grid(&mut out, &plan(entries, term_width, max_columns), palette);
    out
}

fn push_header(out: &mut String, dir: &Path, branch: Option<&str>, palette: &Palette) {
    let dir = dir.display().to_string();
    if palette.enabled {
        let _ = write!(out, "{}", dir.as_str().bold());
    } else {
        out.push_str(&dir);
    }

    if let Some(branch) = branch {
        if palette.enabled {
            let _ = write!(out, " ({})", branch.with(palette.branch));
        } else {
            let _ = write!(out, " ({})", branch);
        }
    }
    out.push('\n');
}

fn push_cell(out: &mut String, cell: &Cell, palette: &Palette) {
    if !palette.enabled {
        out.push_str(&cell.plain());
        return;
    }
    let _ = write!(out, "{} {}", cell.glyph, cell.name);
    if let Some(code) = cell.marker {
        let _ = write!(out, "({})", code.with(palette.marker_color(code)));
    }
}

/// Appends the grid row by row. Each line ends with a newline.
pub fn push_grid(out: &mut String, grid: &Grid, palette: &Palette) {
    for r in 0..grid.rows() {
        for (cell, pad) in grid.row(r) {
            push_cell(out, cell, palette);
            out.extend(std::iter::repeat_n(' ', pad));
        }
        out.push('\n');
    }
}
