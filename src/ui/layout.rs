//! Column grid planning.
//!
//! [plan] turns sorted entries into a [Grid]: how many columns fit the terminal, how
//! wide each column is, and which cell sits where. Cells are filled column-major
//! (top to bottom, then left to right). The grid only measures; decoration happens in
//! the renderer so escape bytes never reach a width computation.

use crate::core::Entry;
use crate::core::formatter::{display_width, sanitize_name};

/// Spaces between two columns.
pub const COLUMN_GAP: usize = 2;
/// Width of a `(X)` status marker.
pub const MARKER_WIDTH: usize = 3;

/// One entry prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub glyph: &'static str,
    pub name: String,
    pub marker: Option<char>,
    pub width: usize,
}

impl Cell {
    pub fn from_entry(entry: &Entry) -> Self {
        let name = sanitize_name(entry.name()).into_owned();
        let marker = entry.marker();
        let width = display_width(entry.glyph())
            + 1
            + display_width(&name)
            + if marker.is_some() { MARKER_WIDTH } else { 0 };
        Cell {
            glyph: entry.glyph(),
            name,
            marker,
            width,
        }
    }

    /// The cell as undecorated text.
    pub fn plain(&self) -> String {
        let mut out = format!("{} {}", self.glyph, self.name);
        if let Some(code) = self.marker {
            out.push('(');
            out.push(code);
            out.push(')');
        }
        out
    }
}

/// A planned listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: usize,
    col_widths: Vec<usize>,
}

/// Number of columns for `max_width`-wide cells in `term_width`, clamped to `[1, cap]`.
pub fn column_count(term_width: usize, max_width: usize, cap: usize) -> usize {
    let fit = (term_width + COLUMN_GAP) / (max_width + COLUMN_GAP);
    fit.clamp(1, cap.max(1))
}

/// Plans the grid for `entries` (already sorted) on a terminal `term_width` columns wide.
pub fn plan(entries: &[Entry], term_width: usize, max_columns: usize) -> Grid {
    if entries.is_empty() {
        return Grid::default();
    }

    let cells: Vec<Cell> = entries.iter().map(Cell::from_entry).collect();
    let max_width = cells.iter().map(|c| c.width).max().unwrap_or(0);
    let columns = column_count(term_width, max_width, max_columns);
    let rows = cells.len().div_ceil(columns);

    let col_widths = cells
        .chunks(rows)
        .map(|col| col.iter().map(|c| c.width).max().unwrap_or(0))
        .collect();

    Grid {
        cells,
        rows,
        col_widths,
    }
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Columns actually used. Can be fewer than the computed count when the last
    /// columns would be empty.
    pub fn columns(&self) -> usize {
        self.col_widths.len()
    }

    pub fn col_widths(&self) -> &[usize] {
        &self.col_widths
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.rows {
            return None;
        }
        self.cells.get(col * self.rows + row)
    }

    /// Cells of one row with the spaces that follow each. The last cell gets none.
    pub fn row(&self, row: usize) -> Vec<(&Cell, usize)> {
        let cells: Vec<(usize, &Cell)> = (0..self.columns())
            .filter_map(|col| self.cell(row, col).map(|cell| (col, cell)))
            .collect();
        let last = cells.len().saturating_sub(1);
        cells
            .into_iter()
            .enumerate()
            .map(|(i, (col, cell))| {
                let pad = if i == last {
                    0
                } else {
                    self.col_widths[col] + COLUMN_GAP - cell.width
                };
                (cell, pad)
            })
            .collect()
    }

    /// The grid as plain text lines.
    pub fn lines(&self) -> Vec<String> {
        (0..self.rows)
            .map(|r| {
                let mut line = String::new();
                for (cell, pad) in self.row(r) {
                    line.push_str(&cell.plain());
                    line.extend(std::iter::repeat_n(' ', pad));
                }
                line
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::icons;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // Folder glyph (2) + space (1) leaves 9 columns for the name.
    fn twelve_wide(name: &str) -> Entry {
        assert_eq!(name.len(), 9);
        Entry::dir(name, icons::FOLDER)
    }

    #[test]
    fn entry_width_counts_glyph_space_name_and_marker() {
        let mut e = Entry::file("main.rs", "🦀");
        assert_eq!(Cell::from_entry(&e).width, 2 + 1 + 7);
        e.annotate('M');
        assert_eq!(Cell::from_entry(&e).width, 2 + 1 + 7 + 3);
        assert_eq!(Cell::from_entry(&e).plain(), "🦀 main.rs(M)");
    }

    #[test]
    fn narrow_terminal_gives_one_column() {
        let entries: Vec<Entry> = ["alpha_dir", "bravo_dir", "charl_dir", "delta_dir", "echoo_dir"]
            .into_iter()
            .map(twelve_wide)
            .collect();
        let grid = plan(&entries, 20, 4);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.rows(), 5);
        let lines = grid.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "📁 alpha_dir");
    }

    #[test]
    fn column_major_fill() {
        let entries: Vec<Entry> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|n| Entry::file(n, icons::TEXT))
            .collect();
        let grid = plan(&entries, 80, 2);
        assert_eq!((grid.rows(), grid.columns()), (3, 2));
        assert_eq!(grid.cell(0, 1).map(|c| c.name.as_str()), Some("d"));
        assert_eq!(grid.cell(2, 1), None);
        assert_eq!(grid.lines(), vec!["📝 a  📝 d", "📝 b  📝 e", "📝 c"]);
    }

    #[test]
    fn columns_pad_to_their_own_width() {
        let entries = vec![
            Entry::file("a", icons::TEXT),
            Entry::file("longer", icons::TEXT),
            Entry::file("b", icons::TEXT),
            Entry::file("c", icons::TEXT),
        ];
        let grid = plan(&entries, 80, 2);
        assert_eq!(grid.col_widths(), &[9, 4]);
        assert_eq!(grid.lines()[0], "📝 a       📝 b");
    }

    #[test]
    fn cap_limits_columns() {
        let entries: Vec<Entry> = (0..20).map(|i| Entry::file(format!("f{i}"), icons::TEXT)).collect();
        assert_eq!(plan(&entries, 200, 4).columns(), 4);
        assert_eq!(plan(&entries, 200, 5).columns(), 5);
    }

    #[test]
    fn zero_entries_give_empty_body() {
        let grid = plan(&[], 80, 4);
        assert!(grid.is_empty());
        assert!(grid.lines().is_empty());
    }

    #[test]
    fn oversized_entry_is_not_truncated() {
        let name = "x".repeat(50);
        let grid = plan(&[Entry::file(name.as_str(), icons::TEXT)], 10, 4);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.lines(), vec![format!("📝 {name}")]);
    }

    #[test]
    fn control_characters_do_not_break_lines() {
        let grid = plan(&[Entry::file("bad\nname", icons::TEXT)], 80, 4);
        assert_eq!(grid.lines(), vec!["📝 bad?name"]);
    }

    #[test]
    fn lines_never_exceed_width() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let n = rng.random_range(1..40);
            let entries: Vec<Entry> = (0..n)
                .map(|_| {
                    let len = rng.random_range(1..24);
                    let name: String = (0..len).map(|_| rng.random_range('a'..='z')).collect();
                    let mut e = Entry::file(name, icons::TEXT);
                    if rng.random_bool(0.2) {
                        e.annotate('M');
                    }
                    e
                })
                .collect();
            let width = rng.random_range(1..160);
            let cap = rng.random_range(1..8);
            let grid = plan(&entries, width, cap);

            assert!((1..=cap).contains(&grid.columns()));
            let widest = grid.col_widths().iter().copied().max().unwrap_or(0);
            for line in grid.lines() {
                let w = display_width(&line);
                assert!(w <= width || grid.columns() == 1 && w <= widest);
            }
        }
    }
}
