//! Sorting, filtering and display measurement for listed entries.
//!
//! The [Formatter] holds the hidden-file preference from facad.toml and applies the
//! listing order defined by [compare_entries]. The width helpers measure text the way
//! a terminal draws it and are shared with the layout engine.

use crate::core::Entry;

use unicode_width::UnicodeWidthChar;

use std::borrow::Cow;
use std::cmp::Ordering;

/// Total order used for every listing.
///
/// Directories before files, hidden before visible within each group, then (files
/// only) extension, then name. Text comparisons ignore case.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| b.is_hidden().cmp(&a.is_hidden()))
        .then_with(|| {
            if a.is_dir() {
                Ordering::Equal
            } else {
                cmp_ignore_case(a.extension(), b.extension())
            }
        })
        .then_with(|| cmp_ignore_case(a.name(), b.name()))
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sorts and filters entries according to user preferences.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    show_hidden: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter { show_hidden: true }
    }
}

impl Formatter {
    pub fn new(show_hidden: bool) -> Self {
        Self { show_hidden }
    }

    pub fn sort_entries(&self, entries: &mut [Entry]) {
        entries.sort_by(compare_entries);
    }

    /// Drops hidden entries unless they are shown, then sorts.
    pub fn filter_entries(&self, entries: &mut Vec<Entry>) {
        if !self.show_hidden {
            entries.retain(|e| !e.is_hidden());
        }
        self.sort_entries(entries);
    }
}

/// Columns a single character occupies: 2 for wide and emoji, 0 for control, else 1.
#[inline]
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }
    match c.width() {
        Some(2) => 2,
        None => 0,
        Some(_) => 1,
    }
}

/// Display width of a string, summed per character.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Replaces control characters with `?` so a name can never break a line.
pub fn sanitize_name(name: &str) -> Cow<'_, str> {
    if name.chars().any(char::is_control) {
        Cow::Owned(
            name.chars()
                .map(|c| if c.is_control() { '?' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(name)
    }
}
