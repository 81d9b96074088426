//! Display configuration options for facad
//!
//! This module defines the `[display]` table of facad.toml and the per-directory
//! column caps derived from it.

use serde::Deserialize;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Column cap used when neither the config nor a built-in names the directory.
pub const DEFAULT_MAX_COLUMNS: usize = 4;

/// Directories whose members are short names and fit more columns.
const BUILTIN_COLUMNS: &[(&str, usize)] = &[("/dev", 6), ("/proc", 5)];

/// Display configuration options
///
/// ```toml
/// [display]
/// show_path = true
/// max_columns = 4
/// [display.columns]
/// "/dev" = 6
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Display {
    show_path: bool,
    max_columns: usize,
    columns: HashMap<String, usize>,
}

impl Default for Display {
    fn default() -> Self {
        Display {
            show_path: true,
            max_columns: DEFAULT_MAX_COLUMNS,
            columns: HashMap::new(),
        }
    }
}

impl Display {
    pub fn show_path(&self) -> bool {
        self.show_path
    }

    pub fn column_limits(&self) -> ColumnLimits {
        let mut limits = ColumnLimits::new(self.max_columns);
        for (dir, &cap) in &self.columns {
            limits.set(dir, cap);
        }
        limits
    }
}

/// Maximum column count per listed directory.
#[derive(Debug, Clone)]
pub struct ColumnLimits {
    default: usize,
    overrides: HashMap<PathBuf, usize>,
}

impl Default for ColumnLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COLUMNS)
    }
}

impl ColumnLimits {
    /// Built-in caps plus the given fallback. A zero fallback is treated as one column.
    pub fn new(default: usize) -> Self {
        let overrides = BUILTIN_COLUMNS
            .iter()
            .map(|&(dir, cap)| (PathBuf::from(dir), cap))
            .collect();
        ColumnLimits {
            default: default.max(1),
            overrides,
        }
    }

    /// Sets the cap for one directory, replacing any built-in.
    pub fn set(&mut self, dir: impl Into<PathBuf>, cap: usize) {
        self.overrides.insert(dir.into(), cap.max(1));
    }

    /// Cap for `path`, never less than one.
    pub fn max_columns(&self, path: &Path) -> usize {
        self.overrides.get(path).copied().unwrap_or(self.default)
    }
}
