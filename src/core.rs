//! Core listing logic for facad.
//!
//! This module contains the non-presentation pieces of a listing:
//! - [classify]: glyph resolution for one directory member.
//! - [fm]: directory scanning and the [Entry] record (see [scan_dir], [scan_targets]).
//! - [formatter]: listing order, hidden filtering and display width measurement.
//! - [vcs]: version-control status reports and entry decoration.
//! - [error]: the fatal error type.

pub mod classify;
pub mod error;
pub mod fm;
pub mod formatter;
pub mod vcs;

pub use classify::{Attributes, Classifier, Resolution, RuleSet, Stage};
pub use error::FacadError;
pub use fm::{Entry, resolve_dir, scan_dir, scan_targets};
pub use formatter::{Formatter, compare_entries, display_width, sanitize_name};
pub use vcs::{GitCli, StatusReport, StatusSource, decorate};
