//! Miscellaneous utility functions for facad.
//!
//! - [cli]: argument parsing, help and version output.
//! - [helpers]: color parsing, home lookup, glob detection.
//! - [logging]: the `tracing` subscriber setup.

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{get_home, is_glob_pattern, parse_color};
pub use logging::init_logging;
