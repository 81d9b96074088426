//! Configuration for facad.
//!
//! - [load]: locating, parsing and generating `facad.toml` ([Config]).
//! - [general]: `[general]` settings ([General]).
//! - [display]: `[display]` settings and per-directory column caps ([ColumnLimits]).
//! - [theme]: `[theme]` colors and when to use them ([Theme], [Palette]).

pub mod display;
pub mod general;
pub mod load;
pub mod theme;

pub use display::{ColumnLimits, DEFAULT_MAX_COLUMNS, Display};
pub use general::General;
pub use load::Config;
pub use theme::{ColorMode, Palette, Theme};
