//! Presentation for facad.
//!
//! - [icons]: glyph rule tables.
//! - [layout]: column grid planning.
//! - [render]: header and grid emission.

pub mod icons;
pub mod layout;
pub mod render;

pub use layout::{Cell, Grid, plan};
pub use render::render;
