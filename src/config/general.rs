//! The general configuration settings for facad.
//!
//! [General] is deserialized from the `[general]` table of facad.toml.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    git: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: true,
            git: true,
        }
    }
}

impl General {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// Whether version-control status is queried at all.
    #[inline]
    pub fn git(&self) -> bool {
        self.git
    }
}
