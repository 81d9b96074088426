//! The main config loading module for facad.
//!
//! Handles loading and deserializing settings from `facad.toml`.
//!
//! Provides the main [Config] struct, the internal [RawConfig] used for parsing, and
//! default config generation for `facad --init`.

use crate::config::{ColumnLimits, Display, General, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file.
/// Converted into the main [Config] struct after parsing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    general: General,
    display: Display,
    theme: Theme,
}

/// Main configuration struct for facad
#[derive(Debug, Clone, Default)]
pub struct Config {
    general: General,
    display: Display,
    theme: Theme,
    columns: ColumnLimits,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let columns = raw.display.column_limits();
        Self {
            general: raw.general,
            display: raw.display,
            theme: raw.theme,
            columns,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// A missing file silently yields the defaults; a malformed one is reported once.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), %e, "no config file, using defaults");
                return Self::default();
            }
        };

        match Self::parse(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("facad: error parsing config {}: {}", path.display(), e.message());
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn columns(&self) -> &ColumnLimits {
        &self.columns
    }

    /// Determine the default configuration file path.
    /// Checks the FACAD_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/facad/facad.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("FACAD_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("facad/facad.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/facad/facad.toml");
        }
        PathBuf::from("facad.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG)
    }
}

const DEFAULT_CONFIG: &str = r##"# facad.toml - default configuration for facad

# Note:
# Commented values are the internal defaults of facad
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[general]
show_hidden = true
# git = true

[display]
show_path = true
# max_columns = 4

# Per-directory column caps. /dev and /proc have built-in caps of 6 and 5.
# [display.columns]
# "/dev" = 6

[theme]
# "auto", "always" or "never"
color = "auto"
# branch = "green"
# status = "green"
# modified = "yellow"
"##;
