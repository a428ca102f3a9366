//! Configuration loading for gridterm.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.gridterm/config.toml`
//! - Validation into a `CellGeometry` and a `Palette`
//!
//! # Configuration File
//!
//! ```toml
//! [cell]
//! width = 2
//! height = 1
//! corner = "+"
//! horizontal = "-"
//! vertical = "|"
//!
//! # Custom colors, each component 0..=1000
//! [palette]
//! orange = [1000, 500, 0]
//! pink = [1000, 411, 705]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::color::{Palette, Rgb1000, DEFAULT_ORANGE, DEFAULT_PINK};
use crate::core::error::GeometryError;
use crate::core::geometry::{BorderGlyphs, CellGeometry, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),

    #[error("Invalid color {name}: {value:?} (components must be 0..=1000)")]
    InvalidColor { name: &'static str, value: [u16; 3] },
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cell geometry
    pub cell: CellConfig,
    /// Custom palette colors
    pub palette: PaletteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell: CellConfig::default(),
            palette: PaletteConfig::default(),
        }
    }
}

/// Cell configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    pub width: u16,
    pub height: u16,
    pub corner: char,
    pub horizontal: char,
    pub vertical: char,
}

impl Default for CellConfig {
    fn default() -> Self {
        let glyphs = BorderGlyphs::ASCII;
        Self {
            width: DEFAULT_CELL_WIDTH,
            height: DEFAULT_CELL_HEIGHT,
            corner: glyphs.corner,
            horizontal: glyphs.horizontal,
            vertical: glyphs.vertical,
        }
    }
}

/// Palette configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub orange: [u16; 3],
    pub pink: [u16; 3],
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            orange: DEFAULT_ORANGE.components(),
            pink: DEFAULT_PINK.components(),
        }
    }
}

impl Config {
    /// Load configuration from `~/.gridterm/config.toml`, falling back to
    /// defaults when the file is missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::get_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                warn!(error = %e, "ignoring config file, using defaults");
                Self::default()
            }
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.geometry()?;
        config.palette()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn geometry(&self) -> Result<CellGeometry, ConfigError> {
        let glyphs = BorderGlyphs {
            corner: self.cell.corner,
            horizontal: self.cell.horizontal,
            vertical: self.cell.vertical,
        };
        Ok(CellGeometry::new(self.cell.width, self.cell.height, glyphs)?)
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            orange: rgb("orange", self.palette.orange)?,
            pink: rgb("pink", self.palette.pink)?,
        })
    }

    /// Get config file path
    pub fn get_config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".gridterm").join("config.toml"))
    }
}

fn rgb(name: &'static str, value: [u16; 3]) -> Result<Rgb1000, ConfigError> {
    let [r, g, b] = value;
    Rgb1000::new(r, g, b).ok_or(ConfigError::InvalidColor { name, value })
}

/// Get home directory
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
