//! Error types for grid drawing and color handling

use std::fmt;
use std::io;
use thiserror::Error;

use super::color::ColorPair;

/// Grid axis, used to report which coordinate was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Errors raised by uncolored drawing operations
#[derive(Error, Debug)]
pub enum DrawError {
    /// Negative grid coordinate, or one that maps outside the terminal's address space
    #[error("Invalid grid coordinate: {axis} = {value}")]
    InvalidCoordinate { axis: Axis, value: i32 },

    #[error("Invalid range: start = {start}, fixed = {fixed}, length = {length}")]
    InvalidRange { start: i32, fixed: i32, length: i32 },

    /// Character that does not occupy exactly one terminal column
    #[error("Invalid content: {ch:?} at index {index} is not a single-column character")]
    InvalidContent { ch: char, index: usize },

    #[error("Failed to write to surface: {0}")]
    Surface(#[source] io::Error),
}

/// Errors raised while registering or toggling color pairs
#[derive(Error, Debug)]
pub enum ColorError {
    #[error("Failed to start color subsystem: {0}")]
    StartColor(#[source] io::Error),

    #[error("Failed to define color slot {slot}: {source}")]
    DefineColor {
        slot: u16,
        #[source]
        source: io::Error,
    },

    #[error("Failed to define color pair {pair}: {source}")]
    DefinePair {
        pair: ColorPair,
        #[source]
        source: io::Error,
    },

    #[error("Failed to enable color pair {pair}: {source}")]
    Enable {
        pair: ColorPair,
        #[source]
        source: io::Error,
    },

    #[error("Failed to disable color pair {pair}: {source}")]
    Disable {
        pair: ColorPair,
        #[source]
        source: io::Error,
    },

    #[error("Color palette is not initialized")]
    PaletteNotReady,
}

/// Outcome of a colored drawing operation
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Invalid cell dimensions
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid cell geometry {width}x{height}: both sides must be at least 1")]
pub struct GeometryError {
    pub width: u16,
    pub height: u16,
}

pub type Result<T> = std::result::Result<T, Error>;
