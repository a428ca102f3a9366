//! Cell geometry and grid-to-terminal coordinate mapping
//!
//! A grid cell is `width` x `height` interior characters surrounded by a
//! one-character border. Neighbouring cells share their border lines, so
//! cell `n` on an axis starts at terminal position `n * size + n`.
//!
//! ```text
//!   x=0   x=1
//! +--+--+        row 0
//! |AB|  |        row 1   (width 2, height 1)
//! +--+--+        row 2
//! ```

use super::error::{Axis, DrawError, GeometryError};

/// Default interior columns per cell
pub const DEFAULT_CELL_WIDTH: u16 = 2;
/// Default interior rows per cell
pub const DEFAULT_CELL_HEIGHT: u16 = 1;

/// Border glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub corner: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderGlyphs {
    pub const ASCII: Self = Self {
        corner: '+',
        horizontal: '-',
        vertical: '|',
    };
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self::ASCII
    }
}

/// Top-left terminal position of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermPos {
    pub row: u16,
    pub col: u16,
}

/// Terminal rectangle covered by one cell, border included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFrame {
    pub top: u16,
    pub left: u16,
    pub bottom: u16,
    pub right: u16,
}

impl CellFrame {
    pub fn origin(&self) -> TermPos {
        TermPos {
            row: self.top,
            col: self.left,
        }
    }

    /// Interior positions in row-major order
    pub fn interior(&self) -> impl Iterator<Item = TermPos> {
        let (top, left, bottom, right) = (self.top, self.left, self.bottom, self.right);
        (top + 1..bottom).flat_map(move |row| (left + 1..right).map(move |col| TermPos { row, col }))
    }

    /// Whether `pos` lies on the border ring
    pub fn on_border(&self, pos: TermPos) -> bool {
        let inside = pos.row >= self.top
            && pos.row <= self.bottom
            && pos.col >= self.left
            && pos.col <= self.right;
        inside
            && (pos.row == self.top
                || pos.row == self.bottom
                || pos.col == self.left
                || pos.col == self.right)
    }
}

/// Fixed cell dimensions and border glyphs, built once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    width: u16,
    height: u16,
    glyphs: BorderGlyphs,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_CELL_WIDTH,
            height: DEFAULT_CELL_HEIGHT,
            glyphs: BorderGlyphs::ASCII,
        }
    }
}

impl CellGeometry {
    pub fn new(width: u16, height: u16, glyphs: BorderGlyphs) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError { width, height });
        }
        Ok(Self {
            width,
            height,
            glyphs,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn glyphs(&self) -> BorderGlyphs {
        self.glyphs
    }

    /// Interior capacity of a cell in characters
    pub fn capacity(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub fn to_terminal_row(&self, y: i32) -> Result<u16, DrawError> {
        grid_to_terminal(Axis::Y, y, self.height)
    }

    pub fn to_terminal_col(&self, x: i32) -> Result<u16, DrawError> {
        grid_to_terminal(Axis::X, x, self.width)
    }

    pub fn to_terminal(&self, x: i32, y: i32) -> Result<TermPos, DrawError> {
        let col = self.to_terminal_col(x)?;
        let row = self.to_terminal_row(y)?;
        Ok(TermPos { row, col })
    }

    /// Full footprint of cell (x, y). Fails if any part of it would fall
    /// outside the `u16` terminal address space.
    pub fn frame(&self, x: i32, y: i32) -> Result<CellFrame, DrawError> {
        let origin = self.to_terminal(x, y)?;
        let right = far_edge(origin.col, self.width)
            .ok_or(DrawError::InvalidCoordinate { axis: Axis::X, value: x })?;
        let bottom = far_edge(origin.row, self.height)
            .ok_or(DrawError::InvalidCoordinate { axis: Axis::Y, value: y })?;
        Ok(CellFrame {
            top: origin.row,
            left: origin.col,
            bottom,
            right,
        })
    }
}

fn grid_to_terminal(axis: Axis, n: i32, size: u16) -> Result<u16, DrawError> {
    if n < 0 {
        return Err(DrawError::InvalidCoordinate { axis, value: n });
    }
    if n == 0 {
        return Ok(0);
    }
    let wide = i64::from(n);
    let pos = wide * i64::from(size) + wide;
    u16::try_from(pos).map_err(|_| DrawError::InvalidCoordinate { axis, value: n })
}

fn far_edge(start: u16, size: u16) -> Option<u16> {
    let edge = u32::from(start) + u32::from(size) + 1;
    u16::try_from(edge).ok()
}
