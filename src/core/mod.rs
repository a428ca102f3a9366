//! Core grid model.
//!
//! This module contains the pieces with no terminal dependency:
//!
//! - **geometry**: cell dimensions, border glyphs and grid-to-terminal mapping
//! - **color**: color slots, the nine named pairs and the palette
//! - **error**: error types shared by drawing and color handling
//!
//! # Coordinates
//!
//! ```text
//! Grid (x, y)  ──CellGeometry──▶  Terminal (row, col)
//!   x * width  + x  → col
//!   y * height + y  → row
//! ```

pub mod color;
pub mod error;
pub mod geometry;
