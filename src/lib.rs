//! gridterm - bordered cell grids on a character terminal
//!
//! gridterm maps a logical grid of fixed-size cells onto terminal rows and
//! columns and draws cell borders, per-cell color and truncated text.
//!
//! # Example
//!
//! ```
//! use gridterm::{CellGeometry, ColorPair, Grid, RecordingSurface};
//!
//! let mut grid = Grid::new(RecordingSurface::new(), CellGeometry::default());
//! grid.draw_line(0, 0, 2)?;
//! grid.write_content(1, 0, "ok")?;
//! grid.init_colors()?;
//! grid.draw_colored_cell(0, 1, ColorPair::Orange)?;
//!
//! assert_eq!(
//!     grid.surface().render_text(),
//!     "+--+--+\n|  |ok|\n+--+--+\n|  |\n+--+\n"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod grid;
pub mod ui;

pub use crate::config::Config;
pub use crate::core::color::{ColorPair, Palette, Rgb1000};
pub use crate::core::error::{ColorError, DrawError, Error};
pub use crate::core::geometry::{BorderGlyphs, CellGeometry};
pub use crate::grid::{Grid, PaletteState};
pub use crate::ui::{CrosstermSurface, RecordingSurface, Surface};
