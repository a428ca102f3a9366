//! Color sessions and palette initialization
//!
//! A color session enables a pair, runs a drawing action and disables the
//! pair again whatever the action returned, so a failed colored draw never
//! leaves its color active for the next draw.
//!
//! ```text
//! init_colors()  → start color, define custom slots, define 9 pairs
//!     ↓
//! with_color(pair, op)
//!     attr_on(pair)   → ColorError, op not run
//!     op(grid)        → DrawError kept
//!     attr_off(pair)  → always attempted
//! ```

use tracing::{debug, warn};

use super::{check_content, Grid};
use crate::core::color::{ColorPair, PaletteStep};
use crate::core::error::{ColorError, DrawError, Error};
use crate::ui::Surface;

/// Palette registration status of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteState {
    Uninitialized,
    Ready,
    /// A previous `init_colors` failed part way; colored draws are refused
    Failed,
}

impl<S: Surface> Grid<S> {
    pub fn palette_state(&self) -> PaletteState {
        self.palette_state
    }

    /// Register the color pairs. Runs once: after a successful call,
    /// further calls return `Ok` without touching the surface. After a
    /// failed call the whole sequence is retried.
    pub fn init_colors(&mut self) -> Result<(), ColorError> {
        if self.palette_state == PaletteState::Ready {
            debug!("palette already initialized");
            return Ok(());
        }

        match self.register_palette() {
            Ok(()) => {
                self.palette_state = PaletteState::Ready;
                debug!(pairs = ColorPair::ALL.len(), "palette initialized");
                Ok(())
            }
            Err(e) => {
                self.palette_state = PaletteState::Failed;
                warn!(error = %e, "palette initialization failed");
                Err(e)
            }
        }
    }

    fn register_palette(&mut self) -> Result<(), ColorError> {
        self.surface.start_color().map_err(ColorError::StartColor)?;

        for step in self.palette.steps() {
            match step {
                PaletteStep::DefineColor { slot, rgb } => self
                    .surface
                    .init_color(slot, rgb)
                    .map_err(|source| ColorError::DefineColor { slot, source })?,
                PaletteStep::DefinePair { pair, fg, bg } => self
                    .surface
                    .init_pair(pair.id(), fg, bg)
                    .map_err(|source| ColorError::DefinePair { pair, source })?,
            }
        }
        Ok(())
    }

    /// Run `op` with `pair` enabled, disabling it afterwards even if `op`
    /// fails.
    pub fn with_color<F, R>(&mut self, pair: ColorPair, op: F) -> Result<R, Error>
    where
        F: FnOnce(&mut Self) -> Result<R, DrawError>,
    {
        if self.palette_state != PaletteState::Ready {
            return Err(ColorError::PaletteNotReady.into());
        }

        self.surface
            .attr_on(pair.id())
            .map_err(|source| ColorError::Enable { pair, source })?;
        debug!(%pair, "color on");

        let result = op(self);
        let off = self.surface.attr_off(pair.id());
        debug!(%pair, "color off");

        match (result, off) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(source)) => Err(ColorError::Disable { pair, source }.into()),
            (Err(e), Ok(())) => Err(e.into()),
            (Err(e), Err(source)) => {
                // The draw error is what the caller needs; the disable failure is only logged
                warn!(%pair, error = %source, "failed to disable color after failed draw");
                Err(e.into())
            }
        }
    }

    pub fn draw_colored_cell(&mut self, x: i32, y: i32, pair: ColorPair) -> Result<(), Error> {
        self.geometry.frame(x, y)?;
        self.with_color(pair, |grid| grid.draw_cell(x, y))
    }

    pub fn draw_colored_line(&mut self, start: i32, y: i32, length: i32, pair: ColorPair) -> Result<(), Error> {
        self.line_cells(start, y, length)?;
        self.with_color(pair, |grid| grid.draw_line(start, y, length))
    }

    pub fn draw_colored_row(&mut self, x: i32, start: i32, length: i32, pair: ColorPair) -> Result<(), Error> {
        self.row_cells(x, start, length)?;
        self.with_color(pair, |grid| grid.draw_row(x, start, length))
    }

    pub fn write_colored_content(&mut self, x: i32, y: i32, text: &str, pair: ColorPair) -> Result<(), Error> {
        self.geometry.frame(x, y)?;
        check_content(text, self.geometry.capacity())?;
        self.with_color(pair, |grid| grid.write_content(x, y, text))
    }
}
