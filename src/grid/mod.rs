//! Grid renderer
//!
//! [`Grid`] owns a drawing surface and a fixed [`CellGeometry`] and draws
//! cells addressed by grid coordinates:
//!
//! - **draw_cell / draw_line / draw_row**: cell borders
//! - **write_content / clear_cell**: cell interiors
//! - **with_color** and the `*_colored_*` variants: see [`session`]
//!
//! Every operation validates its arguments before the first write, so a
//! rejected call leaves the surface untouched.

pub mod session;

use tracing::trace;
use unicode_width::UnicodeWidthChar;

use crate::core::color::Palette;
use crate::core::error::DrawError;
use crate::core::geometry::{CellFrame, CellGeometry};
use crate::ui::Surface;

pub use session::PaletteState;

/// Blank used by [`Grid::clear_cell`]
const BLANK: char = ' ';

/// Grid renderer over a surface
pub struct Grid<S: Surface> {
    surface: S,
    geometry: CellGeometry,
    palette: Palette,
    palette_state: PaletteState,
}

impl<S: Surface> Grid<S> {
    pub fn new(surface: S, geometry: CellGeometry) -> Self {
        Self::with_palette(surface, geometry, Palette::default())
    }

    pub fn with_palette(surface: S, geometry: CellGeometry, palette: Palette) -> Self {
        Self {
            surface,
            geometry,
            palette,
            palette_state: PaletteState::Uninitialized,
        }
    }

    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Flush queued output
    pub fn refresh(&mut self) -> Result<(), DrawError> {
        self.surface.refresh().map_err(DrawError::Surface)
    }

    /// Draw the border of cell (x, y). The interior is left untouched.
    pub fn draw_cell(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        let frame = self.geometry.frame(x, y)?;
        trace!(x, y, row = frame.top, col = frame.left, "draw cell");
        self.paint_border(&frame)
    }

    fn paint_border(&mut self, frame: &CellFrame) -> Result<(), DrawError> {
        let glyphs = self.geometry.glyphs();
        let surface = &mut self.surface;

        // Corners
        put_glyph(surface, frame.top, frame.left, glyphs.corner)?;
        put_glyph(surface, frame.top, frame.right, glyphs.corner)?;
        put_glyph(surface, frame.bottom, frame.left, glyphs.corner)?;
        put_glyph(surface, frame.bottom, frame.right, glyphs.corner)?;

        // x-axis edges
        for col in frame.left + 1..frame.right {
            put_glyph(surface, frame.top, col, glyphs.horizontal)?;
            put_glyph(surface, frame.bottom, col, glyphs.horizontal)?;
        }

        // y-axis edges
        for row in frame.top + 1..frame.bottom {
            put_glyph(surface, row, frame.left, glyphs.vertical)?;
            put_glyph(surface, row, frame.right, glyphs.vertical)?;
        }
        Ok(())
    }

    /// Draw cells `start..length` along the x-axis on grid row `y`.
    ///
    /// `length` is an exclusive upper bound on x, not a count:
    /// `draw_line(2, 0, 5)` draws x = 2, 3, 4.
    pub fn draw_line(&mut self, start: i32, y: i32, length: i32) -> Result<(), DrawError> {
        let cells = self.line_cells(start, y, length)?;
        for x in cells {
            self.draw_cell(x, y)?;
        }
        Ok(())
    }

    /// Transpose of [`Grid::draw_line`]: cells `start..length` along the
    /// y-axis on grid column `x`.
    pub fn draw_row(&mut self, x: i32, start: i32, length: i32) -> Result<(), DrawError> {
        let cells = self.row_cells(x, start, length)?;
        for y in cells {
            self.draw_cell(x, y)?;
        }
        Ok(())
    }

    pub(crate) fn line_cells(&self, start: i32, y: i32, length: i32) -> Result<std::ops::Range<i32>, DrawError> {
        check_range(start, y, length)?;
        // The far end must be addressable before anything is drawn
        if length > start {
            self.geometry.frame(length - 1, y)?;
        }
        Ok(start..length)
    }

    pub(crate) fn row_cells(&self, x: i32, start: i32, length: i32) -> Result<std::ops::Range<i32>, DrawError> {
        check_range(start, x, length)?;
        if length > start {
            self.geometry.frame(x, length - 1)?;
        }
        Ok(start..length)
    }

    /// Write `text` into the interior of cell (x, y), row-major.
    ///
    /// Text longer than the cell is truncated; shorter text leaves the
    /// remaining interior positions as they were.
    pub fn write_content(&mut self, x: i32, y: i32, text: &str) -> Result<(), DrawError> {
        let frame = self.geometry.frame(x, y)?;
        let capacity = self.geometry.capacity();
        check_content(text, capacity)?;

        trace!(x, y, len = text.chars().count(), capacity, "write content");
        for (pos, ch) in frame.interior().zip(text.chars()) {
            put_glyph(&mut self.surface, pos.row, pos.col, ch)?;
        }
        Ok(())
    }

    /// Blank the interior of cell (x, y). The border is left untouched.
    pub fn clear_cell(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        let frame = self.geometry.frame(x, y)?;
        trace!(x, y, "clear cell");
        for pos in frame.interior() {
            put_glyph(&mut self.surface, pos.row, pos.col, BLANK)?;
        }
        Ok(())
    }
}

fn put_glyph<S: Surface>(surface: &mut S, row: u16, col: u16, ch: char) -> Result<(), DrawError> {
    surface.put_char(row, col, ch).map_err(DrawError::Surface)
}

fn check_range(start: i32, fixed: i32, length: i32) -> Result<(), DrawError> {
    if start < 0 || fixed < 0 || length < 0 {
        return Err(DrawError::InvalidRange {
            start,
            fixed,
            length,
        });
    }
    Ok(())
}

/// Only the characters that fit are checked; the rest are discarded unseen.
pub(super) fn check_content(text: &str, capacity: usize) -> Result<(), DrawError> {
    for (index, ch) in text.chars().take(capacity).enumerate() {
        if ch.width() != Some(1) {
            return Err(DrawError::InvalidContent { ch, index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Axis;
    use crate::core::geometry::{BorderGlyphs, TermPos};
    use crate::ui::recording::{Fault, RecordingSurface};

    fn grid(width: u16, height: u16) -> Grid<RecordingSurface> {
        let geometry = CellGeometry::new(width, height, BorderGlyphs::ASCII).unwrap();
        Grid::new(RecordingSurface::new(), geometry)
    }

    fn count(grid: &Grid<RecordingSurface>, ch: char) -> usize {
        grid.surface()
            .calls()
            .iter()
            .filter(|c| matches!(c, crate::ui::recording::Call::Put { text, .. } if text.starts_with(ch)))
            .count()
    }

    #[test]
    fn test_draw_cell_glyph_counts() {
        for (w, h) in [(2, 1), (1, 1), (4, 3)] {
            let mut g = grid(w, h);
            g.draw_cell(1, 1).unwrap();

            assert_eq!(count(&g, '+'), 4);
            assert_eq!(count(&g, '-'), 2 * w as usize);
            assert_eq!(count(&g, '|'), 2 * h as usize);
            assert_eq!(g.surface().write_count(), 4 + 2 * (w + h) as usize);

            let frame = g.geometry().frame(1, 1).unwrap();
            for pos in frame.interior() {
                assert_eq!(g.surface().char_at(pos.row, pos.col), None);
            }
        }
    }

    #[test]
    fn test_draw_cell_layout() {
        let mut g = grid(2, 1);
        g.draw_cell(0, 0).unwrap();
        assert_eq!(g.surface().render_text(), "+--+\n|  |\n+--+\n");
    }

    #[test]
    fn test_draw_cell_positions() {
        let mut g = grid(2, 1);
        g.draw_cell(1, 1).unwrap();
        // top-left at row 2, col 3; bottom-right at row 4, col 6
        let s = g.surface();
        assert_eq!(s.char_at(2, 3), Some('+'));
        assert_eq!(s.char_at(2, 6), Some('+'));
        assert_eq!(s.char_at(4, 3), Some('+'));
        assert_eq!(s.char_at(4, 6), Some('+'));
        assert_eq!(s.char_at(2, 4), Some('-'));
        assert_eq!(s.char_at(4, 5), Some('-'));
        assert_eq!(s.char_at(3, 3), Some('|'));
        assert_eq!(s.char_at(3, 6), Some('|'));
    }

    #[test]
    fn test_draw_cell_idempotent() {
        let mut g = grid(3, 2);
        g.draw_cell(2, 1).unwrap();
        let first = g.surface().screen().clone();
        g.draw_cell(2, 1).unwrap();
        assert_eq!(g.surface().screen(), &first);
    }

    #[test]
    fn test_negative_cell_writes_nothing() {
        let mut g = grid(2, 1);
        assert!(matches!(
            g.draw_cell(-1, 0),
            Err(DrawError::InvalidCoordinate { axis: Axis::X, value: -1 })
        ));
        assert!(matches!(
            g.draw_cell(0, -3),
            Err(DrawError::InvalidCoordinate { axis: Axis::Y, value: -3 })
        ));
        assert!(g.write_content(-1, -1, "ab").is_err());
        assert!(g.clear_cell(0, -1).is_err());
        assert_eq!(g.surface().write_count(), 0);
    }

    #[test]
    fn test_draw_line_exclusive_bound() {
        let mut g = grid(2, 1);
        g.draw_line(2, 0, 5).unwrap();

        let mut g_expected = grid(2, 1);
        for x in 2..5 {
            g_expected.draw_cell(x, 0).unwrap();
        }
        assert_eq!(g.surface().screen(), g_expected.surface().screen());
        assert_eq!(g.surface().write_count(), 3 * 10);
        // nothing at x = 0..2 or x = 5
        assert_eq!(g.surface().char_at(0, 0), None);
        assert_eq!(g.surface().char_at(0, 16), None);
    }

    #[test]
    fn test_draw_row_transposed() {
        let mut g = grid(2, 1);
        g.draw_row(1, 0, 3).unwrap();
        assert_eq!(
            g.surface().render_text(),
            "   +--+\n   |  |\n   +--+\n   |  |\n   +--+\n   |  |\n   +--+\n"
        );
    }

    #[test]
    fn test_empty_and_inverted_ranges() {
        let mut g = grid(2, 1);
        g.draw_line(3, 0, 3).unwrap();
        g.draw_line(4, 0, 1).unwrap();
        g.draw_row(0, 0, 0).unwrap();
        assert_eq!(g.surface().write_count(), 0);
    }

    #[test]
    fn test_negative_range_rejected() {
        let mut g = grid(2, 1);
        assert!(matches!(
            g.draw_line(-1, 0, 3),
            Err(DrawError::InvalidRange { start: -1, fixed: 0, length: 3 })
        ));
        assert!(matches!(g.draw_line(0, -1, 3), Err(DrawError::InvalidRange { .. })));
        assert!(matches!(g.draw_line(0, 0, -3), Err(DrawError::InvalidRange { .. })));
        assert!(matches!(g.draw_row(-2, 0, 3), Err(DrawError::InvalidRange { .. })));
        assert_eq!(g.surface().write_count(), 0);
    }

    #[test]
    fn test_unaddressable_line_rejected_up_front() {
        let mut g = grid(2, 1);
        assert!(g.draw_line(0, 0, 30_000).is_err());
        assert_eq!(g.surface().write_count(), 0);
    }

    #[test]
    fn test_line_stops_at_first_failure() {
        let mut g = grid(2, 1);
        // First cell takes 10 writes; fail during the second
        g.surface_mut().fail_on(Fault::Write { after: 13 });
        let result = g.draw_line(0, 0, 4);
        assert!(matches!(result, Err(DrawError::Surface(_))));
        assert_eq!(g.surface().write_count(), 13);
        // The third cell's far corner was never reached
        assert_eq!(g.surface().char_at(0, 9), None);
    }

    #[test]
    fn test_write_content_order() {
        let mut g = grid(2, 1);
        g.draw_cell(0, 0).unwrap();
        g.surface_mut().clear_calls();

        g.write_content(0, 0, "AB").unwrap();
        assert_eq!(g.surface().written_positions(), vec![(1, 1), (1, 2)]);
        assert_eq!(g.surface().render_text(), "+--+\n|AB|\n+--+\n");
    }

    #[test]
    fn test_write_content_row_major() {
        let mut g = grid(2, 2);
        g.write_content(0, 0, "abcd").unwrap();
        let s = g.surface();
        assert_eq!(s.char_at(1, 1), Some('a'));
        assert_eq!(s.char_at(1, 2), Some('b'));
        assert_eq!(s.char_at(2, 1), Some('c'));
        assert_eq!(s.char_at(2, 2), Some('d'));
    }

    #[test]
    fn test_write_content_truncates() {
        let mut g = grid(2, 1);
        g.write_content(1, 0, "HELLO").unwrap();
        assert_eq!(g.surface().write_count(), 2);
        assert_eq!(g.surface().char_at(1, 4), Some('H'));
        assert_eq!(g.surface().char_at(1, 5), Some('E'));
        assert_eq!(g.surface().char_at(1, 6), None);
    }

    #[test]
    fn test_write_content_short_keeps_stale() {
        let mut g = grid(3, 1);
        g.write_content(0, 0, "xyz").unwrap();
        g.write_content(0, 0, "a").unwrap();
        assert_eq!(g.surface().render_text(), "\n ayz\n");

        g.surface_mut().clear_calls();
        g.write_content(0, 0, "").unwrap();
        assert_eq!(g.surface().write_count(), 0);
        assert_eq!(g.surface().render_text(), "\n ayz\n");
    }

    #[test]
    fn test_write_content_never_touches_border() {
        let mut g = grid(2, 1);
        g.write_content(2, 3, "AB").unwrap();
        let frame = g.geometry().frame(2, 3).unwrap();
        for (row, col) in g.surface().written_positions() {
            assert!(!frame.on_border(TermPos { row, col }));
        }
    }

    #[test]
    fn test_invalid_content_rejected_before_writing() {
        let mut g = grid(2, 1);
        assert!(matches!(
            g.write_content(0, 0, "a\n"),
            Err(DrawError::InvalidContent { ch: '\n', index: 1 })
        ));
        assert!(matches!(
            g.write_content(0, 0, "日"),
            Err(DrawError::InvalidContent { index: 0, .. })
        ));
        assert_eq!(g.surface().write_count(), 0);

        // Characters past the capacity are discarded, not inspected
        g.write_content(0, 0, "ok\t").unwrap();
        assert_eq!(g.surface().write_count(), 2);
    }

    #[test]
    fn test_clear_cell_interior_only() {
        let mut g = grid(3, 2);
        g.draw_cell(1, 0).unwrap();
        g.write_content(1, 0, "abcdef").unwrap();
        g.surface_mut().clear_calls();

        g.clear_cell(1, 0).unwrap();
        let frame = g.geometry().frame(1, 0).unwrap();
        let written = g.surface().written_positions();
        assert_eq!(written.len(), 6);
        for (row, col) in written {
            assert!(!frame.on_border(TermPos { row, col }));
            assert_eq!(g.surface().char_at(row, col), Some(' '));
        }
        assert_eq!(g.surface().char_at(frame.top, frame.left), Some('+'));
    }
}
