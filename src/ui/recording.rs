//! In-memory surface that records every driver call
//!
//! Used as the test double for grid drawing and by `gridterm --dump` to
//! print a grid as plain text.

use std::collections::{BTreeMap, HashMap};
use std::io;

use super::surface::Surface;
use crate::core::color::Rgb1000;

/// A driver call as seen by the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Put { row: u16, col: u16, text: String },
    StartColor,
    InitColor { slot: u16, rgb: Rgb1000 },
    InitPair { pair: u8, fg: u16, bg: u16 },
    AttrOn(u8),
    AttrOff(u8),
    Refresh,
}

/// Injected failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every write after the first `after` writes fails
    Write { after: usize },
    StartColor,
    InitColor(u16),
    InitPair(u8),
    AttrOn(u8),
    AttrOff(u8),
}

/// A character on the recorded screen and the pair active when it was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCell {
    pub ch: char,
    pub pair: Option<u8>,
}

/// Recording surface
#[derive(Debug, Default)]
pub struct RecordingSurface {
    screen: BTreeMap<(u16, u16), ScreenCell>,
    calls: Vec<Call>,
    faults: Vec<Fault>,
    color_started: bool,
    slots: HashMap<u16, Rgb1000>,
    pairs: BTreeMap<u8, (u16, u16)>,
    active: Vec<u8>,
    writes: usize,
}

fn injected(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("injected failure: {}", what))
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make matching calls fail from now on
    pub fn fail_on(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    pub fn clear_faults(&mut self) {
        self.faults.clear();
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of successful character writes
    pub fn write_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Put { .. }))
            .count()
    }

    /// Positions written, in call order, duplicates kept
    pub fn written_positions(&self) -> Vec<(u16, u16)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Put { row, col, .. } => Some((*row, *col)),
                _ => None,
            })
            .collect()
    }

    pub fn cell(&self, row: u16, col: u16) -> Option<ScreenCell> {
        self.screen.get(&(row, col)).copied()
    }

    pub fn char_at(&self, row: u16, col: u16) -> Option<char> {
        self.cell(row, col).map(|c| c.ch)
    }

    /// Snapshot of everything written so far
    pub fn screen(&self) -> &BTreeMap<(u16, u16), ScreenCell> {
        &self.screen
    }

    /// Pairs currently enabled, oldest first
    pub fn active_pairs(&self) -> &[u8] {
        &self.active
    }

    pub fn color_started(&self) -> bool {
        self.color_started
    }

    pub fn pair(&self, pair: u8) -> Option<(u16, u16)> {
        self.pairs.get(&pair).copied()
    }

    pub fn slot(&self, slot: u16) -> Option<Rgb1000> {
        self.slots.get(&slot).copied()
    }

    /// Render the recorded screen as text, unwritten positions as spaces
    pub fn render_text(&self) -> String {
        let Some(max_row) = self.screen.keys().map(|(r, _)| *r).max() else {
            return String::new();
        };
        let max_col = self.screen.keys().map(|(_, c)| *c).max().unwrap_or(0);

        let mut output = String::new();
        for row in 0..=max_row {
            let mut line: String = (0..=max_col)
                .map(|col| self.char_at(row, col).unwrap_or(' '))
                .collect();
            line.truncate(line.trim_end().len());
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    fn has_fault(&self, fault: Fault) -> bool {
        self.faults.contains(&fault)
    }

    fn write_fails(&self) -> bool {
        self.faults
            .iter()
            .any(|f| matches!(f, Fault::Write { after } if self.writes >= *after))
    }
}

impl Surface for RecordingSurface {
    fn put_str(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        if self.write_fails() {
            return Err(injected("write"));
        }
        self.writes += 1;
        let pair = self.active.last().copied();
        for (offset, ch) in text.chars().enumerate() {
            // Text running past the last column is dropped
            let Some(col) = u16::try_from(offset).ok().and_then(|o| col.checked_add(o)) else {
                break;
            };
            self.screen.insert((row, col), ScreenCell { ch, pair });
        }
        self.calls.push(Call::Put {
            row,
            col,
            text: text.to_string(),
        });
        Ok(())
    }

    fn start_color(&mut self) -> io::Result<()> {
        if self.has_fault(Fault::StartColor) {
            return Err(injected("start_color"));
        }
        self.color_started = true;
        self.calls.push(Call::StartColor);
        Ok(())
    }

    fn init_color(&mut self, slot: u16, rgb: Rgb1000) -> io::Result<()> {
        if self.has_fault(Fault::InitColor(slot)) {
            return Err(injected("init_color"));
        }
        if !self.color_started {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "color subsystem not started",
            ));
        }
        self.slots.insert(slot, rgb);
        self.calls.push(Call::InitColor { slot, rgb });
        Ok(())
    }

    fn init_pair(&mut self, pair: u8, fg: u16, bg: u16) -> io::Result<()> {
        if self.has_fault(Fault::InitPair(pair)) {
            return Err(injected("init_pair"));
        }
        if !self.color_started {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "color subsystem not started",
            ));
        }
        self.pairs.insert(pair, (fg, bg));
        self.calls.push(Call::InitPair { pair, fg, bg });
        Ok(())
    }

    fn attr_on(&mut self, pair: u8) -> io::Result<()> {
        if self.has_fault(Fault::AttrOn(pair)) {
            return Err(injected("attr_on"));
        }
        if !self.pairs.contains_key(&pair) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("color pair {} is not defined", pair),
            ));
        }
        self.active.push(pair);
        self.calls.push(Call::AttrOn(pair));
        Ok(())
    }

    fn attr_off(&mut self, pair: u8) -> io::Result<()> {
        if self.has_fault(Fault::AttrOff(pair)) {
            return Err(injected("attr_off"));
        }
        if !self.pairs.contains_key(&pair) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("color pair {} is not defined", pair),
            ));
        }
        // Only the most recent enable is undone
        if let Some(index) = self.active.iter().rposition(|p| *p == pair) {
            self.active.remove(index);
        }
        self.calls.push(Call::AttrOff(pair));
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.calls.push(Call::Refresh);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_writes() {
        let mut surface = RecordingSurface::new();
        surface.put_str(1, 2, "ab").unwrap();
        surface.put_char(0, 0, '+').unwrap();

        assert_eq!(surface.char_at(1, 2), Some('a'));
        assert_eq!(surface.char_at(1, 3), Some('b'));
        assert_eq!(surface.write_count(), 2);
        assert_eq!(surface.render_text(), "+\n  ab\n");
    }

    #[test]
    fn test_write_fault_after_n() {
        let mut surface = RecordingSurface::new();
        surface.fail_on(Fault::Write { after: 1 });
        assert!(surface.put_char(0, 0, 'a').is_ok());
        assert!(surface.put_char(0, 1, 'b').is_err());
        assert_eq!(surface.char_at(0, 1), None);
    }

    #[test]
    fn test_attributes_require_defined_pair() {
        let mut surface = RecordingSurface::new();
        assert!(surface.attr_on(1).is_err());
        assert!(surface.init_pair(1, 3, 0).is_err());

        surface.start_color().unwrap();
        surface.init_pair(1, 3, 0).unwrap();
        surface.attr_on(1).unwrap();
        surface.put_char(0, 0, 'x').unwrap();
        surface.attr_off(1).unwrap();

        assert_eq!(surface.cell(0, 0).unwrap().pair, Some(1));
        assert!(surface.active_pairs().is_empty());
    }

    #[test]
    fn test_write_past_last_column_dropped() {
        let mut surface = RecordingSurface::new();
        surface.put_str(0, u16::MAX - 1, "abc").unwrap();
        assert_eq!(surface.char_at(0, u16::MAX - 1), Some('a'));
        assert_eq!(surface.char_at(0, u16::MAX), Some('b'));
        assert_eq!(surface.screen().len(), 2);
    }

    #[test]
    fn test_nested_same_pair() {
        let mut surface = RecordingSurface::new();
        surface.start_color().unwrap();
        surface.init_pair(5, 7, 0).unwrap();
        surface.attr_on(5).unwrap();
        surface.attr_on(5).unwrap();
        surface.attr_off(5).unwrap();
        assert_eq!(surface.active_pairs(), &[5]);
    }

    #[test]
    fn test_empty_render() {
        assert_eq!(RecordingSurface::new().render_text(), "");
    }
}
