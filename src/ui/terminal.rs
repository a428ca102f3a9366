//! Terminal surface using crossterm
//!
//! Crossterm has no notion of curses color slots or pairs, so this surface
//! keeps its own tables: slots 0..=7 start out as the ANSI colors, custom
//! slots become RGB colors, and enabling a pair emits its foreground and
//! background directly.

use std::collections::HashMap;
use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{self, Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, info};

use super::surface::Surface;
use crate::core::color::{slot, Rgb1000};

/// Number of colors a terminal must report for color pairs to work
const MIN_COLORS: u16 = 8;

fn ansi_slots() -> HashMap<u16, Color> {
    HashMap::from([
        (slot::BLACK, Color::Black),
        (slot::RED, Color::DarkRed),
        (slot::GREEN, Color::DarkGreen),
        (slot::YELLOW, Color::DarkYellow),
        (slot::BLUE, Color::DarkBlue),
        (slot::MAGENTA, Color::DarkMagenta),
        (slot::CYAN, Color::DarkCyan),
        (slot::WHITE, Color::Grey),
    ])
}

fn not_found(what: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, what)
}

/// Crossterm-backed surface
pub struct CrosstermSurface<W: Write = Stdout> {
    out: W,
    /// Whether raw mode and the alternate screen are active
    initialized: bool,
    color_started: bool,
    /// Skip the terminal color-count probe (used for non-tty writers)
    assume_color: bool,
    slots: HashMap<u16, Color>,
    pairs: HashMap<u8, (Color, Color)>,
    /// Enabled pairs, most recent last
    active: Vec<u8>,
}

impl CrosstermSurface<Stdout> {
    /// Surface on stdout. Call [`CrosstermSurface::init`] before drawing.
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout(), false)
    }
}

impl<W: Write> CrosstermSurface<W> {
    /// Surface over an arbitrary writer. With `assume_color` the color
    /// subsystem starts without probing the terminal.
    pub fn with_writer(out: W, assume_color: bool) -> Self {
        Self {
            out,
            initialized: false,
            color_started: false,
            assume_color,
            slots: ansi_slots(),
            pairs: HashMap::new(),
            active: Vec::new(),
        }
    }

    /// Enter raw mode and the alternate screen
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        self.initialized = true;
        info!("terminal surface initialized");
        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        // Reset attributes before leaving so nothing bleeds into the shell
        let _ = execute!(self.out, ResetColor, SetAttribute(Attribute::Reset));
        let _ = execute!(self.out, Show, EnableLineWrap, LeaveAlternateScreen);
        let _ = self.out.flush();

        terminal::disable_raw_mode()?;
        info!("terminal surface restored");
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn apply_pair(&mut self, pair: u8) -> io::Result<()> {
        let (fg, bg) = self.lookup_pair(pair)?;
        queue!(self.out, SetForegroundColor(fg), SetBackgroundColor(bg))
    }

    fn lookup_pair(&self, pair: u8) -> io::Result<(Color, Color)> {
        self.pairs
            .get(&pair)
            .copied()
            .ok_or_else(|| not_found(format!("color pair {} is not defined", pair)))
    }

    fn lookup_slot(&self, slot: u16) -> io::Result<Color> {
        self.slots
            .get(&slot)
            .copied()
            .ok_or_else(|| not_found(format!("color slot {} is not defined", slot)))
    }

    fn require_color(&self) -> io::Result<()> {
        if self.color_started {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "color subsystem not started",
            ))
        }
    }
}

impl<W: Write> Surface for CrosstermSurface<W> {
    fn put_str(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row), Print(text))
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row), Print(ch))
    }

    fn start_color(&mut self) -> io::Result<()> {
        if !self.assume_color {
            let colors = style::available_color_count();
            if colors < MIN_COLORS {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("terminal reports {} colors, need {}", colors, MIN_COLORS),
                ));
            }
        }
        self.color_started = true;
        debug!("color subsystem started");
        Ok(())
    }

    fn init_color(&mut self, slot: u16, rgb: Rgb1000) -> io::Result<()> {
        self.require_color()?;
        let (r, g, b) = rgb.to_rgb8();
        self.slots.insert(slot, Color::Rgb { r, g, b });
        Ok(())
    }

    fn init_pair(&mut self, pair: u8, fg: u16, bg: u16) -> io::Result<()> {
        self.require_color()?;
        if pair == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "color pair 0 is reserved",
            ));
        }
        let fg = self.lookup_slot(fg)?;
        let bg = self.lookup_slot(bg)?;
        self.pairs.insert(pair, (fg, bg));
        Ok(())
    }

    fn attr_on(&mut self, pair: u8) -> io::Result<()> {
        self.apply_pair(pair)?;
        self.active.push(pair);
        Ok(())
    }

    fn attr_off(&mut self, pair: u8) -> io::Result<()> {
        self.lookup_pair(pair)?;
        // Only the most recent enable is undone
        if let Some(index) = self.active.iter().rposition(|p| *p == pair) {
            self.active.remove(index);
        }
        match self.active.last().copied() {
            Some(previous) => self.apply_pair(previous),
            None => queue!(self.out, ResetColor),
        }
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for CrosstermSurface<W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::DEFAULT_ORANGE;

    fn surface() -> CrosstermSurface<Vec<u8>> {
        CrosstermSurface::with_writer(Vec::new(), true)
    }

    fn output(surface: &CrosstermSurface<Vec<u8>>) -> String {
        String::from_utf8_lossy(surface.writer()).into_owned()
    }

    #[test]
    fn test_positioned_write() {
        let mut s = surface();
        s.put_str(2, 4, "ab").unwrap();
        s.put_char(0, 0, '+').unwrap();
        assert_eq!(output(&s), "\x1b[3;5Hab\x1b[1;1H+");
    }

    #[test]
    fn test_pair_requires_color_start() {
        let mut s = surface();
        assert!(s.init_pair(1, slot::YELLOW, slot::BLACK).is_err());
        assert!(s.init_color(slot::ORANGE, DEFAULT_ORANGE).is_err());
        s.start_color().unwrap();
        assert!(s.init_pair(1, slot::YELLOW, slot::BLACK).is_ok());
        assert!(s.init_pair(0, slot::YELLOW, slot::BLACK).is_err());
    }

    #[test]
    fn test_custom_slot_must_be_defined_first() {
        let mut s = surface();
        s.start_color().unwrap();
        assert!(s.init_pair(6, slot::ORANGE, slot::BLACK).is_err());
        s.init_color(slot::ORANGE, DEFAULT_ORANGE).unwrap();
        s.init_pair(6, slot::ORANGE, slot::BLACK).unwrap();

        s.attr_on(6).unwrap();
        assert!(output(&s).contains("\x1b[38;2;255;127;0m"));
    }

    #[test]
    fn test_attr_off_restores_previous_pair() {
        let mut s = surface();
        s.start_color().unwrap();
        s.init_pair(1, slot::YELLOW, slot::BLACK).unwrap();
        s.init_pair(2, slot::BLUE, slot::BLACK).unwrap();

        s.attr_on(1).unwrap();
        s.attr_on(2).unwrap();
        s.attr_off(2).unwrap();
        assert_eq!(s.active, vec![1]);

        s.attr_off(1).unwrap();
        assert!(s.active.is_empty());
        assert!(output(&s).ends_with("\x1b[0m"));
    }

    #[test]
    fn test_nested_same_pair_stays_enabled() {
        let mut s = surface();
        s.start_color().unwrap();
        s.init_pair(5, slot::WHITE, slot::BLACK).unwrap();

        s.attr_on(5).unwrap();
        s.attr_on(5).unwrap();
        s.attr_off(5).unwrap();
        assert_eq!(s.active, vec![5]);

        s.attr_off(5).unwrap();
        assert!(s.active.is_empty());
        assert!(output(&s).ends_with("\x1b[0m"));
    }

    #[test]
    fn test_unknown_pair_rejected() {
        let mut s = surface();
        s.start_color().unwrap();
        assert!(s.attr_on(3).is_err());
        assert!(s.attr_off(3).is_err());
        assert!(output(&s).is_empty());
    }
}
