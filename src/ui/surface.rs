//! Drawing surface abstraction
//!
//! The grid never talks to a terminal directly. Everything it needs from
//! the terminal driver goes through [`Surface`], so the same drawing code
//! runs against crossterm or against an in-memory recorder.

use std::io;

use crate::core::color::Rgb1000;

/// Terminal driver capabilities used by the grid
pub trait Surface {
    /// Write `text` starting at an absolute screen position
    fn put_str(&mut self, row: u16, col: u16, text: &str) -> io::Result<()>;

    /// Write a single character at an absolute screen position
    fn put_char(&mut self, row: u16, col: u16, ch: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.put_str(row, col, ch.encode_utf8(&mut buf))
    }

    /// Enable the color subsystem
    fn start_color(&mut self) -> io::Result<()>;

    /// Redefine a color slot from RGB
    fn init_color(&mut self, slot: u16, rgb: Rgb1000) -> io::Result<()>;

    /// Bind a pair id to foreground and background slots
    fn init_pair(&mut self, pair: u8, fg: u16, bg: u16) -> io::Result<()>;

    /// Make a pair the active rendering attribute
    fn attr_on(&mut self, pair: u8) -> io::Result<()>;

    /// Drop a pair from the active rendering attributes
    fn attr_off(&mut self, pair: u8) -> io::Result<()>;

    /// Push queued output to the screen
    fn refresh(&mut self) -> io::Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn put_str(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        (**self).put_str(row, col, text)
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char) -> io::Result<()> {
        (**self).put_char(row, col, ch)
    }

    fn start_color(&mut self) -> io::Result<()> {
        (**self).start_color()
    }

    fn init_color(&mut self, slot: u16, rgb: Rgb1000) -> io::Result<()> {
        (**self).init_color(slot, rgb)
    }

    fn init_pair(&mut self, pair: u8, fg: u16, bg: u16) -> io::Result<()> {
        (**self).init_pair(pair, fg, bg)
    }

    fn attr_on(&mut self, pair: u8) -> io::Result<()> {
        (**self).attr_on(pair)
    }

    fn attr_off(&mut self, pair: u8) -> io::Result<()> {
        (**self).attr_off(pair)
    }

    fn refresh(&mut self) -> io::Result<()> {
        (**self).refresh()
    }
}
