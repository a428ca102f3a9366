//! Color slots, color pairs and the built-in palette
//!
//! Colors follow the curses model: a *slot* is a terminal color index
//! (0..=7 are the ANSI built-ins, higher slots can be redefined from RGB),
//! and a *pair* binds a foreground slot to a background slot under a small
//! integer id that drawing code enables and disables.

use std::fmt;

/// Terminal color slots
pub mod slot {
    pub const BLACK: u16 = 0;
    pub const RED: u16 = 1;
    pub const GREEN: u16 = 2;
    pub const YELLOW: u16 = 3;
    pub const BLUE: u16 = 4;
    pub const MAGENTA: u16 = 5;
    pub const CYAN: u16 = 6;
    pub const WHITE: u16 = 7;
    /// Custom slot redefined as orange
    pub const ORANGE: u16 = 60;
    /// Custom slot redefined as pink
    pub const PINK: u16 = 80;
}

/// Maximum value of an RGB component in curses units
pub const RGB_MAX: u16 = 1000;

/// Named color pairs registered by the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ColorPair {
    Yellow = 1,
    Blue = 2,
    Red = 3,
    Green = 4,
    White = 5,
    Orange = 6,
    Violet = 7,
    Pink = 8,
    Cyan = 9,
}

impl ColorPair {
    /// All pairs in registration order
    pub const ALL: [ColorPair; 9] = [
        ColorPair::Yellow,
        ColorPair::Blue,
        ColorPair::Red,
        ColorPair::Green,
        ColorPair::White,
        ColorPair::Orange,
        ColorPair::Violet,
        ColorPair::Pink,
        ColorPair::Cyan,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|pair| pair.id() == id)
    }

    pub fn foreground(self) -> u16 {
        match self {
            ColorPair::Yellow => slot::YELLOW,
            ColorPair::Blue => slot::BLUE,
            ColorPair::Red => slot::RED,
            ColorPair::Green => slot::GREEN,
            ColorPair::White => slot::WHITE,
            ColorPair::Orange => slot::ORANGE,
            ColorPair::Violet => slot::MAGENTA,
            ColorPair::Pink => slot::PINK,
            ColorPair::Cyan => slot::CYAN,
        }
    }

    pub fn background(self) -> u16 {
        slot::BLACK
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorPair::Yellow => "yellow",
            ColorPair::Blue => "blue",
            ColorPair::Red => "red",
            ColorPair::Green => "green",
            ColorPair::White => "white",
            ColorPair::Orange => "orange",
            ColorPair::Violet => "violet",
            ColorPair::Pink => "pink",
            ColorPair::Cyan => "cyan",
        }
    }
}

impl fmt::Display for ColorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

/// RGB color with components in `0..=1000`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb1000 {
    r: u16,
    g: u16,
    b: u16,
}

impl Rgb1000 {
    pub const fn new(r: u16, g: u16, b: u16) -> Option<Self> {
        if r > RGB_MAX || g > RGB_MAX || b > RGB_MAX {
            return None;
        }
        Some(Self { r, g, b })
    }

    pub fn components(&self) -> [u16; 3] {
        [self.r, self.g, self.b]
    }

    /// Scale to 8-bit channels
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let scale = |v: u16| (u32::from(v) * 255 / u32::from(RGB_MAX)) as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

pub const DEFAULT_ORANGE: Rgb1000 = Rgb1000 { r: 1000, g: 500, b: 0 };
pub const DEFAULT_PINK: Rgb1000 = Rgb1000 { r: 1000, g: 411, b: 705 };

/// One registration call issued by palette initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteStep {
    DefineColor { slot: u16, rgb: Rgb1000 },
    DefinePair { pair: ColorPair, fg: u16, bg: u16 },
}

/// The custom colors to register alongside the nine pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub orange: Rgb1000,
    pub pink: Rgb1000,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            orange: DEFAULT_ORANGE,
            pink: DEFAULT_PINK,
        }
    }
}

impl Palette {
    /// Registration sequence. Each custom color is defined right before
    /// the pair that uses it.
    pub fn steps(&self) -> Vec<PaletteStep> {
        let mut steps = Vec::with_capacity(ColorPair::ALL.len() + 2);
        for pair in ColorPair::ALL {
            match pair {
                ColorPair::Orange => steps.push(PaletteStep::DefineColor {
                    slot: slot::ORANGE,
                    rgb: self.orange,
                }),
                ColorPair::Pink => steps.push(PaletteStep::DefineColor {
                    slot: slot::PINK,
                    rgb: self.pink,
                }),
                _ => {}
            }
            steps.push(PaletteStep::DefinePair {
                pair,
                fg: pair.foreground(),
                bg: pair.background(),
            });
        }
        steps
    }
}
