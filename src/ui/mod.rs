//! Drawing surfaces.
//!
//! - **surface**: the `Surface` trait, everything the grid needs from a terminal driver
//! - **terminal**: `CrosstermSurface`, a real terminal through crossterm
//! - **recording**: `RecordingSurface`, an in-memory surface that logs every call
//!
//! # Choosing a Surface
//!
//! - **Interactive**: `CrosstermSurface::stdout()` followed by `init()`
//! - **Tests and text dumps**: `RecordingSurface::new()`

pub mod surface;
pub mod terminal;
pub mod recording;

pub use surface::Surface;
pub use terminal::CrosstermSurface;
pub use recording::{Call, Fault, RecordingSurface};
