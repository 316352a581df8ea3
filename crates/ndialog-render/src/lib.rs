#![forbid(unsafe_code)]

//! Render: cells, buffers, the dialog palette, the window stack, and the
//! surfaces forms draw on.
//!
//! Widgets never talk to the terminal directly. They draw into the
//! [`buffer::Buffer`] of a window opened on a [`surface::Surface`] and read
//! logical input from the same surface. Two surfaces ship here: the
//! crossterm-backed [`terminal::TerminalSurface`] and the scripted
//! [`headless::HeadlessSurface`] used by tests.

pub mod buffer;
pub mod cell;
pub mod diff;
pub mod drawing;
pub mod headless;
pub mod panel;
pub mod presenter;
pub mod surface;
pub mod terminal;
pub mod theme;

pub use buffer::Buffer;
pub use cell::{Cell, Color, Style, StyleFlags};
pub use surface::{Surface, WindowId};
pub use theme::{Palette, Role, Theme};
