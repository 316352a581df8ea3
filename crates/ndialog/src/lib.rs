#![forbid(unsafe_code)]

//! ndialog public facade crate.
//!
//! Re-exports the building blocks of the internal crates, adds the
//! run-wide [`DialogConfig`] and [`Session`], and provides the ready-made
//! boxes in [`boxes`] (yes/no, message, input, gauge, text, and the list
//! family) that scripts and programs use for simple prompts.

use std::fmt;
use std::io;

pub mod boxes;
pub mod cli;
pub mod config;
pub mod session;

pub use config::DialogConfig;
pub use session::Session;

// --- Core re-exports -------------------------------------------------------

pub use ndialog_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseEvent};
pub use ndialog_core::terminal_session::{SessionOptions, TerminalSession};

// --- Render re-exports -----------------------------------------------------

pub use ndialog_render::headless::HeadlessSurface;
pub use ndialog_render::terminal::TerminalSurface;
pub use ndialog_render::{Palette, Role, Surface, Theme};

// --- Text re-exports -------------------------------------------------------

pub use ndialog_text::Page;

// --- Widget re-exports -----------------------------------------------------

pub use ndialog_widgets::{
    Binding, Chain, Decor, Form, FormFlags, ListItem, ListItems, ListStyle, MenuResult, Obj,
    ObjId, Screen, Verdict, menu,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for ndialog boxes.
#[derive(Debug)]
pub enum Error {
    /// A widget could not be built or a form could not run.
    Widget(ndialog_widgets::Error),
    /// I/O failure reading a file or driving the terminal.
    Io(io::Error),
    /// Arguments a box cannot work with.
    Invalid(&'static str),
    /// The user left the box with Escape.
    Escaped,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widget(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Invalid(what) => write!(f, "invalid arguments: {what}"),
            Self::Escaped => f.write_str("escaped"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Widget(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Invalid(_) | Self::Escaped => None,
        }
    }
}

impl From<ndialog_widgets::Error> for Error {
    fn from(err: ndialog_widgets::Error) -> Self {
        Self::Widget(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for ndialog boxes.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::boxes::{self, BoxSpec, Choice, ListEntry, ListKind};
    pub use crate::{
        Binding, Chain, Decor, DialogConfig, Error, Form, FormFlags, ListItem, ListItems,
        ListStyle, MenuResult, Obj, Result, Screen, Session, Verdict, menu,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn widget_errors_keep_their_source() {
        let err = Error::from(ndialog_widgets::Error::NotFound);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), ndialog_widgets::Error::NotFound.to_string());
    }

    #[test]
    fn escaped_has_no_source() {
        assert!(Error::Escaped.source().is_none());
        assert_eq!(Error::Invalid("x").to_string(), "invalid arguments: x");
    }
}
