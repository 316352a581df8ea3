#![forbid(unsafe_code)]

//! Dispatching an edit to one object.
//!
//! Each kind's state machine consumes input until it reaches a boundary
//! and hands an [`EditCode`] back. This module wraps every edit the same
//! way: focus is set and drawn, the kind's loop runs, then focus is
//! cleared and the object marked for redraw.

use ndialog_core::event::{KeyCode, KeyEvent};

use crate::flags::ObjFlags;
use crate::object::{Class, Obj};
use crate::screen::{Display, EditCode, Input, Pointer, Screen};

/// How focus arrived at an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Tabbed in from the previous object.
    Forward,
    /// Back-tabbed in from the next object.
    Backward,
    /// Focus stayed put; composites go back to their active part.
    Resume,
    /// A press landed on the object.
    Press(Pointer),
}

impl Entry {
    #[must_use]
    pub const fn pointer(self) -> Option<Pointer> {
        match self {
            Self::Press(p) => Some(p),
            _ => None,
        }
    }
}

/// Edit `obj` until it hands focus back.
///
/// Objects that cannot take focus pass it on with [`EditCode::Tab`].
pub fn edit(obj: &mut Obj, screen: &mut Screen<'_>, display: &Display, entry: Entry) -> EditCode {
    if !obj.is_focusable() {
        return EditCode::Tab;
    }
    obj.flags.insert(ObjFlags::CURRENT);
    obj.flags.remove(ObjFlags::DIRTY);
    screen.draw(display, obj);
    let press = entry.pointer();
    let code = match obj.class() {
        Class::String => crate::string::edit(obj, screen, display, press),
        Class::Check => crate::check::edit(obj, screen, display, press),
        Class::Button => crate::button::edit(obj, screen, display, press),
        Class::List => crate::list::edit(obj, screen, display, press),
        Class::Gauge => EditCode::Tab,
        Class::Text => crate::text::edit(obj, screen, display, press),
        Class::EditList => crate::edit_list::edit(obj, screen, display, entry),
        Class::IndexedMenu => crate::indexed_menu::edit(obj, screen, display, entry),
        Class::Custom(_) => crate::custom::edit(obj, screen, display, press),
    };
    obj.flags.remove(ObjFlags::CURRENT);
    obj.touch();
    code
}

/// Keys every kind treats alike.
pub(crate) enum Common {
    Help,
    Refresh,
    Escape,
}

pub(crate) fn common(key: &KeyEvent) -> Option<Common> {
    match key.code {
        KeyCode::F(1) => Some(Common::Help),
        KeyCode::Escape => Some(Common::Escape),
        _ if key.is_ctrl('r') => Some(Common::Refresh),
        _ => None,
    }
}

/// The key of an input, or the code an edit returns for anything else.
pub(crate) const fn key_or_code(input: Input) -> Result<KeyEvent, EditCode> {
    match input {
        Input::Key(key) => Ok(key),
        Input::Mouse(p) => Err(EditCode::Event(p)),
        Input::Resize => Err(EditCode::Resize),
        Input::Eof => Err(EditCode::Escape),
    }
}

/// What one key did to a kind's state.
pub(crate) enum Step {
    /// Nothing visible changed.
    Stay,
    /// The view moved.
    Redraw,
    /// The content changed.
    Changed,
    /// The key was refused.
    Beep,
    /// The value is being committed.
    Commit,
    /// Leave the edit.
    Done(EditCode),
}

/// Apply a step's redraw or bell. Returns the code to leave with, if any.
pub(crate) fn settle(
    step: Step,
    obj: &mut Obj,
    screen: &mut Screen<'_>,
    display: &Display,
) -> Option<EditCode> {
    match step {
        Step::Stay | Step::Commit => {}
        Step::Redraw => screen.draw(display, obj),
        Step::Changed => {
            obj.flags.insert(ObjFlags::DIRTY);
            screen.draw(display, obj);
        }
        Step::Beep => screen.beep(),
        Step::Done(code) => return Some(code),
    }
    None
}

/// Open the help topic of `obj`, if it has one.
pub(crate) fn show_help(obj: &Obj, screen: &mut Screen<'_>) {
    if let Some(topic) = obj.help().map(str::to_owned) {
        crate::help::browse(screen, &topic);
    }
}
