#![forbid(unsafe_code)]

//! Buttons.
//!
//! A button is one row tall and exactly as wide as its label. Its `x` is an
//! ordering key: the form lays every button out on the bottom row in that
//! order. The [`ButtonRole`] tells the form what Return on the button
//! means.

use std::time::Duration;

use ndialog_core::event::KeyCode;
use ndialog_render::Role;

use crate::callback::{self, Verdict};
use crate::edit::{self, Common};
use crate::error::{Error, Result};
use crate::flags::{ButtonRole, ObjFlags};
use crate::object::{Decor, Kind, Obj, cells};
use crate::screen::{Canvas, Display, EditCode, Pointer, Screen};

/// How long a pressed button shows its pressed colour.
pub const PRESS_FEEDBACK: Duration = Duration::from_millis(100);

/// State of a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    label: String,
    role: ButtonRole,
    order: i32,
}

impl Button {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    #[must_use]
    pub const fn role(&self) -> ButtonRole {
        self.role
    }

    /// Position in the button row.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }
}

impl Obj {
    /// A regular button.
    pub fn button(order: i32, label: impl Into<String>) -> Result<Self> {
        Self::button_with_role(order, label, ButtonRole::Regular)
    }

    /// A button that confirms the form.
    pub fn ok_button(order: i32, label: impl Into<String>) -> Result<Self> {
        Self::button_with_role(order, label, ButtonRole::Confirm)
    }

    /// A button that cancels the form.
    pub fn cancel_button(order: i32, label: impl Into<String>) -> Result<Self> {
        Self::button_with_role(order, label, ButtonRole::Cancel)
    }

    pub fn button_with_role(order: i32, label: impl Into<String>, role: ButtonRole) -> Result<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(Error::InvalidArgument("button needs a label"));
        }
        let width = cells(&label);
        Ok(Self::base(
            Kind::Button(Button { label, role, order }),
            0,
            0,
            width,
            1,
            Decor::new(),
        ))
    }
}

pub(crate) fn draw(obj: &Obj, button: &Button, canvas: &mut Canvas<'_>) {
    let area = obj.content_area();
    let current = obj.is_current();
    let bracket = canvas.style(if current { Role::Active } else { Role::Window });
    let label = if obj.flags.contains(ObjFlags::CLICKED) {
        canvas.style(Role::Pressed)
    } else if current {
        canvas.style(Role::Button).bold()
    } else {
        canvas.style(Role::Button)
    };
    canvas.put_char(area.x - 1, area.y, '[', bracket);
    let end = canvas.put_str(area.x, area.y, &button.label, label);
    canvas.put_char(end, area.y, ']', bracket);
}

/// Show the press, run the callback, and decide.
fn click(obj: &mut Obj, screen: &mut Screen<'_>, display: &Display) -> Option<EditCode> {
    obj.flags.insert(ObjFlags::CLICKED);
    screen.draw(display, obj);
    screen.flush();
    screen.pause(PRESS_FEEDBACK);
    obj.flags.remove(ObjFlags::CLICKED);
    screen.draw(display, obj);
    match callback::run(obj, screen) {
        Verdict::Reject => {
            screen.draw(display, obj);
            None
        }
        Verdict::Accept => Some(EditCode::Return),
        Verdict::AcceptAndExit => Some(EditCode::ExitForm),
    }
}

pub(crate) fn edit(
    obj: &mut Obj,
    screen: &mut Screen<'_>,
    display: &Display,
    entry: Option<Pointer>,
) -> EditCode {
    if entry.is_some() {
        if let Some(code) = click(obj, screen, display) {
            return code;
        }
    }
    let area = obj.content_area();
    loop {
        screen.place_cursor(display, area.x, area.y);
        let key = match edit::key_or_code(screen.read(display)) {
            Ok(key) => key,
            Err(code) => return code,
        };
        match edit::common(&key) {
            Some(Common::Help) => edit::show_help(obj, screen),
            Some(Common::Refresh) => return EditCode::Refresh,
            Some(Common::Escape) => return EditCode::Escape,
            None => match key.code {
                KeyCode::Enter => {
                    if let Some(code) = click(obj, screen, display) {
                        return code;
                    }
                }
                KeyCode::Up | KeyCode::Left | KeyCode::BackTab => return EditCode::BackTab,
                KeyCode::Down | KeyCode::Right | KeyCode::Tab => return EditCode::Tab,
                _ => screen.beep(),
            },
        }
    }
}
