#![forbid(unsafe_code)]

//! Checkboxes.

use ndialog_core::event::KeyCode;
use ndialog_render::Role;

use crate::binding::Binding;
use crate::callback::{self, Verdict};
use crate::edit::{self, Common};
use crate::error::Result;
use crate::flags::ObjFlags;
use crate::object::{Decor, Kind, Obj, cells};
use crate::screen::{Canvas, Display, EditCode, Pointer, Screen};

/// State of a checkbox: the bound flag.
#[derive(Debug, Clone)]
pub struct CheckBox {
    value: Binding<bool>,
}

impl CheckBox {
    #[must_use]
    pub const fn value(&self) -> &Binding<bool> {
        &self.value
    }

    #[must_use]
    pub fn checked(&self) -> bool {
        *self.value.borrow()
    }

    pub(crate) fn rebind(&mut self, value: Binding<bool>) {
        self.value = value;
    }

    fn toggle(&self) {
        let mut value = self.value.borrow_mut();
        *value = !*value;
    }
}

impl Obj {
    /// A checkbox drawn as `prefix[X]suffix`.
    pub fn check(x: i32, y: i32, value: Binding<bool>, decor: Decor) -> Result<Self> {
        Ok(Self::base(
            Kind::Check(CheckBox { value }),
            x,
            y,
            1,
            1,
            decor,
        ))
    }
}

pub(crate) fn draw(obj: &Obj, check: &CheckBox, canvas: &mut Canvas<'_>) {
    obj.draw_decor(canvas);
    let area = obj.content_area();
    let window = canvas.style(Role::Window);
    let bracket = canvas.style(if obj.is_current() {
        Role::Active
    } else {
        Role::Window
    });
    let prefix_width = obj.decor.prefix.as_deref().map_or(0, cells);
    if let Some(prefix) = &obj.decor.prefix {
        canvas.put_str(area.x - 1 - prefix_width, area.y, prefix, window);
    }
    canvas.put_char(area.x - 1, area.y, '[', bracket);
    let mark = if check.checked() { 'X' } else { ' ' };
    let mark_style = canvas.style(if obj.is_current() {
        Role::Selected
    } else {
        Role::Widget
    });
    canvas.put_char(area.x, area.y, mark, mark_style);
    canvas.put_char(area.x + 1, area.y, ']', bracket);
    if let Some(suffix) = &obj.decor.suffix {
        canvas.put_str(area.x + 2, area.y, suffix, window);
    }
}

/// Flip the box, letting the callback veto. Returns the code to leave
/// with, if any.
fn toggle(obj: &mut Obj, screen: &mut Screen<'_>, display: &Display) -> Option<EditCode> {
    if let Kind::Check(check) = &obj.kind {
        check.toggle();
    }
    let verdict = callback::run(obj, screen);
    match verdict {
        Verdict::Reject => {
            if let Kind::Check(check) = &obj.kind {
                check.toggle();
            }
        }
        Verdict::AcceptAndExit => return Some(EditCode::ExitForm),
        Verdict::Accept => obj.flags.insert(ObjFlags::DIRTY),
    }
    screen.draw(display, obj);
    None
}

pub(crate) fn edit(
    obj: &mut Obj,
    screen: &mut Screen<'_>,
    display: &Display,
    entry: Option<Pointer>,
) -> EditCode {
    if entry.is_some() {
        if let Some(code) = toggle(obj, screen, display) {
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
                KeyCode::Char(' ') if !key.ctrl() => {
                    if let Some(code) = toggle(obj, screen, display) {
                        return code;
                    }
                }
                KeyCode::Enter => return EditCode::Return,
                KeyCode::Up | KeyCode::Left | KeyCode::BackTab => return EditCode::BackTab,
                KeyCode::Down | KeyCode::Right | KeyCode::Tab => return EditCode::Tab,
                _ => screen.beep(),
            },
        }
    }
}
