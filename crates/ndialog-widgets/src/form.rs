#![forbid(unsafe_code)]

//! The modal form loop.
//!
//! [`menu`] owns one form from start to finish: it sorts and checks the
//! chain, lays the form out, opens a window for it, and passes focus from
//! item to item until something closes the form. Results are read back
//! from the items (their bindings and lists) after it returns.
//!
//! Forms nest: a callback may call [`menu`] again on the same screen.
//! Each call opens its own window and closes it on every way out, so
//! escaping a nested form unwinds exactly one level.

use bitflags::bitflags;
use smallvec::SmallVec;

use ndialog_core::geometry::Region;
use ndialog_render::Role;

use crate::chain::{Chain, ObjId};
use crate::edit::{self, Entry};
use crate::error::{Error, Result};
use crate::flags::ButtonRole;
use crate::layout::{self, Layout};
use crate::object::{Obj, cells};
use crate::screen::{Canvas, Display, EditCode, Screen};

bitflags! {
    /// Presentation options of a form.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FormFlags: u32 {
        /// Embossed inner frame, when there is room for it.
        const FANCY       = 0x01;
        /// Prompt flush left.
        const ALIGN_LEFT  = 0x02;
        /// Prompt flush right.
        const ALIGN_RIGHT = 0x04;
        /// Prompt in the error colour.
        const ERROR       = 0x08;
        /// Focus starts on the first button.
        const AT_BUTTON   = 0x10;
    }
}

/// Title, prompt, size, and options of a form.
///
/// A width or depth of `-1` sizes that dimension to fit the items; `0` by
/// `0` covers the whole screen without a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    title: Option<String>,
    prompt: Option<String>,
    width: i32,
    depth: i32,
    flags: FormFlags,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            title: None,
            prompt: None,
            width: -1,
            depth: -1,
            flags: FormFlags::empty(),
        }
    }
}

impl Form {
    /// An auto-sized form with no title or prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Text above the items; may span several lines.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub const fn with_size(mut self, width: i32, depth: i32) -> Self {
        self.width = width;
        self.depth = depth;
        self
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: FormFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    #[must_use]
    pub const fn flags(&self) -> FormFlags {
        self.flags
    }
}

/// How a form was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuResult {
    /// Accepted: a confirm button, an exiting callback, or the end of a
    /// form without confirm or cancel buttons.
    Ok,
    /// A cancel button.
    Cancel,
    /// Escape, or input ran out.
    Escape,
}

impl MenuResult {
    /// Exit status convention: 0 ok, 1 cancel, 2 escape.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Cancel => 1,
            Self::Escape => 2,
        }
    }
}

type Items = SmallVec<[ObjId; 16]>;

/// Run a form until it closes.
///
/// An empty chain shows the frame, title, and prompt and returns at once;
/// so does a chain with nothing that accepts focus.
///
/// # Errors
///
/// [`Error::Fault`] for a broken chain, [`Error::Overflow`] when the form
/// does not fit, and [`Error::Io`] when its window cannot be opened or the
/// surface fails while it runs. No window is left open on any path.
pub fn menu(chain: &mut Chain, screen: &mut Screen<'_>, form: &Form) -> Result<MenuResult> {
    chain.validate()?;
    chain.sort_for_menu();
    let layout = layout::plan(chain, form, screen.size())?;
    let window = screen.open_window(layout.window).map_err(Error::Io)?;
    let display = Display::new(window, layout.origin);
    let items: Items = chain.ids().into_iter().collect();

    ndialog_core::debug!(items = items.len(), title = ?form.title(), "form opened");
    let mut result = run(chain, &items, screen, &display, form, &layout);
    if let Some(err) = screen.take_failure() {
        result = Err(Error::Io(err));
    }
    screen.hide_cursor();
    screen.close_window(window);
    ndialog_core::debug!(?result, "form closed");
    result
}

fn run(
    chain: &mut Chain,
    items: &Items,
    screen: &mut Screen<'_>,
    display: &Display,
    form: &Form,
    layout: &Layout,
) -> Result<MenuResult> {
    repaint(chain, items, screen, display, form, layout);
    if items.is_empty() {
        screen.flush();
        return Ok(MenuResult::Ok);
    }

    let first_button = items
        .iter()
        .position(|&id| chain.get(id).is_some_and(Obj::is_button));
    let start = if form.flags().contains(FormFlags::AT_BUTTON) {
        first_button.unwrap_or(0)
    } else {
        0
    };
    let Some(mut idx) = (start..items.len()).find(|&i| focusable(chain, items[i])) else {
        screen.flush();
        return Ok(MenuResult::Ok);
    };
    let closable = items.iter().any(|&id| {
        matches!(
            role(chain, id),
            Some(ButtonRole::Confirm | ButtonRole::Cancel)
        )
    });

    let mut entry = Entry::Forward;
    loop {
        let obj = chain
            .get_mut(items[idx])
            .ok_or(Error::Fault("form item vanished"))?;
        let code = edit::edit(obj, screen, display, entry);
        entry = Entry::Resume;

        let step = match code {
            EditCode::ExitForm => return Ok(MenuResult::Ok),
            EditCode::Cancel => return Ok(MenuResult::Cancel),
            EditCode::Escape => return Ok(MenuResult::Escape),
            EditCode::Refresh | EditCode::Resize => {
                repaint(chain, items, screen, display, form, layout);
                continue;
            }
            EditCode::Return => match role(chain, items[idx]) {
                Some(ButtonRole::Cancel) => return Ok(MenuResult::Cancel),
                Some(ButtonRole::Confirm) => return Ok(MenuResult::Ok),
                _ => 1,
            },
            EditCode::Tab => 1,
            EditCode::BackTab => -1,
            EditCode::Error => {
                ndialog_core::warn!(item = idx, "edit failed, moving on");
                1
            }
            EditCode::Event(p) => {
                let claimed = items.iter().enumerate().position(|(i, &id)| {
                    i != idx
                        && chain
                            .get(id)
                            .is_some_and(|o| o.is_focusable() && p.inside(o.hit_area()))
                });
                if let Some(other) = claimed {
                    idx = other;
                    entry = Entry::Press(p);
                } else if chain
                    .get(items[idx])
                    .is_some_and(|o| p.inside(o.hit_area()))
                {
                    entry = Entry::Press(p);
                }
                0
            }
            EditCode::Nop => 0,
        };

        redraw_touched(chain, items, screen, display);

        if step != 0 {
            let wrap = code == EditCode::Tab || closable;
            match advance(chain, items, idx, step > 0, wrap) {
                Some(next) => {
                    idx = next;
                    entry = if step > 0 { Entry::Forward } else { Entry::Backward };
                }
                None => return Ok(MenuResult::Ok),
            }
        }
    }
}

fn focusable(chain: &Chain, id: ObjId) -> bool {
    chain.get(id).is_some_and(Obj::is_focusable)
}

fn role(chain: &Chain, id: ObjId) -> Option<ButtonRole> {
    chain.get(id).and_then(Obj::as_button).map(|b| b.role())
}

/// Next focusable item from `from`. Running off the end without `wrap`,
/// or finding nothing focusable, ends the form.
fn advance(chain: &Chain, items: &Items, from: usize, forward: bool, wrap: bool) -> Option<usize> {
    let n = items.len();
    let mut at = from;
    loop {
        at = if forward {
            if at + 1 >= n {
                if !wrap {
                    return None;
                }
                0
            } else {
                at + 1
            }
        } else if at == 0 {
            n - 1
        } else {
            at - 1
        };
        let ok = focusable(chain, items[at]);
        if ok || at == from {
            return ok.then_some(at);
        }
    }
}

fn redraw_touched(chain: &mut Chain, items: &Items, screen: &mut Screen<'_>, display: &Display) {
    for &id in items {
        if let Some(obj) = chain.get_mut(id) {
            if obj.is_touched() {
                screen.draw(display, obj);
                obj.untouch();
            }
        }
    }
}

/// Clear the window and draw everything; the focused item goes last.
fn repaint(
    chain: &mut Chain,
    items: &Items,
    screen: &mut Screen<'_>,
    display: &Display,
    form: &Form,
    layout: &Layout,
) {
    {
        let chain = &*chain;
        screen.paint(display, |canvas| {
            draw_frame(canvas, form, layout);
            let mut current = None;
            for &id in items {
                if let Some(obj) = chain.get(id) {
                    obj.draw(canvas);
                    if obj.is_current() {
                        current = Some(obj);
                    }
                }
            }
            if let Some(obj) = current {
                obj.draw(canvas);
            }
        });
    }
    for &id in items {
        if let Some(obj) = chain.get_mut(id) {
            obj.untouch();
        }
    }
}

fn draw_frame(canvas: &mut Canvas<'_>, form: &Form, layout: &Layout) {
    let (width, depth) = (layout.width, layout.depth);
    let fancy = i32::from(layout.fancy);
    canvas.clear(canvas.style(Role::Window));

    if !layout.whole_screen {
        let slice = if layout.has_buttons { depth - 3 } else { 0 };
        canvas.frame_raw(Region::new(0, 0, width, depth), slice, Role::Relief, Role::Window);
        if let Some(title) = form.title() {
            let style = canvas.style(Role::Title);
            let x = (width - cells(title)) / 2;
            if x < 1 {
                let room = usize::try_from(width - 2).unwrap_or(0);
                canvas.put_str_raw(0, 0, title, style, room);
            } else {
                canvas.put_str_raw(x, 0, title, style, usize::MAX);
            }
        }
        if layout.fancy {
            let bottom_rows = if layout.has_buttons { 4 } else { 2 };
            let inner = depth - bottom_rows - layout.origin.1 + 2;
            canvas.frame_raw(
                Region::new(1, layout.origin.1 - 1, width - 2, inner),
                0,
                Role::Window,
                Role::Relief,
            );
        }
    }

    if let Some(prompt) = form.prompt() {
        let flags = form.flags();
        let style = canvas.style(if flags.contains(FormFlags::ERROR) {
            Role::Error
        } else {
            Role::Window
        });
        let x = if flags.contains(FormFlags::ALIGN_RIGHT) {
            width - (layout.prompt_width + 1 + fancy)
        } else if flags.contains(FormFlags::ALIGN_LEFT) {
            1 + fancy
        } else {
            (width - layout.prompt_width) / 2 + fancy
        };
        for (row, line) in (1..).zip(prompt.split('\n')) {
            canvas.put_str_raw(x, row, line, style, usize::MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;
    use crate::object::Decor;
    use ndialog_core::event::{Event, KeyCode};
    use ndialog_render::headless::HeadlessSurface;

    fn entry_form(value: &Binding<String>) -> Chain {
        let mut chain = Chain::new();
        chain.push(Obj::ok_button(0, "OK").expect("label"));
        chain.push(Obj::string(0, 0, 12, 12, value.clone(), Decor::new()).expect("valid"));
        chain.push(Obj::cancel_button(1, "Cancel").expect("label"));
        chain
    }

    #[test]
    fn empty_form_announces_and_returns() {
        let mut surface = HeadlessSurface::new(40, 10);
        let mut screen = Screen::new(&mut surface);
        let form = Form::new().with_title("Note").with_prompt("Working...");
        let mut chain = Chain::new();
        assert_eq!(menu(&mut chain, &mut screen, &form).expect("runs"), MenuResult::Ok);
        assert!(surface.shows("Working..."));
        assert!(surface.shows("Note"));
        assert_eq!(surface.open_windows(), 0);
    }

    #[test]
    fn cancel_button_cancels() {
        let value = Binding::new(String::new());
        let mut surface = HeadlessSurface::new(40, 10).with_events([
            Event::key(KeyCode::Tab),
            Event::key(KeyCode::Tab),
            Event::key(KeyCode::Enter),
        ]);
        let mut screen = Screen::new(&mut surface);
        let mut chain = entry_form(&value);
        let result = menu(&mut chain, &mut screen, &Form::new()).expect("runs");
        assert_eq!(result, MenuResult::Cancel);
        assert_eq!(result.code(), 1);
    }

    #[test]
    fn exhausted_input_escapes() {
        let value = Binding::new(String::new());
        let mut surface = HeadlessSurface::new(40, 10);
        let mut screen = Screen::new(&mut surface);
        let mut chain = entry_form(&value);
        assert_eq!(
            menu(&mut chain, &mut screen, &Form::new()).expect("runs"),
            MenuResult::Escape
        );
        assert_eq!(surface.open_windows(), 0);
    }

    #[test]
    fn at_button_starts_on_first_button() {
        let value = Binding::new(String::new());
        let mut surface = HeadlessSurface::new(40, 10).with_events([Event::key(KeyCode::Enter)]);
        let mut screen = Screen::new(&mut surface);
        let mut chain = entry_form(&value);
        let form = Form::new().with_flags(FormFlags::AT_BUTTON);
        assert_eq!(menu(&mut chain, &mut screen, &form).expect("runs"), MenuResult::Ok);
    }

    #[test]
    fn return_past_the_end_accepts_without_buttons() {
        let value = Binding::new(String::new());
        let mut surface = HeadlessSurface::new(40, 10);
        surface.type_str("hi");
        surface.push_event(Event::key(KeyCode::Enter));
        let mut screen = Screen::new(&mut surface);
        let mut chain = Chain::new();
        chain.push(Obj::string(0, 0, 10, 10, value.clone(), Decor::new()).expect("valid"));
        assert_eq!(
            menu(&mut chain, &mut screen, &Form::new()).expect("runs"),
            MenuResult::Ok
        );
        assert_eq!(value.get(), "hi");
    }

    #[test]
    fn read_only_forms_return_at_once() {
        let mut surface = HeadlessSurface::new(40, 10);
        let mut screen = Screen::new(&mut surface);
        let mut chain = Chain::new();
        chain.push(
            Obj::text(0, 0, 20, 2, vec!["read me".into()], Decor::new())
                .expect("valid")
                .read_only(),
        );
        assert_eq!(
            menu(&mut chain, &mut screen, &Form::new()).expect("runs"),
            MenuResult::Ok
        );
        assert!(surface.shows("read me"));
    }

    #[test]
    fn broken_chain_fails_before_drawing() {
        let mut surface = HeadlessSurface::new(40, 10);
        let mut screen = Screen::new(&mut surface);
        let mut chain = Chain::new();
        let a = chain.push(Obj::check(0, 0, Binding::new(false), Decor::new()).expect("valid"));
        chain.push(Obj::check(0, 1, Binding::new(false), Decor::new()).expect("valid"));
        chain.break_link(a, a.index());
        assert!(matches!(
            menu(&mut chain, &mut screen, &Form::new()),
            Err(Error::Fault(_))
        ));
        assert_eq!(surface.windows_opened(), 0);
    }

    #[test]
    fn click_moves_focus_to_other_item() {
        let flag = Binding::new(false);
        let mut chain = Chain::new();
        chain.push(Obj::string(0, 0, 10, 10, Binding::new(String::new()), Decor::new()).expect("valid"));
        chain.push(Obj::check(0, 2, flag.clone(), Decor::new()).expect("valid"));
        chain.push(Obj::ok_button(0, "OK").expect("label"));
        let layout = {
            let mut probe = Chain::new();
            probe.push(Obj::string(0, 0, 10, 10, Binding::new(String::new()), Decor::new()).expect("valid"));
            probe.push(Obj::check(0, 2, Binding::new(false), Decor::new()).expect("valid"));
            probe.push(Obj::ok_button(0, "OK").expect("label"));
            layout::plan(&mut probe, &Form::new(), (40, 12)).expect("fits")
        };
        // The check box content sits at form (1, 2).
        let x = u16::try_from(i32::from(layout.window.x) + layout.origin.0 + 1).expect("on screen");
        let y = u16::try_from(i32::from(layout.window.y) + layout.origin.1 + 2).expect("on screen");
        let mut surface = HeadlessSurface::new(40, 12).with_events([Event::click(x, y)]);
        let mut screen = Screen::new(&mut surface);
        let _ = menu(&mut chain, &mut screen, &Form::new()).expect("runs");
        assert!(flag.get());
    }
}
