#![forbid(unsafe_code)]

//! The form's view of a surface: drawing into its window, reading input
//! translated to form coordinates, and the codes edits hand back to the
//! modal loop.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ndialog_core::event::{Event, KeyEvent};
use ndialog_core::geometry::Region;
use ndialog_render::buffer::Buffer;
use ndialog_render::drawing::{self, FrameSpec};
use ndialog_render::{Role, Style, Surface, Theme, WindowId};

use crate::object::Obj;

/// A pointer press in form coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
    /// Second press on the same cell within the double-click interval.
    pub double: bool,
}

impl Pointer {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            double: false,
        }
    }

    #[must_use]
    pub const fn double(mut self) -> Self {
        self.double = true;
        self
    }

    /// Whether the press landed inside `area`.
    #[must_use]
    pub const fn inside(&self, area: Region) -> bool {
        area.contains(self.x, self.y)
    }
}

/// One logical input, as an edit sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Mouse(Pointer),
    /// The screen changed size.
    Resize,
    /// Input is exhausted.
    Eof,
}

/// What an edit hands back to the loop that called it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCode {
    /// Nothing for the caller to do; edit the same object again.
    Nop,
    /// Move focus forward.
    Tab,
    /// Move focus backward.
    BackTab,
    /// The value was committed.
    Return,
    /// Clear and redraw everything.
    Refresh,
    /// The screen was resized.
    Resize,
    /// Close the form as cancelled.
    Cancel,
    /// Close the form as escaped.
    Escape,
    /// Close the form as confirmed.
    ExitForm,
    /// A press the edit could not handle; the caller decides who gets it.
    Event(Pointer),
    /// The edit failed.
    Error,
}

/// Where a form lives: its window and the offset of item coordinates
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Display {
    window: WindowId,
    origin: (i32, i32),
}

impl Display {
    #[must_use]
    pub const fn new(window: WindowId, origin: (i32, i32)) -> Self {
        Self { window, origin }
    }

    #[must_use]
    pub const fn window(&self) -> WindowId {
        self.window
    }

    /// Window cell of form coordinate (0, 0).
    #[must_use]
    pub const fn origin(&self) -> (i32, i32) {
        self.origin
    }
}

/// A surface plus the help root, threaded through every edit and callback.
pub struct Screen<'a> {
    surface: &'a mut dyn Surface,
    help_root: Option<PathBuf>,
    failure: Option<io::Error>,
}

impl<'a> Screen<'a> {
    #[must_use]
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self {
            surface,
            help_root: None,
            failure: None,
        }
    }

    /// Directory relative help documents are looked up in.
    #[must_use]
    pub fn with_help_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.help_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn help_root(&self) -> Option<&Path> {
        self.help_root.as_deref()
    }

    /// The underlying surface.
    pub fn surface(&mut self) -> &mut (dyn Surface + 'a) {
        &mut *self.surface
    }

    /// Usable (columns, rows).
    #[must_use]
    pub fn size(&self) -> (i32, i32) {
        let (cols, rows) = self.surface.size();
        (i32::from(cols), i32::from(rows))
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        *self.surface.theme()
    }

    pub fn beep(&mut self) {
        self.surface.beep();
    }

    pub fn pause(&mut self, duration: Duration) {
        self.surface.pause(duration);
    }

    /// Run `f` with a canvas on the display's window.
    pub fn paint(&mut self, display: &Display, f: impl FnOnce(&mut Canvas<'_>)) {
        let theme = self.theme();
        if let Some(buf) = self.surface.window(display.window) {
            let mut canvas = Canvas::new(buf, &theme, display.origin);
            f(&mut canvas);
        }
    }

    /// Redraw one object.
    pub fn draw(&mut self, display: &Display, obj: &Obj) {
        self.paint(display, |canvas| obj.draw(canvas));
    }

    /// Put the hardware cursor on a form cell.
    pub fn place_cursor(&mut self, display: &Display, x: i32, y: i32) {
        let (ox, oy) = self.screen_origin(display);
        let at = u16::try_from(ox + x).ok().zip(u16::try_from(oy + y).ok());
        self.surface.set_cursor(at);
    }

    pub fn hide_cursor(&mut self) {
        self.surface.set_cursor(None);
    }

    /// Make pending drawing visible.
    pub fn flush(&mut self) {
        if let Err(err) = self.surface.present() {
            ndialog_core::warn!(error = %err, "present failed");
            self.fail(err);
        }
    }

    /// Keep the first surface failure for the form loop to report.
    fn fail(&mut self, err: io::Error) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    /// The surface failure seen since the last call, if any.
    pub(crate) fn take_failure(&mut self) -> Option<io::Error> {
        self.failure.take()
    }

    fn screen_origin(&self, display: &Display) -> (i32, i32) {
        let area = self.surface.window_area(display.window).unwrap_or_default();
        (
            i32::from(area.x) + display.origin.0,
            i32::from(area.y) + display.origin.1,
        )
    }

    /// Present, then block for the next input.
    ///
    /// Releases, drags, and wheel motion are dropped; presses arrive in
    /// form coordinates. A surface error ends input and is kept for
    /// [`crate::menu`] to return.
    pub fn read(&mut self, display: &Display) -> Input {
        self.flush();
        loop {
            match self.surface.read_event() {
                Ok(Some(Event::Key(key))) => return Input::Key(key),
                Ok(Some(Event::Mouse(mouse))) => {
                    if !mouse.is_press() {
                        continue;
                    }
                    let (ox, oy) = self.screen_origin(display);
                    return Input::Mouse(Pointer {
                        x: i32::from(mouse.x) - ox,
                        y: i32::from(mouse.y) - oy,
                        double: mouse.is_double_click(),
                    });
                }
                Ok(Some(Event::Resize { .. })) => return Input::Resize,
                Ok(None) => return Input::Eof,
                Err(err) => {
                    ndialog_core::warn!(error = %err, "input failed");
                    self.fail(err);
                    return Input::Eof;
                }
            }
        }
    }

    pub(crate) fn open_window(&mut self, area: ndialog_core::geometry::Rect) -> std::io::Result<WindowId> {
        self.surface.open_window(area)
    }

    pub(crate) fn close_window(&mut self, id: WindowId) {
        self.surface.close_window(id);
    }
}

/// Drawing in form coordinates on one window.
pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    theme: &'a Theme,
    origin: (i32, i32),
}

impl<'a> Canvas<'a> {
    #[must_use]
    pub fn new(buf: &'a mut Buffer, theme: &'a Theme, origin: (i32, i32)) -> Self {
        Self { buf, theme, origin }
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        self.theme
    }

    #[must_use]
    pub const fn style(&self, role: Role) -> Style {
        self.theme.style(role)
    }

    /// Draw a string; returns the form column after it.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: Style) -> i32 {
        self.put_str_max(x, y, s, style, usize::MAX)
    }

    /// Draw at most `max` cells of a string.
    pub fn put_str_max(&mut self, x: i32, y: i32, s: &str, style: Style, max: usize) -> i32 {
        let (ox, oy) = self.origin;
        self.buf.put_str_max(x + ox, y + oy, s, style, max) - ox
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: Style) {
        let (ox, oy) = self.origin;
        self.buf.put_char(x + ox, y + oy, ch, style);
    }

    /// Blank `width` cells of a row.
    pub fn blank(&mut self, x: i32, y: i32, width: i32, style: Style) {
        let (ox, oy) = self.origin;
        self.buf
            .fill(x + ox, y + oy, width, 1, ndialog_render::Cell::blank(style));
    }

    /// Restyle one cell, keeping its character.
    pub fn restyle(&mut self, x: i32, y: i32, style: Style) {
        let (ox, oy) = self.origin;
        self.buf.restyle(x + ox, y + oy, style);
    }

    /// A framed box with a blank interior.
    pub fn frame(&mut self, area: Region, slice: i32, sunlight: Role, shade: Role) {
        let (ox, oy) = self.origin;
        let spec = FrameSpec {
            x: area.x + ox,
            y: area.y + oy,
            width: area.width,
            height: area.height,
            slice,
            sunlight: self.style(sunlight),
            shade: self.style(shade),
            fill: self.style(Role::Window),
        };
        drawing::draw_box(self.buf, &spec, self.theme.chars());
    }

    /// Blank the whole window, ignoring the origin.
    pub fn clear(&mut self, style: Style) {
        self.buf.clear(style);
    }

    /// Draw a string at window coordinates, ignoring the origin.
    pub fn put_str_raw(&mut self, x: i32, y: i32, s: &str, style: Style, max: usize) {
        self.buf.put_str_max(x, y, s, style, max);
    }

    /// A framed box at window coordinates, ignoring the origin.
    pub fn frame_raw(&mut self, area: Region, slice: i32, sunlight: Role, shade: Role) {
        let (ox, oy) = self.origin;
        self.origin = (0, 0);
        self.frame(area, slice, sunlight, shade);
        self.origin = (ox, oy);
    }
}
