#![forbid(unsafe_code)]

//! The drawing and input boundary forms are written against.
//!
//! A [`Surface`] owns the window stack, the theme, and the input source.
//! Window management has default implementations on top of
//! [`Surface::panels`]; backends supply presentation and input.

use std::io;
use std::time::Duration;

use ndialog_core::event::Event;
use ndialog_core::geometry::Rect;

use crate::buffer::Buffer;
pub use crate::panel::WindowId;
use crate::panel::PanelStack;
use crate::theme::Theme;

/// A screen that forms open windows on and read input from.
pub trait Surface {
    /// The window stack.
    fn panels(&self) -> &PanelStack;

    /// The window stack, mutably.
    fn panels_mut(&mut self) -> &mut PanelStack;

    /// Palette every form on this surface draws with.
    fn theme(&self) -> &Theme;

    /// Compose the stack and make it visible.
    fn present(&mut self) -> io::Result<()>;

    /// Block for the next logical input event.
    ///
    /// Key macros are already expanded and double clicks synthesized.
    /// `Ok(None)` means input is exhausted and will never produce more.
    fn read_event(&mut self) -> io::Result<Option<Event>>;

    /// Audible (or visible) bell.
    fn beep(&mut self);

    /// Short pause used for visual feedback.
    fn pause(&mut self, duration: Duration);

    /// Place the hardware cursor (screen coordinates), or hide it.
    fn set_cursor(&mut self, at: Option<(u16, u16)>);

    /// Usable screen size in (columns, rows).
    fn size(&self) -> (u16, u16) {
        self.panels().size()
    }

    /// Open a window on top of every other window.
    fn open_window(&mut self, area: Rect) -> io::Result<WindowId> {
        let (cols, rows) = self.size();
        if area.is_empty() || area.right() > cols || area.bottom() > rows {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("window {area:?} does not fit a {cols}x{rows} screen"),
            ));
        }
        Ok(self.panels_mut().push(area))
    }

    /// Close a window; the windows below it are redrawn on the next read.
    fn close_window(&mut self, id: WindowId) {
        self.panels_mut().remove(id);
    }

    /// Backing buffer of an open window.
    fn window(&mut self, id: WindowId) -> Option<&mut Buffer> {
        self.panels_mut().buffer_mut(id)
    }

    /// Screen rectangle of an open window.
    fn window_area(&self, id: WindowId) -> Option<Rect> {
        self.panels().area(id)
    }

    /// Reserve the bottom row for a centred help message.
    fn set_helpline(&mut self, text: Option<&str>) {
        self.panels_mut().set_helpline(text);
    }
}
