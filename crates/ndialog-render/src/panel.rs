#![forbid(unsafe_code)]

//! The window stack.
//!
//! Every modal form opens one window on top of the ones below it. Each
//! window keeps its own backing [`Buffer`], so covered windows survive being
//! overdrawn. Closing a window arms a restack record: the next time input is
//! read, the surface recomposes the whole stack and repaints the screen in
//! full, which is how lower forms reappear once a nested form is gone.
//!
//! An optional help line reserves the bottom screen row for a centred
//! message; windows never cover it.

use smallvec::SmallVec;

use ndialog_core::geometry::Rect;

use crate::buffer::Buffer;
use crate::cell::{Cell, Style};
use crate::theme::{Role, Theme};

/// Handle to an open window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u32);

#[derive(Debug, Clone)]
struct Panel {
    id: WindowId,
    area: Rect,
    buffer: Buffer,
}

/// Bottom-to-top stack of windows on one screen.
#[derive(Debug, Clone)]
pub struct PanelStack {
    cols: u16,
    rows: u16,
    panels: SmallVec<[Panel; 4]>,
    next_id: u32,
    restack: bool,
    helpline: Option<String>,
}

impl PanelStack {
    /// Empty stack over a `cols` x `rows` screen.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            panels: SmallVec::new(),
            next_id: 1,
            restack: true,
            helpline: None,
        }
    }

    /// Usable screen size: the help line row is excluded.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        let reserved = u16::from(self.helpline.is_some());
        (self.cols, self.rows.saturating_sub(reserved))
    }

    /// Number of open windows.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.panels.len()
    }

    /// Physical screen changed size; existing windows keep their place.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.restack = true;
    }

    /// Set or clear the bottom help line.
    pub fn set_helpline(&mut self, text: Option<&str>) {
        self.helpline = text.map(str::to_string);
        self.restack = true;
    }

    /// Open a window on top of the stack.
    pub fn push(&mut self, area: Rect) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.panels.push(Panel {
            id,
            area,
            buffer: Buffer::new(area.width, area.height),
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(?area, depth = self.panels.len(), "window opened");
        id
    }

    /// Close a window; the stack below is scheduled for a full redraw.
    ///
    /// Returns `false` if the window was not open.
    pub fn remove(&mut self, id: WindowId) -> bool {
        let Some(pos) = self.panels.iter().position(|p| p.id == id) else {
            return false;
        };
        self.panels.remove(pos);
        self.restack = true;
        #[cfg(feature = "tracing")]
        tracing::trace!(depth = self.panels.len(), "window closed");
        true
    }

    /// Backing buffer of a window.
    pub fn buffer_mut(&mut self, id: WindowId) -> Option<&mut Buffer> {
        self.panels
            .iter_mut()
            .find(|p| p.id == id)
            .map(|p| &mut p.buffer)
    }

    /// Backing buffer of a window.
    #[must_use]
    pub fn buffer(&self, id: WindowId) -> Option<&Buffer> {
        self.panels.iter().find(|p| p.id == id).map(|p| &p.buffer)
    }

    /// Screen rectangle of a window.
    #[must_use]
    pub fn area(&self, id: WindowId) -> Option<Rect> {
        self.panels.iter().find(|p| p.id == id).map(|p| p.area)
    }

    /// Consume the restack record, if armed.
    pub fn take_restack(&mut self) -> bool {
        std::mem::take(&mut self.restack)
    }

    /// Whether a restack is pending.
    #[must_use]
    pub const fn restack_pending(&self) -> bool {
        self.restack
    }

    /// Compose the background, every window bottom to top, and the help line.
    #[must_use]
    pub fn compose(&self, theme: &Theme) -> Buffer {
        let background = theme.style(Role::Background);
        let mut screen = Buffer::filled(self.cols, self.rows, Cell::blank(background));
        for panel in &self.panels {
            screen.blit(&panel.buffer, i32::from(panel.area.x), i32::from(panel.area.y));
        }
        if let Some(text) = &self.helpline {
            let y = i32::from(self.rows) - 1;
            draw_helpline(&mut screen, y, text, theme.style(Role::Window));
        }
        screen
    }
}

fn draw_helpline(screen: &mut Buffer, y: i32, text: &str, style: Style) {
    let cols = i32::from(screen.width());
    screen.fill(0, y, cols, 1, Cell::blank(style));
    let width = ndialog_core::measure::width(text) as i32;
    let x = ((cols - width) / 2).max(0);
    screen.put_str_max(x, y, text, style, cols as usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_compose_bottom_to_top() {
        let theme = Theme::monochrome();
        let mut stack = PanelStack::new(6, 3);
        let low = stack.push(Rect::new(0, 0, 4, 2));
        let high = stack.push(Rect::new(2, 1, 3, 1));
        if let Some(b) = stack.buffer_mut(low) {
            b.fill(0, 0, 4, 2, Cell::new('a', Style::PLAIN));
        }
        if let Some(b) = stack.buffer_mut(high) {
            b.fill(0, 0, 3, 1, Cell::new('b', Style::PLAIN));
        }
        let screen = stack.compose(&theme);
        assert_eq!(screen.lines(), vec!["aaaa  ", "aabbb ", "      "]);
    }

    #[test]
    fn closing_arms_restack() {
        let mut stack = PanelStack::new(4, 4);
        assert!(stack.take_restack());
        let id = stack.push(Rect::new(0, 0, 2, 2));
        assert!(!stack.restack_pending());
        assert!(stack.remove(id));
        assert!(stack.take_restack());
        assert!(!stack.take_restack());
        assert!(!stack.remove(id));
    }

    #[test]
    fn helpline_reserves_bottom_row() {
        let theme = Theme::monochrome();
        let mut stack = PanelStack::new(10, 5);
        assert_eq!(stack.size(), (10, 5));
        stack.set_helpline(Some("help"));
        assert_eq!(stack.size(), (10, 4));
        let screen = stack.compose(&theme);
        assert_eq!(screen.row_text(4), "   help   ");
    }

    #[test]
    fn closing_middle_window_keeps_order() {
        let mut stack = PanelStack::new(4, 4);
        let a = stack.push(Rect::new(0, 0, 1, 1));
        let b = stack.push(Rect::new(0, 0, 1, 1));
        let c = stack.push(Rect::new(0, 0, 1, 1));
        stack.remove(b);
        assert_eq!(stack.depth(), 2);
        assert!(stack.area(a).is_some());
        assert!(stack.area(c).is_some());
        assert!(stack.area(b).is_none());
    }
}
