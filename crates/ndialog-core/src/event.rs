#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Everything a form reads from the terminal arrives as an [`Event`]: a
//! logical key, a pointer event, or a resize notification. Terminal-specific
//! escape sequences never leak past this module.
//!
//! # Design Notes
//!
//! - Mouse coordinates are 0-indexed screen cells.
//! - Key release events are filtered out before they reach this type.
//! - Double clicks are synthesized by [`crate::input::ClickTracker`] because
//!   most terminals only report individual presses.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },
}

impl Event {
    /// Shorthand for a plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Shorthand for a printable character key.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    /// Shorthand for a control-character key (`Ctrl` + letter).
    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self::Key(KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL))
    }

    /// Left-button click at a screen cell.
    #[must_use]
    pub const fn click(x: u16, y: u16) -> Self {
        Self::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            x,
            y,
        ))
    }

    /// The key event, if this is one.
    #[must_use]
    pub const fn as_key(&self) -> Option<KeyEvent> {
        match self {
            Self::Key(key) => Some(*key),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key without Ctrl or Alt.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        !self.ctrl() && !self.alt() && matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if this is `Ctrl` plus the given letter (case-insensitive).
    #[must_use]
    pub fn is_ctrl(&self, c: char) -> bool {
        self.ctrl() && matches!(self.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&c))
    }

    /// The printable character carried by this key, if any.
    ///
    /// Control and Alt chords never count as printable.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.ctrl() && !self.alt() && !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Delete key.
    Delete,

    /// Insert key.
    Insert,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),

    /// Null character (Ctrl+Space or Ctrl+@).
    Null,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a mouse event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// A press or double click of any button.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(
            self.kind,
            MouseEventKind::Down(_) | MouseEventKind::DoubleClick(_)
        )
    }

    /// A synthesized double click.
    #[must_use]
    pub const fn is_double_click(&self) -> bool {
        matches!(self.kind, MouseEventKind::DoubleClick(_))
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Second press of the same button on the same cell in quick succession.
    DoubleClick(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while button held.
    Drag(MouseButton),

    /// Mouse moved (no button pressed).
    Moved,

    /// Mouse wheel scrolled up.
    ScrollUp,

    /// Mouse wheel scrolled down.
    ScrollDown,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_excludes_chords() {
        assert_eq!(KeyEvent::new(KeyCode::Char('a')).printable(), Some('a'));
        assert_eq!(
            KeyEvent::new(KeyCode::Char('a'))
                .with_modifiers(Modifiers::CTRL)
                .printable(),
            None
        );
        assert_eq!(
            KeyEvent::new(KeyCode::Char('a'))
                .with_modifiers(Modifiers::ALT)
                .printable(),
            None
        );
        assert_eq!(KeyEvent::new(KeyCode::Enter).printable(), None);
        assert_eq!(KeyEvent::new(KeyCode::Char('\u{7}')).printable(), None);
    }

    #[test]
    fn shift_does_not_hide_printable() {
        let key = KeyEvent::new(KeyCode::Char('A')).with_modifiers(Modifiers::SHIFT);
        assert_eq!(key.printable(), Some('A'));
        assert!(key.is_char('A'));
    }

    #[test]
    fn ctrl_match_ignores_case() {
        let key = KeyEvent::new(KeyCode::Char('R')).with_modifiers(Modifiers::CTRL);
        assert!(key.is_ctrl('r'));
        assert!(!key.is_char('R'));
        assert!(!KeyEvent::new(KeyCode::Char('r')).is_ctrl('r'));
    }

    #[test]
    fn event_shorthands() {
        assert_eq!(Event::char('x').as_key(), Some(KeyEvent::new(KeyCode::Char('x'))));
        assert!(Event::ctrl('u').as_key().is_some_and(|k| k.is_ctrl('u')));
        assert_eq!(Event::Resize { width: 1, height: 1 }.as_key(), None);
        match Event::click(3, 4) {
            Event::Mouse(mouse) => {
                assert!(mouse.is_press());
                assert!(!mouse.is_double_click());
                assert_eq!(mouse.position(), (3, 4));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
