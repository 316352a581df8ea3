#![forbid(unsafe_code)]

//! Logical key translation.
//!
//! Terminals without function keys still need F1, Home, PageDown and friends.
//! [`KeyTranslator`] implements the `Ctrl-X` prefix table: `Ctrl-X` followed
//! by a second key produces the named key. It also folds the two common
//! backspace encodings (DEL and `Ctrl-H`) into [`KeyCode::Backspace`].
//!
//! [`ClickTracker`] upgrades a second press on the same cell inside a short
//! window into [`MouseEventKind::DoubleClick`].
//!
//! # Invariants
//! 1. A lone `Ctrl-X` never reaches the caller; it only arms the prefix.
//! 2. A prefixed key with no table entry is emitted unchanged.
//! 3. Non-key events never disturb a pending prefix.

use std::time::{Duration, Instant};

use crate::event::{Event, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseEventKind};

// ---------------------------------------------------------------------------
// KeyTranslator
// ---------------------------------------------------------------------------

/// Stateful `Ctrl-X` prefix interpreter.
#[derive(Debug, Clone, Default)]
pub struct KeyTranslator {
    pending: bool,
}

impl KeyTranslator {
    /// Create an idle translator.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Whether a `Ctrl-X` prefix is waiting for its second key.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Feed one event; `None` means the event was swallowed as a prefix.
    pub fn feed(&mut self, event: Event) -> Option<Event> {
        let Event::Key(key) = event else {
            return Some(event);
        };
        let key = normalize_backspace(key);
        if self.pending {
            self.pending = false;
            return Some(Event::Key(expand_prefixed(key)));
        }
        if key.is_ctrl('x') {
            self.pending = true;
            return None;
        }
        Some(Event::Key(key))
    }
}

/// Map DEL and `Ctrl-H` to Backspace.
#[must_use]
pub fn normalize_backspace(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char('\u{7f}') | KeyCode::Char('\u{8}') => KeyEvent::new(KeyCode::Backspace),
        KeyCode::Char(c) if key.ctrl() && c.eq_ignore_ascii_case(&'h') => {
            KeyEvent::new(KeyCode::Backspace)
        }
        _ => key,
    }
}

/// Translate the key that follows a `Ctrl-X` prefix.
#[must_use]
pub fn expand_prefixed(key: KeyEvent) -> KeyEvent {
    if key.code == KeyCode::Tab {
        return KeyEvent::new(KeyCode::BackTab);
    }
    let Some(c) = key.printable() else {
        return key;
    };
    let code = match c {
        '1'..='9' => KeyCode::F(c as u8 - b'0'),
        'x' => KeyCode::Delete,
        'j' => KeyCode::Down,
        'g' => KeyCode::End,
        's' => KeyCode::Home,
        'i' => KeyCode::Insert,
        'h' => KeyCode::Left,
        'f' => KeyCode::PageDown,
        'u' => KeyCode::PageUp,
        'l' => KeyCode::Right,
        'k' => KeyCode::Up,
        _ => return key,
    };
    KeyEvent::new(code).with_modifiers(Modifiers::NONE)
}

// ---------------------------------------------------------------------------
// ClickTracker
// ---------------------------------------------------------------------------

/// Default double-click window.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// Synthesizes double clicks from consecutive presses.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    interval: Duration,
    last: Option<(Instant, MouseEvent)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_INTERVAL)
    }
}

impl ClickTracker {
    /// Create a tracker with a custom window.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Observe a mouse event at `now`, returning it possibly upgraded.
    pub fn observe(&mut self, event: MouseEvent, now: Instant) -> MouseEvent {
        let MouseEventKind::Down(button) = event.kind else {
            return event;
        };
        if let Some((at, prev)) = self.last
            && prev.kind == event.kind
            && prev.position() == event.position()
            && now.saturating_duration_since(at) <= self.interval
        {
            self.last = None;
            return MouseEvent {
                kind: MouseEventKind::DoubleClick(button),
                ..event
            };
        }
        self.last = Some((now, event));
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;

    fn key(code: KeyCode) -> Event {
        Event::key(code)
    }

    #[test]
    fn prefix_is_swallowed_then_translated() {
        let mut t = KeyTranslator::new();
        assert_eq!(t.feed(Event::ctrl('x')), None);
        assert!(t.is_pending());
        assert_eq!(t.feed(Event::char('3')), Some(key(KeyCode::F(3))));
        assert!(!t.is_pending());
    }

    #[test]
    fn prefix_table() {
        let table = [
            ('x', KeyCode::Delete),
            ('j', KeyCode::Down),
            ('g', KeyCode::End),
            ('s', KeyCode::Home),
            ('i', KeyCode::Insert),
            ('h', KeyCode::Left),
            ('f', KeyCode::PageDown),
            ('u', KeyCode::PageUp),
            ('l', KeyCode::Right),
            ('k', KeyCode::Up),
        ];
        for (c, expected) in table {
            let mut t = KeyTranslator::new();
            t.feed(Event::ctrl('x'));
            assert_eq!(t.feed(Event::char(c)), Some(key(expected)), "ctrl-x {c}");
        }
    }

    #[test]
    fn prefixed_tab_is_backtab() {
        let mut t = KeyTranslator::new();
        t.feed(Event::ctrl('x'));
        assert_eq!(t.feed(key(KeyCode::Tab)), Some(key(KeyCode::BackTab)));
    }

    #[test]
    fn unknown_prefixed_key_passes_through() {
        let mut t = KeyTranslator::new();
        t.feed(Event::ctrl('x'));
        assert_eq!(t.feed(Event::char('q')), Some(Event::char('q')));
        assert_eq!(t.feed(Event::char('q')), Some(Event::char('q')));
    }

    #[test]
    fn mouse_does_not_cancel_prefix() {
        let mut t = KeyTranslator::new();
        t.feed(Event::ctrl('x'));
        assert_eq!(t.feed(Event::click(1, 1)), Some(Event::click(1, 1)));
        assert!(t.is_pending());
    }

    #[test]
    fn backspace_encodings_fold() {
        let mut t = KeyTranslator::new();
        assert_eq!(t.feed(Event::char('\u{7f}')), Some(key(KeyCode::Backspace)));
        assert_eq!(t.feed(Event::char('\u{8}')), Some(key(KeyCode::Backspace)));
        assert_eq!(t.feed(Event::ctrl('h')), Some(key(KeyCode::Backspace)));
    }

    #[test]
    fn second_press_upgrades_to_double_click() {
        let mut tracker = ClickTracker::default();
        let t0 = Instant::now();
        let press = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 4, 2);
        assert_eq!(tracker.observe(press, t0).kind, press.kind);
        let second = tracker.observe(press, t0 + Duration::from_millis(100));
        assert!(second.is_double_click());
        // A third press starts a fresh pair.
        assert!(!tracker.observe(press, t0 + Duration::from_millis(150)).is_double_click());
    }

    #[test]
    fn slow_or_moved_press_is_single() {
        let mut tracker = ClickTracker::new(Duration::from_millis(200));
        let t0 = Instant::now();
        let press = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 4, 2);
        tracker.observe(press, t0);
        assert!(!tracker.observe(press, t0 + Duration::from_millis(500)).is_double_click());
        let moved = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 5, 2);
        assert!(!tracker.observe(moved, t0 + Duration::from_millis(550)).is_double_click());
    }
}
