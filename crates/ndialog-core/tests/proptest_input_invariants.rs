//! Property-based invariant tests for key translation and text measurement.
//!
//! 1. A `Ctrl-X` prefix swallows exactly one event and never leaks itself.
//! 2. Keys without a prefix pass through unchanged (backspace folding aside).
//! 3. `truncate` returns a prefix that fits the requested width.
//! 4. `str_depth` agrees with the number of lines `str::lines` yields.
//! 5. `Rect::centered` always lands inside its container.

use ndialog_core::event::{Event, KeyCode};
use ndialog_core::geometry::Rect;
use ndialog_core::input::KeyTranslator;
use ndialog_core::measure::{str_depth, truncate, width};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn plain_char() -> impl Strategy<Value = char> {
    prop::char::range('a', 'z')
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just('a'),
            Just('Z'),
            Just(' '),
            Just('\n'),
            Just('日'),
            Just('é'),
        ],
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Prefix swallows exactly one event
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prefix_consumes_one_key(c in plain_char(), tail in prop::collection::vec(plain_char(), 0..8)) {
        let mut t = KeyTranslator::new();
        prop_assert_eq!(t.feed(Event::ctrl('x')), None);
        let first = t.feed(Event::char(c));
        prop_assert!(first.is_some());
        prop_assert!(first != Some(Event::ctrl('x')));
        for k in tail {
            prop_assert_eq!(t.feed(Event::char(k)), Some(Event::char(k)));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Pass-through without prefix
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unprefixed_keys_pass_through(keys in prop::collection::vec(plain_char(), 0..16)) {
        let mut t = KeyTranslator::new();
        for k in keys {
            prop_assert_eq!(t.feed(Event::char(k)), Some(Event::char(k)));
        }
        prop_assert_eq!(t.feed(Event::key(KeyCode::F(1))), Some(Event::key(KeyCode::F(1))));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Truncate fits and is a prefix
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn truncate_fits(text in text_strategy(), max in 0usize..30) {
        let line = text.replace('\n', "");
        let cut = truncate(&line, max);
        prop_assert!(width(cut) <= max);
        prop_assert!(line.starts_with(cut));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Depth matches line iteration
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn depth_matches_lines(text in text_strategy()) {
        prop_assert_eq!(str_depth(&text), text.lines().count());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Centering stays inside
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn centered_inside(cols in 1u16..300, rows in 1u16..100, w in 0u16..400, h in 0u16..200) {
        let screen = Rect::from_size(cols, rows);
        let r = screen.centered(w, h);
        prop_assert!(r.right() <= screen.right());
        prop_assert!(r.bottom() <= screen.bottom());
        prop_assert_eq!(r.width, w.min(cols));
        prop_assert_eq!(r.height, h.min(rows));
    }
}
