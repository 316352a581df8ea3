#![forbid(unsafe_code)]

//! Single-line string fields.
//!
//! The field edits a bound `String` in place through a fixed-width
//! viewport. Positions are character indices: `cursor` is where the next
//! character goes, `start` is the first character shown. After every
//! operation `cursor <= len` and `start <= len.saturating_sub(width)`.

use ndialog_core::event::KeyCode;
use ndialog_render::Role;

use crate::binding::Binding;
use crate::callback::{self, Verdict};
use crate::edit::{self, Common, Step};
use crate::error::{Error, Result};
use crate::flags::ObjFlags;
use crate::object::{Decor, Kind, Obj};
use crate::screen::{Canvas, Display, EditCode, Pointer, Screen};

/// State of a string field.
#[derive(Debug, Clone)]
pub struct StringField {
    value: Binding<String>,
    max_len: usize,
    width: usize,
    start: usize,
    cursor: usize,
}

impl StringField {
    /// A field showing `width` characters of at most `max_len`.
    ///
    /// The cursor starts at the end of the current content.
    #[must_use]
    pub fn new(value: Binding<String>, width: usize, max_len: usize) -> Self {
        let mut field = Self {
            value,
            max_len,
            width: width.min(max_len).max(1),
            start: 0,
            cursor: 0,
        };
        field.cursor = field.len();
        field.fix_scroll();
        field
    }

    #[must_use]
    pub const fn value(&self) -> &Binding<String> {
        &self.value
    }

    /// A copy of the text.
    #[must_use]
    pub fn text(&self) -> String {
        self.value.get()
    }

    /// Characters in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.borrow().chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.borrow().is_empty()
    }

    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    /// Visible characters.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// First visible character.
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.start
    }

    pub(crate) fn rebind(&mut self, value: Binding<String>) {
        self.value = value;
        self.cursor = self.len();
        self.start = 0;
        self.fix_scroll();
    }

    /// Clear the text and home the cursor.
    pub fn clear(&mut self) {
        self.value.borrow_mut().clear();
        self.cursor = 0;
        self.start = 0;
    }

    pub fn set_cursor(&mut self, pos: usize) -> Result<()> {
        if pos > self.len() {
            return Err(Error::Range);
        }
        self.cursor = pos;
        self.fix_scroll();
        Ok(())
    }

    /// Pull the cursor and scroll origin back inside the text, which may
    /// have been changed through another handle to the binding.
    pub(crate) fn fix_scroll(&mut self) {
        let len = self.len();
        self.cursor = self.cursor.min(len);
        if self.cursor < self.start {
            self.start = self.cursor;
        }
        if self.cursor > self.start + self.width {
            self.start = self.cursor - self.width;
        }
        self.start = self.start.min(len.saturating_sub(self.width));
    }

    /// Type one character. Returns `false` (and changes nothing) when the
    /// field is full or the cursor is at the length limit.
    pub fn type_char(&mut self, c: char, insert: bool) -> bool {
        self.fix_scroll();
        if self.cursor >= self.max_len {
            return false;
        }
        {
            let mut value = self.value.borrow_mut();
            let len = value.chars().count();
            let at = byte_index(&value, self.cursor);
            if insert || self.cursor >= len {
                if len >= self.max_len {
                    return false;
                }
                value.insert(at, c);
            } else {
                let end = byte_index(&value, self.cursor + 1);
                let mut tmp = [0u8; 4];
                value.replace_range(at..end, c.encode_utf8(&mut tmp));
            }
        }
        self.cursor += 1;
        self.fix_scroll();
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        self.fix_scroll();
        if self.cursor == 0 {
            return false;
        }
        {
            let mut value = self.value.borrow_mut();
            let at = byte_index(&value, self.cursor - 1);
            value.remove(at);
        }
        self.cursor -= 1;
        self.fix_scroll();
        true
    }

    pub fn left(&mut self) -> bool {
        self.fix_scroll();
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.fix_scroll();
        true
    }

    pub fn right(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        self.cursor += 1;
        self.fix_scroll();
        true
    }

    /// A press at content column `col`: left of the field scrolls back half
    /// a width, right of it scrolls forward, inside moves the cursor.
    pub fn click(&mut self, col: i32) {
        let len = self.len();
        let half = (self.width / 2).max(1);
        match usize::try_from(col) {
            Err(_) => {
                self.start = self.start.saturating_sub(half);
                if self.cursor > self.start + self.width {
                    self.cursor = self.start;
                }
            }
            Ok(col) if col >= self.width => {
                if self.start + self.width < len {
                    self.start = (self.start + half).min(len - self.width);
                    if self.start > self.cursor {
                        self.cursor = self.start;
                    }
                }
            }
            Ok(col) => self.cursor = (self.start + col).min(len),
        }
        self.fix_scroll();
    }

    /// The visible slice, masked when `password`.
    fn visible(&self, password: bool) -> String {
        let value = self.value.borrow();
        let chars = value.chars().skip(self.start).take(self.width);
        if password {
            chars.map(|_| '*').collect()
        } else {
            chars.collect()
        }
    }
}

fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

impl Obj {
    /// A string field `width` characters wide editing at most `max_len`.
    pub fn string(
        x: i32,
        y: i32,
        width: i32,
        max_len: usize,
        value: Binding<String>,
        decor: Decor,
    ) -> Result<Self> {
        let visible = usize::try_from(width)
            .ok()
            .filter(|&w| w > 0)
            .ok_or(Error::InvalidArgument("string width must be positive"))?;
        if max_len == 0 {
            return Err(Error::InvalidArgument("string maximum length must be positive"));
        }
        let field = StringField::new(value, visible, max_len);
        let width = i32::try_from(field.width()).unwrap_or(width);
        let boxed = decor.has_frame();
        let mut obj = Self::base(Kind::String(field), x, y, width, 1, decor);
        if boxed {
            obj.hit = obj.hit.expand(1, 0);
        }
        Ok(obj)
    }

    /// A string field that echoes `*`.
    pub fn password(
        x: i32,
        y: i32,
        width: i32,
        max_len: usize,
        value: Binding<String>,
        decor: Decor,
    ) -> Result<Self> {
        let mut obj = Self::string(x, y, width, max_len, value, decor)?;
        obj.flags.insert(ObjFlags::PASSWORD);
        Ok(obj)
    }

    #[must_use]
    pub fn as_string_mut(&mut self) -> Option<&mut StringField> {
        match &mut self.kind {
            Kind::String(f) => Some(f),
            _ => None,
        }
    }
}

pub(crate) fn draw(obj: &Obj, field: &StringField, canvas: &mut Canvas<'_>) {
    obj.draw_decor(canvas);
    let area = obj.content_area();
    let style = canvas.style(if obj.is_current() {
        Role::Selected
    } else {
        Role::Widget
    });
    canvas.blank(area.x, area.y, area.width, style);
    let text = field.visible(obj.flags.contains(ObjFlags::PASSWORD));
    canvas.put_str_max(area.x, area.y, &text, style, field.width);
    if obj.is_boxed() {
        let chars = *canvas.theme().chars();
        let arrow = canvas.style(Role::Widget);
        if field.start > 0 {
            canvas.put_char(area.x - 1, area.y, chars.left_arrow, arrow);
        }
        if field.start + field.width < field.len() {
            canvas.put_char(area.x + area.width, area.y, chars.right_arrow, arrow);
        }
    }
}

pub(crate) fn edit(
    obj: &mut Obj,
    screen: &mut Screen<'_>,
    display: &Display,
    entry: Option<Pointer>,
) -> EditCode {
    let area = obj.content_area();
    if let Some(p) = entry {
        if let Some(field) = obj.as_string_mut() {
            field.click(p.x - area.x);
        }
        screen.draw(display, obj);
    }
    loop {
        let Some(field) = obj.as_string_mut() else {
            return EditCode::Error;
        };
        field.fix_scroll();
        let col = i32::try_from(field.cursor - field.start).unwrap_or(0);
        screen.place_cursor(display, area.x + col, area.y);

        let key = match edit::key_or_code(screen.read(display)) {
            Ok(key) => key,
            Err(code) => return code,
        };
        match edit::common(&key) {
            Some(Common::Help) => {
                edit::show_help(obj, screen);
                continue;
            }
            Some(Common::Refresh) => return EditCode::Refresh,
            Some(Common::Escape) => return EditCode::Escape,
            None => {}
        }

        let insert = obj.flags.contains(ObjFlags::INSERT);
        let Kind::String(field) = &mut obj.kind else {
            return EditCode::Error;
        };
        let step = match key.code {
            KeyCode::BackTab | KeyCode::Up => Step::Done(EditCode::BackTab),
            KeyCode::Down | KeyCode::Tab => Step::Done(EditCode::Tab),
            KeyCode::Insert => {
                obj.flags.toggle(ObjFlags::INSERT);
                Step::Stay
            }
            KeyCode::Backspace => {
                if field.backspace() {
                    Step::Changed
                } else {
                    Step::Stay
                }
            }
            KeyCode::Left => {
                field.left();
                Step::Redraw
            }
            KeyCode::Right => {
                field.right();
                Step::Redraw
            }
            KeyCode::Enter => Step::Commit,
            _ => match key.printable() {
                Some(c) if field.type_char(c, insert) => Step::Changed,
                _ => Step::Beep,
            },
        };
        if matches!(step, Step::Commit) {
            match callback::run(obj, screen) {
                Verdict::Reject => {
                    if let Some(field) = obj.as_string_mut() {
                        field.fix_scroll();
                    }
                    screen.draw(display, obj);
                }
                Verdict::Accept => return EditCode::Return,
                Verdict::AcceptAndExit => return EditCode::ExitForm,
            }
            continue;
        }
        if let Some(code) = edit::settle(step, obj, screen, display) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(text: &str, width: usize, max_len: usize) -> StringField {
        StringField::new(Binding::new(text.to_string()), width, max_len)
    }

    #[test]
    fn cursor_starts_at_end() {
        let f = field("hello", 10, 20);
        assert_eq!(f.cursor(), 5);
        assert_eq!(f.scroll(), 0);

        let long = field("abcdefghijkl", 5, 20);
        assert_eq!(long.cursor(), 12);
        assert_eq!(long.scroll(), 7);
    }

    #[test]
    fn width_is_capped_by_max_len() {
        assert_eq!(field("", 30, 8).width(), 8);
    }

    #[test]
    fn overwrite_replaces_under_cursor() {
        let mut f = field("abc", 10, 10);
        f.set_cursor(1).expect("in range");
        assert!(f.type_char('X', false));
        assert_eq!(f.text(), "aXc");
        assert_eq!(f.cursor(), 2);
    }

    #[test]
    fn insert_shifts_right() {
        let mut f = field("abc", 10, 10);
        f.set_cursor(1).expect("in range");
        assert!(f.type_char('X', true));
        assert_eq!(f.text(), "aXbc");
    }

    #[test]
    fn full_field_refuses_characters() {
        let mut f = field("abc", 10, 3);
        assert!(!f.type_char('d', false));
        f.set_cursor(0).expect("in range");
        assert!(!f.type_char('d', true));
        assert!(f.type_char('d', false));
        assert_eq!(f.text(), "dbc");
    }

    #[test]
    fn backspace_deletes_before_cursor() {
        let mut f = field("héllo", 10, 10);
        f.set_cursor(2).expect("in range");
        assert!(f.backspace());
        assert_eq!(f.text(), "hllo");
        assert_eq!(f.cursor(), 1);
        f.set_cursor(0).expect("in range");
        assert!(!f.backspace());
    }

    #[test]
    fn scrolling_follows_cursor() {
        let mut f = field("", 4, 20);
        for c in "abcdefg".chars() {
            assert!(f.type_char(c, false));
        }
        assert_eq!(f.cursor(), 7);
        assert_eq!(f.scroll(), 3);
        for _ in 0..7 {
            f.left();
        }
        assert_eq!(f.scroll(), 0);
        assert!(!f.left());
    }

    #[test]
    fn clicks_scroll_by_half_width() {
        let mut f = field("abcdefghijklmnop", 4, 20);
        f.set_cursor(0).expect("in range");
        assert_eq!(f.scroll(), 0);
        f.click(4);
        assert_eq!(f.scroll(), 2);
        assert_eq!(f.cursor(), 2);
        f.click(-1);
        assert_eq!(f.scroll(), 0);
        f.click(3);
        assert_eq!(f.cursor(), 3);
    }

    #[test]
    fn set_cursor_past_end_is_range_error() {
        let mut f = field("ab", 5, 5);
        assert!(matches!(f.set_cursor(3), Err(Error::Range)));
    }

    #[test]
    fn constructor_validates() {
        let v = Binding::new(String::new());
        assert!(Obj::string(0, 0, 0, 5, v.clone(), Decor::new()).is_err());
        assert!(Obj::string(0, 0, 5, 0, v.clone(), Decor::new()).is_err());
        let framed = Obj::string(0, 0, 5, 5, v, Decor::framed()).expect("valid");
        assert_eq!(framed.hit_area().width, 7);
    }

    #[test]
    fn edits_follow_a_binding_shortened_elsewhere() {
        let value = Binding::new("abcdef".to_string());
        let mut f = StringField::new(value.clone(), 4, 10);
        assert_eq!(f.cursor(), 6);
        value.set("ab".to_string());
        assert!(f.backspace());
        assert_eq!(f.text(), "a");
        assert_eq!(f.cursor(), 1);
        assert!(f.scroll() <= f.len());

        value.set(String::new());
        assert!(f.type_char('z', true));
        assert_eq!(f.text(), "z");
        assert_eq!(f.cursor(), 1);
    }
}
