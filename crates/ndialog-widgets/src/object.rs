#![forbid(unsafe_code)]

//! The widget model.
//!
//! An [`Obj`] is one item of a form: shared geometry, decoration, flags,
//! an optional commit callback and help topic, plus a [`Kind`] holding the
//! state of the particular widget. Kind-specific constructors live next to
//! each kind's behaviour (`Obj::string` in [`crate::string`], and so on).
//!
//! Coordinates are form coordinates. The content area sits at an offset
//! from the object's origin that depends on its decoration: a title pushes
//! content down a row, a frame pushes it down and right by one cell, and a
//! prefix pushes it right by its width.

use std::fmt;

use ndialog_core::geometry::Region;
use ndialog_core::measure;
use ndialog_render::Role;

use crate::binding::Binding;
use crate::button::Button;
use crate::callback::{Callback, Verdict};
use crate::check::CheckBox;
use crate::custom::{CustomKind, KindId};
use crate::edit_list::EditableList;
use crate::error::{Error, Result};
use crate::flags::ObjFlags;
use crate::gauge::Gauge;
use crate::indexed_menu::IndexedMenu;
use crate::items::ListItems;
use crate::list::ListBox;
use crate::screen::{Canvas, Screen};
use crate::string::StringField;
use crate::text::TextView;

/// Title, prefix, and suffix of an object.
///
/// Any prefix or suffix, even an empty one, puts a frame around the
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decor {
    pub title: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl Decor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame with no prefix text.
    #[must_use]
    pub fn framed() -> Self {
        Self::new().with_prefix("")
    }

    /// Split `"prefix|suffix"`; a string without `|` is all prefix.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('|') {
            Some((prefix, suffix)) => Self::new().with_prefix(prefix).with_suffix(suffix),
            None => Self::new().with_prefix(spec),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Whether a prefix or suffix asks for a frame.
    #[must_use]
    pub fn has_frame(&self) -> bool {
        self.prefix.is_some() || self.suffix.is_some()
    }

    fn prefix_width(&self) -> i32 {
        self.prefix.as_deref().map_or(0, cells)
    }

    fn suffix_width(&self) -> i32 {
        self.suffix.as_deref().map_or(0, cells)
    }
}

pub(crate) fn cells(s: &str) -> i32 {
    i32::try_from(measure::str_width(s)).unwrap_or(i32::MAX)
}

/// Widget state, one variant per kind.
pub enum Kind {
    String(StringField),
    Check(CheckBox),
    Button(Button),
    List(ListBox),
    Gauge(Gauge),
    Text(TextView),
    EditList(Box<EditableList>),
    IndexedMenu(Box<IndexedMenu>),
    Custom(Box<CustomKind>),
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Check(c) => f.debug_tuple("Check").field(c).finish(),
            Self::Button(b) => f.debug_tuple("Button").field(b).finish(),
            Self::List(l) => f.debug_tuple("List").field(l).finish(),
            Self::Gauge(g) => f.debug_tuple("Gauge").field(g).finish(),
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::EditList(_) => f.write_str("EditList(..)"),
            Self::IndexedMenu(_) => f.write_str("IndexedMenu(..)"),
            Self::Custom(c) => f.debug_tuple("Custom").field(&c.kind()).finish(),
        }
    }
}

/// Discriminant of a [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    String,
    Check,
    Button,
    List,
    Gauge,
    Text,
    EditList,
    IndexedMenu,
    Custom(KindId),
}

impl Class {
    /// Name used in logs and by [`Obj::id`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Check => "check",
            Self::Button => "button",
            Self::List => "list",
            Self::Gauge => "gauge",
            Self::Text => "text",
            Self::EditList => "list-editor",
            Self::IndexedMenu => "indexed-menu",
            Self::Custom(_) => "custom",
        }
    }
}

/// New content for [`Obj::set_data`].
#[derive(Debug, Clone)]
pub enum Data {
    Text(Binding<String>),
    Flag(Binding<bool>),
    Percent(Binding<i32>),
    Items(ListItems),
    Lines(Vec<String>),
}

/// One item of a form.
pub struct Obj {
    pub(crate) kind: Kind,
    pub(crate) x: i32,
    pub(crate) y: i32,
    /// Content origin relative to `(x, y)`.
    pub(crate) offset: (i32, i32),
    pub(crate) width: i32,
    pub(crate) depth: i32,
    /// Mouse rectangle relative to `(x, y)`.
    pub(crate) hit: Region,
    pub(crate) decor: Decor,
    pub(crate) flags: ObjFlags,
    pub(crate) callback: Option<Callback>,
    pub(crate) help: Option<String>,
}

impl fmt::Debug for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Obj")
            .field("kind", &self.kind)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("decor", &self.decor)
            .field("flags", &self.flags)
            .field("callback", &self.callback.is_some())
            .field("help", &self.help)
            .finish()
    }
}

impl Obj {
    /// Shared construction: compute the content offset from the
    /// decoration and start out writable.
    pub(crate) fn base(kind: Kind, x: i32, y: i32, width: i32, depth: i32, decor: Decor) -> Self {
        let mut offset = (0, 0);
        if decor.title.is_some() {
            offset.1 += 1;
        }
        match kind {
            Kind::Check(_) => offset.0 += 1,
            Kind::Text(_) => {
                offset.0 += 1;
                offset.1 += 1;
            }
            Kind::String(_) | Kind::List(_) | Kind::Gauge(_) if decor.has_frame() => {
                offset.0 += 1;
                offset.1 += 1;
            }
            _ => {}
        }
        offset.0 += decor.prefix_width();
        Self {
            kind,
            x,
            y,
            offset,
            width,
            depth,
            hit: Region::new(offset.0, offset.1, width, depth),
            decor,
            flags: ObjFlags::WRITABLE,
            callback: None,
            help: None,
        }
    }

    /// Install a commit callback.
    #[must_use]
    pub fn with_callback(
        mut self,
        callback: impl FnMut(&mut Obj, &mut Screen<'_>) -> Verdict + 'static,
    ) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Attach a help topic.
    #[must_use]
    pub fn with_help(mut self, topic: impl Into<String>) -> Self {
        self.help = Some(topic.into());
        self
    }

    /// Start out read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.flags.remove(ObjFlags::WRITABLE);
        self
    }

    pub fn set_callback(&mut self, callback: Option<Callback>) {
        self.callback = callback;
    }

    #[must_use]
    pub const fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut Kind {
        &mut self.kind
    }

    #[must_use]
    pub fn class(&self) -> Class {
        match &self.kind {
            Kind::String(_) => Class::String,
            Kind::Check(_) => Class::Check,
            Kind::Button(_) => Class::Button,
            Kind::List(_) => Class::List,
            Kind::Gauge(_) => Class::Gauge,
            Kind::Text(_) => Class::Text,
            Kind::EditList(_) => Class::EditList,
            Kind::IndexedMenu(_) => Class::IndexedMenu,
            Kind::Custom(c) => Class::Custom(c.kind()),
        }
    }

    /// Identification string.
    #[must_use]
    pub fn id(&self) -> &str {
        match &self.kind {
            Kind::Custom(c) => c.widget().id(),
            Kind::Text(t) if t.is_page() => "help",
            Kind::List(l) if l.mode() == crate::flags::ListMode::Menu => "menu",
            _ => self.class().name(),
        }
    }

    #[must_use]
    pub const fn is_button(&self) -> bool {
        matches!(self.kind, Kind::Button(_))
    }

    // ── geometry ──────────────────────────────────────────────────────

    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Move the object; sub-widgets of composites move with it.
    pub fn set_position(&mut self, x: i32, y: i32) {
        let (dx, dy) = (x - self.x, y - self.y);
        self.x = x;
        self.y = y;
        match &mut self.kind {
            Kind::EditList(w) => w.shift(dx, dy),
            Kind::IndexedMenu(w) => w.shift(dx, dy),
            _ => {}
        }
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// Where the content is drawn.
    #[must_use]
    pub const fn content_area(&self) -> Region {
        Region::new(
            self.x + self.offset.0,
            self.y + self.offset.1,
            self.width,
            self.depth,
        )
    }

    /// Where presses count as landing on this object.
    #[must_use]
    pub const fn hit_area(&self) -> Region {
        Region::new(
            self.x + self.hit.x,
            self.y + self.hit.y,
            self.hit.width,
            self.hit.height,
        )
    }

    /// Place the content area at an absolute position (buttons).
    pub(crate) fn place_content(&mut self, x: i32, y: i32) {
        self.x = x - self.offset.0;
        self.y = y - self.offset.1;
    }

    /// Whether the content sits inside a frame.
    #[must_use]
    pub fn is_boxed(&self) -> bool {
        match self.kind {
            Kind::Text(_) => true,
            Kind::String(_) | Kind::List(_) | Kind::Gauge(_) => self.decor.has_frame(),
            _ => false,
        }
    }

    /// Footprint before form layout: content plus decoration.
    #[must_use]
    pub fn natural_size(&self) -> (i32, i32) {
        match &self.kind {
            Kind::Button(_) => return (0, 1),
            Kind::EditList(_) | Kind::IndexedMenu(_) => return (self.width, self.depth),
            _ => {}
        }
        let (width, depth) = match &self.kind {
            Kind::Custom(c) => c.widget().size(self.width, self.depth),
            _ => (self.width, self.depth),
        };
        let mut dx = width + self.decor.prefix_width() + self.decor.suffix_width();
        let mut dy = depth;
        if let Some(title) = &self.decor.title {
            dx = dx.max(cells(title));
            dy += 1;
        }
        if matches!(self.kind, Kind::Check(_)) {
            dx += 2;
        } else if self.is_boxed() {
            dx += 2;
            dy += 2;
        }
        (dx, dy)
    }

    /// Origin used by layout; buttons are placed by the form.
    #[must_use]
    pub const fn layout_origin(&self) -> (i32, i32) {
        if self.is_button() { (0, 0) } else { (self.x, self.y) }
    }

    // ── flags ─────────────────────────────────────────────────────────

    #[must_use]
    pub const fn flags(&self) -> ObjFlags {
        self.flags
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.flags.contains(ObjFlags::WRITABLE)
    }

    pub fn set_writable(&mut self, writable: bool) {
        self.flags.set(ObjFlags::WRITABLE, writable);
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.flags.contains(ObjFlags::HIDDEN)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.flags.set(ObjFlags::HIDDEN, hidden);
        self.touch();
    }

    /// Whether focus can land here.
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        self.is_writable() && !self.is_hidden()
    }

    #[must_use]
    pub const fn is_current(&self) -> bool {
        self.flags.contains(ObjFlags::CURRENT)
    }

    /// Whether a redraw is pending.
    #[must_use]
    pub const fn is_touched(&self) -> bool {
        self.flags.contains(ObjFlags::WRITTEN)
    }

    /// Ask for a redraw after the current dispatch.
    pub fn touch(&mut self) {
        self.flags.insert(ObjFlags::WRITTEN);
    }

    pub(crate) fn untouch(&mut self) {
        self.flags.remove(ObjFlags::WRITTEN);
    }

    /// Whether the content changed while focused.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.flags.contains(ObjFlags::DIRTY)
    }

    // ── decoration and help ───────────────────────────────────────────

    #[must_use]
    pub const fn decor(&self) -> &Decor {
        &self.decor
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            Kind::Button(b) => Some(b.label()),
            _ => self.decor.title.as_deref(),
        }
    }

    pub fn set_title(&mut self, title: Option<String>) {
        match &mut self.kind {
            Kind::Button(b) => {
                if let Some(label) = title {
                    b.set_label(label);
                    self.width = cells(b.label());
                    self.hit.width = self.width;
                }
            }
            _ => self.decor.title = title,
        }
        self.touch();
    }

    /// Help topic; a list prefers its current item's.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        if let Kind::List(list) = &self.kind {
            if let Some(help) = list.current_item().and_then(|it| it.help.as_deref()) {
                return Some(help);
            }
        }
        self.help.as_deref()
    }

    pub fn set_help(&mut self, topic: Option<String>) {
        self.help = topic;
    }

    // ── content ───────────────────────────────────────────────────────

    /// Rebind content; cursors go back to their starting places.
    pub fn set_data(&mut self, data: Data) -> Result<()> {
        match (&mut self.kind, data) {
            (Kind::String(f), Data::Text(value)) => f.rebind(value),
            (Kind::Check(c), Data::Flag(value)) => c.rebind(value),
            (Kind::Gauge(g), Data::Percent(value)) => g.rebind(value),
            (Kind::List(l), Data::Items(items)) => l.rebind(items),
            (Kind::Text(t), Data::Lines(lines)) => t.rebind_lines(lines),
            (Kind::EditList(w), Data::Items(items)) => w.rebind(items),
            _ => return Err(Error::InvalidArgument("content does not match the widget kind")),
        }
        self.touch();
        Ok(())
    }

    /// Cursor: string column, list index, or text top line.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        match &self.kind {
            Kind::String(f) => Some(f.cursor()),
            Kind::List(l) => Some(l.current()),
            Kind::Text(t) => Some(t.top()),
            Kind::EditList(w) => w.list().map(ListBox::current),
            Kind::IndexedMenu(w) => Some(w.index_cursor()),
            Kind::Custom(c) => c.widget().cursor(),
            _ => None,
        }
    }

    /// Move the cursor; lists scroll to keep it visible.
    pub fn set_cursor(&mut self, pos: usize) -> Result<()> {
        match &mut self.kind {
            Kind::String(f) => f.set_cursor(pos)?,
            Kind::List(l) => l.set_current(pos)?,
            Kind::Text(t) => t.set_top(pos)?,
            Kind::EditList(w) => w
                .list_mut()
                .ok_or(Error::Fault("list editor lost its list"))?
                .set_current(pos)?,
            Kind::IndexedMenu(w) => w.set_index_cursor(pos)?,
            Kind::Custom(c) => c.widget_mut().set_cursor(pos)?,
            _ => return Err(Error::InvalidArgument("object has no cursor")),
        }
        self.touch();
        Ok(())
    }

    #[must_use]
    pub fn as_string(&self) -> Option<&StringField> {
        match &self.kind {
            Kind::String(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_check(&self) -> Option<&CheckBox> {
        match &self.kind {
            Kind::Check(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_button(&self) -> Option<&Button> {
        match &self.kind {
            Kind::Button(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&ListBox> {
        match &self.kind {
            Kind::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListBox> {
        match &mut self.kind {
            Kind::List(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_gauge(&self) -> Option<&Gauge> {
        match &self.kind {
            Kind::Gauge(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&TextView> {
        match &self.kind {
            Kind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextView> {
        match &mut self.kind {
            Kind::Text(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_edit_list(&self) -> Option<&EditableList> {
        match &self.kind {
            Kind::EditList(w) => Some(w),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_indexed_menu(&self) -> Option<&IndexedMenu> {
        match &self.kind {
            Kind::IndexedMenu(w) => Some(w),
            _ => None,
        }
    }

    // ── drawing ───────────────────────────────────────────────────────

    /// Draw the object, decoration included. Hidden objects draw nothing.
    pub fn draw(&self, canvas: &mut Canvas<'_>) {
        if self.is_hidden() {
            return;
        }
        match &self.kind {
            Kind::String(f) => crate::string::draw(self, f, canvas),
            Kind::Check(c) => crate::check::draw(self, c, canvas),
            Kind::Button(b) => crate::button::draw(self, b, canvas),
            Kind::List(l) => crate::list::draw(self, l, canvas),
            Kind::Gauge(g) => crate::gauge::draw(self, g, canvas),
            Kind::Text(t) => crate::text::draw(self, t, canvas),
            Kind::EditList(w) => w.draw(self, canvas),
            Kind::IndexedMenu(w) => w.draw(self, canvas),
            Kind::Custom(c) => {
                self.draw_decor(canvas);
                c.widget().draw(self.content_area(), self.is_current(), canvas);
            }
        }
    }

    /// Title, frame, prefix, and suffix.
    pub(crate) fn draw_decor(&self, canvas: &mut Canvas<'_>) {
        let (x, mut y) = (self.x, self.y);
        let prefix_width = self.decor.prefix_width();
        let boxed = self.is_boxed();
        if let Some(title) = &self.decor.title {
            let tx = if boxed {
                x + prefix_width + 1
            } else if matches!(self.kind, Kind::Check(_)) {
                x + prefix_width
            } else {
                x
            };
            canvas.put_str(tx, y, title, canvas.style(Role::Title));
            y += 1;
        }
        if !boxed {
            return;
        }
        let role = if self.is_current() { Role::Active } else { Role::Window };
        canvas.frame(
            Region::new(x + prefix_width, y, self.width + 2, self.depth + 2),
            0,
            role,
            role,
        );
        y += 1;
        let window = canvas.style(Role::Window);
        if let Some(prefix) = &self.decor.prefix {
            canvas.put_str(x, y, prefix, window);
        }
        if let Some(suffix) = &self.decor.suffix {
            canvas.put_str(x + prefix_width + 2 + self.width, y, suffix, window);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decor_parse_splits_on_bar() {
        let d = Decor::parse("Name:|chars");
        assert_eq!(d.prefix.as_deref(), Some("Name:"));
        assert_eq!(d.suffix.as_deref(), Some("chars"));
        assert_eq!(Decor::parse("only").suffix, None);
        assert!(Decor::framed().has_frame());
        assert!(!Decor::new().with_title("t").has_frame());
    }

    #[test]
    fn content_offset_follows_decoration() {
        let value = Binding::new(String::new());
        let plain = Obj::string(2, 3, 10, 10, value.clone(), Decor::new()).expect("valid");
        assert_eq!(plain.content_area(), Region::new(2, 3, 10, 1));

        let titled = Obj::string(2, 3, 10, 10, value.clone(), Decor::new().with_title("T"))
            .expect("valid");
        assert_eq!(titled.content_area(), Region::new(2, 4, 10, 1));

        let framed = Obj::string(
            2,
            3,
            10,
            10,
            value,
            Decor::new().with_title("T").with_prefix("Name:"),
        )
        .expect("valid");
        assert_eq!(framed.content_area(), Region::new(8, 5, 10, 1));
    }

    #[test]
    fn check_shifts_one_column() {
        let obj = Obj::check(0, 0, Binding::new(false), Decor::new()).expect("valid");
        assert_eq!(obj.content_area(), Region::new(1, 0, 1, 1));
        assert_eq!(obj.natural_size(), (3, 1));
    }

    #[test]
    fn natural_size_counts_frame_and_title() {
        let obj = Obj::string(
            0,
            0,
            10,
            20,
            Binding::new(String::new()),
            Decor::new().with_title("A long title here").with_prefix("P:"),
        )
        .expect("valid");
        // max(10 + 2, 17) + frame, 1 + title + frame
        assert_eq!(obj.natural_size(), (19, 4));
        assert_eq!(
            Obj::button(0, "OK").expect("label").natural_size(),
            (0, 1)
        );
    }

    #[test]
    fn set_data_rejects_mismatched_content() {
        let mut obj = Obj::check(0, 0, Binding::new(false), Decor::new()).expect("valid");
        assert!(matches!(
            obj.set_data(Data::Lines(vec![])),
            Err(Error::InvalidArgument(_))
        ));
        assert!(obj.set_data(Data::Flag(Binding::new(true))).is_ok());
        assert!(obj.as_check().is_some_and(CheckBox::checked));
    }

    #[test]
    fn focusability_follows_flags() {
        let mut obj = Obj::gauge(0, 0, 10, Binding::new(50), Decor::new()).expect("valid");
        assert!(!obj.is_writable());
        obj.set_writable(true);
        assert!(obj.is_focusable());
        obj.set_hidden(true);
        assert!(!obj.is_focusable());
        assert!(obj.is_touched());
    }
}
