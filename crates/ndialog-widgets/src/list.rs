#![forbid(unsafe_code)]

//! Scrollable lists: checklists, radio lists, and menus.
//!
//! All three share one state machine over a [`ListItems`] array. A list
//! keeps a `top` (first visible row) and a `current` item; after every
//! motion `current` lies in `top..top + rows`. What selecting does depends
//! on the [`Selection`] variant:
//!
//! - `Multiple`: each item toggles independently.
//! - `Radio`: selecting an item clears every other one.
//! - `Menu`: selecting clears the others too, and commits the list.

use ndialog_core::event::KeyCode;
use ndialog_render::{Role, Style};

use crate::callback::{self, Verdict};
use crate::edit::{self, Common, Step};
use crate::error::{Error, Result};
use crate::flags::{ListMode, ListStyle, ObjFlags};
use crate::items::{ListItem, ListItems};
use crate::object::{Decor, Kind, Obj, cells};
use crate::screen::{Canvas, Display, EditCode, Pointer, Screen};

/// What selecting an item does to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    Multiple,
    Radio,
    Menu,
}

/// Outcome of a press on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// The view or cursor moved.
    Moved,
    /// The current item should toggle.
    Toggle,
}

/// State of a list.
#[derive(Debug, Clone)]
pub struct ListBox {
    items: ListItems,
    top: usize,
    current: usize,
    rows: usize,
    width: usize,
    item_offset: usize,
    mode: ListMode,
    selection: Selection,
    options: ObjFlags,
}

impl ListBox {
    #[must_use]
    pub const fn items(&self) -> &ListItems {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ListItems {
        &mut self.items
    }

    /// First visible item.
    #[must_use]
    pub const fn top(&self) -> usize {
        self.top
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&ListItem> {
        self.items.get(self.current)
    }

    /// Visible rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn mode(&self) -> ListMode {
        self.mode
    }

    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Column where item text starts.
    #[must_use]
    pub const fn item_offset(&self) -> usize {
        self.item_offset
    }

    pub(crate) fn rebind(&mut self, items: ListItems) {
        self.items = items;
        self.top = 0;
        self.current = 0;
    }

    /// Move to item `pos`, scrolling it into view.
    pub fn set_current(&mut self, pos: usize) -> Result<()> {
        if pos >= self.items.len() && !(pos == 0 && self.items.is_empty()) {
            return Err(Error::Range);
        }
        self.current = pos;
        self.keep_visible();
        Ok(())
    }

    fn keep_visible(&mut self) {
        let n = self.items.len();
        if n == 0 {
            self.top = 0;
            self.current = 0;
            return;
        }
        let rows = self.rows.max(1);
        self.current = self.current.min(n - 1);
        if self.current < self.top {
            self.top = self.current;
        }
        if self.current >= self.top + rows {
            self.top = self.current + 1 - rows;
        }
        self.top = self.top.min(n.saturating_sub(rows));
    }

    pub fn home(&mut self) {
        self.top = 0;
        if self.current >= self.rows {
            self.current = 0;
        }
        self.keep_visible();
    }

    pub fn end(&mut self) {
        self.top = self.items.len().saturating_sub(self.rows);
        if self.current < self.top {
            self.current = self.top;
        }
        self.keep_visible();
    }

    pub fn page_up(&mut self) {
        let dy = self.rows.min(self.top);
        self.top -= dy;
        self.current = self.current.saturating_sub(dy);
        self.keep_visible();
    }

    pub fn page_down(&mut self) {
        let n = self.items.len();
        let next = self.top + self.rows;
        let offset = self.current.saturating_sub(self.top);
        if next + self.rows < n {
            self.top = next;
        } else if n.saturating_sub(self.rows) > self.top {
            self.top = n - self.rows;
        }
        self.current = (self.top + offset).min(n.saturating_sub(1));
        self.keep_visible();
    }

    pub fn up(&mut self) {
        self.current = self.current.saturating_sub(1);
        self.keep_visible();
    }

    pub fn down(&mut self) {
        if self.current + 1 < self.items.len() {
            self.current += 1;
        }
        self.keep_visible();
    }

    /// Jump to the next item (wrapping, starting after the current one)
    /// whose identifier or text starts with `c`, ignoring case.
    pub fn jump(&mut self, c: char) -> bool {
        let n = self.items.len();
        let wanted = c.to_uppercase().next().unwrap_or(c);
        let by_id = self.options.contains(ObjFlags::SHOW_IDS);
        for step in 1..n {
            let idx = (self.current + step) % n;
            let Some(item) = self.items.get(idx) else {
                continue;
            };
            let key = if by_id { &item.id } else { &item.item };
            let first = key.chars().next().and_then(|k| k.to_uppercase().next());
            if first == Some(wanted) {
                self.current = idx;
                self.keep_visible();
                return true;
            }
        }
        false
    }

    /// A press `row` rows below the first visible one.
    ///
    /// Rows above the list page up, rows below page down. Inside, the
    /// cursor moves; menus only toggle on a double click.
    pub fn click(&mut self, row: i32, double: bool) -> Click {
        let Ok(row) = usize::try_from(row) else {
            if self.top > 0 {
                self.page_up();
            }
            return Click::Moved;
        };
        if row >= self.rows {
            self.page_down();
            return Click::Moved;
        }
        if self.items.is_empty() {
            return Click::Moved;
        }
        self.current = (self.top + row).min(self.items.len() - 1);
        self.keep_visible();
        if self.selection == Selection::Menu
            && (self.options.contains(ObjFlags::DEL_LIST) || !double)
        {
            Click::Moved
        } else {
            Click::Toggle
        }
    }

    /// Toggle item `index` under this list's selection rule.
    ///
    /// Returns the previous selection so a vetoed toggle can be undone, or
    /// `None` when `index` is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<Vec<bool>> {
        if index >= self.items.len() {
            return None;
        }
        let before: Vec<bool> = self.items.iter().map(|it| it.selected).collect();
        match self.selection {
            Selection::Multiple => {
                self.items.toggle(index);
            }
            Selection::Radio => {
                self.items.clear_selection_except(Some(index));
                self.items.set_selected(index, true);
            }
            Selection::Menu => {
                self.items.clear_selection_except(Some(index));
                self.items.toggle(index);
            }
        }
        Some(before)
    }

    /// Put back a selection saved by [`ListBox::toggle`].
    pub fn restore(&mut self, before: &[bool]) {
        if before.len() != self.items.len() {
            return;
        }
        for (idx, &selected) in before.iter().enumerate() {
            self.items.set_selected(idx, selected);
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        self.items.clear_selection_except(None);
    }
}

impl Obj {
    /// A checklist: items toggle independently.
    pub fn list(
        x: i32,
        y: i32,
        width: i32,
        depth: i32,
        items: ListItems,
        decor: Decor,
        style: ListStyle,
    ) -> Result<Self> {
        Self::new_list(x, y, width, depth, items, decor, style, Selection::Multiple)
    }

    /// A radio list: exactly one item is selected.
    pub fn radio_list(
        x: i32,
        y: i32,
        width: i32,
        depth: i32,
        items: ListItems,
        decor: Decor,
        style: ListStyle,
    ) -> Result<Self> {
        Self::new_list(x, y, width, depth, items, decor, style, Selection::Radio)
    }

    /// A menu: one selection, committed on choice. Renders as a selection
    /// bar unless `style` picks another mode.
    pub fn menu_list(
        x: i32,
        y: i32,
        width: i32,
        depth: i32,
        items: ListItems,
        decor: Decor,
        style: ListStyle,
    ) -> Result<Self> {
        let style = if style.bits() & 0x03 == 0 {
            style | ListStyle::MENU
        } else {
            style
        };
        Self::new_list(x, y, width, depth, items, decor, style, Selection::Menu)
    }

    #[allow(clippy::too_many_arguments)]
    fn new_list(
        x: i32,
        y: i32,
        width: i32,
        depth: i32,
        items: ListItems,
        decor: Decor,
        style: ListStyle,
        selection: Selection,
    ) -> Result<Self> {
        if items.is_empty() && (width < 0 || depth < 0) {
            return Err(Error::Fault("cannot autosize a list with no items"));
        }
        let mode = style.mode();
        let (id_width, item_width) = items.widths();
        let (mut computed, mut offset) = match mode {
            ListMode::Check => (4, 4),
            ListMode::Highlight => (2, 1),
            ListMode::Menu => (0, 0),
        };
        if style.contains(ListStyle::SHOW_IDS) {
            computed += id_width + 2;
            offset += id_width + 2;
        }
        computed += item_width;

        let width = match usize::try_from(width) {
            Err(_) => computed,
            Ok(w) if w < computed && style.contains(ListStyle::DONT_CLIP) => {
                return Err(Error::InvalidArgument("list narrower than its items"));
            }
            Ok(w) => w,
        };
        let rows = usize::try_from(depth).unwrap_or(items.len());
        if width == 0 || rows == 0 {
            return Err(Error::InvalidArgument("list needs a positive size"));
        }

        let mut options = style.object_flags();
        if !options.contains(ObjFlags::DEL_LIST) {
            options.insert(ObjFlags::CR_LIST);
        }
        match selection {
            Selection::Multiple => {}
            Selection::Radio => options.insert(ObjFlags::RADIO_LIST),
            Selection::Menu => options.insert(ObjFlags::MENU_LIST),
        }
        let list = ListBox {
            items,
            top: 0,
            current: 0,
            rows,
            width,
            item_offset: offset,
            mode,
            selection,
            options,
        };
        let boxed = decor.has_frame();
        let mut obj = Self::base(
            Kind::List(list),
            x,
            y,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(rows).unwrap_or(i32::MAX),
            decor,
        );
        obj.flags.insert(options);
        if boxed {
            obj.hit = obj.hit.expand(0, 1);
        }
        Ok(obj)
    }
}

pub(crate) fn draw(obj: &Obj, list: &ListBox, canvas: &mut Canvas<'_>) {
    obj.draw_decor(canvas);
    let area = obj.content_area();
    let n = list.items.len();
    if obj.is_boxed() && area.width > 3 {
        let tab = canvas.style(Role::Widget);
        if list.top > 0 {
            canvas.put_str(area.x + area.width - 3, area.y - 1, "(-)", tab);
        }
        if list.top + list.rows < n {
            canvas.put_str(area.x + area.width - 3, area.y + area.height, "(+)", tab);
        }
    }
    let window = canvas.style(Role::Window);
    for row in 0..area.height {
        canvas.blank(area.x, area.y + row, area.width, window);
    }
    let focused = obj.is_current();
    let visible = list.top..(list.top + list.rows).min(n);
    let mut cursor_row = None;
    for (row, idx) in (0i32..).zip(visible) {
        if idx == list.current {
            cursor_row = Some(row);
            continue;
        }
        draw_item(canvas, list, idx, area.x, area.y + row, false, focused);
    }
    if let Some(row) = cursor_row {
        draw_item(canvas, list, list.current, area.x, area.y + row, true, focused);
    }
}

fn draw_item(
    canvas: &mut Canvas<'_>,
    list: &ListBox,
    idx: usize,
    x: i32,
    y: i32,
    at_cursor: bool,
    focused: bool,
) {
    let Some(item) = list.items.get(idx) else {
        return;
    };
    let width = list.width;
    let window = canvas.style(Role::Window);
    let selected_style = canvas.style(Role::Selected);
    let offset = i32::try_from(list.item_offset).unwrap_or(0);
    let text_room = width.saturating_sub(list.item_offset);
    let show_ids = list.options.contains(ObjFlags::SHOW_IDS);

    match list.mode {
        ListMode::Check => {
            let (open, close) = if list.selection == Selection::Radio {
                ('(', ')')
            } else {
                ('[', ']')
            };
            let mark_style = if at_cursor && focused {
                selected_style
            } else {
                canvas.style(Role::Widget)
            };
            canvas.put_char(x, y, open, window);
            canvas.put_char(x + 1, y, if item.selected { 'X' } else { ' ' }, mark_style);
            canvas.put_char(x + 2, y, close, window);
            if show_ids {
                let hot = (at_cursor && focused).then_some(selected_style);
                draw_id(canvas, x + 4, y, &item.id, hot);
            }
            canvas.put_str_max(x + offset, y, &item.item, window, text_room);
        }
        ListMode::Menu => {
            let lit = at_cursor && (focused || list.options.contains(ObjFlags::ALWAYS_HIGHLIT));
            let style = match (lit, focused) {
                (true, true) => selected_style,
                (true, false) => selected_style.dim(),
                _ => window,
            };
            canvas.blank(x, y, i32::try_from(width).unwrap_or(0), style);
            if show_ids {
                draw_id(canvas, x, y, &item.id, lit.then_some(style));
            }
            canvas.put_str_max(x + offset, y, &item.item, style, text_room);
        }
        ListMode::Highlight => {
            if at_cursor && focused {
                let chars = *canvas.theme().chars();
                let arrow = canvas.style(Role::Widget);
                canvas.put_char(x, y, chars.right_arrow, arrow);
                let right = x + i32::try_from(width).unwrap_or(1) - 1;
                canvas.put_char(right, y, chars.left_arrow, arrow);
            }
            let style = if item.selected { selected_style } else { window };
            if show_ids {
                draw_id(canvas, x + 1, y, &item.id, item.selected.then_some(style));
            }
            canvas.put_str_max(x + offset, y, &item.item, style, text_room.saturating_sub(1));
        }
    }
}

/// Identifier with its hot-key letter picked out; `lit` overrides both.
fn draw_id(canvas: &mut Canvas<'_>, x: i32, y: i32, id: &str, lit: Option<Style>) {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return;
    };
    let hot = lit.unwrap_or_else(|| canvas.style(Role::Hotkey));
    let rest = lit.unwrap_or_else(|| canvas.style(Role::Widget));
    canvas.put_char(x, y, first, hot);
    let first_width = cells(first.encode_utf8(&mut [0u8; 4]));
    canvas.put_str(x + first_width, y, chars.as_str(), rest);
}

/// Toggle `index` and run the callback. Returns the code to leave with.
pub(crate) fn toggle_item(
    obj: &mut Obj,
    screen: &mut Screen<'_>,
    display: &Display,
    index: usize,
) -> Option<EditCode> {
    let Some(list) = obj.as_list_mut() else {
        return Some(EditCode::Error);
    };
    let selection = list.selection;
    let before = list.toggle(index)?;
    let verdict = callback::run(obj, screen);
    let code = match (verdict, selection) {
        (Verdict::Reject, _) => {
            if let Some(list) = obj.as_list_mut() {
                list.restore(&before);
            }
            None
        }
        (Verdict::AcceptAndExit, _) => Some(EditCode::ExitForm),
        (Verdict::Accept, Selection::Menu) => Some(EditCode::Return),
        (Verdict::Accept, _) => {
            obj.flags.insert(ObjFlags::DIRTY);
            None
        }
    };
    screen.draw(display, obj);
    code
}

pub(crate) fn edit(
    obj: &mut Obj,
    screen: &mut Screen<'_>,
    display: &Display,
    entry: Option<Pointer>,
) -> EditCode {
    let area = obj.content_area();
    if let Some(list) = obj.as_list_mut() {
        if list.selection == Selection::Menu {
            list.clear_selection();
        }
    }
    screen.draw(display, obj);
    screen.hide_cursor();

    if let Some(p) = entry {
        let Some(list) = obj.as_list_mut() else {
            return EditCode::Error;
        };
        let click = list.click(p.y - area.y, p.double);
        let current = list.current;
        screen.draw(display, obj);
        if click == Click::Toggle {
            if let Some(code) = toggle_item(obj, screen, display, current) {
                return code;
            }
        }
    }

    loop {
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
        let Some(list) = obj.as_list_mut() else {
            return EditCode::Error;
        };
        let options = list.options;
        let toggles_on_return = options.contains(ObjFlags::CR_LIST);
        let step = match key.code {
            KeyCode::BackTab | KeyCode::Left => Step::Done(EditCode::BackTab),
            KeyCode::Right | KeyCode::Tab => Step::Done(EditCode::Tab),
            KeyCode::Home => {
                list.home();
                Step::Redraw
            }
            KeyCode::End => {
                list.end();
                Step::Redraw
            }
            KeyCode::PageUp => {
                list.page_up();
                Step::Redraw
            }
            KeyCode::PageDown => {
                list.page_down();
                Step::Redraw
            }
            KeyCode::Up => {
                list.up();
                Step::Redraw
            }
            KeyCode::Down => {
                list.down();
                Step::Redraw
            }
            KeyCode::Char('u') if key.ctrl() => {
                list.page_up();
                Step::Redraw
            }
            KeyCode::Char('d') if key.ctrl() => {
                list.page_down();
                Step::Redraw
            }
            KeyCode::Char('-') if !key.ctrl() => {
                list.up();
                Step::Redraw
            }
            KeyCode::Char('+') if !key.ctrl() => {
                list.down();
                Step::Redraw
            }
            KeyCode::Backspace | KeyCode::Delete if options.contains(ObjFlags::DEL_LIST) => {
                Step::Commit
            }
            KeyCode::Char(' ') if !key.ctrl() && list.selection == Selection::Menu => Step::Stay,
            KeyCode::Char(' ') | KeyCode::Enter if toggles_on_return && !key.ctrl() => Step::Commit,
            _ => match key.printable() {
                Some(c) if !options.contains(ObjFlags::NO_HOTKEYS) => {
                    if list.jump(c) {
                        Step::Redraw
                    } else {
                        Step::Stay
                    }
                }
                _ => Step::Stay,
            },
        };
        if matches!(step, Step::Commit) {
            let current = list.current;
            if let Some(code) = toggle_item(obj, screen, display, current) {
                return code;
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

    fn items(n: usize) -> ListItems {
        (0..n)
            .map(|i| ListItem::new(format!("{i}"), format!("item {i}")))
            .collect()
    }

    fn list_of(n: usize, rows: i32, selection: Selection) -> ListBox {
        let obj = match selection {
            Selection::Multiple => Obj::list(0, 0, -1, rows, items(n), Decor::new(), ListStyle::empty()),
            Selection::Radio => {
                Obj::radio_list(0, 0, -1, rows, items(n), Decor::new(), ListStyle::empty())
            }
            Selection::Menu => Obj::menu_list(0, 0, -1, rows, items(n), Decor::new(), ListStyle::empty()),
        }
        .expect("valid list");
        obj.as_list().expect("list").clone()
    }

    fn assert_visible(list: &ListBox) {
        assert!(list.current() >= list.top());
        assert!(list.current() < list.top() + list.rows());
    }

    #[test]
    fn auto_width_depends_on_mode() {
        let check = Obj::list(0, 0, -1, -1, items(3), Decor::new(), ListStyle::empty()).expect("ok");
        assert_eq!(check.width(), 4 + 6);
        let menu = Obj::menu_list(0, 0, -1, -1, items(3), Decor::new(), ListStyle::empty())
            .expect("ok");
        assert_eq!(menu.width(), 6);
        let ids = Obj::menu_list(0, 0, -1, -1, items(3), Decor::new(), ListStyle::SHOW_IDS)
            .expect("ok");
        assert_eq!(ids.width(), 1 + 2 + 6);
        assert_eq!(ids.as_list().map(ListBox::item_offset), Some(3));
        assert_eq!(check.depth(), 3);
    }

    #[test]
    fn empty_autosized_list_is_a_fault() {
        assert!(matches!(
            Obj::list(0, 0, -1, 3, ListItems::default(), Decor::new(), ListStyle::empty()),
            Err(Error::Fault(_))
        ));
        assert!(Obj::list(0, 0, 10, 3, ListItems::default(), Decor::new(), ListStyle::empty()).is_ok());
    }

    #[test]
    fn dont_clip_rejects_narrow_width() {
        assert!(matches!(
            Obj::list(0, 0, 3, 3, items(3), Decor::new(), ListStyle::DONT_CLIP),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Obj::list(0, 0, 3, 3, items(3), Decor::new(), ListStyle::empty()).is_ok());
    }

    #[test]
    fn return_toggles_unless_delete_list() {
        let plain = Obj::list(0, 0, -1, -1, items(2), Decor::new(), ListStyle::empty()).expect("ok");
        assert!(plain.flags().contains(ObjFlags::CR_LIST));
        let del = Obj::menu_list(0, 0, -1, -1, items(2), Decor::new(), ListStyle::DEL_LIST)
            .expect("ok");
        assert!(!del.flags().contains(ObjFlags::CR_LIST));
        assert!(del.flags().contains(ObjFlags::MENU_LIST | ObjFlags::DEL_LIST));
    }

    #[test]
    fn paging_keeps_cursor_visible() {
        let mut list = list_of(20, 5, Selection::Multiple);
        list.page_down();
        assert_eq!(list.top(), 5);
        assert_eq!(list.current(), 5);
        assert_visible(&list);
        list.end();
        assert_eq!(list.top(), 15);
        assert_visible(&list);
        list.page_up();
        assert_eq!(list.top(), 10);
        assert_visible(&list);
        list.home();
        assert_eq!(list.top(), 0);
        assert_eq!(list.current(), 0);
    }

    #[test]
    fn up_and_down_scroll() {
        let mut list = list_of(4, 2, Selection::Multiple);
        list.down();
        list.down();
        assert_eq!((list.top(), list.current()), (1, 2));
        list.down();
        list.down();
        assert_eq!((list.top(), list.current()), (2, 3));
        list.up();
        list.up();
        list.up();
        assert_eq!((list.top(), list.current()), (0, 0));
    }

    #[test]
    fn type_ahead_wraps() {
        let mut list = list_of(3, 3, Selection::Multiple);
        list.rebind(
            vec![
                ListItem::new("a", "apple"),
                ListItem::new("b", "banana"),
                ListItem::new("c", "avocado"),
            ]
            .into(),
        );
        assert!(list.jump('A'));
        assert_eq!(list.current(), 2);
        assert!(list.jump('a'));
        assert_eq!(list.current(), 0);
        assert!(!list.jump('z'));
    }

    #[test]
    fn radio_toggle_selects_exactly_one() {
        let mut list = list_of(3, 3, Selection::Radio);
        list.items_mut().set_selected(1, true);
        list.toggle(2);
        assert_eq!(list.items().selected(), vec![2]);
        list.toggle(2);
        assert_eq!(list.items().selected(), vec![2]);
    }

    #[test]
    fn menu_toggle_clears_others() {
        let mut list = list_of(3, 3, Selection::Menu);
        list.toggle(0);
        list.toggle(2);
        assert_eq!(list.items().selected(), vec![2]);
        list.toggle(2);
        assert!(list.items().selected().is_empty());
    }

    #[test]
    fn restore_undoes_toggle() {
        let mut list = list_of(3, 3, Selection::Multiple);
        let before = list.toggle(1).expect("in range");
        assert_eq!(list.items().selected(), vec![1]);
        list.restore(&before);
        assert!(list.items().selected().is_empty());
        assert!(list.toggle(3).is_none());
    }

    #[test]
    fn menu_clicks_toggle_on_double_click_only() {
        let mut list = list_of(5, 3, Selection::Menu);
        assert_eq!(list.click(1, false), Click::Moved);
        assert_eq!(list.current(), 1);
        assert_eq!(list.click(2, true), Click::Toggle);
        assert_eq!(list.click(3, false), Click::Moved);
        assert_eq!(list.top(), 2);
        let mut check = list_of(5, 3, Selection::Multiple);
        assert_eq!(check.click(0, false), Click::Toggle);
    }
}
