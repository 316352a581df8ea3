#![forbid(unsafe_code)]

//! The list editor: an entry field and a list, with buttons to add, update,
//! and delete items.
//!
//! ```text
//! +------------+
//! | entry      | [ADD]
//! +------------+
//! | list       | [UPDATE]
//! |            | [DELETE]
//! +------------+
//! ```
//!
//! The parts are ordinary objects. The editor runs its own small focus
//! loop over them and acts when one of them commits: Return in the entry
//! or on ADD inserts, Delete in the list or on DELETE removes the current
//! item, UPDATE replaces it with the entry text. Each action can be vetoed
//! by a hook.

use ndialog_core::geometry::Region;
use ndialog_render::Role;

use crate::binding::Binding;
use crate::callback::Verdict;
use crate::edit::{self, Entry};
use crate::error::{Error, Result};
use crate::flags::ListStyle;
use crate::items::{ListItem, ListItems};
use crate::list::ListBox;
use crate::object::{Decor, Kind, Obj};
use crate::screen::{Canvas, Display, EditCode, Screen};

/// Columns the editor adds to the list width: `[DELETE]`, a gap, and the
/// list frame.
pub const WIDGET_WIDTH: i32 = 8 + 1 + 2;
/// Rows the editor adds to the list depth: the entry and the frames.
pub const WIDGET_DEPTH: i32 = 4;

/// Vets text about to be added.
pub type InsertHook = Box<dyn FnMut(&str, &mut Screen<'_>) -> Verdict>;
/// Vets the item about to be removed.
pub type DeleteHook = Box<dyn FnMut(&ListItem, &mut Screen<'_>) -> Verdict>;
/// Vets replacing item `index` with the entry text.
pub type UpdateHook = Box<dyn FnMut(usize, &str, &mut Screen<'_>) -> Verdict>;

const ENTRY: usize = 0;
const ADD: usize = 1;
const LIST: usize = 2;
const UPDATE: usize = 3;
const DELETE: usize = 4;
const PARTS: usize = 5;

/// State of a list editor.
pub struct EditableList {
    entry: Obj,
    add: Obj,
    list: Obj,
    update: Option<Obj>,
    delete: Obj,
    active: usize,
    on_insert: Option<InsertHook>,
    on_delete: Option<DeleteHook>,
    on_update: Option<UpdateHook>,
}

impl EditableList {
    /// The list part.
    #[must_use]
    pub fn list(&self) -> Option<&ListBox> {
        self.list.as_list()
    }

    pub fn list_mut(&mut self) -> Option<&mut ListBox> {
        self.list.as_list_mut()
    }

    #[must_use]
    pub fn items(&self) -> Option<&ListItems> {
        self.list().map(ListBox::items)
    }

    fn item_count(&self) -> usize {
        self.items().map_or(0, ListItems::len)
    }

    fn current(&self) -> usize {
        self.list().map_or(0, ListBox::current)
    }

    /// Text in the entry field.
    #[must_use]
    pub fn entry_text(&self) -> String {
        self.entry.as_string().map(|f| f.text()).unwrap_or_default()
    }

    /// Index of the part that had focus last.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    pub(crate) fn rebind(&mut self, items: ListItems) {
        if let Some(list) = self.list_mut() {
            list.rebind(items);
        }
    }

    pub(crate) fn shift(&mut self, dx: i32, dy: i32) {
        for part in self.parts_mut().into_iter().flatten() {
            let (x, y) = part.position();
            part.set_position(x + dx, y + dy);
        }
    }

    fn parts_mut(&mut self) -> [Option<&mut Obj>; PARTS] {
        [
            Some(&mut self.entry),
            Some(&mut self.add),
            Some(&mut self.list),
            self.update.as_mut(),
            Some(&mut self.delete),
        ]
    }

    fn part(&self, idx: usize) -> Option<&Obj> {
        match idx {
            ENTRY => Some(&self.entry),
            ADD => Some(&self.add),
            LIST => Some(&self.list),
            UPDATE => self.update.as_ref(),
            DELETE => Some(&self.delete),
            _ => None,
        }
    }

    fn part_mut(&mut self, idx: usize) -> Option<&mut Obj> {
        self.parts_mut().into_iter().nth(idx).flatten()
    }

    /// Whether focus may rest on part `idx`.
    fn stops_at(&self, idx: usize) -> bool {
        if self.part(idx).is_none() {
            return false;
        }
        match idx {
            ADD => !self.entry_text().is_empty(),
            LIST | DELETE => self.item_count() > 0,
            _ => true,
        }
    }

    fn next_stop(&self, from: usize) -> Option<usize> {
        (from + 1..PARTS).find(|&idx| self.stops_at(idx))
    }

    fn prev_stop(&self, from: usize) -> Option<usize> {
        (0..from).rev().find(|&idx| self.stops_at(idx))
    }

    fn first_part(&self, entry: Entry) -> usize {
        match entry {
            Entry::Forward => ENTRY,
            Entry::Backward => self.prev_stop(PARTS).unwrap_or(ENTRY),
            Entry::Resume => self.active,
            Entry::Press(p) => (0..PARTS)
                .find(|&idx| self.part(idx).is_some_and(|o| p.inside(o.hit_area())))
                .unwrap_or(self.active),
        }
    }

    /// Add the entry text as a new last item and clear the entry.
    pub fn insert(&mut self, screen: &mut Screen<'_>) -> Option<EditCode> {
        let text = self.entry_text();
        if text.is_empty() {
            return None;
        }
        let verdict = run_hook(&mut self.on_insert, |hook| hook(&text, screen));
        if verdict == Verdict::Reject {
            return None;
        }
        let Some(list) = self.list_mut() else {
            return Some(EditCode::Error);
        };
        list.items_mut().add(ListItem::new(text.clone(), text));
        let last = list.items().len() - 1;
        // In range: the item was just added.
        let _ = list.set_current(last);
        if let Some(field) = self.entry.as_string_mut() {
            field.clear();
        }
        self.entry.touch();
        (verdict == Verdict::AcceptAndExit).then_some(EditCode::ExitForm)
    }

    /// Remove the current item.
    pub fn delete(&mut self, screen: &mut Screen<'_>) -> Option<EditCode> {
        let current = self.current();
        let item = self.items()?.get(current)?.clone();
        let verdict = run_hook(&mut self.on_delete, |hook| hook(&item, screen));
        if verdict == Verdict::Reject {
            return None;
        }
        let Some(list) = self.list_mut() else {
            return Some(EditCode::Error);
        };
        if list.items_mut().delete(current).is_err() {
            return Some(EditCode::Error);
        }
        let len = list.items().len();
        let next = if current < len { current } else { current.saturating_sub(1) };
        let _ = list.set_current(next);
        (verdict == Verdict::AcceptAndExit).then_some(EditCode::ExitForm)
    }

    /// Replace the current item's text with the entry text.
    pub fn update(&mut self, screen: &mut Screen<'_>) -> Option<EditCode> {
        let current = self.current();
        let text = self.entry_text();
        if text.is_empty() || current >= self.item_count() {
            return None;
        }
        let verdict = run_hook(&mut self.on_update, |hook| hook(current, &text, screen));
        if verdict == Verdict::Reject {
            return None;
        }
        let updated = self
            .list_mut()
            .map(|list| list.items_mut().update(current, text));
        if !matches!(updated, Some(Ok(()))) {
            return Some(EditCode::Error);
        }
        if let Some(field) = self.entry.as_string_mut() {
            field.clear();
        }
        (verdict == Verdict::AcceptAndExit).then_some(EditCode::ExitForm)
    }

    pub(crate) fn draw(&self, obj: &Obj, canvas: &mut Canvas<'_>) {
        let (x, mut y) = obj.position();
        let mut depth = obj.depth();
        if let Some(title) = obj.title() {
            canvas.put_str(x, y, title, canvas.style(Role::Title));
            y += 1;
            depth -= 1;
        }
        let role = if obj.is_current() { Role::Active } else { Role::Window };
        canvas.frame(
            Region::new(x, y, self.list.width() + 2, depth),
            2,
            role,
            role,
        );
        for idx in [ENTRY, ADD, LIST, DELETE, UPDATE] {
            if let Some(part) = self.part(idx) {
                part.draw(canvas);
            }
        }
    }
}

/// Run an optional hook; without one, everything is accepted.
fn run_hook<H>(slot: &mut Option<H>, call: impl FnOnce(&mut H) -> Verdict) -> Verdict {
    slot.as_mut().map_or(Verdict::Accept, call)
}

impl Obj {
    /// A list editor whose list is `width` by `depth` cells.
    pub fn edit_list(
        x: i32,
        y: i32,
        width: i32,
        depth: i32,
        items: ListItems,
        decor: Decor,
    ) -> Result<Self> {
        if width <= 0 || depth <= 0 {
            return Err(Error::InvalidArgument("list editor needs a positive size"));
        }
        let titled = decor.title.is_some();
        let top = if titled { y + 1 } else { y };

        let list = Self::menu_list(
            x,
            top + 2,
            width,
            depth,
            items,
            Decor::framed(),
            ListStyle::MENU | ListStyle::DEL_LIST | ListStyle::ALWAYS_HIGHLIT,
        )?;
        let max_len = usize::try_from(width).unwrap_or(1);
        let entry = Self::string(x, top, width, max_len, Binding::default(), Decor::framed())?;
        let mut add = Self::button(0, "ADD")?;
        add.place_content(x + width + 3, top + 1);
        let mut delete = Self::button(0, "DELETE")?;
        delete.place_content(x + width + 3, top + 3);

        let editor = EditableList {
            entry,
            add,
            list,
            update: None,
            delete,
            active: ENTRY,
            on_insert: None,
            on_delete: None,
            on_update: None,
        };
        let mut obj = Self::base(
            Kind::EditList(Box::new(editor)),
            x,
            y,
            width + WIDGET_WIDTH,
            depth + WIDGET_DEPTH + i32::from(titled),
            decor,
        );
        obj.hit = Region::new(0, 0, obj.width, obj.depth);
        Ok(obj)
    }

    /// Vet insertions.
    #[must_use]
    pub fn with_insert_hook(
        mut self,
        hook: impl FnMut(&str, &mut Screen<'_>) -> Verdict + 'static,
    ) -> Self {
        if let Kind::EditList(editor) = &mut self.kind {
            editor.on_insert = Some(Box::new(hook));
        }
        self
    }

    /// Vet deletions.
    #[must_use]
    pub fn with_delete_hook(
        mut self,
        hook: impl FnMut(&ListItem, &mut Screen<'_>) -> Verdict + 'static,
    ) -> Self {
        if let Kind::EditList(editor) = &mut self.kind {
            editor.on_delete = Some(Box::new(hook));
        }
        self
    }

    /// Add an UPDATE button between ADD and DELETE.
    pub fn with_update_hook(
        mut self,
        hook: impl FnMut(usize, &str, &mut Screen<'_>) -> Verdict + 'static,
    ) -> Result<Self> {
        if let Kind::EditList(editor) = &mut self.kind {
            let (lx, ly) = editor.list.position();
            let column = lx + editor.list.width() + 3;
            let mut update = Self::button(0, "UPDATE")?;
            update.place_content(column, ly + 1);
            editor.delete.place_content(column, ly + 3);
            if let Some(topic) = &self.help {
                update.help = Some(topic.clone());
            }
            editor.update = Some(update);
            editor.on_update = Some(Box::new(hook));
        }
        Ok(self)
    }

    pub fn as_edit_list_mut(&mut self) -> Option<&mut EditableList> {
        match &mut self.kind {
            Kind::EditList(w) => Some(w),
            _ => None,
        }
    }
}

/// Carry the editor's help topic down to its parts.
fn share_help(obj: &mut Obj) {
    let topic = obj.help.clone();
    if let Kind::EditList(editor) = &mut obj.kind {
        for part in editor.parts_mut().into_iter().flatten() {
            if part.help.is_none() {
                part.help.clone_from(&topic);
            }
        }
    }
}

pub(crate) fn edit(obj: &mut Obj, screen: &mut Screen<'_>, display: &Display, entry: Entry) -> EditCode {
    share_help(obj);
    let Some(editor) = obj.as_edit_list_mut() else {
        return EditCode::Error;
    };
    let mut idx = editor.first_part(entry);
    let mut part_entry = match entry {
        Entry::Press(p) => Entry::Press(p),
        _ => Entry::Forward,
    };
    loop {
        let code = {
            let Some(editor) = obj.as_edit_list_mut() else {
                return EditCode::Error;
            };
            let Some(part) = editor.part_mut(idx) else {
                return EditCode::Error;
            };
            edit::edit(part, screen, display, part_entry)
        };
        part_entry = Entry::Forward;
        let Some(editor) = obj.as_edit_list_mut() else {
            return EditCode::Error;
        };
        editor.active = idx;
        let next = match code {
            EditCode::Tab => match editor.next_stop(idx) {
                Some(next) => next,
                None => break finish(obj, screen, display, code),
            },
            EditCode::BackTab => match editor.prev_stop(idx) {
                Some(prev) => prev,
                None => break finish(obj, screen, display, code),
            },
            EditCode::Return => {
                let exit = match idx {
                    ENTRY | ADD => editor.insert(screen),
                    LIST | DELETE => editor.delete(screen),
                    UPDATE => editor.update(screen),
                    _ => None,
                };
                if let Some(code) = exit {
                    break finish(obj, screen, display, code);
                }
                if editor.stops_at(idx) { idx } else { ENTRY }
            }
            EditCode::Event(p) => {
                let hit = (0..PARTS)
                    .find(|&i| editor.stops_at(i) && editor.part(i).is_some_and(|o| p.inside(o.hit_area())));
                match hit {
                    Some(hit) => {
                        part_entry = Entry::Press(p);
                        hit
                    }
                    None => break finish(obj, screen, display, code),
                }
            }
            EditCode::Nop => idx,
            _ => break finish(obj, screen, display, code),
        };
        idx = next;
        screen.draw(display, obj);
    }
}

fn finish(obj: &mut Obj, screen: &mut Screen<'_>, display: &Display, code: EditCode) -> EditCode {
    screen.draw(display, obj);
    code
}
