#![forbid(unsafe_code)]

//! Two-level menus: an index on the left, the chosen entry's sub-menu on
//! the right.
//!
//! Choosing an index entry loads its sub-menu and moves focus there; an
//! entry without a sub-menu is a selection in itself. The selection is
//! read back as (index, item).

use ndialog_core::geometry::Region;
use ndialog_render::Role;

use crate::callback::Verdict;
use crate::edit::{self, Entry};
use crate::error::{Error, Result};
use crate::flags::ListStyle;
use crate::items::{ListItem, ListItems};
use crate::list::ListBox;
use crate::object::{Decor, Kind, Obj, cells};
use crate::screen::{Canvas, Display, EditCode, Screen};

/// Called with (index, item) when a selection is made.
pub type SelectHook = Box<dyn FnMut((usize, usize), &mut Screen<'_>) -> Verdict>;

/// One entry of the index.
#[derive(Debug, Clone, Default)]
pub struct IndexEntry {
    pub label: String,
    pub help: Option<String>,
    pub submenu: Option<ListItems>,
}

impl IndexEntry {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            help: None,
            submenu: None,
        }
    }

    #[must_use]
    pub fn with_submenu(mut self, items: impl Into<ListItems>) -> Self {
        self.submenu = Some(items.into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

const INDEX: usize = 0;
const MENU: usize = 1;

/// State of an indexed menu.
pub struct IndexedMenu {
    entries: Vec<IndexEntry>,
    index: Obj,
    menu: Obj,
    /// Index entry whose sub-menu is loaded.
    loaded: Option<usize>,
    ikey: usize,
    mkey: usize,
    which: usize,
    on_select: Option<SelectHook>,
}

impl IndexedMenu {
    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// The last (index, item) selection.
    #[must_use]
    pub const fn selection(&self) -> (usize, usize) {
        (self.ikey, self.mkey)
    }

    /// Select index entry `ikey` and item `mkey` of its sub-menu.
    pub fn set_selection(&mut self, ikey: usize, mkey: usize) -> Result<()> {
        self.index_list_mut()?.set_current(ikey)?;
        self.ikey = ikey;
        self.mkey = mkey;
        self.sync();
        if self.entries.get(ikey).is_some_and(|e| e.submenu.is_some()) {
            self.menu_list_mut()?.set_current(mkey)?;
        }
        Ok(())
    }

    /// Current row of the index.
    #[must_use]
    pub fn index_cursor(&self) -> usize {
        self.index.as_list().map_or(0, ListBox::current)
    }

    pub fn set_index_cursor(&mut self, pos: usize) -> Result<()> {
        self.index_list_mut()?.set_current(pos)?;
        self.sync();
        Ok(())
    }

    /// The sub-menu part.
    #[must_use]
    pub fn menu(&self) -> Option<&ListBox> {
        self.menu.as_list()
    }

    fn index_list_mut(&mut self) -> Result<&mut ListBox> {
        self.index
            .as_list_mut()
            .ok_or(Error::Fault("indexed menu lost its index"))
    }

    fn menu_list_mut(&mut self) -> Result<&mut ListBox> {
        self.menu
            .as_list_mut()
            .ok_or(Error::Fault("indexed menu lost its sub-menu"))
    }

    fn menu_len(&self) -> usize {
        self.menu().map_or(0, |m| m.items().len())
    }

    /// Load the sub-menu of the current index entry if it is not shown.
    fn sync(&mut self) {
        let key = self.index_cursor();
        if self.loaded == Some(key) {
            return;
        }
        let items = self
            .entries
            .get(key)
            .and_then(|e| e.submenu.clone())
            .unwrap_or_default();
        let restore = (key == self.ikey).then_some(self.mkey);
        if let Ok(menu) = self.menu_list_mut() {
            menu.rebind(items);
            if let Some(mkey) = restore {
                let _ = menu.set_current(mkey);
            }
        }
        self.loaded = Some(key);
        self.menu.touch();
    }

    pub(crate) fn shift(&mut self, dx: i32, dy: i32) {
        for part in [&mut self.index, &mut self.menu] {
            let (x, y) = part.position();
            part.set_position(x + dx, y + dy);
        }
    }

    fn part_mut(&mut self, idx: usize) -> &mut Obj {
        if idx == INDEX { &mut self.index } else { &mut self.menu }
    }

    fn first_part(&self, entry: Entry) -> usize {
        match entry {
            Entry::Forward => INDEX,
            Entry::Backward => {
                if self.menu_len() > 0 {
                    MENU
                } else {
                    INDEX
                }
            }
            Entry::Resume => self.which,
            Entry::Press(p) => {
                if p.inside(self.index.hit_area()) {
                    INDEX
                } else if p.inside(self.menu.hit_area()) {
                    MENU
                } else {
                    self.which
                }
            }
        }
    }

    fn select(&mut self, screen: &mut Screen<'_>) -> Verdict {
        let selection = (self.ikey, self.mkey);
        match self.on_select.as_mut() {
            Some(hook) => hook(selection, screen),
            None => Verdict::Accept,
        }
    }

    pub(crate) fn draw(&self, obj: &Obj, canvas: &mut Canvas<'_>) {
        if let Some(title) = obj.title() {
            let (x, y) = obj.position();
            canvas.put_str(x, y, title, canvas.style(Role::Title));
        }
        let (first, second) = if self.which == INDEX {
            (&self.menu, &self.index)
        } else {
            (&self.index, &self.menu)
        };
        first.draw(canvas);
        second.draw(canvas);
    }
}

impl Obj {
    /// An indexed menu `width` by `depth` cells overall.
    ///
    /// `index_width` is the width of the index column including its frame;
    /// a negative value fits the widest label.
    pub fn indexed_menu(
        x: i32,
        y: i32,
        width: i32,
        depth: i32,
        index_width: i32,
        entries: Vec<IndexEntry>,
        decor: Decor,
    ) -> Result<Self> {
        if width < 0 || depth < 3 {
            return Err(Error::InvalidArgument("indexed menu needs a size"));
        }
        let index_width = if index_width < 0 {
            entries.iter().map(|e| cells(&e.label)).max().unwrap_or(0) + 2
        } else {
            index_width
        };
        let menu_width = width - index_width - 4;
        if index_width < 3 || menu_width < 1 {
            return Err(Error::Overflow {
                needed: (index_width + 5, depth),
                available: (width, depth),
            });
        }
        let titled = decor.title.is_some();
        let top = if titled { y + 1 } else { y };

        let labels: ListItems = entries
            .iter()
            .map(|e| {
                let item = ListItem::new(e.label.clone(), e.label.clone());
                match &e.help {
                    Some(help) => item.with_help(help.clone()),
                    None => item,
                }
            })
            .collect();
        let index = Self::menu_list(
            x,
            top,
            index_width - 2,
            depth - 2,
            labels,
            Decor::framed(),
            ListStyle::MENU,
        )?;
        let menu = Self::menu_list(
            x + index_width + 2,
            top,
            menu_width,
            depth - 2,
            ListItems::default(),
            Decor::framed(),
            ListStyle::MENU,
        )?;
        let mut state = IndexedMenu {
            entries,
            index,
            menu,
            loaded: None,
            ikey: 0,
            mkey: 0,
            which: INDEX,
            on_select: None,
        };
        state.sync();
        let mut obj = Self::base(
            Kind::IndexedMenu(Box::new(state)),
            x,
            y,
            width,
            depth + i32::from(titled),
            decor,
        );
        obj.hit = Region::new(0, 0, obj.width, obj.depth);
        Ok(obj)
    }

    /// Called when a selection is made.
    #[must_use]
    pub fn with_select_hook(
        mut self,
        hook: impl FnMut((usize, usize), &mut Screen<'_>) -> Verdict + 'static,
    ) -> Self {
        if let Kind::IndexedMenu(menu) = &mut self.kind {
            menu.on_select = Some(Box::new(hook));
        }
        self
    }

    pub fn as_indexed_menu_mut(&mut self) -> Option<&mut IndexedMenu> {
        match &mut self.kind {
            Kind::IndexedMenu(w) => Some(w),
            _ => None,
        }
    }
}

fn verdict_code(verdict: Verdict) -> Option<EditCode> {
    match verdict {
        Verdict::Reject => None,
        Verdict::Accept => Some(EditCode::Return),
        Verdict::AcceptAndExit => Some(EditCode::ExitForm),
    }
}

pub(crate) fn edit(obj: &mut Obj, screen: &mut Screen<'_>, display: &Display, entry: Entry) -> EditCode {
    let Some(state) = obj.as_indexed_menu_mut() else {
        return EditCode::Error;
    };
    let mut idx = state.first_part(entry);
    let mut part_entry = match entry {
        Entry::Press(p) => Entry::Press(p),
        _ => Entry::Forward,
    };
    loop {
        let code = {
            let Some(state) = obj.as_indexed_menu_mut() else {
                return EditCode::Error;
            };
            state.which = idx;
            edit::edit(state.part_mut(idx), screen, display, part_entry)
        };
        part_entry = Entry::Forward;
        let Some(state) = obj.as_indexed_menu_mut() else {
            return EditCode::Error;
        };
        state.sync();
        let next = match code {
            EditCode::Tab => {
                if idx == MENU || state.menu_len() == 0 {
                    break finish(obj, screen, display, code);
                }
                MENU
            }
            EditCode::BackTab => {
                if idx == INDEX {
                    break finish(obj, screen, display, code);
                }
                INDEX
            }
            EditCode::Return if idx == INDEX => {
                let key = state.index_cursor();
                let has_menu = state.entries.get(key).is_some_and(|e| e.submenu.is_some());
                if has_menu {
                    MENU
                } else {
                    state.ikey = key;
                    state.mkey = 0;
                    match verdict_code(state.select(screen)) {
                        Some(code) => break finish(obj, screen, display, code),
                        None => INDEX,
                    }
                }
            }
            EditCode::Return => {
                state.ikey = state.index_cursor();
                state.mkey = state.menu().map_or(0, ListBox::current);
                match verdict_code(state.select(screen)) {
                    Some(code) => break finish(obj, screen, display, code),
                    None => MENU,
                }
            }
            EditCode::Event(p) => {
                if p.inside(state.index.hit_area()) {
                    part_entry = Entry::Press(p);
                    INDEX
                } else if state.menu_len() > 0 && p.inside(state.menu.hit_area()) {
                    part_entry = Entry::Press(p);
                    MENU
                } else {
                    break finish(obj, screen, display, code);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<IndexEntry> {
        vec![
            IndexEntry::new("Fruit").with_submenu(vec![
                ListItem::new("a", "apple"),
                ListItem::new("b", "banana"),
            ]),
            IndexEntry::new("Quit"),
            IndexEntry::new("Veg").with_submenu(vec![ListItem::new("c", "carrot")]),
        ]
    }

    #[test]
    fn index_width_fits_labels() {
        let obj = Obj::indexed_menu(0, 0, 30, 8, -1, entries(), Decor::new()).expect("valid");
        let state = obj.as_indexed_menu().expect("menu");
        assert_eq!(state.index.width(), 5);
        assert_eq!(state.menu.position().0, 7 + 2);
        assert_eq!(state.menu.width(), 30 - 7 - 4);
        assert_eq!(obj.natural_size(), (30, 8));
    }

    #[test]
    fn narrow_menus_overflow() {
        assert!(matches!(
            Obj::indexed_menu(0, 0, 10, 8, -1, entries(), Decor::new()),
            Err(Error::Overflow { .. })
        ));
    }

    #[test]
    fn moving_the_index_loads_its_submenu() {
        let mut obj = Obj::indexed_menu(0, 0, 30, 8, -1, entries(), Decor::new()).expect("valid");
        let state = obj.as_indexed_menu_mut().expect("menu");
        assert_eq!(state.menu_len(), 2);
        state.set_index_cursor(1).expect("in range");
        assert_eq!(state.menu_len(), 0);
        state.set_index_cursor(2).expect("in range");
        assert_eq!(state.menu().and_then(|m| m.current_item()).map(|i| i.item.as_str()), Some("carrot"));
    }

    #[test]
    fn selection_restores_submenu_cursor() {
        let mut obj = Obj::indexed_menu(0, 0, 30, 8, -1, entries(), Decor::new()).expect("valid");
        let state = obj.as_indexed_menu_mut().expect("menu");
        state.set_selection(0, 1).expect("in range");
        assert_eq!(state.selection(), (0, 1));
        state.set_index_cursor(2).expect("in range");
        state.set_index_cursor(0).expect("in range");
        assert_eq!(state.menu().map(ListBox::current), Some(1));
        assert!(state.set_selection(5, 0).is_err());
        assert_eq!(obj.cursor(), Some(0));
    }

    #[test]
    fn backtab_enters_the_submenu_when_loaded() {
        let obj = Obj::indexed_menu(0, 0, 30, 8, -1, entries(), Decor::new()).expect("valid");
        let state = obj.as_indexed_menu().expect("menu");
        assert_eq!(state.first_part(Entry::Backward), MENU);
        assert_eq!(state.first_part(Entry::Forward), INDEX);
    }
}
