#![forbid(unsafe_code)]

//! List item arrays.
//!
//! [`ListItems`] starts out sharing the caller's array. The first add or
//! delete copies it, so the caller's original never changes behind its
//! back; [`ListItems::changed`] then reports that the widget holds its own
//! copy. Selection toggles write through the same copy-on-write path.

use std::rc::Rc;

use crate::error::{Error, Result};

/// One row of a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    /// Short identifier (the tag a menu returns).
    pub id: String,
    /// Display text.
    pub item: String,
    /// Help topic for this row.
    pub help: Option<String>,
    pub selected: bool,
}

impl ListItem {
    #[must_use]
    pub fn new(id: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item: item.into(),
            help: None,
            selected: false,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// A copy-on-write array of list items.
#[derive(Debug, Clone, Default)]
pub struct ListItems {
    items: Rc<Vec<ListItem>>,
    changed: bool,
}

impl ListItems {
    /// Take ownership of a fresh array.
    #[must_use]
    pub fn new(items: Vec<ListItem>) -> Self {
        Self {
            items: Rc::new(items),
            changed: false,
        }
    }

    /// Share an array the caller keeps.
    #[must_use]
    pub fn shared(items: &Rc<Vec<ListItem>>) -> Self {
        Self {
            items: Rc::clone(items),
            changed: false,
        }
    }

    /// Whether an add or delete has happened.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.changed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ListItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListItem> {
        self.items.iter()
    }

    fn make_mut(&mut self) -> &mut Vec<ListItem> {
        Rc::make_mut(&mut self.items)
    }

    /// Append an item.
    pub fn add(&mut self, item: ListItem) {
        self.make_mut().push(item);
        self.changed = true;
    }

    /// Remove the item at `index`.
    pub fn delete(&mut self, index: usize) -> Result<ListItem> {
        if index >= self.items.len() {
            return Err(Error::NotFound);
        }
        let removed = self.make_mut().remove(index);
        self.changed = true;
        Ok(removed)
    }

    /// Replace the display text of the item at `index`.
    pub fn update(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::NotFound);
        }
        self.make_mut()[index].item = text.into();
        self.changed = true;
        Ok(())
    }

    /// Mark one item.
    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if self.items.get(index).is_some_and(|it| it.selected != selected) {
            self.make_mut()[index].selected = selected;
        }
    }

    /// Flip one item; returns its new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        let now = !self.items.get(index).is_some_and(|it| it.selected);
        self.set_selected(index, now);
        now
    }

    /// Unmark every item except `keep`.
    pub fn clear_selection_except(&mut self, keep: Option<usize>) {
        let any = self
            .items
            .iter()
            .enumerate()
            .any(|(i, it)| it.selected && Some(i) != keep);
        if any {
            for (i, it) in self.make_mut().iter_mut().enumerate() {
                if Some(i) != keep {
                    it.selected = false;
                }
            }
        }
    }

    /// Indices of selected items.
    #[must_use]
    pub fn selected(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, it)| it.selected.then_some(i))
            .collect()
    }

    /// Identifiers of selected items.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|it| it.selected)
            .map(|it| it.id.as_str())
            .collect()
    }

    /// Widest identifier and widest item text.
    #[must_use]
    pub fn widths(&self) -> (usize, usize) {
        self.items.iter().fold((0, 0), |(idw, itw), it| {
            (
                idw.max(ndialog_core::measure::width(&it.id)),
                itw.max(ndialog_core::measure::width(&it.item)),
            )
        })
    }
}

impl From<Vec<ListItem>> for ListItems {
    fn from(items: Vec<ListItem>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<ListItem> for ListItems {
    fn from_iter<I: IntoIterator<Item = ListItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ListItems {
    type Item = &'a ListItem;
    type IntoIter = std::slice::Iter<'a, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<ListItem> {
        vec![
            ListItem::new("a", "Apple"),
            ListItem::new("b", "Banana").with_selected(true),
            ListItem::new("c", "Cherry"),
        ]
    }

    #[test]
    fn shared_array_is_copied_on_first_add() {
        let original = Rc::new(abc());
        let mut items = ListItems::shared(&original);
        assert!(!items.changed());
        items.add(ListItem::new("d", "Date"));
        assert!(items.changed());
        assert_eq!(items.len(), 4);
        assert_eq!(original.len(), 3);
    }

    #[test]
    fn delete_out_of_range_is_not_found() {
        let mut items = ListItems::new(abc());
        assert!(matches!(items.delete(3), Err(Error::NotFound)));
        let removed = items.delete(0).expect("in range");
        assert_eq!(removed.id, "a");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn selection_helpers() {
        let mut items = ListItems::new(abc());
        assert_eq!(items.selected(), vec![1]);
        assert!(items.toggle(2));
        assert_eq!(items.selected_ids(), vec!["b", "c"]);
        items.clear_selection_except(Some(2));
        assert_eq!(items.selected(), vec![2]);
        assert!(!items.changed());
    }

    #[test]
    fn widths_measure_ids_and_items() {
        assert_eq!(ListItems::new(abc()).widths(), (1, 6));
        assert_eq!(ListItems::default().widths(), (0, 0));
    }
}
