#![forbid(unsafe_code)]

//! Values shared between the caller and the widgets editing them.
//!
//! A [`Binding`] is a cheap handle to an interior-mutable slot. The caller
//! keeps one clone and gives another to a widget; the widget writes edits
//! straight through, so after the form closes the caller's clone already
//! holds the result.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// A shared, mutable value.
pub struct Binding<T> {
    slot: Rc<RefCell<T>>,
}

impl<T> Binding<T> {
    /// Wrap an initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(value)),
        }
    }

    /// Borrow the current value.
    ///
    /// # Panics
    ///
    /// Panics if the value is being mutated through another handle.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.slot.borrow()
    }

    /// Borrow the current value mutably.
    ///
    /// # Panics
    ///
    /// Panics if the value is borrowed through another handle.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.slot.borrow_mut()
    }

    /// Replace the value, returning the old one.
    pub fn replace(&self, value: T) -> T {
        self.slot.replace(value)
    }

    /// Whether two handles share one slot.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T: Clone> Binding<T> {
    /// A copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().clone()
    }
}

impl<T> Binding<T> {
    /// Overwrite the value.
    pub fn set(&self, value: T) {
        *self.slot.borrow_mut() = value;
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Default> Default for Binding<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.try_borrow() {
            Ok(value) => f.debug_tuple("Binding").field(&*value).finish(),
            Err(_) => f.write_str("Binding(<borrowed>)"),
        }
    }
}

impl<T> From<T> for Binding<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
