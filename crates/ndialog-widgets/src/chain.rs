#![forbid(unsafe_code)]

//! Form chains.
//!
//! A [`Chain`] is the ordered, circular set of objects making up one form.
//! Objects live in an arena of slots and are addressed by [`ObjId`]
//! handles; every slot carries the indices of its neighbours, so the
//! chain is circular without any reference cycles. A lone object is its
//! own neighbour both ways.
//!
//! Handles are never reused: extracting an object empties its slot for
//! good, and a stale handle simply finds nothing.
//!
//! # Ownership
//!
//! An object belongs to exactly one chain. [`Chain::push`] takes it by
//! value and [`Chain::extract`] hands it back, so an object cannot sit in
//! two chains at once.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};
use crate::object::Obj;

/// Handle to an object in a [`Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjId(usize);

impl ObjId {
    /// Slot index inside the owning chain.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Node {
    obj: Obj,
    next: usize,
    prev: usize,
}

/// A circular doubly linked list of objects.
#[derive(Default)]
pub struct Chain {
    slots: Vec<Option<Node>>,
    head: Option<usize>,
    len: usize,
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(id, obj)| (id, obj.id())))
            .finish()
    }
}

impl Chain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First object in chain order.
    #[must_use]
    pub fn head(&self) -> Option<ObjId> {
        self.head.map(ObjId)
    }

    fn node(&self, slot: usize) -> Option<&Node> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Append an object after the last one.
    pub fn push(&mut self, obj: Obj) -> ObjId {
        let slot = self.slots.len();
        let (next, prev) = match self.head {
            None => (slot, slot),
            Some(head) => {
                let tail = self.node(head).map_or(head, |n| n.prev);
                (head, tail)
            }
        };
        self.slots.push(Some(Node { obj, next, prev }));
        if let Some(n) = self.node_mut(prev) {
            n.next = slot;
        }
        if let Some(n) = self.node_mut(next) {
            n.prev = slot;
        }
        self.head.get_or_insert(slot);
        self.len += 1;
        ObjId(slot)
    }

    /// Append every object of `other`, in its order.
    ///
    /// Returns the new handles of the appended objects.
    pub fn append(&mut self, other: Self) -> Vec<ObjId> {
        other.into_objs().into_iter().map(|obj| self.push(obj)).collect()
    }

    /// Remove an object from the chain and hand it back.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `id` is not in this chain,
    /// [`Error::OnlyElement`] if it is the last object left, and
    /// [`Error::Fault`] if the links around it are broken.
    pub fn extract(&mut self, id: ObjId) -> Result<Obj> {
        let Some(head) = self.head else {
            return Err(Error::NotFound);
        };
        // Walk from the head so a slot cut off from the ring is reported.
        let mut at = head;
        let mut found = false;
        for _ in 0..self.len {
            if at == id.0 {
                found = true;
                break;
            }
            at = self.node(at).ok_or_else(|| broken("dangling next link"))?.next;
        }
        if !found {
            return if self.node(id.0).is_some() {
                Err(broken("object is not reachable from the head"))
            } else {
                Err(Error::NotFound)
            };
        }
        if self.len == 1 {
            return Err(Error::OnlyElement);
        }
        let (next, prev) = self
            .node(id.0)
            .map(|n| (n.next, n.prev))
            .ok_or_else(|| broken("dangling next link"))?;
        if self.node(next).is_none_or(|n| n.prev != id.0)
            || self.node(prev).is_none_or(|n| n.next != id.0)
        {
            return Err(broken("neighbour links disagree"));
        }
        if let Some(n) = self.node_mut(prev) {
            n.next = next;
        }
        if let Some(n) = self.node_mut(next) {
            n.prev = prev;
        }
        if head == id.0 {
            self.head = Some(next);
        }
        self.len -= 1;
        self.slots
            .get_mut(id.0)
            .and_then(Option::take)
            .map(|n| n.obj)
            .ok_or_else(|| broken("slot emptied during extract"))
    }

    /// Take every object out, in chain order.
    #[must_use]
    pub fn into_objs(mut self) -> Vec<Obj> {
        let order = self.slot_order();
        order
            .into_iter()
            .filter_map(|slot| self.slots.get_mut(slot).and_then(Option::take))
            .map(|n| n.obj)
            .collect()
    }

    /// Drop every object.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }

    #[must_use]
    pub fn get(&self, id: ObjId) -> Option<&Obj> {
        self.node(id.0).map(|n| &n.obj)
    }

    pub fn get_mut(&mut self, id: ObjId) -> Option<&mut Obj> {
        self.node_mut(id.0).map(|n| &mut n.obj)
    }

    /// The object after `id`, wrapping around.
    #[must_use]
    pub fn next(&self, id: ObjId) -> Option<ObjId> {
        self.node(id.0).map(|n| ObjId(n.next))
    }

    /// The object before `id`, wrapping around.
    #[must_use]
    pub fn prev(&self, id: ObjId) -> Option<ObjId> {
        self.node(id.0).map(|n| ObjId(n.prev))
    }

    /// Handles in chain order, starting at the head.
    #[must_use]
    pub fn ids(&self) -> Vec<ObjId> {
        self.slot_order().into_iter().map(ObjId).collect()
    }

    /// Objects in chain order, starting at the head.
    pub fn iter(&self) -> impl Iterator<Item = (ObjId, &Obj)> + '_ {
        self.slot_order()
            .into_iter()
            .filter_map(move |slot| self.node(slot).map(|n| (ObjId(slot), &n.obj)))
    }

    /// First object matching `pred`.
    pub fn find(&self, mut pred: impl FnMut(&Obj) -> bool) -> Option<ObjId> {
        self.iter().find(|(_, obj)| pred(obj)).map(|(id, _)| id)
    }

    /// Slots visited from the head, stopping when the ring closes, a link
    /// dangles, or more steps than objects have been taken.
    fn slot_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len);
        let Some(head) = self.head else {
            return order;
        };
        let mut at = head;
        while order.len() < self.len {
            let Some(node) = self.node(at) else { break };
            order.push(at);
            at = node.next;
            if at == head {
                break;
            }
        }
        order
    }

    /// Check that the ring is whole: following `next` from the head visits
    /// every object once and comes back, and every `prev` agrees.
    ///
    /// # Errors
    ///
    /// [`Error::Fault`] naming the first broken link.
    pub fn validate(&self) -> Result<()> {
        let Some(head) = self.head else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err(broken("objects without a head"))
            };
        };
        let mut at = head;
        for _ in 0..self.len {
            let node = self.node(at).ok_or_else(|| broken("dangling next link"))?;
            if self.node(node.next).is_none_or(|n| n.prev != at) {
                return Err(broken("next and prev links disagree"));
            }
            at = node.next;
        }
        if at == head {
            Ok(())
        } else {
            Err(broken("ring does not close"))
        }
    }

    /// Reorder the chain with a stable sort; the first object becomes the
    /// head.
    pub fn sort_by(&mut self, mut compare: impl FnMut(&Obj, &Obj) -> Ordering) {
        let mut order = self.slot_order();
        order.sort_by(|&a, &b| match (self.node(a), self.node(b)) {
            (Some(a), Some(b)) => compare(&a.obj, &b.obj),
            _ => Ordering::Equal,
        });
        self.relink(&order);
    }

    /// Move every button after every other object, buttons ordered by
    /// their position key. Other objects keep their order.
    pub fn sort_for_menu(&mut self) {
        self.sort_by(|a, b| match (a.as_button(), b.as_button()) {
            (Some(a), Some(b)) => a.order().cmp(&b.order()),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        });
    }

    /// Order objects top to bottom, then left to right.
    pub fn sort_by_position(&mut self) {
        self.sort_by(|a, b| {
            let (ax, ay) = a.position();
            let (bx, by) = b.position();
            ay.cmp(&by).then(ax.cmp(&bx))
        });
    }

    fn relink(&mut self, order: &[usize]) {
        let n = order.len();
        for (i, &slot) in order.iter().enumerate() {
            let next = order[(i + 1) % n];
            let prev = order[(i + n - 1) % n];
            if let Some(node) = self.node_mut(slot) {
                node.next = next;
                node.prev = prev;
            }
        }
        self.head = order.first().copied();
    }

    #[cfg(test)]
    pub(crate) fn break_link(&mut self, id: ObjId, next: usize) {
        if let Some(node) = self.node_mut(id.0) {
            node.next = next;
        }
    }
}

fn broken(what: &'static str) -> Error {
    ndialog_core::warn!(reason = what, "chain integrity failure");
    Error::Fault(what)
}

impl FromIterator<Obj> for Chain {
    fn from_iter<I: IntoIterator<Item = Obj>>(iter: I) -> Self {
        let mut chain = Self::new();
        for obj in iter {
            chain.push(obj);
        }
        chain
    }
}

impl Extend<Obj> for Chain {
    fn extend<I: IntoIterator<Item = Obj>>(&mut self, iter: I) {
        for obj in iter {
            self.push(obj);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;
    use crate::object::Decor;

    fn check() -> Obj {
        Obj::check(0, 0, Binding::new(false), Decor::new()).expect("valid")
    }

    fn checks(n: usize) -> (Chain, Vec<ObjId>) {
        let mut chain = Chain::new();
        let ids = (0..n).map(|_| chain.push(check())).collect();
        (chain, ids)
    }

    #[test]
    fn lone_object_is_its_own_neighbour() {
        let (chain, ids) = checks(1);
        assert_eq!(chain.next(ids[0]), Some(ids[0]));
        assert_eq!(chain.prev(ids[0]), Some(ids[0]));
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn push_keeps_ring_order() {
        let (chain, ids) = checks(3);
        assert_eq!(chain.ids(), ids);
        assert_eq!(chain.next(ids[2]), Some(ids[0]));
        assert_eq!(chain.prev(ids[0]), Some(ids[2]));
    }

    #[test]
    fn append_moves_objects_over() {
        let (mut a, _) = checks(2);
        let (b, _) = checks(3);
        let added = a.append(b);
        assert_eq!(added.len(), 3);
        assert_eq!(a.len(), 5);
        assert_eq!(&a.ids()[2..], added.as_slice());
        assert!(a.validate().is_ok());
    }

    #[test]
    fn extract_errors_are_distinct() {
        let (mut chain, ids) = checks(2);
        assert!(chain.extract(ids[0]).is_ok());
        assert!(matches!(chain.extract(ids[0]), Err(Error::NotFound)));
        assert!(matches!(chain.extract(ids[1]), Err(Error::OnlyElement)));
        assert!(matches!(chain.extract(ObjId(99)), Err(Error::NotFound)));
        assert_eq!(chain.head(), Some(ids[1]));
    }

    #[test]
    fn extract_reports_broken_ring() {
        let (mut chain, ids) = checks(3);
        // 0 -> 0 cuts 1 and 2 out of the ring.
        chain.break_link(ids[0], ids[0].index());
        assert!(matches!(chain.validate(), Err(Error::Fault(_))));
        assert!(matches!(chain.extract(ids[2]), Err(Error::Fault(_))));
    }

    #[test]
    fn handles_are_not_reused() {
        let (mut chain, ids) = checks(2);
        let _ = chain.extract(ids[1]).expect("present");
        let fresh = chain.push(check());
        assert_ne!(fresh, ids[1]);
        assert!(chain.get(ids[1]).is_none());
    }

    #[test]
    fn menu_sort_puts_buttons_last() {
        let mut chain = Chain::new();
        let b2 = chain.push(Obj::button(2, "Two").expect("label"));
        let c0 = chain.push(check());
        let b1 = chain.push(Obj::button(1, "One").expect("label"));
        let c1 = chain.push(check());
        chain.sort_for_menu();
        assert_eq!(chain.ids(), vec![c0, c1, b1, b2]);
        assert_eq!(chain.head(), Some(c0));
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn position_sort_reads_rows_first() {
        let mut chain = Chain::new();
        let low = chain.push(Obj::check(0, 5, Binding::new(false), Decor::new()).expect("valid"));
        let right = chain.push(Obj::check(9, 1, Binding::new(false), Decor::new()).expect("valid"));
        let left = chain.push(Obj::check(2, 1, Binding::new(false), Decor::new()).expect("valid"));
        chain.sort_by_position();
        assert_eq!(chain.ids(), vec![left, right, low]);
    }

    #[test]
    fn into_objs_follows_chain_order() {
        let mut chain = Chain::new();
        chain.push(Obj::button(1, "B").expect("label"));
        chain.push(check());
        chain.sort_for_menu();
        let objs = chain.into_objs();
        assert!(!objs[0].is_button());
        assert!(objs[1].is_button());
    }
}
