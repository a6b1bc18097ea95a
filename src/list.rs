//! Arena-backed doubly linked list used to track recency order.
//!
//! Nodes live in a single `Vec` and link to each other by index, so the
//! cache's index can hold plain `usize` handles instead of pointers. Two
//! sentinel slots are reserved at fixed positions: [`HEAD`] sits before the
//! most recently used node and [`TAIL`] after the least recently used one.
//! Every live node therefore always has two neighbours and link rewiring
//! never needs to special-case an empty list or a boundary node.
//!
//! Vacated slots go onto a free list and are handed out again by the next
//! insertion, so the arena only grows while the list is longer than it has
//! ever been.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

/// Slot index of the front sentinel.
pub(crate) const HEAD: usize = 0;
/// Slot index of the back sentinel.
pub(crate) const TAIL: usize = 1;

/// A slot in the arena.
///
/// `val` is `None` for the two sentinels and for slots sitting on the free
/// list. The links of a free slot are stale and only rewritten on reuse.
struct Slot<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
}

impl<T> Slot<T> {
    fn sentinel() -> Self {
        Slot {
            val: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// A doubly linked list whose nodes are addressed by stable arena indices.
///
/// The list itself does not enforce a capacity; the owner decides when to
/// evict and how much to reserve up front.
pub(crate) struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Creates an empty list with room reserved for `reserve` entries.
    ///
    /// The arena grows past `reserve` on demand.
    pub fn with_capacity(reserve: usize) -> Self {
        let mut slots = Vec::with_capacity(reserve.saturating_add(2));
        slots.push(Slot::sentinel());
        slots.push(Slot::sentinel());
        RecencyList {
            slots,
            free: Vec::with_capacity(reserve),
            len: 0,
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Links an unlinked slot immediately after the head sentinel.
    fn attach(&mut self, idx: usize) {
        let first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }

    /// Unlinks a slot by joining its neighbours. The slot's own links are
    /// left as they were.
    fn detach(&mut self, idx: usize) {
        debug_assert!(idx != HEAD && idx != TAIL, "sentinels are never detached");
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }

    /// Stores `val` in a fresh or recycled slot and links it at the front.
    ///
    /// Returns the slot index, which stays valid until the entry is removed.
    pub fn insert_front(&mut self, val: T) -> usize {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx].val = Some(val);
                idx
            }
            None => {
                self.slots.push(Slot {
                    val: Some(val),
                    prev: HEAD,
                    next: TAIL,
                });
                self.slots.len() - 1
            }
        };
        self.attach(idx);
        self.len += 1;
        idx
    }

    /// Marks a live slot as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.slots[HEAD].next == idx {
            return;
        }
        self.detach(idx);
        self.attach(idx);
    }

    /// Unlinks a live slot, recycles it and returns its value.
    ///
    /// Returns `None` for sentinels and for slots that are already free.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if idx == HEAD || idx == TAIL {
            return None;
        }
        let val = self.slots.get_mut(idx)?.val.take()?;
        self.detach(idx);
        self.free.push(idx);
        self.len -= 1;
        Some(val)
    }

    /// Removes the least recently used entry, if any, together with the
    /// index of the slot it vacated.
    pub fn pop_back(&mut self) -> Option<(usize, T)> {
        let last = self.slots[TAIL].prev;
        if last == HEAD {
            return None;
        }
        self.remove(last).map(|val| (last, val))
    }

    /// Returns the least recently used entry without reordering.
    pub fn back(&self) -> Option<&T> {
        self.slots[self.slots[TAIL].prev].val.as_ref()
    }

    /// Returns the value held in a live slot.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx)?.val.as_ref()
    }

    /// Returns the value held in a live slot, mutably.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx)?.val.as_mut()
    }

    /// Swaps the value of a live slot in place, returning the old one.
    /// The slot keeps its position in the list.
    pub fn replace(&mut self, idx: usize, val: T) -> Option<T> {
        let slot = self.get_mut(idx)?;
        Some(mem::replace(slot, val))
    }

    /// Drops every entry. The sentinels and the arena allocation are kept.
    pub fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD].next = TAIL;
        self.slots[TAIL].prev = HEAD;
        self.free.clear();
        self.len = 0;
    }

    /// Number of arena slots ever handed out, sentinels included.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            front: self.slots[HEAD].next,
            back: self.slots[TAIL].prev,
            remaining: self.len,
        }
    }
}

impl<T> fmt::Debug for RecencyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("length", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Front-to-back iterator over the live entries of a [`RecencyList`].
pub(crate) struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.slots[self.front];
        self.front = slot.next;
        self.remaining -= 1;
        slot.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.slots[self.back];
        self.back = slot.prev;
        self.remaining -= 1;
        slot.val.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn new_list<T>(cap: usize) -> RecencyList<T> {
        RecencyList::with_capacity(cap)
    }

    fn pop_val<T>(list: &mut RecencyList<T>) -> Option<T> {
        list.pop_back().map(|(_, v)| v)
    }

    fn contents<T: Clone>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_construct_links_sentinels() {
        let list = new_list::<u32>(3);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.slots[HEAD].next, TAIL);
        assert_eq!(list.slots[TAIL].prev, HEAD);
        assert!(list.back().is_none());
        assert!(list.slots.capacity() >= 5);
    }

    #[test]
    fn test_insert_front_orders_most_recent_first() {
        let mut list = new_list::<u32>(3);
        let a = list.insert_front(10);
        let b = list.insert_front(20);
        let c = list.insert_front(30);
        assert_eq!(list.len(), 3);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(a != HEAD && a != TAIL);
        assert_eq!(contents(&list), [30, 20, 10]);
        assert_eq!(list.back(), Some(&10));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = new_list::<u32>(3);
        // front->30->20->10->back
        let node1 = list.insert_front(10);
        let node2 = list.insert_front(20);
        let node3 = list.insert_front(30);

        // front->10->30->20->back
        list.move_to_front(node1);
        assert_eq!(contents(&list), [10, 30, 20]);

        // Already at front: no change
        list.move_to_front(node1);
        assert_eq!(contents(&list), [10, 30, 20]);

        // Middle node
        list.move_to_front(node3);
        assert_eq!(contents(&list), [30, 10, 20]);

        list.move_to_front(node2);
        assert_eq!(contents(&list), [20, 30, 10]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_pop_back() {
        let mut list = new_list::<u32>(3);
        assert!(list.pop_back().is_none());

        list.insert_front(10);
        list.insert_front(20);
        list.insert_front(30);

        assert_eq!(pop_val(&mut list), Some(10));
        assert_eq!(pop_val(&mut list), Some(20));
        assert_eq!(list.len(), 1);
        assert_eq!(pop_val(&mut list), Some(30));
        assert!(list.pop_back().is_none());
        assert!(list.is_empty());
        assert_eq!(list.slots[HEAD].next, TAIL);
        assert_eq!(list.slots[TAIL].prev, HEAD);
    }

    #[test]
    fn test_remove_from_middle() {
        let mut list = new_list::<u32>(3);
        let _a = list.insert_front(1);
        let b = list.insert_front(2);
        let _c = list.insert_front(3);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(contents(&list), [3, 1]);
        // Already freed
        assert_eq!(list.remove(b), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_rejects_sentinels_and_out_of_range() {
        let mut list = new_list::<u32>(2);
        list.insert_front(1);
        assert_eq!(list.remove(HEAD), None);
        assert_eq!(list.remove(TAIL), None);
        assert_eq!(list.remove(99), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = new_list::<u32>(2);
        let a = list.insert_front(1);
        let b = list.insert_front(2);
        assert_eq!(list.pop_back(), Some((a, 1)));
        let c = list.insert_front(3);
        assert_eq!(c, a);
        assert_eq!(list.remove(b), Some(2));
        let d = list.insert_front(4);
        assert_eq!(d, b);
        assert_eq!(list.slots.len(), 4);
        assert_eq!(contents(&list), [4, 3]);
    }

    #[test]
    fn test_get_replace_and_get_mut() {
        let mut list = new_list::<String>(3);
        let node = list.insert_front(String::from("test"));
        assert_eq!(list.get(node).map(String::as_str), Some("test"));

        list.get_mut(node).unwrap().push_str("_modified");
        assert_eq!(list.get(node).map(String::as_str), Some("test_modified"));

        let old = list.replace(node, String::from("new_value"));
        assert_eq!(old.as_deref(), Some("test_modified"));
        assert_eq!(list.get(node).map(String::as_str), Some("new_value"));

        assert!(list.get(HEAD).is_none());
        assert!(list.get(TAIL).is_none());
        assert!(list.replace(HEAD, String::new()).is_none());
    }

    #[test]
    fn test_clear() {
        let mut list = new_list::<u32>(3);
        list.insert_front(10);
        list.insert_front(20);
        let n = list.insert_front(30);
        list.remove(n);
        list.clear();
        assert!(list.is_empty());
        assert!(list.iter().next().is_none());
        assert!(list.free.is_empty());

        list.insert_front(40);
        assert_eq!(contents(&list), [40]);
    }

    #[test]
    fn test_iter_both_ends() {
        let mut list = new_list::<u32>(4);
        for v in 1..=4 {
            list.insert_front(v);
        }
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&4));
        assert_eq!(iter.next_back(), Some(&1));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        let reversed: Vec<u32> = list.iter().rev().copied().collect();
        assert_eq!(reversed, [1, 2, 3, 4]);
    }

    #[test]
    fn test_length_consistency_after_mixed_operations() {
        let mut list = new_list::<u32>(5);
        let mut handles = Vec::new();
        for v in 0..5 {
            handles.push(list.insert_front(v));
        }
        list.move_to_front(handles[0]);
        list.move_to_front(handles[3]);
        assert_eq!(list.remove(handles[2]), Some(2));
        assert_eq!(list.pop_back(), Some((handles[1], 1)));
        list.insert_front(9);
        assert_eq!(contents(&list), [9, 3, 0, 4]);
        assert_eq!(list.len(), list.iter().count());
        assert_eq!(list.back(), Some(&4));
    }

    #[test]
    fn test_grows_past_reservation() {
        let mut list = new_list::<u32>(0);
        assert_eq!(list.slot_count(), 2);
        for v in 0..100 {
            list.insert_front(v);
        }
        assert_eq!(list.slot_count(), 102);
        assert_eq!(list.len(), 100);
        assert_eq!(list.back(), Some(&0));

        // Draining and refilling reuses the vacated slots
        while list.pop_back().is_some() {}
        for v in 0..100 {
            list.insert_front(v);
        }
        assert_eq!(list.slot_count(), 102);
    }
}
