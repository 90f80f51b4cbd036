//! Arena-backed circular recency list.
//!
//! Entries live in a `Vec` of slots and link to their neighbours by slot
//! index. The list is circular: `head` is the most recently used entry and
//! `head.prev` is the least recently used one, so both ends are reachable in
//! O(1) without a separate tail pointer. Vacated slots go on a free list and
//! are reused by the next insert.

use std::mem;

/// One cached key/value pair and its position in the ring.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

#[derive(Debug)]
pub(crate) struct RecencyRing<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl<K, V> RecencyRing<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn value(&self, slot: usize) -> &V {
        &self.node(slot).value
    }

    /// Swap in a new value for `slot`, returning the old one. Position is untouched.
    pub(crate) fn replace_value(&mut self, slot: usize, value: V) -> V {
        mem::replace(&mut self.node_mut(slot).value, value)
    }

    /// Insert a new entry as the most recently used one and return its slot.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> usize {
        let slot = self.alloc(Entry {
            key,
            value,
            prev: 0,
            next: 0,
        });

        match self.head {
            // A lone entry links to itself in both directions.
            None => {
                let entry = self.node_mut(slot);
                entry.prev = slot;
                entry.next = slot;
            }
            Some(head) => self.link_before(slot, head),
        }

        self.head = Some(slot);
        self.len += 1;
        slot
    }

    /// Move `slot` to the most recently used position.
    pub(crate) fn promote(&mut self, slot: usize) {
        let Some(head) = self.head else {
            return;
        };
        if head == slot {
            return;
        }

        let (prev, next) = {
            let entry = self.node(slot);
            (entry.prev, entry.next)
        };
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;

        self.link_before(slot, head);
        self.head = Some(slot);
    }

    /// Unlink the least recently used entry and hand back its key and value.
    ///
    /// Returns `None` on an empty ring.
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let head = self.head?;
        let victim = self.node(head).prev;

        if victim == head {
            self.head = None;
        } else {
            let before = self.node(victim).prev;
            self.node_mut(before).next = head;
            self.node_mut(head).prev = before;
        }
        self.len -= 1;

        let entry = self.release(victim);
        Some((entry.key, entry.value))
    }

    /// Walk the ring from most to least recently used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            ring: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // -- private helpers ---------------------------------------------------

    /// Splice `slot` in directly in front of `head`, i.e. between the current
    /// tail and `head`. The caller updates `self.head`.
    fn link_before(&mut self, slot: usize, head: usize) {
        let tail = self.node(head).prev;
        {
            let entry = self.node_mut(slot);
            entry.prev = tail;
            entry.next = head;
        }
        self.node_mut(tail).next = slot;
        self.node_mut(head).prev = slot;
    }

    fn alloc(&mut self, entry: Entry<K, V>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> Entry<K, V> {
        let entry = self.slots[slot].take().expect("released a vacant ring slot");
        self.free.push(slot);
        entry
    }

    fn node(&self, slot: usize) -> &Entry<K, V> {
        self.slots[slot].as_ref().expect("ring link points at a vacant slot")
    }

    fn node_mut(&mut self, slot: usize) -> &mut Entry<K, V> {
        self.slots[slot].as_mut().expect("ring link points at a vacant slot")
    }
}

/// Borrowing iterator over `(slot, key, value)` in recency order.
pub(crate) struct Iter<'a, K, V> {
    ring: &'a RecencyRing<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (usize, &'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.cursor?;
        let entry = self.ring.node(slot);
        self.cursor = Some(entry.next);
        self.remaining -= 1;
        Some((slot, &entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
impl<K: Clone, V> RecencyRing<K, V> {
    /// Check ring shape and return keys most recently used first.
    ///
    /// Panics if the ring is not circular, if `prev` is not the inverse of
    /// `next`, or if the live slot count disagrees with `len`.
    pub(crate) fn assert_consistent(&self) -> Vec<K> {
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(live, self.len, "live slots disagree with len");
        assert_eq!(live + self.free.len(), self.slots.len(), "leaked slot");

        let Some(head) = self.head else {
            assert_eq!(self.len, 0, "empty head with entries present");
            return Vec::new();
        };
        assert!(self.len > 0, "head set on an empty ring");

        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = head;
        for _ in 0..self.len {
            let entry = self.node(cursor);
            assert_eq!(self.node(entry.next).prev, cursor, "prev/next mismatch");
            keys.push(entry.key.clone());
            cursor = entry.next;
        }
        assert_eq!(cursor, head, "forward walk did not return to head");

        let mut cursor = head;
        for _ in 0..self.len {
            cursor = self.node(cursor).prev;
        }
        assert_eq!(cursor, head, "backward walk did not return to head");

        keys
    }
}
