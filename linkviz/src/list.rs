use alloc::vec::Vec;

use crate::{NodeId, Point};

/// One element of the visualized list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub id: NodeId,
    pub value: i64,
    pub position: Point,
}

#[derive(Clone, Debug)]
struct Slot {
    entry: Entry,
    next: Option<usize>,
}

/// A singly linked list whose nodes live in an arena of slots.
///
/// Links are slot indexes. `head`/`tail` are cached, so appending is `O(1)`; anything that needs
/// a predecessor (removing the tail, positional splices) walks from the head like a textbook
/// singly linked list. Freed slots are recycled.
#[derive(Clone, Debug, Default)]
pub struct LinkedList {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<&Entry> {
        self.head.map(|s| self.entry_at(s))
    }

    pub fn tail(&self) -> Option<&Entry> {
        self.tail.map(|s| self.entry_at(s))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cur: self.head,
            remaining: self.len,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.iter().nth(index)
    }

    pub fn values(&self) -> Vec<i64> {
        self.iter().map(|e| e.value).collect()
    }

    /// Index of the first entry with `value`.
    pub fn position_of(&self, value: i64) -> Option<usize> {
        self.iter().position(|e| e.value == value)
    }

    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut Entry> {
        self.slots
            .iter_mut()
            .flatten()
            .map(|s| &mut s.entry)
            .find(|e| &e.id == id)
    }

    /// Snapshot of the entries in link order.
    pub fn to_vec(&self) -> Vec<Entry> {
        self.iter().cloned().collect()
    }

    pub fn push_front(&mut self, entry: Entry) {
        let slot = self.alloc(entry, self.head);
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
        self.len += 1;
    }

    pub fn push_back(&mut self, entry: Entry) {
        let slot = self.alloc(entry, None);
        match self.tail {
            Some(t) => self.slot_mut(t).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Inserts `entry` so that it ends up at `index`. Returns `false` when `index > len`.
    pub fn insert(&mut self, index: usize, entry: Entry) -> bool {
        if index > self.len {
            return false;
        }
        if index == 0 {
            self.push_front(entry);
            return true;
        }
        if index == self.len {
            self.push_back(entry);
            return true;
        }
        let Some(prev) = self.slot_index(index - 1) else {
            return false;
        };
        let next = self.slot_ref(prev).next;
        let slot = self.alloc(entry, next);
        self.slot_mut(prev).next = Some(slot);
        self.len += 1;
        true
    }

    pub fn pop_front(&mut self) -> Option<Entry> {
        let head = self.head?;
        let slot = self.release(head);
        self.head = slot.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(slot.entry)
    }

    /// Removes the last entry. Walks to the second-to-last node: there is no back link.
    pub fn pop_back(&mut self) -> Option<Entry> {
        if self.len <= 1 {
            return self.pop_front();
        }
        let prev = self.slot_index(self.len - 2)?;
        let tail = self.slot_mut(prev).next.take()?;
        self.tail = Some(prev);
        self.len -= 1;
        Some(self.release(tail).entry)
    }

    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index >= self.len {
            return None;
        }
        if index == 0 {
            return self.pop_front();
        }
        let prev = self.slot_index(index - 1)?;
        let target = self.slot_ref(prev).next?;
        let next = self.slot_ref(target).next;
        self.slot_mut(prev).next = next;
        if next.is_none() {
            self.tail = Some(prev);
        }
        self.len -= 1;
        Some(self.release(target).entry)
    }

    /// Reverses the links in place.
    pub fn reverse(&mut self) {
        let mut prev: Option<usize> = None;
        let mut cur = self.head;
        while let Some(slot) = cur {
            let next = self.slot_ref(slot).next;
            self.slot_mut(slot).next = prev;
            prev = Some(slot);
            cur = next;
        }
        self.tail = self.head;
        self.head = prev;
    }

    /// Keeps only the entries for which `keep` returns `true`, returning the removed ones in
    /// link order.
    pub fn retain(&mut self, mut keep: impl FnMut(&Entry) -> bool) -> Vec<Entry> {
        let mut removed = Vec::new();
        let mut prev: Option<usize> = None;
        let mut cur = self.head;
        while let Some(slot) = cur {
            let next = self.slot_ref(slot).next;
            if keep(&self.slot_ref(slot).entry) {
                prev = Some(slot);
            } else {
                match prev {
                    Some(p) => self.slot_mut(p).next = next,
                    None => self.head = next,
                }
                self.len -= 1;
                removed.push(self.release(slot).entry);
            }
            cur = next;
        }
        self.tail = prev;
        removed
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Places every entry on the layout grid, index by index.
    pub fn relayout(&mut self, mut position_of: impl FnMut(usize) -> Point) {
        let mut cur = self.head;
        let mut index = 0;
        while let Some(slot) = cur {
            let s = self.slot_mut(slot);
            s.entry.position = position_of(index);
            cur = s.next;
            index += 1;
        }
    }

    fn alloc(&mut self, entry: Entry, next: Option<usize>) -> usize {
        let slot = Slot { entry, next };
        match self.free.pop() {
            Some(i) => {
                debug_assert!(self.slots[i].is_none(), "LinkedList: reusing a live slot");
                self.slots[i] = Some(slot);
                i
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) -> Slot {
        let Some(slot) = self.slots[index].take() else {
            unreachable!("LinkedList: releasing free slot {index}");
        };
        self.free.push(index);
        slot
    }

    fn slot_index(&self, index: usize) -> Option<usize> {
        let mut cur = self.head;
        for _ in 0..index {
            cur = self.slot_ref(cur?).next;
        }
        cur
    }

    fn slot_ref(&self, index: usize) -> &Slot {
        match &self.slots[index] {
            Some(s) => s,
            None => unreachable!("LinkedList: dangling link to slot {index}"),
        }
    }

    fn slot_mut(&mut self, index: usize) -> &mut Slot {
        match &mut self.slots[index] {
            Some(s) => s,
            None => unreachable!("LinkedList: dangling link to slot {index}"),
        }
    }

    fn entry_at(&self, index: usize) -> &Entry {
        &self.slot_ref(index).entry
    }
}

pub struct Iter<'a> {
    list: &'a LinkedList,
    cur: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.list.slot_ref(self.cur?);
        self.cur = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&slot.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a LinkedList {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
