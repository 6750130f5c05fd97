use std::collections::BTreeMap;

struct Entry<K, T> {
    priority: u32,
    seq: u64,
    key: K,
    item: T,
}

impl<K, T> Entry<K, T> {
    fn rank(&self) -> (u32, u64) {
        (self.priority, self.seq)
    }
}

/// Slot-indexed binary min-heap with decrease-key.
///
/// Entries are ranked by `(priority, insertion sequence)`, so equal
/// priorities pop in arrival order; search results depend on this, keep it.
/// A decrease keeps the entry's original sequence number.
pub struct IndexedMinHeap<K, T> {
    entries: Vec<Entry<K, T>>,
    slots: BTreeMap<K, usize>,
    seq: u64,
}

impl<K, T> Default for IndexedMinHeap<K, T>
where
    K: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> IndexedMinHeap<K, T>
where
    K: Ord + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: BTreeMap::new(),
            seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert `key`, or lower its priority if it is already queued.
    ///
    /// An existing entry with equal or lower priority is left untouched and
    /// the offered item is dropped.
    pub fn insert_or_decrease(&mut self, key: K, item: T, priority: u32) {
        if let Some(&slot) = self.slots.get(&key) {
            if self.entries[slot].priority <= priority {
                return;
            }
            self.entries[slot].priority = priority;
            self.entries[slot].item = item;
            self.sift_up(slot);
            return;
        }

        let slot = self.entries.len();
        self.entries.push(Entry {
            priority,
            seq: self.seq,
            key: key.clone(),
            item,
        });
        self.seq += 1;
        self.slots.insert(key, slot);
        self.sift_up(slot);
    }

    /// Push a fresh entry. Alias of [`insert_or_decrease`]; callers that
    /// generate unique keys use this name for clarity.
    ///
    /// [`insert_or_decrease`]: IndexedMinHeap::insert_or_decrease
    pub fn push(&mut self, key: K, item: T, priority: u32) {
        self.insert_or_decrease(key, item, priority);
    }

    /// Remove and return the minimum entry's item.
    pub fn pop(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let entry = self.entries.pop()?;
        self.slots.remove(&entry.key);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(entry.item)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.slots.insert(self.entries[a].key.clone(), a);
        self.slots.insert(self.entries[b].key.clone(), b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[parent].rank() <= self.entries[slot].rank() {
                break;
            }
            self.swap(parent, slot);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut best = slot;
            if left < self.entries.len() && self.entries[left].rank() < self.entries[best].rank() {
                best = left;
            }
            if right < self.entries.len() && self.entries[right].rank() < self.entries[best].rank()
            {
                best = right;
            }
            if best == slot {
                break;
            }
            self.swap(slot, best);
            slot = best;
        }
    }
}
