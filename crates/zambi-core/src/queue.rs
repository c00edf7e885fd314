use std::collections::{BTreeMap, VecDeque};

/// Priority-ordered multimap.
///
/// Items sharing a priority are kept in insertion order, so the queue is stable: among equal
/// priorities the earliest enqueued item comes out first. Membership and removal scan every
/// bucket; the structure favours predictable ordering over asymptotic speed.
#[derive(Debug, Clone)]
pub struct PriorityQueue<P, T> {
    buckets: BTreeMap<P, VecDeque<T>>,
    len: usize,
}

impl<P: Ord, T> Default for PriorityQueue<P, T> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<P: Ord, T> PriorityQueue<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn enqueue(&mut self, priority: P, item: T) {
        self.buckets.entry(priority).or_default().push_back(item);
        self.len += 1;
    }

    /// Earliest item of the lowest priority bucket.
    pub fn peek(&self) -> Option<&T> {
        self.buckets.values().find_map(|bucket| bucket.front())
    }

    /// Like [`peek`](Self::peek), also returning the priority the item was enqueued with.
    pub fn peek_with_priority(&self) -> Option<(&P, &T)> {
        self.buckets
            .iter()
            .find_map(|(p, bucket)| bucket.front().map(|item| (p, item)))
    }

    pub fn dequeue(&mut self) -> Option<T> {
        let mut entry = self.buckets.first_entry()?;
        let item = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            entry.remove();
        }
        if item.is_some() {
            self.len -= 1;
        }
        item
    }

    /// Take the earliest item enqueued with exactly `priority`.
    pub fn dequeue_priority(&mut self, priority: &P) -> Option<T> {
        let bucket = self.buckets.get_mut(priority)?;
        let item = bucket.pop_front();
        if bucket.is_empty() {
            self.buckets.remove(priority);
        }
        if item.is_some() {
            self.len -= 1;
        }
        item
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}

impl<P: Ord + Clone, T: PartialEq> PriorityQueue<P, T> {
    pub fn contains(&self, item: &T) -> bool {
        self.buckets.values().any(|bucket| bucket.contains(item))
    }

    /// Remove the first item equal to `item`, scanning buckets in priority order.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let (priority, idx) = self.buckets.iter().find_map(|(p, bucket)| {
            bucket
                .iter()
                .position(|candidate| candidate == item)
                .map(|idx| (p.clone(), idx))
        })?;

        let bucket = self.buckets.get_mut(&priority)?;
        let removed = bucket.remove(idx);
        if bucket.is_empty() {
            self.buckets.remove(&priority);
        }
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }
}
