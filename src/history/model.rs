use std::collections::VecDeque;

use crate::entry::ClipboardEntry;

/// In-memory, most-recent-first, capacity-bounded view of the history.
///
/// The model is plain state. It is owned and mutated by the consumer task
/// only, and every mutation applied to it is the result of a store
/// operation that already succeeded, so the view never claims something the
/// store does not hold. Length never exceeds the capacity after any
/// operation returns.
#[derive(Debug)]
pub struct HistoryModel {
    entries: VecDeque<ClipboardEntry>,
    capacity: usize,
}

impl HistoryModel {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Seed the view from persisted history at startup. Input is expected
    /// newest-first, as `Store::load_recent` returns it.
    pub fn load_initial(&mut self, entries: Vec<ClipboardEntry>) {
        self.entries = entries.into_iter().take(self.capacity).collect();
    }

    /// Insert at the front; returns the evicted tail entry when the view
    /// overflows. Eviction trims the view only, the store keeps the row.
    pub fn prepend(&mut self, entry: ClipboardEntry) -> Option<ClipboardEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Remove the entry with `id`; false if it was not in the view.
    pub fn remove_by_id(&mut self, id: i32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Rewrite content in place, preserving position and timestamp.
    pub fn replace_content(&mut self, id: i32, new_content: &str) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.content = new_content.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reconfigure the capacity, re-trimming when it shrinks. Returns the
    /// evicted entries, newest of the evicted first.
    pub fn set_capacity(&mut self, capacity: usize) -> Vec<ClipboardEntry> {
        self.capacity = capacity;
        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            if let Some(entry) = self.entries.pop_back() {
                evicted.push(entry);
            }
        }
        evicted
    }

    /// Content of the most recent entry, the watcher's second dedup tier.
    pub fn head_content(&self) -> Option<&str> {
        self.entries.front().map(|entry| entry.content.as_str())
    }

    pub fn snapshot(&self) -> Vec<ClipboardEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i32, content: &str) -> ClipboardEntry {
        ClipboardEntry {
            id,
            content: content.into(),
            timestamp: chrono::Local::now().naive_local(),
        }
    }

    fn contents(model: &HistoryModel) -> Vec<String> {
        model.snapshot().into_iter().map(|e| e.content).collect()
    }

    #[test]
    fn prepend_keeps_most_recent_first() {
        let mut model = HistoryModel::new(10);
        model.prepend(entry(1, "a"));
        model.prepend(entry(2, "b"));
        assert_eq!(contents(&model), ["b", "a"]);
        assert_eq!(model.head_content(), Some("b"));
    }

    #[test]
    fn prepend_evicts_the_tail_at_capacity() {
        let mut model = HistoryModel::new(3);
        for (id, content) in [(1, "a"), (2, "b"), (3, "c")] {
            assert!(model.prepend(entry(id, content)).is_none());
        }

        let evicted = model.prepend(entry(4, "d")).expect("tail should be evicted");
        assert_eq!(evicted.content, "a");
        assert_eq!(contents(&model), ["d", "c", "b"]);
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn shrinking_capacity_retrims_the_view() {
        let mut model = HistoryModel::new(5);
        for id in 1..=5 {
            model.prepend(entry(id, &format!("e{id}")));
        }

        let evicted = model.set_capacity(2);
        let evicted_ids: Vec<i32> = evicted.iter().map(|e| e.id).collect();
        assert_eq!(evicted_ids, [1, 2, 3]);
        assert_eq!(contents(&model), ["e5", "e4"]);
    }

    #[test]
    fn growing_capacity_evicts_nothing() {
        let mut model = HistoryModel::new(2);
        model.prepend(entry(1, "a"));
        model.prepend(entry(2, "b"));

        assert!(model.set_capacity(10).is_empty());
        assert_eq!(model.len(), 2);
        assert!(model.prepend(entry(3, "c")).is_none());
    }

    #[test]
    fn replace_content_preserves_position_and_timestamp() {
        let mut model = HistoryModel::new(10);
        model.prepend(entry(1, "a"));
        model.prepend(entry(2, "b"));
        let original = model.snapshot()[1].clone();

        assert!(model.replace_content(1, "edited"));

        let after = model.snapshot();
        assert_eq!(after[1].id, 1);
        assert_eq!(after[1].content, "edited");
        assert_eq!(after[1].timestamp, original.timestamp);
        assert_eq!(after[0].content, "b");
    }

    #[test]
    fn replace_and_remove_are_noops_for_missing_ids() {
        let mut model = HistoryModel::new(10);
        model.prepend(entry(1, "a"));

        assert!(!model.replace_content(42, "nope"));
        assert!(!model.remove_by_id(42));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn remove_by_id_drops_the_entry() {
        let mut model = HistoryModel::new(10);
        model.prepend(entry(1, "a"));
        model.prepend(entry(2, "b"));

        assert!(model.remove_by_id(1));
        assert_eq!(contents(&model), ["b"]);
    }

    #[test]
    fn load_initial_truncates_to_capacity() {
        let mut model = HistoryModel::new(2);
        model.load_initial(vec![entry(3, "c"), entry(2, "b"), entry(1, "a")]);
        assert_eq!(contents(&model), ["c", "b"]);
    }

    #[test]
    fn clear_empties_the_view() {
        let mut model = HistoryModel::new(10);
        model.prepend(entry(1, "a"));
        model.clear();
        assert!(model.is_empty());
        assert_eq!(model.head_content(), None);
    }
}
