use std::collections::VecDeque;

use liftlog_domain::Exercise;

/// Bounded FIFO cache for catalog search results, keyed by the normalized
/// query. Avoids redundant catalog searches while a user is browsing; the
/// oldest entry is evicted once the capacity is reached.
pub struct SearchCache {
    capacity: usize,
    entries: VecDeque<(String, Vec<Exercise>)>,
}

impl SearchCache {
    pub const DEFAULT_CAPACITY: usize = 50;

    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<Exercise>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: String, value: Vec<Exercise>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((key, value));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache = SearchCache::new(2);
        cache.insert("bench".to_string(), vec![]);
        assert_eq!(cache.get("bench"), Some(vec![]));
        assert_eq!(cache.get("squat"), None);
    }

    #[test]
    fn test_eviction_is_oldest_first() {
        let mut cache = SearchCache::new(2);
        cache.insert("a".to_string(), vec![]);
        cache.insert("b".to_string(), vec![]);
        cache.insert("c".to_string(), vec![]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_reinserting_a_key_does_not_grow_the_cache() {
        let mut cache = SearchCache::new(2);
        cache.insert("a".to_string(), vec![]);
        cache.insert("a".to_string(), vec![]);
        assert_eq!(cache.len(), 1);
    }
}
