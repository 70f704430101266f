//! Write Order Module
//!
//! Tracks the order in which keys were last written, for size-bound eviction.

use std::collections::VecDeque;

// == Write Order Tracker ==
/// Tracks write recency for least-recently-written eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently written
/// - Back = Least recently written
///
/// Reads never touch the tracker; only `set` moves a key to the front.
#[derive(Debug, Default)]
pub struct WriteOrder {
    /// Order of keys by write time
    order: VecDeque<String>,
}

impl WriteOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record Write ==
    /// Marks a key as just written (moves to front).
    pub fn record_write(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently written key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.order.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_new() {
        let mut order = WriteOrder::new();
        assert_eq!(order.evict_oldest(), None);
    }

    #[test]
    fn test_record_write_new_keys() {
        let mut order = WriteOrder::new();

        order.record_write("key1");
        order.record_write("key2");
        order.record_write("key3");

        assert_eq!(order.evict_oldest(), Some("key1".to_string()));
        assert_eq!(order.evict_oldest(), Some("key2".to_string()));
    }

    #[test]
    fn test_rewrite_moves_key_to_front() {
        let mut order = WriteOrder::new();

        order.record_write("a");
        order.record_write("b");
        order.record_write("c");
        order.record_write("a");

        assert_eq!(order.evict_oldest(), Some("b".to_string()));
        assert_eq!(order.evict_oldest(), Some("c".to_string()));
        assert_eq!(order.evict_oldest(), Some("a".to_string()));
        assert_eq!(order.evict_oldest(), None);
    }

    #[test]
    fn test_remove() {
        let mut order = WriteOrder::new();

        order.record_write("key1");
        order.record_write("key2");
        order.remove("key1");
        order.remove("nonexistent");

        assert_eq!(order.evict_oldest(), Some("key2".to_string()));
        assert_eq!(order.evict_oldest(), None);
    }

    #[test]
    fn test_clear() {
        let mut order = WriteOrder::new();
        order.record_write("key1");
        order.record_write("key2");

        order.clear();

        assert_eq!(order.evict_oldest(), None);
    }
}
