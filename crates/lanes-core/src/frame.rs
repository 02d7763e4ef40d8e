//! Per-frame coalescing of recomputation requests.
//!
//! Scroll and resize notifications can arrive many times between two frames.
//! [`FrameCoalescer`] remembers which keys went dirty and hands each one back
//! exactly once when the frame callback drains it, so a burst of events
//! costs one recomputation per key per frame.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct FrameCoalescer<K> {
    /// Dirty keys in first-request order.
    pending: Vec<K>,
    queued: HashSet<K>,
}

impl<K: Eq + Hash + Clone> FrameCoalescer<K> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            queued: HashSet::new(),
        }
    }

    /// Mark `key` dirty. Returns false if it was already queued.
    pub fn request(&mut self, key: K) -> bool {
        if self.queued.insert(key.clone()) {
            self.pending.push(key);
            true
        } else {
            false
        }
    }

    /// Forget a pending request, e.g. after the key was refreshed eagerly.
    pub fn cancel(&mut self, key: &K) -> bool {
        if self.queued.remove(key) {
            self.pending.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.queued.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every dirty key for this frame.
    pub fn drain(&mut self) -> Vec<K> {
        self.queued.clear();
        std::mem::take(&mut self.pending)
    }
}

impl<K: Eq + Hash + Clone> Default for FrameCoalescer<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_coalesces_to_one() {
        let mut frames = FrameCoalescer::new();
        assert!(frames.request("todo"));
        assert!(!frames.request("todo"));
        assert!(!frames.request("todo"));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames.drain(), vec!["todo"]);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_drain_keeps_first_request_order() {
        let mut frames = FrameCoalescer::new();
        frames.request(3);
        frames.request(1);
        frames.request(3);
        frames.request(2);
        assert_eq!(frames.drain(), vec![3, 1, 2]);
    }

    #[test]
    fn test_key_can_be_requested_again_after_drain() {
        let mut frames = FrameCoalescer::new();
        frames.request('a');
        frames.drain();
        assert!(!frames.is_pending(&'a'));
        assert!(frames.request('a'));
    }

    #[test]
    fn test_cancel() {
        let mut frames = FrameCoalescer::new();
        frames.request(1);
        frames.request(2);
        assert!(frames.cancel(&1));
        assert!(!frames.cancel(&1));
        assert_eq!(frames.drain(), vec![2]);
    }
}
