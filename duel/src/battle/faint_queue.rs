use std::collections::VecDeque;

use crate::battle::MonHandle;

/// A Mon waiting to faint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaintEntry {
    pub mon: MonHandle,
    /// The Mon whose move caused the faint.
    pub attacker: Option<MonHandle>,
}

/// Defers faint processing so that faints resolve in detection order.
#[derive(Debug, Default, Clone)]
pub struct FaintQueue {
    entries: VecDeque<FaintEntry>,
}

impl FaintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a Mon, unless it is already waiting.
    ///
    /// Returns whether the Mon was added.
    pub fn push(&mut self, mon: MonHandle, attacker: Option<MonHandle>) -> bool {
        if self.contains(mon) {
            return false;
        }
        self.entries.push_back(FaintEntry { mon, attacker });
        true
    }

    pub fn pop(&mut self) -> Option<FaintEntry> {
        self.entries.pop_front()
    }

    pub fn contains(&self, mon: MonHandle) -> bool {
        self.entries.iter().any(|entry| entry.mon == mon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod faint_queue_test {
    use pretty_assertions::assert_eq;

    use crate::battle::{
        FaintEntry,
        FaintQueue,
        MonHandle,
    };

    #[test]
    fn pops_in_enqueue_order_without_duplicates() {
        let mut queue = FaintQueue::new();
        let a = MonHandle::new(1, 0);
        let b = MonHandle::new(0, 0);
        assert!(queue.push(a, Some(b)));
        assert!(queue.push(b, None));
        assert!(!queue.push(a, None));
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.pop(),
            Some(FaintEntry {
                mon: a,
                attacker: Some(b),
            })
        );
        assert_eq!(queue.pop().map(|entry| entry.mon), Some(b));
        assert!(queue.is_empty());
    }
}
