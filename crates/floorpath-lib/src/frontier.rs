use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Min-priority queue with FIFO ordering among equal priorities.
///
/// Every insert is stamped with a sequence number so that two keys pushed with
/// the same priority come out in the order they went in.
#[derive(Debug, Clone)]
pub struct PriorityFrontier<K> {
    heap: BinaryHeap<FrontierEntry<K>>,
    next_seq: u64,
}

impl<K> Default for PriorityFrontier<K> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<K> PriorityFrontier<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, priority: f64, key: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            priority: FloatOrd(priority),
            seq,
            key,
        });
    }

    /// Remove the key with the lowest priority, earliest insert first on ties.
    pub fn extract_min(&mut self) -> Option<K> {
        self.heap.pop().map(|entry| entry.key)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug)]
struct FrontierEntry<K> {
    priority: FloatOrd,
    seq: u64,
    key: K,
}

impl<K> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for FrontierEntry<K> {}

impl<K> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority, then by sequence.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<K> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_lowest_priority_first() {
        let mut frontier = PriorityFrontier::new();
        frontier.insert(5.0, "c");
        frontier.insert(1.0, "a");
        frontier.insert(3.0, "b");

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.extract_min(), Some("a"));
        assert_eq!(frontier.extract_min(), Some("b"));
        assert_eq!(frontier.extract_min(), Some("c"));
        assert!(frontier.is_empty());
        assert_eq!(frontier.extract_min(), None);
    }

    #[test]
    fn equal_priorities_are_fifo() {
        let mut frontier = PriorityFrontier::new();
        for key in [7, 3, 9, 1] {
            frontier.insert(2.0, key);
        }
        frontier.insert(1.0, 42);

        let drained: Vec<_> = std::iter::from_fn(|| frontier.extract_min()).collect();
        assert_eq!(drained, vec![42, 7, 3, 9, 1]);
    }

    #[test]
    fn interleaved_inserts_keep_order_stable() {
        let mut frontier = PriorityFrontier::new();
        frontier.insert(1.0, 'x');
        frontier.insert(1.0, 'y');
        assert_eq!(frontier.extract_min(), Some('x'));
        frontier.insert(1.0, 'z');
        frontier.insert(0.5, 'w');
        assert_eq!(frontier.extract_min(), Some('w'));
        assert_eq!(frontier.extract_min(), Some('y'));
        assert_eq!(frontier.extract_min(), Some('z'));
    }
}
