//! Utility types.

use std::{collections::VecDeque, hash::Hash};

type BuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

/// Insertion-ordered map. Iteration order depends only on insertion order,
/// which keeps state numbering and table dumps reproducible across runs.
pub type Map<K, V> = indexmap::IndexMap<K, V, BuildHasher>;

/// Insertion-ordered set.
pub type Set<T> = indexmap::IndexSet<T, BuildHasher>;

/// A FIFO worklist that visits each value at most once: a value that was
/// ever enqueued is never enqueued again, even after it has been popped.
/// Graph walks over cyclic structures terminate without the caller
/// tracking a separate visited set.
#[derive(Debug)]
pub struct Queue<T> {
    queue: VecDeque<T>,
    seen: Set<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            seen: Set::default(),
        }
    }
}

impl<T> Queue<T>
where
    T: Clone + Eq + Hash,
{
    pub fn push(&mut self, value: T) {
        if self.seen.insert(value.clone()) {
            self.queue.push_back(value);
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }
}

impl<T> FromIterator<T> for Queue<T>
where
    T: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::default();
        for value in iter {
            queue.push(value);
        }
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_visits_each_value_once() {
        let mut queue: Queue<u32> = [1, 2, 1].into_iter().collect();
        assert_eq!(queue.pop(), Some(1));

        // re-pushing a popped value is a no-op.
        queue.push(1);
        queue.push(3);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }
}
