//! Thread-safe staging buffer for incoming migrants

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{EvoResult, EvolutionError};
use crate::population::solution::Solution;

/// FIFO queue of immigrants waiting to join an island
///
/// Any thread may add; the owning island drains it between iterations.
#[derive(Debug, Default)]
pub struct ImmigrationQueue {
    queue: Mutex<VecDeque<Solution>>,
}

impl ImmigrationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Solution>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue a copy of `solution`
    pub fn add(&self, solution: &Solution) {
        self.lock().push_back(solution.clone());
    }

    /// Remove and return the oldest immigrant
    pub fn pop(&self) -> EvoResult<Solution> {
        self.lock()
            .pop_front()
            .ok_or_else(|| EvolutionError::NotFound("immigration queue is empty".to_string()))
    }

    /// Drain every waiting immigrant, oldest first
    pub fn pop_all(&self) -> Vec<Solution> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = ImmigrationQueue::new();
        queue.add(&Solution::from_objectives(&[1.0]));
        queue.add(&Solution::from_objectives(&[2.0]));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().objective_values(), vec![1.0]);
        assert_eq!(queue.pop().unwrap().objective_values(), vec![2.0]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_empty() {
        let queue = ImmigrationQueue::new();
        assert!(matches!(queue.pop(), Err(EvolutionError::NotFound(_))));
        assert!(queue.pop_all().is_empty());
    }

    #[test]
    fn test_add_stores_copy() {
        let queue = ImmigrationQueue::new();
        let mut solution = Solution::from_objectives(&[1.0]);
        queue.add(&solution);
        solution.set_objective(0, 5.0).unwrap();

        assert_eq!(queue.pop().unwrap().objective_values(), vec![1.0]);
    }

    #[test]
    fn test_concurrent_adds() {
        let queue = Arc::new(ImmigrationQueue::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..50 {
                        queue.add(&Solution::from_objectives(&[(t * 50 + i) as f64]));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let drained = queue.pop_all();
        assert_eq!(drained.len(), 200);
        assert!(queue.is_empty());
    }
}
