//! Scheduler - virtual-time delayed tasks
//!
//! Time only moves when the owner calls `advance`, so tests run instantly
//! and a front end can feed it real frame time.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    id: TaskId,
    task: T,
}

// Ordered by due time, then by scheduling order
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.id == other.id
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.id).cmp(&(other.due, other.id))
    }
}

/// Delayed task queue driven by explicit time advancement
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<Reverse<Entry<T>>>,
    cancelled: HashSet<TaskId>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler {
            now: Duration::ZERO,
            next_id: 0,
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Queue `task` to fire `delay` after the current time
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Entry {
            due: self.now + delay,
            id,
            task,
        }));
        id
    }

    /// Cancel a pending task; returns false if it already fired or was unknown
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let pending = self.queue.iter().any(|Reverse(e)| e.id == id);
        pending && self.cancelled.insert(id)
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }

    /// Move time forward and return every task now due, earliest first
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now += dt;
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.due > self.now {
                break;
            }
            if let Some(Reverse(entry)) = self.queue.pop() {
                if !self.cancelled.remove(&entry.id) {
                    due.push(entry.task);
                }
            }
        }
        due
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Tasks still waiting to fire
    pub fn pending(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(1000), "reply");

        assert!(scheduler.advance(ms(999)).is_empty());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(ms(1)), vec!["reply"]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), ms(1000));
    }

    #[test]
    fn test_order_by_due_then_sequence() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(50), 'c');
        scheduler.schedule(ms(10), 'a');
        scheduler.schedule(ms(50), 'd');
        scheduler.schedule(ms(10), 'b');

        assert_eq!(scheduler.advance(ms(100)), vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule(ms(10), 1);
        let drop = scheduler.schedule(ms(10), 2);

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(ms(10)), vec![1]);
        assert!(!scheduler.cancel(keep));
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(5), ());
        scheduler.schedule(ms(500), ());
        scheduler.cancel_all();
        assert_eq!(scheduler.pending(), 0);
        assert!(scheduler.advance(ms(1000)).is_empty());
    }

    #[test]
    fn test_delay_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(ms(300));
        scheduler.schedule(ms(100), "late");
        assert!(scheduler.advance(ms(99)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), vec!["late"]);
    }
}
