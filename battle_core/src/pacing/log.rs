//! Combat log - the last few lines of battle text

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// A single line in the combat log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Battle time when the line was written
    pub at: Duration,
    pub message: String,
}

/// Bounded log; the oldest lines fall off once `capacity` is reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for CombatLog {
    fn default() -> Self {
        CombatLog::new(10)
    }
}

impl CombatLog {
    /// A capacity of zero is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        CombatLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, at: Duration, message: impl Into<String>) {
        self.entries.push_back(LogEntry {
            at,
            message: message.into(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Messages oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(|e| e.message.as_str())
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

    #[test]
    fn test_keeps_last_lines() {
        let mut log = CombatLog::new(3);
        for i in 0..5 {
            log.push(Duration::from_millis(i * 100), format!("line {}", i));
        }
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
        assert_eq!(log.last(), Some("line 4"));
        assert_eq!(log.entries().next().unwrap().at, Duration::from_millis(200));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = CombatLog::new(0);
        log.push(Duration::ZERO, "a");
        log.push(Duration::ZERO, "b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.last(), Some("b"));
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(CombatLog::default().capacity(), 10);
    }
}
