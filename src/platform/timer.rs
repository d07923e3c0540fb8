//! Manual-advance timer
//!
//! A deterministic stand-in for a toolkit's delayed-callback mechanism. Time
//! only moves when the owner asks it to, so tests can step the simulation
//! millisecond by millisecond.

use std::collections::{BTreeMap, HashMap};

use super::{Timer, TimerToken};
use crate::sim::Task;

/// Pending tasks ordered by due time, then by scheduling order
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: u64,
    next_token: u64,
    queue: BTreeMap<(u64, u64), Task>,
    due_by_token: HashMap<u64, u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks still waiting
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether `token` still refers to a waiting task
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.due_by_token.contains_key(&token.0)
    }
}

impl Timer for TimerQueue {
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerToken {
        let token = self.next_token;
        self.next_token += 1;
        let due = self.now + delay_ms;
        self.queue.insert((due, token), task);
        self.due_by_token.insert(token, due);
        TimerToken(token)
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(due) = self.due_by_token.remove(&token.0) {
            self.queue.remove(&(due, token.0));
        }
    }

    fn now(&self) -> u64 {
        self.now
    }

    fn pop_due(&mut self, deadline: u64) -> Option<Task> {
        let (&(due, token), _) = self.queue.first_key_value()?;
        if due > deadline {
            return None;
        }
        let task = self.queue.remove(&(due, token))?;
        self.due_by_token.remove(&token);
        self.now = self.now.max(due);
        Some(task)
    }

    fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut timer = TimerQueue::new();
        timer.schedule(50, Task::ShipTick);
        timer.schedule(10, Task::SpawnTick);

        assert_eq!(timer.pop_due(100), Some(Task::SpawnTick));
        assert_eq!(timer.now(), 10);
        assert_eq!(timer.pop_due(100), Some(Task::ShipTick));
        assert_eq!(timer.now(), 50);
        assert_eq!(timer.pop_due(100), None);
    }

    #[test]
    fn test_same_instant_is_fifo() {
        let mut timer = TimerQueue::new();
        timer.schedule(5, Task::ProjectileTick(1));
        timer.schedule(5, Task::ProjectileTick(2));

        assert_eq!(timer.pop_due(5), Some(Task::ProjectileTick(1)));
        assert_eq!(timer.pop_due(5), Some(Task::ProjectileTick(2)));
    }

    #[test]
    fn test_respects_deadline() {
        let mut timer = TimerQueue::new();
        timer.schedule(100, Task::SpawnTick);

        assert_eq!(timer.pop_due(99), None);
        assert_eq!(timer.now(), 0);
        timer.advance_to(99);
        assert_eq!(timer.now(), 99);
        assert_eq!(timer.pop_due(100), Some(Task::SpawnTick));
    }

    #[test]
    fn test_cancel_removes_task() {
        let mut timer = TimerQueue::new();
        let token = timer.schedule(10, Task::ObstacleTick(7));
        assert!(timer.is_pending(token));

        timer.cancel(token);
        assert!(!timer.is_pending(token));
        assert_eq!(timer.pending(), 0);
        assert_eq!(timer.pop_due(1000), None);

        // Cancelling twice is harmless
        timer.cancel(token);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut timer = TimerQueue::new();
        timer.advance_to(40);
        timer.schedule(10, Task::ShipTick);

        assert_eq!(timer.pop_due(49), None);
        assert_eq!(timer.pop_due(50), Some(Task::ShipTick));
    }
}
