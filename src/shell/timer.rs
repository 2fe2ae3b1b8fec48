//! Virtual-time timer queue
//!
//! Stands in for the single-threaded UI loop: callbacks are queued with
//! a delay and delivered in deadline order as time advances. Nothing
//! runs concurrently, and nothing runs until [`TimerQueue::advance`].

use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    deadline: Duration,
    seq: u64,
    event: T,
}

/// Deterministic queue of delayed events
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> TimerQueue<T> {
    /// Create an empty queue at time zero
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of events not yet delivered
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queue `event` to fire `delay` after now
    pub fn schedule(&mut self, delay: Duration, event: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            deadline: self.now + delay,
            seq,
            event,
        });
    }

    /// Move time forward, returning due events in firing order
    ///
    /// Events with equal deadlines fire in the order they were scheduled.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        self.now += by;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.deadline <= now);
        self.pending = pending;

        due.sort_by_key(|s| (s.deadline, s.seq));
        due.into_iter().map(|s| s.event).collect()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(30), "c");
        timers.schedule(Duration::from_millis(10), "a");
        timers.schedule(Duration::from_millis(10), "b");

        assert!(timers.advance(Duration::from_millis(5)).is_empty());
        assert_eq!(timers.advance(Duration::from_millis(25)), vec!["a", "b", "c"]);
        assert!(timers.is_empty());
        assert_eq!(timers.now(), Duration::from_millis(30));
    }

    #[test]
    fn test_delay_measured_from_scheduling_time() {
        let mut timers = TimerQueue::new();
        timers.advance(Duration::from_millis(100));
        timers.schedule(Duration::from_millis(50), 1);

        assert!(timers.advance(Duration::from_millis(49)).is_empty());
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.advance(Duration::from_millis(1)), vec![1]);
    }
}
