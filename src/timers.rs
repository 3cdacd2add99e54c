//! Virtual-time timer queue.
//!
//! Every delayed effect in the app (the step transition after a generation,
//! overlay expiry, toast dismissal) is a task in a [`Timers`] queue owned by
//! the controller. Time only moves when the owner advances it, which makes
//! the choreography deterministic under test and lets teardown cancel every
//! pending effect in one call.
//!
//! Tasks with equal deadlines fire in scheduling order.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned by [`Timers::schedule`], used to cancel the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
pub struct Timers<T> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now + delay;
        self.queue.insert((deadline, seq), task);
        self.deadlines.insert(seq, deadline);
        TimerId(seq)
    }

    /// Cancel a pending task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id.0)?;
        self.queue.remove(&(deadline, id.0))
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove the earliest task due at or before `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let (&(deadline, seq), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }
        let task = self.queue.remove(&(deadline, seq))?;
        self.deadlines.remove(&seq);
        self.now = self.now.max(deadline);
        Some((TimerId(seq), task))
    }

    /// Move the clock forward to `until` without firing anything.
    /// Never moves backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Cancel every pending task. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.deadlines.clear();
        dropped
    }
}
