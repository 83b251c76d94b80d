//! # runtime
//!
//! The cooperative, single-threaded loop the page host runs on.
//!
//! Time is virtual: it only moves when the host calls [`EventLoop::next_due`]
//! with a deadline, which makes every timer-driven transition deterministic and
//! testable without sleeping. Two queues exist:
//! - timers, ordered by due time and then by scheduling order
//! - microtasks, drained by the host after each task, before time advances
//!
//! The loop is generic over the task payload; it never runs anything itself.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub struct EventLoop<T> {
    now: Duration,
    next_timer: u64,
    /// (due, id); `id` doubles as the FIFO tie-breaker for equal due times.
    queue: BinaryHeap<Reverse<(Duration, TimerId)>>,
    timers: HashMap<TimerId, T>,
    microtasks: VecDeque<T>,
}

impl<T> EventLoop<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_timer: 0,
            queue: BinaryHeap::new(),
            timers: HashMap::new(),
            microtasks: VecDeque::new(),
        }
    }

    /// Virtual time elapsed since the loop was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn set_timeout(&mut self, delay: Duration, task: T) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        let due = self.now + delay;
        self.queue.push(Reverse((due, id)));
        self.timers.insert(id, task);
        log::trace!(target: "runtime.timers", "scheduled {id:?} for {due:?}");
        id
    }

    /// Returns the task if the timer was still pending.
    pub fn clear_timeout(&mut self, id: TimerId) -> Option<T> {
        let task = self.timers.remove(&id);
        if task.is_some() {
            log::trace!(target: "runtime.timers", "cleared {id:?}");
        }
        task
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest live timer.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_cancelled();
        self.queue.peek().map(|Reverse((due, _))| *due)
    }

    /// Pops the earliest timer due at or before `deadline`, moving the clock to
    /// its due time. Returns `None` (leaving the clock untouched) when no timer
    /// is due by then.
    pub fn next_due(&mut self, deadline: Duration) -> Option<T> {
        self.discard_cancelled();
        let Reverse((due, id)) = *self.queue.peek()?;
        if due > deadline {
            return None;
        }
        self.queue.pop();
        self.now = self.now.max(due);
        log::trace!(target: "runtime.timers", "firing {id:?} at {due:?}");
        self.timers.remove(&id)
    }

    /// Moves the clock forward to `deadline`. Never moves it backwards.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    pub fn queue_microtask(&mut self, task: T) {
        self.microtasks.push_back(task);
    }

    pub fn pop_microtask(&mut self) -> Option<T> {
        self.microtasks.pop_front()
    }

    pub fn pending_microtasks(&self) -> usize {
        self.microtasks.len()
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, id))) = self.queue.peek() {
            if self.timers.contains_key(id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}
