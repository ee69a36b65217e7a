//! Timer queue
//!
//! Deterministic `setTimeout`/`clearTimeout`. Timers fire in deadline order;
//! equal deadlines fire in creation order.

use std::fmt;

/// Handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

struct TimerEntry {
    id: TimerId,
    deadline: f64,
    callback: Box<dyn FnOnce()>,
}

/// Pending one-shot timers
#[derive(Default)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
    next_id: u64,
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a callback at an absolute deadline (ms)
    pub fn schedule(&mut self, deadline: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.push(TimerEntry {
            id,
            deadline,
            callback,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Remove and return the earliest timer due at or before `limit`
    pub fn pop_due(&mut self, limit: f64) -> Option<(f64, Box<dyn FnOnce()>)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= limit)
            .min_by(|(_, a), (_, b)| {
                a.deadline
                    .total_cmp(&b.deadline)
                    .then(a.id.cmp(&b.id))
            })
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(idx);
        Some((entry.deadline, entry.callback))
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
