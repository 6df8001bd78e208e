use std::collections::{BTreeMap, HashMap};

/// Milliseconds on the widget's virtual clock.
pub type Millis = u64;

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Virtual-clock timer queue holding plain data tasks.
///
/// Tasks due at the same instant fire in scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: Millis,
    next_id: u64,
    pending: BTreeMap<(Millis, u64), T>,
    due_by_id: HashMap<u64, Millis>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `task` to fire `delay` ms from now.
    pub fn schedule(&mut self, delay: Millis, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        self.pending.insert((due, id), task);
        self.due_by_id.insert(id, due);
        TimerId(id)
    }

    /// Drop a pending task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let due = self.due_by_id.remove(&id.0)?;
        self.pending.remove(&(due, id.0))
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.keys().next().map(|&(due, _)| due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// deadline.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, T)> {
        let (&(due, id), _) = self.pending.iter().next()?;
        if due > until {
            return None;
        }
        let task = self.pending.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now = self.now.max(due);
        Some((due, task))
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn advance_clock(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }
}
