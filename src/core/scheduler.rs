//! # Transition Scheduler
//!
//! A virtual-clock task queue. Visual steps (ripple, panel slide, list
//! stagger, lock release) are recorded as [`Task`] values with a due time
//! instead of wall-clock timers, so the sequencing can be driven by
//! `Action::Tick` in the event loop and simulated exactly in tests.
//!
//! ```text
//! schedule_at(300ms, ShowTools)   ──┐
//! schedule_at(300ms, ClearRipple) ──┼──▶ BTreeMap<(due, seq), Task>
//! schedule_at(800ms, ReleaseLock) ──┘            │
//!                                                ▼
//!                     pop_due(now) yields tasks in (due, seq) order
//! ```
//!
//! Tasks are never cancelled. Anything that may go stale (reveals from an
//! older tools render) carries enough context for the handler to ignore it.

use std::collections::BTreeMap;
use std::time::Duration;

/// Work to perform once a task comes due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Home↔Categories animation finished; scroll transitions allowed again.
    ReleaseLock,
    /// Selection feedback that started at `started_at` finished playing.
    ClearRipple { started_at: Duration },
    /// Render the tools list for a category and slide the panel in.
    ShowTools { category_id: String },
    /// Make one tools entry visible. `generation` identifies the render it belongs to.
    RevealTool { generation: u64, index: usize },
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<(Duration, u64), Task>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run at virtual time `due`. Tasks sharing a due time
    /// run in the order they were scheduled.
    pub fn schedule_at(&mut self, due: Duration, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), task);
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, Task)> {
        let (&(due, seq), _) = self.queue.first_key_value()?;
        if due > now {
            return None;
        }
        self.queue.remove(&(due, seq)).map(|task| (due, task))
    }

    /// Due time of the next pending task, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Snapshot of pending tasks in run order.
    pub fn tasks(&self) -> impl Iterator<Item = (Duration, &Task)> {
        self.queue.iter().map(|(&(due, _), task)| (due, task))
    }
}
