//! Single-threaded periodic task facility.
//!
//! Engines never own threads. Each one holds at most one [`TaskId`] in an
//! `Option` slot and goes through [`Scheduler::replace`] / [`Scheduler::clear`]
//! so an old task is always cancelled before a new one exists. Time is
//! virtual: the driver advances it, either from a real clock or a script.
//!
//! ## Usage
//!
//! ```ignore
//! let mut slot = None;
//! scheduler.replace(&mut slot, TaskOwner::Timer, 1_000);
//! while let Some(firing) = scheduler.pop_due(target_ms) {
//!     // dispatch firing.owner
//! }
//! scheduler.advance_to(target_ms);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

/// Engine a periodic task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOwner {
    Timer,
    Stopwatch,
    Alarm,
}

/// A task became due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    pub id: TaskId,
    pub owner: TaskOwner,
    pub at_ms: u64,
}

#[derive(Debug, Clone)]
struct PeriodicTask {
    owner: TaskOwner,
    period_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tasks: BTreeMap<TaskId, PeriodicTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Register a task that first fires one period from now.
    pub fn schedule(&mut self, owner: TaskOwner, period_ms: u64) -> TaskId {
        let period_ms = period_ms.max(1);
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            PeriodicTask {
                owner,
                period_ms,
                next_due_ms: self.now_ms + period_ms,
            },
        );
        debug!(?id, ?owner, period_ms, "task scheduled");
        id
    }

    /// Returns `false` if the task was not live.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(&id).is_some();
        if removed {
            debug!(?id, "task cancelled");
        }
        removed
    }

    /// Cancel whatever `slot` holds, then schedule a fresh task into it.
    pub fn replace(&mut self, slot: &mut Option<TaskId>, owner: TaskOwner, period_ms: u64) -> TaskId {
        self.clear(slot);
        let id = self.schedule(owner, period_ms);
        *slot = Some(id);
        id
    }

    /// Cancel the task held in `slot`, leaving it empty.
    pub fn clear(&mut self, slot: &mut Option<TaskId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    pub fn is_live(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Number of live tasks belonging to `owner`.
    pub fn live_tasks(&self, owner: TaskOwner) -> usize {
        self.tasks.values().filter(|t| t.owner == owner).count()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.tasks.values().map(|t| t.next_due_ms).min()
    }

    /// Pop the earliest task due at or before `until_ms`.
    ///
    /// Virtual time moves to the firing instant and the task is re-armed one
    /// period later. Ties resolve in creation order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Firing> {
        let (&id, _) = self
            .tasks
            .iter()
            .filter(|(_, t)| t.next_due_ms <= until_ms)
            .min_by_key(|(id, t)| (t.next_due_ms, **id))?;
        let task = self.tasks.get_mut(&id)?;
        let at_ms = task.next_due_ms;
        task.next_due_ms += task.period_ms;
        self.now_ms = self.now_ms.max(at_ms);
        Some(Firing {
            id,
            owner: task.owner,
            at_ms,
        })
    }

    /// Move virtual time forward without firing anything.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}
