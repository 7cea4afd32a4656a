//! Deferred work on the game's single timeline.
//!
//! The game never sleeps or spawns threads. It hands a [`Task`] to a
//! [`Scheduler`], and the host calls [`Game::run_task`](super::session::Game::run_task)
//! once the delay has passed.
use std::collections::BTreeMap;
use std::time::Duration;

/// Work the game asks to have done later. Each task records the level
/// generation it belongs to so stale tasks can be recognised and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    HideMismatch { generation: u64 },
    StartNextLevel { generation: u64, level: u8 },
    Tick { generation: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(raw: u64) -> Self {
        TaskId(raw)
    }
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskId;

    /// Cancelling a task that already ran or was already cancelled is a no-op.
    fn cancel(&mut self, id: TaskId);
}

/// Virtual-clock scheduler. Nothing runs until the owner advances time and
/// drains the due tasks.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    // Keyed by (due time, id) so equal deadlines run in scheduling order.
    queue: BTreeMap<(Duration, TaskId), Task>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.queue.values()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Removes the earliest task due at or before `until` and moves the clock
    /// to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        self.now = self.now.max(due);
        self.queue.remove(&(due, id))
    }

    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.queue.insert((self.now + delay, id), task);
        id
    }

    fn cancel(&mut self, id: TaskId) {
        self.queue.retain(|(_, queued), _| *queued != id);
    }
}
