//! Virtual-clock task scheduler.
//!
//! Every delayed step of a session (flip landing, audio settle, display
//! pause, retirement phases, screen transitions) is a `Task` queued here.
//! The host drives the clock; tasks fire in order of due time, with ties
//! broken by scheduling order.
//!
//! ## Epochs
//!
//! Session-bound tasks carry the epoch they were scheduled under. Starting
//! or resetting a session cancels them, and the session also drops any
//! task whose epoch is not the live one when it fires.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Epoch};

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Work the session performs when a delay elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// A flip animation finished. `report` is false for flip-backs, which
    /// do not feed the flipped-card list.
    FlipLanded { card: CardId, report: bool },
    /// The pronunciation clip had time to finish.
    AudioSettled,
    /// Two revealed cards were shown long enough; resolve them.
    DisplayElapsed,
    /// A retiring card finished its gather phase.
    RetireGathered { card: CardId },
    /// A retiring card finished pausing and starts departing.
    RetireDepart { card: CardId },
    /// A retiring card left the board.
    RetireFinished { card: CardId },
    /// A screen transition finished.
    TransitionFinished,
}

/// A task with its due time.
#[derive(Clone, Copy, Debug)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub due: Duration,
    /// `None` for tasks that outlive sessions (screen transitions).
    pub epoch: Option<Epoch>,
    pub task: Task,
}

impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.id.0.cmp(&other.id.0))
    }
}

/// Min-heap of tasks keyed on a virtual clock.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<Reverse<ScheduledTask>>,
}

impl Scheduler {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue a task to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, epoch: Option<Epoch>, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(ScheduledTask {
            id,
            due: self.now.saturating_add(delay),
            epoch,
            task,
        }));
        id
    }

    /// Due time of the earliest task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(t)| t.due)
    }

    /// Pop the earliest task if it is due at or before `until`, moving the
    /// clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledTask> {
        if self.next_due()? > until {
            return None;
        }
        let Reverse(task) = self.queue.pop()?;
        self.now = self.now.max(task.due);
        Some(task)
    }

    /// Move the clock forward. The clock never goes backwards.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Drop every session-bound task. Returns how many were dropped.
    pub fn cancel_session_tasks(&mut self) -> usize {
        let before = self.queue.len();
        self.queue.retain(|Reverse(t)| t.epoch.is_none());
        before - self.queue.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(300), None, Task::DisplayElapsed);
        scheduler.schedule(ms(100), None, Task::AudioSettled);
        scheduler.schedule(ms(200), None, Task::TransitionFinished);

        let order: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(ms(1000)))
            .map(|t| t.task)
            .collect();

        assert_eq!(
            order,
            vec![Task::AudioSettled, Task::TransitionFinished, Task::DisplayElapsed]
        );
        assert_eq!(scheduler.now(), ms(300));
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(ms(50), None, Task::AudioSettled);
        let second = scheduler.schedule(ms(50), None, Task::DisplayElapsed);

        assert_eq!(scheduler.pop_due(ms(50)).unwrap().id, first);
        assert_eq!(scheduler.pop_due(ms(50)).unwrap().id, second);
    }

    #[test]
    fn test_not_due_yet() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(500), None, Task::AudioSettled);

        assert!(scheduler.pop_due(ms(499)).is_none());
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_due(), Some(ms(500)));
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(ms(1000));
        scheduler.schedule(ms(10), None, Task::AudioSettled);

        assert_eq!(scheduler.next_due(), Some(ms(1010)));

        scheduler.advance_to(ms(5));
        assert_eq!(scheduler.now(), ms(1000));
    }

    #[test]
    fn test_cancel_session_tasks_keeps_transitions() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), Some(Epoch(1)), Task::AudioSettled);
        scheduler.schedule(ms(20), Some(Epoch(1)), Task::DisplayElapsed);
        scheduler.schedule(ms(30), None, Task::TransitionFinished);

        assert_eq!(scheduler.cancel_session_tasks(), 2);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(
            scheduler.pop_due(ms(100)).unwrap().task,
            Task::TransitionFinished
        );
        assert!(scheduler.is_empty());
    }
}
