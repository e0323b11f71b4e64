//! Cancellable scheduled tasks on a virtual clock.
//!
//! Every timer in the application (carousel autoplay, the delayed menu close)
//! is a task in a single `Scheduler`. The clock only moves when the owner
//! advances it, so the event loop feeds it real elapsed time while tests feed
//! it simulated time.

use std::collections::BTreeMap;
use std::time::Duration;

/// Milliseconds since the scheduler was created.
///
pub type Millis = u64;

/// Handle to a scheduled task, used to cancel it or to recognise it when it
/// fires.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Specifying what a task is for, so the owner can dispatch it.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    CarouselAutoplay,
    MenuClose,
}

/// A task that came due.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    pub at: Millis,
}

#[derive(Debug, Clone)]
struct Task {
    kind: TimerKind,
    due: Millis,
    interval: Option<Millis>,
}

/// Owns the virtual clock and all pending tasks.
///
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Millis,
    next_id: u64,
    tasks: BTreeMap<TimerId, Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler::default()
    }

    /// Current clock value.
    ///
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of live tasks.
    ///
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Schedule a task that fires once after `delay`.
    ///
    pub fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        self.insert(kind, to_millis(delay), None)
    }

    /// Schedule a task that fires every `interval`, first after one interval.
    /// A zero interval degrades to a one-shot so a tick can never spin forever.
    ///
    pub fn schedule_repeating(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let interval = to_millis(interval);
        let repeat = if interval == 0 { None } else { Some(interval) };
        self.insert(kind, interval, repeat)
    }

    /// Cancel a task. Returns true if a live task was removed.
    ///
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Cancel every task.
    ///
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Remove and return the earliest task due at or before `until`, moving
    /// the clock to its due time. Repeating tasks are re-queued on their
    /// original cadence. Ties fire in creation order.
    ///
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired> {
        let (id, due) = self
            .tasks
            .iter()
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(id, task)| (task.due, **id))
            .map(|(id, task)| (*id, task.due))?;

        self.now = self.now.max(due);
        let kind = match self.tasks.get_mut(&id) {
            Some(task) => match task.interval {
                Some(interval) if task.due.saturating_add(interval) > task.due => {
                    task.due += interval;
                    task.kind
                }
                _ => {
                    let kind = task.kind;
                    self.tasks.remove(&id);
                    kind
                }
            },
            None => return None,
        };

        Some(Fired { id, kind, at: due })
    }

    /// Move the clock forward to `until` without firing anything.
    ///
    pub fn advance_to(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, kind: TimerKind, delay: Millis, interval: Option<Millis>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            Task {
                kind,
                due: self.now.saturating_add(delay),
                interval,
            },
        );
        id
    }
}

fn to_millis(duration: Duration) -> Millis {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler, until: Millis) -> Vec<Fired> {
        let mut fired = vec![];
        while let Some(f) = scheduler.pop_due(until) {
            fired.push(f);
        }
        scheduler.advance_to(until);
        fired
    }

    #[test]
    fn one_shot_fires_once_at_due_time() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_once(Duration::from_millis(300), TimerKind::MenuClose);

        assert!(drain(&mut scheduler, 299).is_empty());
        let fired = drain(&mut scheduler, 300);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, id);
        assert_eq!(fired[0].at, 300);
        assert_eq!(scheduler.pending(), 0);
        assert!(drain(&mut scheduler, 10_000).is_empty());
    }

    #[test]
    fn repeating_keeps_cadence() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(Duration::from_millis(5000), TimerKind::CarouselAutoplay);

        let fired = drain(&mut scheduler, 12_000);
        let times: Vec<Millis> = fired.iter().map(|f| f.at).collect();
        assert_eq!(times, vec![5000, 10_000]);
        assert_eq!(scheduler.now(), 12_000);

        let fired = drain(&mut scheduler, 15_000);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].at, 15_000);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_once(Duration::from_millis(10), TimerKind::MenuClose);
        assert!(scheduler.is_pending(id));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.is_pending(id));
        assert!(!scheduler.cancel(id));
        assert!(drain(&mut scheduler, 100).is_empty());
    }

    #[test]
    fn far_future_tasks_saturate_instead_of_overflowing() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(1);
        let id = scheduler.schedule_once(Duration::from_millis(u64::MAX), TimerKind::MenuClose);
        assert!(scheduler.is_pending(id));
        assert!(drain(&mut scheduler, u64::MAX - 1).is_empty());
        assert_eq!(drain(&mut scheduler, u64::MAX).len(), 1);
    }

    #[test]
    fn repeating_task_that_cannot_recur_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(u64::MAX - 10);
        scheduler.schedule_repeating(Duration::from_millis(7), TimerKind::CarouselAutoplay);
        let fired = drain(&mut scheduler, u64::MAX);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].at, u64::MAX - 3);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn ties_fire_in_creation_order() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule_once(Duration::from_millis(50), TimerKind::MenuClose);
        let second =
            scheduler.schedule_repeating(Duration::from_millis(50), TimerKind::CarouselAutoplay);

        let fired = drain(&mut scheduler, 50);
        assert_eq!(fired[0].id, first);
        assert_eq!(fired[1].id, second);
    }

    #[test]
    fn zero_interval_repeating_degrades_to_one_shot() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(Duration::ZERO, TimerKind::CarouselAutoplay);
        assert_eq!(drain(&mut scheduler, 1).len(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn tasks_scheduled_later_are_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(1000);
        scheduler.schedule_once(Duration::from_millis(300), TimerKind::MenuClose);
        assert!(drain(&mut scheduler, 1299).is_empty());
        assert_eq!(drain(&mut scheduler, 1300).len(), 1);
    }
}
