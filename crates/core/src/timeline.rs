//! Deferred one-shot tasks on an explicit clock.
//!
//! A [`Timeline`] holds actions scheduled to fire once the owner's clock
//! passes their due time. Each schedule call hands back a [`TaskHandle`] that
//! can cancel the action before it fires. The timeline is owned by whatever
//! the actions mutate, so dropping the owner drops every pending action with
//! it.

/// Identifies one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled<A> {
    handle: TaskHandle,
    due: f64,
    action: A,
}

/// Pending deferred actions, fired in due-time order.
#[derive(Debug, Clone)]
pub struct Timeline<A> {
    next_id: u64,
    pending: Vec<Scheduled<A>>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Timeline<A> {
    /// An empty timeline.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedules `action` to fire once the clock reaches `now + delay`.
    pub fn schedule(&mut self, now: f64, delay: f64, action: A) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            handle,
            due: now + delay.max(0.0),
            action,
        });
        handle
    }

    /// Cancels a pending task. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.handle != handle);
        self.pending.len() != before
    }

    /// Cancels every pending task and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Whether `handle` is still waiting to fire.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|task| task.handle == handle)
    }

    /// Number of tasks waiting to fire.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every action due at or before `now`, earliest
    /// first. Ties keep scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<A> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|task| task.due <= now);
        self.pending = waiting;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.handle.0.cmp(&b.handle.0)));
        due.into_iter().map(|task| task.action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_fires_before_due_time() {
        let mut tl = Timeline::new();
        tl.schedule(1.0, 0.1, "reset");
        assert!(tl.drain_due(1.05).is_empty());
        assert_eq!(tl.len(), 1);
    }

    #[test]
    fn task_fires_once_at_due_time() {
        let mut tl = Timeline::new();
        tl.schedule(1.0, 0.5, "reset");
        assert_eq!(tl.drain_due(1.5), vec!["reset"]);
        assert!(tl.drain_due(10.0).is_empty());
        assert!(tl.is_empty());
    }

    #[test]
    fn due_tasks_fire_in_time_order() {
        let mut tl = Timeline::new();
        tl.schedule(0.0, 3.0, 'c');
        tl.schedule(0.0, 1.0, 'a');
        tl.schedule(0.0, 2.0, 'b');
        assert_eq!(tl.drain_due(5.0), vec!['a', 'b', 'c']);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut tl = Timeline::new();
        let h = tl.schedule(0.0, 1.0, 1);
        assert!(tl.is_pending(h));
        assert!(tl.cancel(h));
        assert!(!tl.is_pending(h));
        assert!(tl.drain_due(2.0).is_empty());
    }

    #[test]
    fn cancel_after_fire_returns_false() {
        let mut tl = Timeline::new();
        let h = tl.schedule(0.0, 1.0, 1);
        tl.drain_due(1.0);
        assert!(!tl.cancel(h));
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut tl = Timeline::new();
        tl.schedule(0.0, 1.0, 1);
        tl.schedule(0.0, 2.0, 2);
        assert_eq!(tl.cancel_all(), 2);
        assert!(tl.drain_due(f64::INFINITY).is_empty());
    }

    #[test]
    fn handles_are_unique() {
        let mut tl = Timeline::new();
        let a = tl.schedule(0.0, 1.0, ());
        let b = tl.schedule(0.0, 1.0, ());
        assert_ne!(a, b);
    }

    #[test]
    fn negative_delay_fires_immediately() {
        let mut tl = Timeline::new();
        tl.schedule(4.0, -1.0, "now");
        assert_eq!(tl.drain_due(4.0), vec!["now"]);
    }
}
