use std::time::{Duration, Instant};

/// Identifies one scheduled firing of a [`Debouncer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TimerHandle,
    deadline: Instant,
    value: T,
}

/// Cancellable single-slot timer polled from the UI event loop.
///
/// Starting a new timer cancels the pending one, so only the value from the last
/// call within the quiescence window is ever delivered.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    next_id: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_id: 0,
            pending: None,
        }
    }

    pub fn start(&mut self, value: T) -> TimerHandle {
        self.start_at(Instant::now(), value)
    }

    /// Schedule `value` to fire `delay` after `now`, replacing any pending value.
    pub fn start_at(&mut self, now: Instant, value: T) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some(Pending {
            handle,
            deadline: now + self.delay,
            value,
        });
        handle
    }

    /// Cancel `handle` if it is still pending. Stale handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match &self.pending {
            Some(pending) if pending.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline)
        {
            self.pending.take().map(|pending| pending.value)
        } else {
            None
        }
    }

    /// Fire the pending value immediately, regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// How long the event loop may sleep before the pending value is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn fires_only_after_quiescence() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.start_at(start, "a");

        assert_eq!(debouncer.poll_at(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll_at(start + DELAY), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll_at(start + DELAY * 2), None);
    }

    #[test]
    fn restarting_supersedes_the_previous_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        let first = debouncer.start_at(start, "ch");
        debouncer.start_at(start + Duration::from_millis(200), "chemo");

        assert_eq!(debouncer.poll_at(start + DELAY), None);
        assert!(!debouncer.cancel(first), "stale handle must not cancel");
        assert_eq!(
            debouncer.poll_at(start + Duration::from_millis(500)),
            Some("chemo")
        );
    }

    #[test]
    fn cancel_and_flush() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        let handle = debouncer.start_at(start, 1);
        assert!(debouncer.cancel(handle));
        assert_eq!(debouncer.poll_at(start + DELAY), None);

        debouncer.start_at(start, 2);
        assert_eq!(debouncer.time_until_due(start), Some(DELAY));
        assert_eq!(debouncer.flush(), Some(2));
        assert_eq!(debouncer.time_until_due(start), None);
    }
}
