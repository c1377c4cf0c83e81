use log::trace;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
struct Pending<T> {
    deadline: Instant,
    args: T,
}

/// Holds at most one deferred call. Scheduling again replaces both the
/// arguments and the deadline.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Defers `args` until `now + delay`, discarding any pending call
    pub fn schedule(&mut self, args: T, now: Instant) {
        if self.pending.is_some() {
            trace!("Superseding pending call");
        }
        self.pending = Some(Pending {
            deadline: now + self.delay,
            args,
        });
    }

    /// Drops the pending call, returning its arguments
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.args)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Returns the pending arguments once their deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if due {
            self.cancel()
        } else {
            None
        }
    }
}

/// What the dispatcher decided to do with a change
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<T> {
    /// Evaluate now with these arguments
    Immediate(T),
    /// Evaluation deferred until the deadline
    Deferred(Instant),
}

/// Lets the first change through immediately and debounces the rest
#[derive(Debug, Clone)]
pub struct ChangeDispatcher<T> {
    debouncer: Debouncer<T>,
    first_pass_done: bool,
}

impl<T> ChangeDispatcher<T> {
    pub fn new(quiet_window: Duration) -> Self {
        ChangeDispatcher {
            debouncer: Debouncer::new(quiet_window),
            first_pass_done: false,
        }
    }

    pub fn dispatch(&mut self, args: T, now: Instant) -> Dispatch<T> {
        if !self.first_pass_done {
            self.first_pass_done = true;
            return Dispatch::Immediate(args);
        }

        self.debouncer.schedule(args, now);
        Dispatch::Deferred(now + self.debouncer.delay())
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        self.debouncer.poll(now)
    }

    /// Takes the pending arguments regardless of the deadline
    pub fn flush(&mut self) -> Option<T> {
        self.debouncer.cancel()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Back to the initial state: the next dispatch is immediate again
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.first_pass_done = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(150);

    #[test]
    fn test_poll_before_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule(1, start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(149)), None);
        assert_eq!(debouncer.poll(start + WINDOW), Some(1));
        assert_eq!(debouncer.poll(start + WINDOW * 2), None);
    }

    #[test]
    fn test_last_write_wins() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        for i in 0..5u64 {
            debouncer.schedule(i, start + Duration::from_millis(i * 20));
        }

        // The deadline moved with the last call
        assert_eq!(debouncer.poll(start + WINDOW), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(80) + WINDOW)
        );
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), Some(4));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule("a", start);

        assert_eq!(debouncer.cancel(), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + WINDOW), None);
    }

    #[test]
    fn test_first_dispatch_is_immediate() {
        let start = Instant::now();
        let mut dispatcher = ChangeDispatcher::new(WINDOW);

        assert_eq!(dispatcher.dispatch(1, start), Dispatch::Immediate(1));
        assert_eq!(dispatcher.dispatch(2, start), Dispatch::Deferred(start + WINDOW));
        assert!(dispatcher.is_pending());
    }

    #[test]
    fn test_five_changes_one_evaluation() {
        let start = Instant::now();
        let mut dispatcher = ChangeDispatcher::new(WINDOW);
        dispatcher.dispatch(0, start);

        let mut evaluations = Vec::new();
        for i in 1..=5u64 {
            let now = start + Duration::from_millis(i * 10);
            dispatcher.dispatch(i, now);
            evaluations.extend(dispatcher.poll(now));
        }
        evaluations.extend(dispatcher.poll(start + Duration::from_secs(1)));

        assert_eq!(evaluations, vec![5]);
    }

    #[test]
    fn test_reset_restores_immediate_pass() {
        let start = Instant::now();
        let mut dispatcher = ChangeDispatcher::new(WINDOW);
        dispatcher.dispatch(1, start);
        dispatcher.dispatch(2, start);

        dispatcher.reset();
        assert!(!dispatcher.is_pending());
        assert_eq!(dispatcher.dispatch(3, start), Dispatch::Immediate(3));
    }

    #[test]
    fn test_flush() {
        let start = Instant::now();
        let mut dispatcher = ChangeDispatcher::new(WINDOW);
        dispatcher.dispatch(1, start);
        dispatcher.dispatch(2, start);

        assert_eq!(dispatcher.flush(), Some(2));
        assert_eq!(dispatcher.flush(), None);
    }
}
