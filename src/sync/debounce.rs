use std::time::Duration;

use tracing::trace;

/// Identifies one scheduled invocation of a [`Debouncer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

/// A cancellable single-slot timer.
///
/// Scheduling a value replaces (and so cancels) whatever was waiting. The
/// caller arms a real timer for [`Debouncer::window`] and hands the ticket
/// back through [`Debouncer::fire`] when it elapses; only the newest ticket
/// yields its value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    slot: Option<(DebounceTicket, T)>,
    next_ticket: u64,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slot: None,
            next_ticket: 0,
        }
    }

    /// Quiescence window the caller should wait before firing
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value`, cancelling any outstanding invocation
    pub fn schedule(&mut self, value: T) -> DebounceTicket {
        self.next_ticket += 1;
        let ticket = DebounceTicket(self.next_ticket);
        if self.slot.replace((ticket, value)).is_some() {
            trace!(?ticket, "Debounced invocation superseded");
        }
        ticket
    }

    /// Take the scheduled value if `ticket` is still the outstanding one
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<T> {
        match self.slot.take() {
            Some((current, value)) if current == ticket => Some(value),
            other => {
                self.slot = other;
                None
            }
        }
    }

    /// Drop the outstanding invocation, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|(_, value)| value)
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer<&'static str> {
        Debouncer::new(Duration::from_millis(300))
    }

    #[test]
    fn test_single_schedule_fires_once() {
        let mut debouncer = debouncer();
        let ticket = debouncer.schedule("a");

        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire(ticket), Some("a"));
        assert_eq!(debouncer.fire(ticket), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_only_last_keystroke_fires() {
        let mut debouncer = debouncer();
        let first = debouncer.schedule("a");
        let second = debouncer.schedule("al");
        let third = debouncer.schedule("ale");

        assert_eq!(debouncer.fire(first), None);
        assert_eq!(debouncer.fire(second), None);
        assert_eq!(debouncer.fire(third), Some("ale"));
    }

    #[test]
    fn test_stale_fire_keeps_pending_value() {
        let mut debouncer = debouncer();
        let first = debouncer.schedule("a");
        let second = debouncer.schedule("ab");

        assert_eq!(debouncer.fire(first), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire(second), Some("ab"));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = debouncer();
        let ticket = debouncer.schedule("a");

        assert_eq!(debouncer.cancel(), Some("a"));
        assert_eq!(debouncer.fire(ticket), None);
    }

    #[test]
    fn test_window() {
        assert_eq!(debouncer().window(), Duration::from_millis(300));
    }
}
