/// In-app navigation history
///
/// Plays the role of the browser location: it holds the current fragment,
/// records push/replace writes, supports back/forward, and queues a
/// "fragment changed" signal for every write or move so the event loop can
/// deliver it to the synchronization controller.

use tracing::trace;

/// Write access to the location fragment.
///
/// The synchronization controller only talks to the location through this
/// trait, which keeps it testable without a window.
pub trait Navigator {
    /// The fragment of the current history entry
    fn current(&self) -> &str;

    /// Create a new history entry (back/forward-able navigation)
    fn push(&mut self, fragment: String);

    /// Overwrite the current history entry without creating a new one
    fn replace(&mut self, fragment: String);

    /// Consume one queued fragment-changed signal, if any
    fn take_change(&mut self) -> bool;
}

/// A linear history stack with a cursor, like a browser tab's session history.
#[derive(Debug, Clone)]
pub struct History {
    /// All entries, oldest first
    entries: Vec<String>,
    /// Index of the current entry in `entries`
    cursor: usize,
    /// Fragment-changed signals not yet delivered
    pending_changes: usize,
}

impl History {
    /// Start a history whose only entry is `initial`.
    ///
    /// No change is queued; the caller dispatches the startup event itself.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            pending_changes: 0,
        }
    }

    /// Move one entry back. Returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        self.signal_change();
        true
    }

    /// Move one entry forward. Returns false at the newest entry.
    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        self.signal_change();
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    #[cfg(test)]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn signal_change(&mut self) {
        self.pending_changes += 1;
        trace!(fragment = %self.current(), pending = self.pending_changes, "fragment change queued");
    }
}

impl Navigator for History {
    fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    fn push(&mut self, fragment: String) {
        // Pushing the current fragment creates no entry, but listeners still hear about it
        if fragment != self.current() {
            self.entries.truncate(self.cursor + 1);
            self.entries.push(fragment);
            self.cursor += 1;
        }
        self.signal_change();
    }

    fn replace(&mut self, fragment: String) {
        self.entries[self.cursor] = fragment;
        self.signal_change();
    }

    fn take_change(&mut self) -> bool {
        if self.pending_changes == 0 {
            return false;
        }
        self.pending_changes -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_has_no_pending_change() {
        let mut history = History::new("#/");
        assert_eq!(history.current(), "#/");
        assert!(!history.take_change());
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_push_creates_entry() {
        let mut history = History::new("#/");
        history.push("#/3".to_string());

        assert_eq!(history.current(), "#/3");
        assert_eq!(history.entry_count(), 2);
        assert!(history.take_change());
        assert!(!history.take_change());
    }

    #[test]
    fn test_push_identical_still_signals() {
        let mut history = History::new("#/3");
        history.push("#/3".to_string());

        assert_eq!(history.entry_count(), 1);
        assert!(history.take_change());
    }

    #[test]
    fn test_replace_overwrites_current() {
        let mut history = History::new("#/");
        history.push("#/3".to_string());
        history.replace("#/3?search=ale".to_string());

        assert_eq!(history.entry_count(), 2);
        assert_eq!(history.current(), "#/3?search=ale");
        assert!(history.take_change());
        assert!(history.take_change());
        assert!(!history.take_change());
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = History::new("#/");
        history.push("#/1".to_string());
        history.push("#/2".to_string());
        while history.take_change() {}

        assert!(history.back());
        assert_eq!(history.current(), "#/1");
        assert!(history.forward());
        assert_eq!(history.current(), "#/2");
        assert!(!history.forward());
        assert!(history.take_change());
        assert!(history.take_change());
        assert!(!history.take_change());
    }

    #[test]
    fn test_push_after_back_truncates_forward_entries() {
        let mut history = History::new("#/");
        history.push("#/1".to_string());
        history.push("#/2".to_string());
        history.back();
        history.push("#/9".to_string());

        assert_eq!(history.entry_count(), 3);
        assert_eq!(history.current(), "#/9");
        assert!(!history.can_go_forward());
    }
}
