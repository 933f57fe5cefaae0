//! View-state controllers, one per screen.
//!
//! A controller owns an immutable snapshot of its screen state inside a
//! [`StateStore`]. Every transition builds the next snapshot and replaces the
//! previous one wholesale; renderers subscribe and redraw on change. Methods
//! take `&mut self`, so a controller never runs two actions at once.

use tokio::sync::watch;

pub mod calendar;
pub mod clients;
pub mod login;

/// Observable holder of a screen's current state.
#[derive(Debug)]
pub struct StateStore<S> {
    sender: watch::Sender<S>,
}

impl<S: Clone> StateStore<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Receiver that observes every published snapshot from now on.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    pub fn snapshot(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Publishes a copy of the current snapshot after `change` is applied.
    pub fn update(&self, change: impl FnOnce(&mut S)) {
        let mut next = self.snapshot();
        change(&mut next);
        self.sender.send_replace(next);
    }
}

impl<S: Clone + Default> Default for StateStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn subscribers_see_replaced_snapshots() {
        let store = StateStore::<Counter>::default();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.update(|s| s.value += 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 1);
        assert_eq!(store.snapshot(), Counter { value: 1 });
    }

    #[test]
    fn update_without_subscribers_still_applies() {
        let store = StateStore::new(Counter { value: 5 });
        store.update(|s| s.value *= 2);
        assert_eq!(store.snapshot().value, 10);
    }
}
