//! Publish/subscribe store for session state.
//!
//! Every mutation goes through [`StateStore::update`], which notifies all
//! subscribers. Subscribers see the latest value; intermediate values may be
//! coalesced.

use std::sync::Arc;
use tokio::sync::watch;

use crate::session::state::SessionState;

/// Shared handle to the session state.
#[derive(Debug, Clone)]
pub struct StateStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl StateStore {
    pub fn new(initial: SessionState) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Mutate the state in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut SessionState)) {
        self.tx.send_modify(f);
    }

    /// Mutate only when `f` returns `Some`; subscribers are notified only then.
    pub fn try_update<R>(&self, f: impl FnOnce(&mut SessionState) -> Option<R>) -> Option<R> {
        let mut out = None;
        self.tx.send_if_modified(|state| {
            out = f(state);
            out.is_some()
        });
        out
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}
