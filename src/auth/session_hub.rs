// ABOUTME: Session state holder with change subscriptions
// ABOUTME: Subscribers are called synchronously on every transition; handles unsubscribe on drop

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::debug;

use crate::models::Session;

/// Callback invoked with the new session (or `None` after sign-out)
pub type SessionCallback = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct HubState {
    current: Option<Session>,
    next_id: u64,
    listeners: Vec<(u64, SessionCallback)>,
}

/// Owns the current session and notifies subscribers of transitions
#[derive(Clone, Default)]
pub struct SessionHub {
    state: Arc<Mutex<HubState>>,
}

impl SessionHub {
    /// Hub with no session and no subscribers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current session, if signed in
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.lock().current.clone()
    }

    /// Register a callback; it is not called for the session already in place
    #[must_use]
    pub fn subscribe(&self, on_change: SessionCallback) -> Subscription {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.listeners.push((id, on_change));
        debug!(subscription = id, "Session subscriber added");
        Subscription {
            id,
            hub: Arc::downgrade(&self.state),
        }
    }

    /// Replace the session and notify every subscriber
    ///
    /// Callbacks run after the lock is released, so they may read `current()`.
    pub fn publish(&self, session: Option<Session>) {
        let listeners: Vec<SessionCallback> = {
            let mut state = self.lock();
            state.current.clone_from(&session);
            state
                .listeners
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect()
        };
        debug!(
            signed_in = session.is_some(),
            subscribers = listeners.len(),
            "Session changed"
        );
        for listener in listeners {
            listener(session.as_ref());
        }
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

/// Handle for one subscription; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<HubState>>,
}

impl Subscription {
    /// Stop receiving notifications
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.hub.upgrade() {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.listeners.retain(|(id, _)| *id != self.id);
            debug!(subscription = self.id, "Session subscriber removed");
        }
    }
}
