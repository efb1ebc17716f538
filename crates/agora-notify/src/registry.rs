#![forbid(unsafe_code)]

//! Fan-out from one sync engine to many registered listeners.
//!
//! The sync engine holds a single [`NotificationRegistry`] and broadcasts
//! each lifecycle event to every listener registered at that moment.
//! Sessions register a bridge listener under a unique id on attach and
//! unregister it on detach.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::bridge::ProposalNotifications;

/// Registered listeners keyed by unique id.
///
/// The lock is held only long enough to snapshot the listener set; callbacks
/// run outside it, so a slow listener cannot stall registration or other
/// broadcasts' lock acquisition.
#[derive(Default)]
pub struct NotificationRegistry {
    listeners: Mutex<HashMap<String, Arc<dyn ProposalNotifications>>>,
}

impl NotificationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener under `id`, replacing any previous listener
    /// with the same id.
    pub fn register(&self, id: impl Into<String>, listener: Arc<dyn ProposalNotifications>) {
        self.lock().insert(id.into(), listener);
    }

    /// Remove the listener registered under `id`, if any. Broadcasts that
    /// already snapshotted the set may still deliver one in-flight event.
    pub fn unregister(&self, id: &str) {
        self.lock().remove(id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn notify_synced(&self) {
        for listener in self.snapshot() {
            listener.on_synced();
        }
    }

    pub fn notify_new_proposal(&self, payload: &dyn Any) {
        for listener in self.snapshot() {
            listener.on_new_proposal(payload);
        }
    }

    pub fn notify_vote_started(&self, payload: &dyn Any) {
        for listener in self.snapshot() {
            listener.on_vote_started(payload);
        }
    }

    pub fn notify_vote_finished(&self, payload: &dyn Any) {
        for listener in self.snapshot() {
            listener.on_vote_finished(payload);
        }
    }

    fn snapshot(&self) -> Vec<Arc<dyn ProposalNotifications>> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<dyn ProposalNotifications>>> {
        self.listeners.lock().expect("listener registry lock poisoned")
    }
}
