//! In-process change notifications for the routine collection.

use crate::routines::Routine;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Name of the change event, used as a logging field.
pub const CHANGE_EVENT: &str = "training-data-updated";

type Callback = Arc<dyn Fn(&[Routine]) + Send + Sync>;

/// Token returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(Subscription, Callback)>>,
}

/// Broadcasts the full routine collection to every subscriber after a save.
///
/// Clones share the same subscriber list. Delivery is synchronous and scoped
/// to the current process.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    inner: Arc<Subscribers>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked with the new collection on every change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Routine]) + Send + Sync + 'static,
    {
        let token = Subscription(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((token, Arc::new(callback)));
        token
    }

    /// Remove a callback. Returns false if the token was not registered.
    pub fn unsubscribe(&self, token: Subscription) -> bool {
        let mut callbacks = self.lock();
        let before = callbacks.len();
        callbacks.retain(|(t, _)| *t != token);
        callbacks.len() != before
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Deliver `routines` to every subscriber.
    ///
    /// The subscriber list is snapshotted first, so callbacks may subscribe or
    /// unsubscribe without deadlocking.
    pub fn notify(&self, routines: &[Routine]) {
        let callbacks: Vec<Callback> = self.lock().iter().map(|(_, cb)| cb.clone()).collect();

        tracing::debug!(
            event = CHANGE_EVENT,
            subscribers = callbacks.len(),
            routines = routines.len(),
            "Broadcasting routine collection"
        );

        for callback in callbacks {
            callback(routines);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Subscription, Callback)>> {
        self.inner
            .callbacks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
