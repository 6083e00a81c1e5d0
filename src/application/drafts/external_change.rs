//! Observer registry for writes made by another process.
//!
//! The store itself never detects foreign writes. Whatever hosts the
//! store (a file watcher, a browser storage event bridge) reports them
//! through [`ExternalChangeListeners::notify`].

use std::sync::{Arc, RwLock};

use crate::domain::foundation::ListenerId;

/// A namespace was rewritten outside this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalChange {
    pub key: String,
}

type Callback = Arc<dyn Fn(&ExternalChange) + Send + Sync>;

/// Registered callbacks.
#[derive(Default)]
pub struct ExternalChangeListeners {
    callbacks: RwLock<Vec<(ListenerId, Callback)>>,
}

impl ExternalChangeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` and returns a handle for removing it.
    pub fn add<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&ExternalChange) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        self.callbacks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((id, Arc::new(callback)));
        id
    }

    /// Unregisters a callback. Returns false if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut callbacks = self
            .callbacks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = callbacks.len();
        callbacks.retain(|(listener, _)| *listener != id);
        callbacks.len() != before
    }

    /// Invokes every callback with `change`.
    ///
    /// Callbacks run after the registry lock is released, so a callback
    /// may register or remove listeners.
    pub fn notify(&self, change: &ExternalChange) -> usize {
        let snapshot: Vec<Callback> = self
            .callbacks
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in &snapshot {
            callback(change);
        }
        snapshot.len()
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ExternalChangeListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalChangeListeners")
            .field("count", &self.len())
            .finish()
    }
}
