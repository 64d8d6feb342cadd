//! Cross-screen refresh signal.
//!
//! Screens showing persisted playlist data subscribe here and reload when
//! the signal fires. It is a single named event with no payload, owned by
//! the UI layer: the stores never emit it themselves.

use std::sync::{Arc, Mutex};

type Listener = Box<dyn Fn() + Send + Sync>;

/// A minimal publish/subscribe handle. Clones share the subscriber list.
#[derive(Clone, Default)]
pub struct RefreshSignal {
    listeners: Arc<Mutex<Vec<Listener>>>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run on every emit.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listeners.lock().unwrap().push(Box::new(listener));
    }

    /// Notify every subscriber that persisted library data changed.
    pub fn emit(&self) {
        for listener in self.listeners.lock().unwrap().iter() {
            listener();
        }
    }
}
