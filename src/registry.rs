//! Listener Registry
//!
//! Holds the currently published [`ListenerSequence`]. Writers serialize on a single
//! mutex and publish a fresh copy on every change; readers take a snapshot with one
//! atomic load and never touch the mutex.

use crate::listener::{ListenerHandle, ListenerSequence};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct ListenerRegistry {
    /// Serializes writers. Held only while copying and publishing, never during delivery.
    write_lock: Mutex<()>,
    current: ArcSwap<ListenerSequence>,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        ListenerRegistry {
            write_lock: Mutex::new(()),
            current: ArcSwap::from_pointee(ListenerSequence::empty()),
        }
    }

    /// Register a listener. Duplicates are kept; each occurrence is delivered to.
    pub fn add_listener(&self, listener: impl Into<ListenerHandle>) {
        let listener = listener.into();
        let name = listener.name().to_string();

        let count = {
            let _guard = self.write_lock.lock();
            let next = self.current.load().with_appended(listener);
            let count = next.len();
            self.current.store(Arc::new(next));
            count
        };

        debug!(listener = %name, listeners = count, "listener added");
    }

    /// Unregister the first occurrence of `listener`.
    ///
    /// Returns `false` and leaves the published sequence untouched when the
    /// listener is not registered.
    pub fn remove_listener(&self, listener: impl Into<ListenerHandle>) -> bool {
        let listener = listener.into();

        let count = {
            let _guard = self.write_lock.lock();
            match self.current.load().without_first(&listener) {
                Some(next) => {
                    let count = next.len();
                    self.current.store(Arc::new(next));
                    Some(count)
                }
                None => None,
            }
        };

        match count {
            Some(count) => {
                debug!(listener = %listener.name(), listeners = count, "listener removed");
                true
            }
            None => {
                debug!(listener = %listener.name(), "listener not registered; nothing removed");
                false
            }
        }
    }

    /// Currently published sequence. Lock-free; later mutations do not affect it.
    pub fn snapshot(&self) -> Arc<ListenerSequence> {
        self.current.load_full()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.snapshot())
            .finish()
    }
}
