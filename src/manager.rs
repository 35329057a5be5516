//! Listener manager: one registry plus the broadcaster that reads from it.

use crate::broadcast::{Broadcaster, FailurePolicy};
use crate::config::BroadcastConfig;
use crate::listener::ListenerHandle;
use crate::registry::ListenerRegistry;
use std::sync::Arc;

/// Entry point handed to the build engine. The engine calls into
/// [`broadcaster`](Self::broadcaster); plugins register through
/// [`add_listener`](Self::add_listener).
#[derive(Debug, Clone)]
pub struct ListenerManager {
    registry: Arc<ListenerRegistry>,
    broadcaster: Broadcaster,
}

impl Default for ListenerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerManager {
    pub fn new() -> Self {
        Self::with_policy(FailurePolicy::default())
    }

    pub fn with_policy(policy: FailurePolicy) -> Self {
        let registry = Arc::new(ListenerRegistry::new());
        let broadcaster = Broadcaster::with_policy(registry.clone(), policy);
        Self {
            registry,
            broadcaster,
        }
    }

    pub fn with_config(config: &BroadcastConfig) -> Self {
        Self::with_policy(config.failure_policy)
    }

    pub fn add_listener(&self, listener: impl Into<ListenerHandle>) {
        self.registry.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: impl Into<ListenerHandle>) -> bool {
        self.registry.remove_listener(listener)
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    pub fn registry(&self) -> &Arc<ListenerRegistry> {
        &self.registry
    }
}
