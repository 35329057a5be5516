//! Broadcaster
//!
//! Fans each lifecycle event out to every listener in one registry snapshot,
//! synchronously on the calling thread. The broadcaster holds no lock while
//! listeners run, and it never re-reads the registry in the middle of a delivery.

use crate::error::{DeliveryFailure, ListenerError};
use crate::listener::{BuildOperationListener, EventKind, ListenerHandle};
use crate::operation::{
    OperationDescriptor, OperationFinishEvent, OperationIdentifier, OperationProgressEvent,
    OperationStartEvent,
};
use crate::registry::ListenerRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{trace, warn};

/// What happens when a listener returns an error during delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing listener and return its error. Listeners not
    /// yet visited for this event are skipped.
    #[default]
    Propagate,
    /// Deliver to every listener, then return all failures together.
    Isolate,
}

impl FailurePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            FailurePolicy::Propagate => "propagate",
            FailurePolicy::Isolate => "isolate",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<ListenerRegistry>,
    policy: FailurePolicy,
}

impl Broadcaster {
    pub fn new(registry: Arc<ListenerRegistry>) -> Self {
        Self::with_policy(registry, FailurePolicy::default())
    }

    pub fn with_policy(registry: Arc<ListenerRegistry>, policy: FailurePolicy) -> Self {
        Broadcaster { registry, policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn registry(&self) -> &Arc<ListenerRegistry> {
        &self.registry
    }

    fn deliver<F>(&self, kind: EventKind, mut notify: F) -> Result<(), ListenerError>
    where
        F: FnMut(&ListenerHandle) -> Result<(), ListenerError>,
    {
        let snapshot = self.registry.snapshot();
        let order = kind.delivery_order();
        trace!(event = %kind, listeners = snapshot.len(), ?order, "broadcasting");

        match self.policy {
            FailurePolicy::Propagate => {
                for (position, listener) in snapshot.ordered(order) {
                    notify(listener).map_err(|source| ListenerError::Delivery {
                        kind,
                        position,
                        listener: listener.name().to_string(),
                        source: Box::new(source),
                    })?;
                }
                Ok(())
            }
            FailurePolicy::Isolate => {
                let mut failures = Vec::new();
                for (position, listener) in snapshot.ordered(order) {
                    if let Err(error) = notify(listener) {
                        warn!(
                            event = %kind,
                            position,
                            listener = %listener.name(),
                            error = %error,
                            "listener failed; continuing delivery"
                        );
                        failures.push(DeliveryFailure {
                            position,
                            listener: listener.name().to_string(),
                            error,
                        });
                    }
                }
                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(ListenerError::Isolated { kind, failures })
                }
            }
        }
    }
}

impl BuildOperationListener for Broadcaster {
    fn started(
        &self,
        descriptor: &OperationDescriptor,
        event: &OperationStartEvent,
    ) -> Result<(), ListenerError> {
        self.deliver(EventKind::Started, |listener| listener.started(descriptor, event))
    }

    fn progress(
        &self,
        operation_id: OperationIdentifier,
        event: &OperationProgressEvent,
    ) -> Result<(), ListenerError> {
        self.deliver(EventKind::Progress, |listener| {
            listener.progress(operation_id, event)
        })
    }

    fn finished(
        &self,
        descriptor: &OperationDescriptor,
        event: &OperationFinishEvent,
    ) -> Result<(), ListenerError> {
        self.deliver(EventKind::Finished, |listener| listener.finished(descriptor, event))
    }

    fn name(&self) -> &str {
        "broadcaster"
    }
}
