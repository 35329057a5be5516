//! Error types for listener delivery and crate configuration.

use crate::listener::EventKind;
use crate::operation::OperationIdentifier;
use thiserror::Error;

/// Errors raised while a listener handles a lifecycle event.
///
/// Listeners return the first three variants. The broadcaster wraps whatever a
/// listener returned in `Delivery` or `Isolated` so the caller can tell which
/// listener failed and for which event.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("Listener failed: {0}")]
    Failed(String),

    #[error("Operation not running: {0}")]
    UnknownOperation(OperationIdentifier),

    #[error(transparent)]
    Other(#[from] anyhow::Error),

    #[error("Delivery of {kind} aborted at listener {position} ({listener}): {source}")]
    Delivery {
        kind: EventKind,
        position: usize,
        listener: String,
        #[source]
        source: Box<ListenerError>,
    },

    #[error("{} of the listeners failed to handle {kind}", .failures.len())]
    Isolated {
        kind: EventKind,
        failures: Vec<DeliveryFailure>,
    },
}

impl ListenerError {
    pub fn failed(message: impl Into<String>) -> Self {
        ListenerError::Failed(message.into())
    }

    /// Innermost error, unwrapping `Delivery` layers added by (possibly nested) broadcasters.
    pub fn root_cause(&self) -> &ListenerError {
        match self {
            ListenerError::Delivery { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// One listener failure collected under [`FailurePolicy::Isolate`](crate::FailurePolicy::Isolate).
#[derive(Debug)]
pub struct DeliveryFailure {
    /// Index of the listener in registration order.
    pub position: usize,
    pub listener: String,
    pub error: ListenerError,
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
