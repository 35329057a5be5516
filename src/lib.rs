//! Opcast: Build Operation Listener Broadcasting
//!
//! A copy-on-write registry of build operation listeners and a broadcaster that
//! fans lifecycle events (start, progress, finish) out to every registered listener,
//! synchronously and on the calling thread. Start and progress are delivered in
//! registration order, finish in reverse registration order.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod listener;
pub mod listeners;
pub mod logging;
pub mod manager;
pub mod operation;
pub mod registry;

pub use broadcast::{Broadcaster, FailurePolicy};
pub use error::{ConfigError, DeliveryFailure, ListenerError};
pub use listener::{BuildOperationListener, DeliveryOrder, EventKind, ListenerHandle, ListenerSequence};
pub use manager::ListenerManager;
pub use operation::{
    OperationDescriptor, OperationFinishEvent, OperationIdentifier, OperationProgressEvent,
    OperationStartEvent,
};
pub use registry::ListenerRegistry;
