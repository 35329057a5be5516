//! Listener capability set and the immutable listener sequence.

mod handle;
mod order;
mod sequence;

use crate::error::ListenerError;
use crate::operation::{
    OperationDescriptor, OperationFinishEvent, OperationIdentifier, OperationProgressEvent,
    OperationStartEvent,
};

pub use handle::ListenerHandle;
pub use order::{DeliveryOrder, EventKind};
pub use sequence::{ListenerSequence, OrderedListeners};

/// Receives lifecycle notifications for build operations.
///
/// Callbacks run synchronously on the thread that triggered the event. An `Err`
/// surfaces at that call site, subject to the broadcaster's
/// [`FailurePolicy`](crate::FailurePolicy).
pub trait BuildOperationListener: Send + Sync {
    fn started(
        &self,
        descriptor: &OperationDescriptor,
        event: &OperationStartEvent,
    ) -> Result<(), ListenerError>;

    fn progress(
        &self,
        operation_id: OperationIdentifier,
        event: &OperationProgressEvent,
    ) -> Result<(), ListenerError>;

    fn finished(
        &self,
        descriptor: &OperationDescriptor,
        event: &OperationFinishEvent,
    ) -> Result<(), ListenerError>;

    /// Name used in logs and delivery errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
