//! Listener that writes every lifecycle event to `tracing`.

use crate::error::ListenerError;
use crate::listener::BuildOperationListener;
use crate::operation::{
    OperationDescriptor, OperationFinishEvent, OperationIdentifier, OperationProgressEvent,
    OperationStartEvent,
};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl TracingListener {
    pub fn new() -> Self {
        TracingListener
    }
}

impl BuildOperationListener for TracingListener {
    fn started(
        &self,
        descriptor: &OperationDescriptor,
        event: &OperationStartEvent,
    ) -> Result<(), ListenerError> {
        debug!(
            operation_id = %descriptor.id,
            parent_id = ?descriptor.parent_id.map(|p| p.get()),
            name = %descriptor.name,
            start_time = event.start_time,
            "operation started: {}",
            descriptor.display_name
        );
        Ok(())
    }

    fn progress(
        &self,
        operation_id: OperationIdentifier,
        event: &OperationProgressEvent,
    ) -> Result<(), ListenerError> {
        trace!(
            operation_id = %operation_id,
            time = event.time,
            details = ?event.details,
            "operation progress"
        );
        Ok(())
    }

    fn finished(
        &self,
        descriptor: &OperationDescriptor,
        event: &OperationFinishEvent,
    ) -> Result<(), ListenerError> {
        match &event.failure {
            Some(failure) => warn!(
                operation_id = %descriptor.id,
                parent_id = ?descriptor.parent_id.map(|p| p.get()),
                name = %descriptor.name,
                duration_ms = event.duration_ms(),
                failure = %failure,
                "operation failed: {}",
                descriptor.display_name
            ),
            None => debug!(
                operation_id = %descriptor.id,
                parent_id = ?descriptor.parent_id.map(|p| p.get()),
                name = %descriptor.name,
                duration_ms = event.duration_ms(),
                "operation finished: {}",
                descriptor.display_name
            ),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "tracing"
    }
}
