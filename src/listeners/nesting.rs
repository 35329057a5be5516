//! Nesting tracker: depth of every running operation.
//!
//! A child's depth is its parent's depth plus one. Operations with no parent, or
//! whose parent is not running, sit at depth zero. Registered early, this lets
//! later listeners query depth on start and still see it on finish, because finish
//! reaches them before it reaches the tracker.

use crate::error::ListenerError;
use crate::listener::BuildOperationListener;
use crate::operation::{
    OperationDescriptor, OperationFinishEvent, OperationIdentifier, OperationProgressEvent,
    OperationStartEvent,
};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct NestingTracker {
    depths: Mutex<HashMap<OperationIdentifier, usize>>,
}

impl NestingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth_of(&self, id: OperationIdentifier) -> Option<usize> {
        self.depths.lock().get(&id).copied()
    }

    pub fn is_running(&self, id: OperationIdentifier) -> bool {
        self.depths.lock().contains_key(&id)
    }

    /// Running operations, sorted by identifier.
    pub fn running(&self) -> Vec<OperationIdentifier> {
        let mut ids: Vec<_> = self.depths.lock().keys().copied().collect();
        ids.sort();
        ids
    }
}

impl BuildOperationListener for NestingTracker {
    fn started(
        &self,
        descriptor: &OperationDescriptor,
        _event: &OperationStartEvent,
    ) -> Result<(), ListenerError> {
        let mut depths = self.depths.lock();
        let depth = descriptor
            .parent_id
            .and_then(|parent| depths.get(&parent))
            .map_or(0, |parent_depth| parent_depth + 1);
        depths.insert(descriptor.id, depth);
        Ok(())
    }

    fn progress(
        &self,
        _operation_id: OperationIdentifier,
        _event: &OperationProgressEvent,
    ) -> Result<(), ListenerError> {
        Ok(())
    }

    fn finished(
        &self,
        descriptor: &OperationDescriptor,
        _event: &OperationFinishEvent,
    ) -> Result<(), ListenerError> {
        self.depths
            .lock()
            .remove(&descriptor.id)
            .map(|_| ())
            .ok_or(ListenerError::UnknownOperation(descriptor.id))
    }

    fn name(&self) -> &str {
        "nesting-tracker"
    }
}
