//! Operation payloads: identifiers, descriptors, and lifecycle events.
//!
//! These values are supplied by the build engine and forwarded to listeners
//! untouched; nothing in the broadcasting path inspects them.

mod descriptor;
mod events;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use descriptor::OperationDescriptor;
pub use events::{now_millis, OperationFinishEvent, OperationProgressEvent, OperationStartEvent};

/// Opaque identifier of one build operation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationIdentifier(u64);

impl OperationIdentifier {
    pub const fn new(id: u64) -> Self {
        OperationIdentifier(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for OperationIdentifier {
    fn from(id: u64) -> Self {
        OperationIdentifier(id)
    }
}

impl fmt::Display for OperationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
