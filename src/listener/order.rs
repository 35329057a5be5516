//! Event kinds and the iteration direction each one is delivered in.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Started,
    Progress,
    Finished,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Started => "started",
            EventKind::Progress => "progress",
            EventKind::Finished => "finished",
        }
    }

    /// Start and progress go oldest listener first; finish unwinds newest first.
    pub fn delivery_order(self) -> DeliveryOrder {
        match self {
            EventKind::Started | EventKind::Progress => DeliveryOrder::RegistrationOrder,
            EventKind::Finished => DeliveryOrder::ReverseRegistrationOrder,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryOrder {
    RegistrationOrder,
    ReverseRegistrationOrder,
}
