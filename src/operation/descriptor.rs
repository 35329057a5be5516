//! Operation descriptor: metadata about one build operation.

use super::OperationIdentifier;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes an operation and where it sits in the operation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub id: OperationIdentifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<OperationIdentifier>,
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl OperationDescriptor {
    /// Root operation whose display name equals its name.
    pub fn new(id: impl Into<OperationIdentifier>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            parent_id: None,
            display_name: name.clone(),
            name,
            progress_display_name: None,
            details: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<OperationIdentifier>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_progress_display_name(mut self, progress_display_name: impl Into<String>) -> Self {
        self.progress_display_name = Some(progress_display_name.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
