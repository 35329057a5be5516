//! Shared listener handle with reference-equality semantics.

use super::BuildOperationListener;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Registered listener. Two handles are equal only when they point at the same
/// listener instance, regardless of the listener's own state.
#[derive(Clone)]
pub struct ListenerHandle(Arc<dyn BuildOperationListener>);

impl ListenerHandle {
    pub fn new<L>(listener: L) -> Self
    where
        L: BuildOperationListener + 'static,
    {
        ListenerHandle(Arc::new(listener))
    }

    pub fn from_arc(listener: Arc<dyn BuildOperationListener>) -> Self {
        ListenerHandle(listener)
    }

    /// Same instance. Compares data addresses only, so handles created through
    /// different trait-object coercions of one `Arc` still match.
    pub fn same_listener(&self, other: &ListenerHandle) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl PartialEq for ListenerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_listener(other)
    }
}

impl Eq for ListenerHandle {}

impl Deref for ListenerHandle {
    type Target = dyn BuildOperationListener;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl<L> From<Arc<L>> for ListenerHandle
where
    L: BuildOperationListener + 'static,
{
    fn from(listener: Arc<L>) -> Self {
        ListenerHandle(listener)
    }
}

impl From<&ListenerHandle> for ListenerHandle {
    fn from(handle: &ListenerHandle) -> Self {
        handle.clone()
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerHandle").field(&self.0.name()).finish()
    }
}
