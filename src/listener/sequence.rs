//! Immutable, ordered listener sequence.
//!
//! A published sequence is never changed. `with_appended` and `without_first`
//! build a fresh copy, which the registry then publishes in place of the old one.

use super::{DeliveryOrder, ListenerHandle};
use std::iter::{Enumerate, Rev};
use std::slice;

#[derive(Debug, Clone, Default)]
pub struct ListenerSequence {
    listeners: Vec<ListenerHandle>,
}

impl ListenerSequence {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&ListenerHandle> {
        self.listeners.get(position)
    }

    pub fn contains(&self, listener: &ListenerHandle) -> bool {
        self.listeners.iter().any(|l| l == listener)
    }

    /// Number of times `listener` is registered.
    pub fn occurrences(&self, listener: &ListenerHandle) -> usize {
        self.listeners.iter().filter(|l| *l == listener).count()
    }

    /// Copy of this sequence with `listener` appended.
    pub fn with_appended(&self, listener: ListenerHandle) -> Self {
        let mut listeners = Vec::with_capacity(self.listeners.len() + 1);
        listeners.extend(self.listeners.iter().cloned());
        listeners.push(listener);
        Self { listeners }
    }

    /// Copy of this sequence without the first occurrence of `listener`,
    /// or `None` when it is not registered.
    pub fn without_first(&self, listener: &ListenerHandle) -> Option<Self> {
        let index = self.listeners.iter().position(|l| l == listener)?;
        let mut listeners = self.listeners.clone();
        listeners.remove(index);
        Some(Self { listeners })
    }

    /// Oldest-registered first. Positions are indices in registration order.
    pub fn in_registration_order(&self) -> OrderedListeners<'_> {
        OrderedListeners::Forward(self.listeners.iter().enumerate())
    }

    /// Newest-registered first. Positions are still indices in registration order.
    pub fn in_reverse_registration_order(&self) -> OrderedListeners<'_> {
        OrderedListeners::Reverse(self.listeners.iter().enumerate().rev())
    }

    pub fn ordered(&self, order: DeliveryOrder) -> OrderedListeners<'_> {
        match order {
            DeliveryOrder::RegistrationOrder => self.in_registration_order(),
            DeliveryOrder::ReverseRegistrationOrder => self.in_reverse_registration_order(),
        }
    }
}

/// Iterator over `(position, listener)` pairs in one of the two delivery orders.
pub enum OrderedListeners<'a> {
    Forward(Enumerate<slice::Iter<'a, ListenerHandle>>),
    Reverse(Rev<Enumerate<slice::Iter<'a, ListenerHandle>>>),
}

impl<'a> Iterator for OrderedListeners<'a> {
    type Item = (usize, &'a ListenerHandle);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            OrderedListeners::Forward(iter) => iter.next(),
            OrderedListeners::Reverse(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            OrderedListeners::Forward(iter) => iter.size_hint(),
            OrderedListeners::Reverse(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for OrderedListeners<'_> {}
