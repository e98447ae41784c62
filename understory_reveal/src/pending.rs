// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

/// Ordered, duplicate-free collection of elements awaiting reveal.
///
/// A pending set only shrinks: it is built once from the initial lookup and
/// every pass produces a fresh set holding the elements that are still not
/// revealed, in their original order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSet<E> {
    items: Vec<E>,
}

impl<E> PendingSet<E> {
    /// Returns the number of pending elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the pending elements in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    /// Iterates over the pending elements in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.items.iter()
    }

    /// Consumes the set, returning its elements in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.items
    }

    /// Builds a set from items already known to be unique.
    ///
    /// Used by passes, which only ever drop elements from a set that was
    /// de-duplicated on construction.
    pub(crate) fn from_unique(items: Vec<E>) -> Self {
        Self { items }
    }
}

impl<E: Eq> PendingSet<E> {
    /// Returns `true` if `element` is pending.
    #[must_use]
    pub fn contains(&self, element: &E) -> bool {
        self.items.contains(element)
    }
}

impl<E: Clone + Eq + Hash> FromIterator<E> for PendingSet<E> {
    /// Collects elements, keeping the first occurrence of each.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut seen = HashSet::with_capacity(iter.size_hint().0);
        let items = iter.filter(|e| seen.insert(e.clone())).collect();
        Self { items }
    }
}

impl<E> Default for PendingSet<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<'a, E> IntoIterator for &'a PendingSet<E> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
