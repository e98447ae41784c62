// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host environment a reveal session runs against.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use kurbo::{Rect, Size};

/// Element lookup, geometry and marker access supplied by the host.
///
/// A host is typically a thin adapter over a document tree: a browser DOM via
/// `web-sys`, a retained widget tree, or an in-memory fake for tests. The
/// reveal controller never caches anything it reads through this trait;
/// geometry and marker state are queried fresh on every pass.
pub trait RevealHost {
    /// Opaque handle to a UI node.
    type Element: Clone + Eq + Hash;

    /// Returns the elements matching `selector`, in document order.
    ///
    /// The selector passed by the controller already excludes marked
    /// elements; see [`unobserved_selector`].
    fn query(&self, selector: &str) -> Vec<Self::Element>;

    /// Returns the element's bounding box in viewport coordinates.
    ///
    /// `None` means geometry is unavailable (for example, the element is
    /// detached from layout); the element is treated as not visible.
    fn bounding_box(&self, element: &Self::Element) -> Option<Rect>;

    /// Returns the current size of the top-level viewport.
    fn viewport(&self) -> Size;

    /// Returns `true` if `marker` is currently applied to `element`.
    fn has_marker(&self, element: &Self::Element, marker: &str) -> bool;

    /// Applies `marker` to `element`.
    ///
    /// Returns `false` if the host rejected the mutation. Adding a marker that
    /// is already present must be a no-op.
    fn add_marker(&mut self, element: &Self::Element, marker: &str) -> bool;
}

/// Extends `query` so it only matches elements that do not carry `marker`.
///
/// ```
/// use understory_reveal::unobserved_selector;
///
/// assert_eq!(
///     unobserved_selector(".js-reveal", "is-visible"),
///     ".js-reveal:not(.is-visible)"
/// );
/// ```
#[must_use]
pub fn unobserved_selector(query: &str, marker: &str) -> String {
    format!("{query}:not(.{marker})")
}
