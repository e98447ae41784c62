// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reveal --heading-base-level=0

//! Understory Reveal: mark elements once they scroll into view.
//!
//! This crate tracks a set of UI elements and applies a persistent marker
//! (a class name such as `is-visible`) to each one the first time it enters
//! the viewport. It is the headless core behind "reveal on scroll" effects:
//! - [`in_viewport`]: a pure threshold intersection test between an element's
//!   bounding box and the viewport, with per-edge offsets.
//! - [`Reveal`]: a controller that owns the [`PendingSet`] of unrevealed
//!   elements, marks the visible ones, and re-checks the rest after each
//!   settled burst of scroll/resize notifications. It unsubscribes itself
//!   once nothing is pending.
//!
//! It does **not** compute layout, read clocks, or install event listeners.
//! Hosts are expected to:
//! - Implement [`RevealHost`] over their document: selector lookup, bounding
//!   boxes in viewport coordinates, viewport size, and marker access.
//! - Forward raw scroll and resize notifications with a monotonic timestamp
//!   via [`Reveal::on_scroll`] / [`Reveal::on_resize`].
//! - Schedule a wakeup at [`Reveal::next_deadline`] and call [`Reveal::poll`].
//!
//! ## Visibility rule
//!
//! With `bounds` in viewport coordinates, the four directed margins are
//! `bounds.y1` (top), `viewport.width - bounds.x0` (right),
//! `viewport.height - bounds.y0` (bottom) and `bounds.x1` (left). An element
//! is visible when each margin is strictly greater than that edge's offset
//! plus `threshold` times the element's size along the edge's axis.
//!
//! ```rust
//! use kurbo::{Insets, Rect, Size};
//! use understory_reveal::RevealOptions;
//!
//! let viewport = Size::new(800.0, 600.0);
//! // Half of this 100px tall element is below the fold.
//! let bounds = Rect::new(0.0, 550.0, 100.0, 650.0);
//!
//! assert!(RevealOptions::default().is_visible(bounds, viewport));
//! assert!(!RevealOptions::default().with_threshold(0.5).is_visible(bounds, viewport));
//!
//! // A 100px bottom offset moves the fold up past the element's top.
//! let offset = Insets::new(0.0, 0.0, 0.0, 100.0);
//! assert!(!RevealOptions::default().with_offset(offset).is_visible(bounds, viewport));
//! ```
//!
//! ## Session lifecycle
//!
//! Construction runs a first pass immediately, so elements already in view
//! are marked without any event. If anything remains, the session is
//! [`SessionState::Observing`] and holds a [`ViewportSubscription`]; each
//! settled burst runs one pass. When a pass empties the pending set, the
//! subscription is cancelled in that same pass and the session is
//! [`SessionState::Terminated`] for good.
//!
//! Bounding boxes that are unavailable or non-finite count as "not visible
//! yet", and a marker the host refuses to apply leaves the element pending
//! for the next pass. Neither is an error; the only error is invalid
//! [`RevealOptions`].
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to Kurbo.
//! - `tracing`: emit `tracing` events for session start, passes, rejected
//!   markers and termination.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod host;
mod intersect;
mod options;
mod pending;
mod subscription;

pub use controller::{PassReport, Reveal, SessionState};
pub use host::{RevealHost, unobserved_selector};
pub use intersect::{Margins, in_viewport};
pub use options::{Edge, OptionsError, RevealOptions};
pub use pending::PendingSet;
pub use subscription::{SettledChange, ViewportChange, ViewportSubscription};
