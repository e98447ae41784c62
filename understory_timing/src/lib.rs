// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic settle (debounce) primitives.
//!
//! UI hosts often receive bursts of raw notifications (scroll, resize, pointer
//! motion) where only the state after the burst matters. This crate provides a
//! small state machine, [`Settle`], that coalesces such bursts and reports a
//! single [`Settled`] signal once no new raw signal has arrived for a fixed
//! quiet interval.
//!
//! This crate never reads a clock and never spawns timers. Hosts are expected
//! to:
//! - Feed raw signals into [`Settle::signal`] with a monotonic timestamp.
//! - Schedule a wakeup at [`Settle::deadline`] using whatever timer facility
//!   they have (an event loop, `setTimeout`, a frame callback, a test clock).
//! - Call [`Settle::poll`] when that wakeup fires (or on any later tick).
//!
//! Timestamps are opaque `u64` values in a caller-chosen unit. The default
//! interval, [`Settle::DEFAULT_INTERVAL`], assumes milliseconds.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::Settle;
//!
//! let mut settle = Settle::new(200);
//!
//! // A burst of three raw signals.
//! settle.signal(1_000);
//! settle.signal(1_050);
//! settle.signal(1_120);
//!
//! // The deadline follows the last raw signal.
//! assert_eq!(settle.deadline(), Some(1_320));
//! assert!(settle.poll(1_200).is_none());
//!
//! let settled = settle.poll(1_320).unwrap();
//! assert_eq!(settled.coalesced, 3);
//! assert_eq!(settled.first, 1_000);
//! assert_eq!(settled.last, 1_120);
//!
//! // Fired once; nothing left to report.
//! assert!(settle.poll(5_000).is_none());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod settle;

pub use settle::{Settle, Settled};
