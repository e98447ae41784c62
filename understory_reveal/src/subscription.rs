// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The merged, settled stream of viewport changes.

use bitflags::bitflags;
use understory_timing::Settle;

bitflags! {
    /// Raw viewport change sources, merged into one stream.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ViewportChange: u8 {
        /// The viewport scrolled.
        const SCROLL = 1 << 0;
        /// The viewport was resized.
        const RESIZE = 1 << 1;
    }
}

/// A burst of viewport changes that has gone quiet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettledChange {
    /// Every source that fired during the burst.
    pub sources: ViewportChange,
    /// Number of raw notifications folded into this one.
    pub coalesced: u32,
    /// Timestamp of the first raw notification in the burst.
    pub first: u64,
    /// Timestamp of the last raw notification in the burst.
    pub last: u64,
}

/// Live attachment of a reveal session to viewport changes.
///
/// Scroll and resize notifications share one [`Settle`], so a burst mixing
/// both sources produces a single [`SettledChange`]. Once cancelled, the
/// subscription ignores notifications and never fires again.
#[derive(Clone, Debug)]
pub struct ViewportSubscription {
    settle: Settle,
    sources: ViewportChange,
    cancelled: bool,
}

impl ViewportSubscription {
    /// Creates a live subscription that settles after `interval` quiet units.
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            settle: Settle::new(interval),
            sources: ViewportChange::empty(),
            cancelled: false,
        }
    }

    /// Records a raw change at `now`.
    ///
    /// Ignored after cancellation.
    pub fn notify(&mut self, change: ViewportChange, now: u64) {
        if self.cancelled || change.is_empty() {
            return;
        }
        self.sources |= change;
        self.settle.signal(now);
    }

    /// Returns when the pending burst settles, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        if self.cancelled {
            return None;
        }
        self.settle.deadline()
    }

    /// Fires the pending burst if it has been quiet long enough at `now`.
    pub fn poll(&mut self, now: u64) -> Option<SettledChange> {
        if self.cancelled {
            return None;
        }
        let settled = self.settle.poll(now)?;
        let sources = core::mem::take(&mut self.sources);
        Some(SettledChange {
            sources,
            coalesced: settled.coalesced,
            first: settled.first,
            last: settled.last,
        })
    }

    /// Detaches from viewport changes, dropping any pending burst.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.settle.cancel();
        self.sources = ViewportChange::empty();
    }

    /// Returns `true` once [`ViewportSubscription::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
