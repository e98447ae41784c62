// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A burst of raw signals that has gone quiet for the full settle interval.
///
/// Returned by [`Settle::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settled {
    /// Timestamp of the first raw signal in the burst.
    pub first: u64,
    /// Timestamp of the last raw signal in the burst.
    pub last: u64,
    /// Number of raw signals folded into this settled signal.
    pub coalesced: u32,
}

/// Coalesces bursts of raw signals into one settled signal.
///
/// Each raw signal (re)arms a deadline `interval` units after it. A new raw
/// signal before the deadline pushes the deadline back instead of queuing a
/// second settled signal, so at most one settled signal is outstanding at any
/// time.
///
/// ## Usage
///
/// 1) Call [`Settle::signal`] for every raw notification.
/// 2) Schedule a host wakeup for [`Settle::deadline`].
/// 3) On wakeup, call [`Settle::poll`]; act on the returned [`Settled`] if any.
/// 4) Call [`Settle::cancel`] to drop a pending burst without firing it.
#[derive(Clone, Debug)]
pub struct Settle {
    interval: u64,
    burst: Option<Settled>,
}

impl Settle {
    /// The default quiet interval, 200 units (milliseconds by convention).
    pub const DEFAULT_INTERVAL: u64 = 200;

    /// Creates a disarmed settle with the given quiet interval.
    #[must_use]
    pub const fn new(interval: u64) -> Self {
        Self {
            interval,
            burst: None,
        }
    }

    /// Returns the quiet interval.
    #[must_use]
    pub const fn interval(&self) -> u64 {
        self.interval
    }

    /// Returns `true` while a burst is waiting to settle.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.burst.is_some()
    }

    /// Records a raw signal at `now` and re-arms the deadline.
    ///
    /// Returns `true` if this signal started a new burst, `false` if it was
    /// folded into one already pending.
    ///
    /// Timestamps that go backwards do not pull the deadline earlier.
    pub fn signal(&mut self, now: u64) -> bool {
        match &mut self.burst {
            Some(burst) => {
                burst.last = burst.last.max(now);
                burst.coalesced = burst.coalesced.saturating_add(1);
                false
            }
            None => {
                self.burst = Some(Settled {
                    first: now,
                    last: now,
                    coalesced: 1,
                });
                true
            }
        }
    }

    /// Returns the time at which the pending burst settles, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.burst.map(|burst| burst.last.saturating_add(self.interval))
    }

    /// Fires the pending burst if its deadline has passed at `now`.
    ///
    /// Returns `None` when nothing is pending or the burst has not been quiet
    /// for the full interval yet. A fired burst is cleared.
    pub fn poll(&mut self, now: u64) -> Option<Settled> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.burst.take()
    }

    /// Drops any pending burst without firing it.
    ///
    /// Returns `true` if a burst was pending.
    pub fn cancel(&mut self) -> bool {
        self.burst.take().is_some()
    }
}

impl Default for Settle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
