// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal controller: owns the pending set and drives settled re-checks.
//!
//! ## Usage
//!
//! 1) Start a session with [`Reveal::new`] (selector lookup) or
//!    [`Reveal::observe`] (explicit elements). Elements already in view are
//!    marked before either returns.
//! 2) Forward raw viewport notifications to [`Reveal::on_scroll`] and
//!    [`Reveal::on_resize`].
//! 3) Schedule a wakeup at [`Reveal::next_deadline`] and call [`Reveal::poll`]
//!    when it fires. Each settled burst runs exactly one pass.
//! 4) Once [`Reveal::state`] reports [`SessionState::Terminated`], stop
//!    forwarding events; the controller ignores them anyway.

use alloc::vec::Vec;

use hashbrown::HashSet;
#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

use crate::host::{RevealHost, unobserved_selector};
use crate::options::{OptionsError, RevealOptions};
use crate::pending::PendingSet;
use crate::subscription::{SettledChange, ViewportChange, ViewportSubscription};

/// Lifecycle of a reveal session after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Elements are pending and viewport changes trigger re-checks.
    Observing,
    /// Nothing is pending; the subscription is gone. Absorbing.
    Terminated,
}

/// What a single settled pass did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassReport<E> {
    /// The settled burst that triggered the pass.
    pub change: SettledChange,
    /// Number of pending elements evaluated.
    pub evaluated: usize,
    /// Elements this pass marked, in pending order.
    pub newly_marked: Vec<E>,
    /// Pending elements found already carrying the marker.
    pub already_marked: usize,
    /// Elements still pending after the pass.
    pub remaining: usize,
}

struct PassOutcome<E> {
    pending: PendingSet<E>,
    evaluated: usize,
    newly_marked: Vec<E>,
    already_marked: Vec<E>,
}

/// Marks elements once they enter the viewport.
///
/// A `Reveal` owns a host, the session [`RevealOptions`], the [`PendingSet`]
/// of elements not yet revealed and, while anything is pending, a
/// [`ViewportSubscription`]. Passes run synchronously on the caller's
/// thread; `&mut self` keeps them from overlapping.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_reveal::{Reveal, RevealHost, RevealOptions, SessionState};
///
/// struct Page {
///     scroll: f64,
///     tops: Vec<f64>,
///     marked: Vec<bool>,
/// }
///
/// impl RevealHost for Page {
///     type Element = usize;
///
///     fn query(&self, _selector: &str) -> Vec<usize> {
///         (0..self.tops.len()).filter(|&i| !self.marked[i]).collect()
///     }
///     fn bounding_box(&self, el: &usize) -> Option<Rect> {
///         let top = self.tops[*el] - self.scroll;
///         Some(Rect::new(0.0, top, 100.0, top + 50.0))
///     }
///     fn viewport(&self) -> Size {
///         Size::new(800.0, 600.0)
///     }
///     fn has_marker(&self, el: &usize, _marker: &str) -> bool {
///         self.marked[*el]
///     }
///     fn add_marker(&mut self, el: &usize, _marker: &str) -> bool {
///         self.marked[*el] = true;
///         true
///     }
/// }
///
/// let page = Page { scroll: 0.0, tops: vec![10.0, 1_000.0], marked: vec![false; 2] };
/// let mut reveal = Reveal::new(page, ".js-reveal", RevealOptions::default()).unwrap();
///
/// // The first element was in view at construction.
/// assert_eq!(reveal.marked_count(), 1);
/// assert_eq!(reveal.state(), SessionState::Observing);
///
/// // Scroll the second element into view and let the burst settle.
/// reveal.host_mut().scroll = 700.0;
/// reveal.on_scroll(0);
/// assert!(reveal.poll(100).is_none());
/// let report = reveal.poll(200).unwrap();
///
/// assert_eq!(report.newly_marked, vec![1]);
/// assert_eq!(reveal.state(), SessionState::Terminated);
/// ```
pub struct Reveal<H: RevealHost> {
    host: H,
    options: RevealOptions,
    pending: PendingSet<H::Element>,
    subscription: Option<ViewportSubscription>,
    marked: usize,
}

impl<H: RevealHost> Reveal<H> {
    /// Starts a session over the unmarked elements matching `query`.
    ///
    /// The lookup goes through [`unobserved_selector`], so elements that
    /// already carry the marker are never tracked. Elements in view are marked
    /// immediately; a subscription is created only if some remain.
    pub fn new(host: H, query: &str, options: RevealOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        let elements = Self::elements(&host, query, options.marker);
        Ok(Self::start(host, elements, options))
    }

    /// Starts a session over an explicit list of elements.
    ///
    /// Elements that already carry the marker are skipped, matching the
    /// selector exclusion of [`Reveal::new`]. Duplicates are tracked once.
    pub fn observe<I>(host: H, elements: I, options: RevealOptions) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = H::Element>,
    {
        options.validate()?;
        let elements = elements
            .into_iter()
            .filter(|el| !host.has_marker(el, options.marker))
            .collect();
        Ok(Self::start(host, elements, options))
    }

    /// Looks up the elements matching `query` that do not carry `marker`.
    pub fn elements(host: &H, query: &str, marker: &str) -> Vec<H::Element> {
        host.query(&unobserved_selector(query, marker))
    }

    fn start(host: H, elements: Vec<H::Element>, options: RevealOptions) -> Self {
        let mut reveal = Self {
            host,
            options,
            pending: PendingSet::default(),
            subscription: None,
            marked: 0,
        };
        let initial: PendingSet<H::Element> = elements.into_iter().collect();
        #[cfg(feature = "tracing")]
        debug!(candidates = initial.len(), "reveal session started");

        let pending = reveal.run_pass(initial, None).pending;
        if !pending.is_empty() {
            reveal.subscription = Some(ViewportSubscription::new(options.settle_interval));
        }
        #[cfg(feature = "tracing")]
        debug!(
            marked = reveal.marked,
            pending = pending.len(),
            "reveal first pass complete"
        );
        reveal.pending = pending;
        reveal
    }

    /// Runs one evaluation pass over `pending` and returns what is still pending.
    ///
    /// An element that already carries the marker is done: it is dropped
    /// without counting as newly marked, whether or not it is visible. For the rest,
    /// the bounding box and the viewport are read fresh from the host. A
    /// visible element gets the marker added, and counts as newly marked only
    /// if the host then reports the marker present. Elements whose marker was
    /// rejected stay pending.
    ///
    /// If `subscription` is given and the pass empties the set, the
    /// subscription is cancelled. Passing an already cancelled subscription
    /// is a no-op that returns `pending` unchanged.
    ///
    /// `pending` may be any caller-owned set. Elements it resolves are also
    /// removed from the session's own pending set, and the session terminates
    /// if that leaves nothing pending.
    pub fn register(
        &mut self,
        pending: PendingSet<H::Element>,
        subscription: Option<&mut ViewportSubscription>,
    ) -> PendingSet<H::Element> {
        let outcome = self.run_pass(pending, subscription);
        self.forget(outcome.newly_marked.iter().chain(&outcome.already_marked));
        outcome.pending
    }

    /// Drops resolved elements from the session's pending set.
    fn forget<'a>(&mut self, resolved: impl Iterator<Item = &'a H::Element>)
    where
        H::Element: 'a,
    {
        let resolved: HashSet<&H::Element> = resolved.collect();
        if resolved.is_empty() || self.pending.is_empty() {
            return;
        }
        let still_pending = self
            .pending
            .iter()
            .filter(|el| !resolved.contains(el))
            .cloned()
            .collect();
        self.pending = PendingSet::from_unique(still_pending);
        if self.pending.is_empty()
            && let Some(mut sub) = self.subscription.take()
        {
            sub.cancel();
            #[cfg(feature = "tracing")]
            debug!(marked = self.marked, "reveal session terminated");
        }
    }

    fn run_pass(
        &mut self,
        pending: PendingSet<H::Element>,
        subscription: Option<&mut ViewportSubscription>,
    ) -> PassOutcome<H::Element> {
        if subscription.as_ref().is_some_and(|sub| sub.is_cancelled()) {
            return PassOutcome {
                pending,
                evaluated: 0,
                newly_marked: Vec::new(),
                already_marked: Vec::new(),
            };
        }

        let marker = self.options.marker;
        let evaluated = pending.len();
        let mut still_pending = Vec::with_capacity(evaluated);
        let mut newly_marked = Vec::new();
        let mut already_marked = Vec::new();

        for el in pending.into_vec() {
            if self.host.has_marker(&el, marker) {
                already_marked.push(el);
                continue;
            }
            let visible = self
                .host
                .bounding_box(&el)
                .is_some_and(|bounds| self.options.is_visible(bounds, self.host.viewport()));
            if !visible {
                still_pending.push(el);
                continue;
            }
            if self.host.add_marker(&el, marker) && self.host.has_marker(&el, marker) {
                #[cfg(feature = "tracing")]
                debug!(marker, "element revealed");
                newly_marked.push(el);
            } else {
                #[cfg(feature = "tracing")]
                warn!(marker, "host rejected marker; element stays pending");
                still_pending.push(el);
            }
        }

        self.marked += newly_marked.len();
        #[cfg(feature = "tracing")]
        trace!(
            evaluated,
            newly_marked = newly_marked.len(),
            already_marked = already_marked.len(),
            remaining = still_pending.len(),
            "reveal pass"
        );

        let pending = PendingSet::from_unique(still_pending);
        if let Some(sub) = subscription
            && pending.is_empty()
        {
            sub.cancel();
            #[cfg(feature = "tracing")]
            debug!(marked = self.marked, "reveal session terminated");
        }
        PassOutcome {
            pending,
            evaluated,
            newly_marked,
            already_marked,
        }
    }

    /// Records a raw viewport scroll at `now`.
    pub fn on_scroll(&mut self, now: u64) {
        self.notify(ViewportChange::SCROLL, now);
    }

    /// Records a raw viewport resize at `now`.
    pub fn on_resize(&mut self, now: u64) {
        self.notify(ViewportChange::RESIZE, now);
    }

    /// Records raw viewport changes at `now`.
    ///
    /// Ignored once the session has terminated.
    pub fn notify(&mut self, change: ViewportChange, now: u64) {
        if let Some(sub) = &mut self.subscription {
            sub.notify(change, now);
        }
    }

    /// Returns when [`Reveal::poll`] should next be called, if a burst is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.subscription.as_ref()?.deadline()
    }

    /// Runs a pass if a burst of viewport changes has settled at `now`.
    ///
    /// Returns `None` when no burst has settled yet or the session has
    /// terminated. When the pass empties the pending set, the subscription is
    /// cancelled and released in the same call.
    pub fn poll(&mut self, now: u64) -> Option<PassReport<H::Element>> {
        let mut subscription = self.subscription.take()?;
        let Some(change) = subscription.poll(now) else {
            self.subscription = Some(subscription);
            return None;
        };

        let pending = core::mem::take(&mut self.pending);
        let outcome = self.run_pass(pending, Some(&mut subscription));
        self.pending = outcome.pending;
        if !subscription.is_cancelled() {
            self.subscription = Some(subscription);
        }

        Some(PassReport {
            change,
            evaluated: outcome.evaluated,
            newly_marked: outcome.newly_marked,
            already_marked: outcome.already_marked.len(),
            remaining: self.pending.len(),
        })
    }

    /// Returns the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.subscription.is_some() {
            SessionState::Observing
        } else {
            SessionState::Terminated
        }
    }

    /// Returns the elements still waiting to be revealed.
    #[must_use]
    pub fn pending(&self) -> &PendingSet<H::Element> {
        &self.pending
    }

    /// Returns the number of elements this session has marked.
    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.marked
    }

    /// Returns the session options.
    #[must_use]
    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    ///
    /// Geometry changes made through this reference are picked up on the
    /// next pass.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Ends the session and returns the host.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H> core::fmt::Debug for Reveal<H>
where
    H: RevealHost + core::fmt::Debug,
    H::Element: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reveal")
            .field("host", &self.host)
            .field("options", &self.options)
            .field("pending", &self.pending)
            .field("subscription", &self.subscription)
            .field("marked", &self.marked)
            .finish()
    }
}
