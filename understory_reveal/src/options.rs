// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration and its validation.

use core::fmt;

use kurbo::{Insets, Rect, Size};
use understory_timing::Settle;

use crate::intersect::in_viewport;

/// One edge of the viewport, used to report which offset is invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top edge (`Insets::y0`).
    Top,
    /// Right edge (`Insets::x1`).
    Right,
    /// Bottom edge (`Insets::y1`).
    Bottom,
    /// Left edge (`Insets::x0`).
    Left,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        })
    }
}

/// Error returned when [`RevealOptions`] cannot start a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OptionsError {
    /// The threshold is NaN, infinite, or outside `[0, 1]`.
    ThresholdOutOfRange(f64),
    /// An offset edge is NaN or infinite.
    NonFiniteOffset {
        /// The offending edge.
        edge: Edge,
        /// The rejected value.
        value: f64,
    },
    /// The marker is not usable as a class name.
    InvalidMarker(&'static str),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOutOfRange(value) => {
                write!(f, "threshold {value} is not a fraction in [0, 1]")
            }
            Self::NonFiniteOffset { edge, value } => {
                write!(f, "{edge} offset {value} is not finite")
            }
            Self::InvalidMarker(marker) => {
                write!(f, "marker {marker:?} is not a valid class name")
            }
        }
    }
}

impl core::error::Error for OptionsError {}

/// Configuration of a reveal session.
///
/// Options are validated once when a session starts and are read-only for
/// the rest of it.
///
/// `offset` uses Kurbo's [`Insets`] edge naming: `x0` is the left offset,
/// `y0` the top, `x1` the right and `y1` the bottom. Positive offsets shrink
/// the region an element must enter; negative offsets grow it past the
/// viewport edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    /// Pixel margin applied to each viewport edge.
    pub offset: Insets,
    /// Fraction of the element's own size that must clear each edge.
    pub threshold: f64,
    /// Quiet interval before a burst of viewport changes triggers a pass.
    pub settle_interval: u64,
    /// Class applied to revealed elements.
    pub marker: &'static str,
}

impl RevealOptions {
    /// The marker class applied when none is configured.
    pub const DEFAULT_MARKER: &'static str = "is-visible";

    /// Zero offsets, zero threshold, a 200 unit settle interval and the
    /// `is-visible` marker.
    pub const DEFAULT: Self = Self {
        offset: Insets::ZERO,
        threshold: 0.0,
        settle_interval: Settle::DEFAULT_INTERVAL,
        marker: Self::DEFAULT_MARKER,
    };

    /// Returns a copy with the given edge offsets.
    #[must_use]
    pub const fn with_offset(mut self, offset: Insets) -> Self {
        self.offset = offset;
        self
    }

    /// Returns a copy with the given threshold fraction.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns a copy with the given settle interval.
    #[must_use]
    pub const fn with_settle_interval(mut self, interval: u64) -> Self {
        self.settle_interval = interval;
        self
    }

    /// Returns a copy with the given marker class.
    #[must_use]
    pub const fn with_marker(mut self, marker: &'static str) -> Self {
        self.marker = marker;
        self
    }

    /// Checks that these options describe a usable session.
    ///
    /// Negative offsets are accepted; only non-finite ones are rejected.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(OptionsError::ThresholdOutOfRange(self.threshold));
        }
        let edges = [
            (Edge::Top, self.offset.y0),
            (Edge::Right, self.offset.x1),
            (Edge::Bottom, self.offset.y1),
            (Edge::Left, self.offset.x0),
        ];
        for (edge, value) in edges {
            if !value.is_finite() {
                return Err(OptionsError::NonFiniteOffset { edge, value });
            }
        }
        if !is_class_name(self.marker) {
            return Err(OptionsError::InvalidMarker(self.marker));
        }
        Ok(())
    }

    /// Evaluates `bounds` against `viewport` with these options.
    ///
    /// See [`in_viewport`].
    #[must_use]
    pub fn is_visible(&self, bounds: Rect, viewport: Size) -> bool {
        in_viewport(bounds, viewport, self.offset, self.threshold)
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A conservative class-name check: ASCII letters, digits, `-` and `_`, not
/// starting with a digit.
fn is_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '-' || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
