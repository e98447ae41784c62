// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold intersection test between an element and the viewport.

use kurbo::{Insets, Rect, Size};

/// Directed distances from an element to each viewport edge.
///
/// Each margin measures how far the element's far edge has travelled past
/// the opposite viewport edge. An element is fully beyond an edge once the
/// corresponding margin drops to zero or below.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// `bounds.y1`: the element's bottom, measured from the viewport top.
    pub top: f64,
    /// `viewport.width - bounds.x0`.
    pub right: f64,
    /// `viewport.height - bounds.y0`.
    pub bottom: f64,
    /// `bounds.x1`: the element's right, measured from the viewport left.
    pub left: f64,
}

impl Margins {
    /// Computes the margins of `bounds` inside a viewport of size `viewport`.
    ///
    /// `bounds` is in viewport coordinates: the origin is the viewport's
    /// top-left corner.
    #[must_use]
    pub fn new(bounds: Rect, viewport: Size) -> Self {
        Self {
            top: bounds.y1,
            right: viewport.width - bounds.x0,
            bottom: viewport.height - bounds.y0,
            left: bounds.x1,
        }
    }
}

/// Returns `true` if `bounds` counts as inside `viewport`.
///
/// The per-axis pixel threshold is `threshold * width` horizontally and
/// `threshold * height` vertically. The element is visible when every
/// [`Margins`] value is strictly greater than that edge's offset plus the
/// threshold for its axis.
///
/// - `threshold == 0` with zero offsets: any overlap counts.
/// - `threshold == 1`: the element's full extent must clear each edge.
/// - Zero-size elements have a zero threshold term.
/// - Non-finite bounds or viewport sizes are never visible.
///
/// ```
/// use kurbo::{Insets, Rect, Size};
/// use understory_reveal::in_viewport;
///
/// let viewport = Size::new(800.0, 600.0);
/// let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
///
/// assert!(in_viewport(bounds, viewport, Insets::ZERO, 0.0));
///
/// // The top margin (50) no longer strictly exceeds a 50px top offset.
/// let offset = Insets::new(0.0, 50.0, 0.0, 0.0);
/// assert!(!in_viewport(bounds, viewport, offset, 0.0));
/// ```
#[must_use]
pub fn in_viewport(bounds: Rect, viewport: Size, offset: Insets, threshold: f64) -> bool {
    if !bounds.is_finite() || !viewport.is_finite() {
        return false;
    }
    let margins = Margins::new(bounds, viewport);
    let threshold_x = threshold * bounds.width();
    let threshold_y = threshold * bounds.height();

    margins.top > offset.y0 + threshold_y
        && margins.right > offset.x1 + threshold_x
        && margins.bottom > offset.y1 + threshold_y
        && margins.left > offset.x0 + threshold_x
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    fn top_offset(top: f64) -> Insets {
        Insets::new(0.0, top, 0.0, 0.0)
    }

    #[test]
    fn margins_follow_edges() {
        let m = Margins::new(Rect::new(10.0, 20.0, 110.0, 70.0), VIEWPORT);
        assert_eq!(m.top, 70.0);
        assert_eq!(m.right, 790.0);
        assert_eq!(m.bottom, 580.0);
        assert_eq!(m.left, 110.0);
    }

    #[test]
    fn top_left_element_is_visible() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(in_viewport(bounds, VIEWPORT, Insets::ZERO, 0.0));
    }

    #[test]
    fn margin_equal_to_offset_is_not_visible() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(in_viewport(bounds, VIEWPORT, top_offset(49.9), 0.0));
        assert!(!in_viewport(bounds, VIEWPORT, top_offset(50.0), 0.0));
    }

    #[test]
    fn element_below_the_fold_is_not_visible() {
        let bounds = Rect::new(0.0, 600.0, 100.0, 700.0);
        assert!(!in_viewport(bounds, VIEWPORT, Insets::ZERO, 0.0));

        // One pixel inside is enough with no threshold.
        let bounds = Rect::new(0.0, 599.0, 100.0, 699.0);
        assert!(in_viewport(bounds, VIEWPORT, Insets::ZERO, 0.0));
    }

    #[test]
    fn element_scrolled_past_the_top_is_not_visible() {
        let bounds = Rect::new(0.0, -100.0, 100.0, 0.0);
        assert!(!in_viewport(bounds, VIEWPORT, Insets::ZERO, 0.0));
    }

    #[test]
    fn element_off_to_the_sides_is_not_visible() {
        let left = Rect::new(-200.0, 0.0, -100.0, 50.0);
        let right = Rect::new(800.0, 0.0, 900.0, 50.0);
        assert!(!in_viewport(left, VIEWPORT, Insets::ZERO, 0.0));
        assert!(!in_viewport(right, VIEWPORT, Insets::ZERO, 0.0));
    }

    #[test]
    fn threshold_scales_with_element_size() {
        // 100px tall, top 40px inside the viewport.
        let bounds = Rect::new(0.0, 560.0, 100.0, 660.0);
        assert!(in_viewport(bounds, VIEWPORT, Insets::ZERO, 0.0));
        assert!(in_viewport(bounds, VIEWPORT, Insets::ZERO, 0.39));
        assert!(!in_viewport(bounds, VIEWPORT, Insets::ZERO, 0.4));
        assert!(!in_viewport(bounds, VIEWPORT, Insets::ZERO, 1.0));
    }

    #[test]
    fn full_threshold_requires_whole_extent() {
        let inside = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert!(in_viewport(inside, VIEWPORT, Insets::ZERO, 1.0));

        // Flush with the bottom edge: the bottom margin equals the height.
        let flush = Rect::new(100.0, 500.0, 200.0, 600.0);
        assert!(!in_viewport(flush, VIEWPORT, Insets::ZERO, 1.0));
    }

    #[test]
    fn zero_size_element_depends_only_on_offsets() {
        let point = Rect::new(400.0, 300.0, 400.0, 300.0);
        assert!(in_viewport(point, VIEWPORT, Insets::ZERO, 1.0));
        assert!(!in_viewport(point, VIEWPORT, top_offset(300.0), 1.0));
    }

    #[test]
    fn negative_offsets_grow_the_region() {
        // Entirely below the fold by 20px.
        let bounds = Rect::new(0.0, 620.0, 100.0, 720.0);
        assert!(!in_viewport(bounds, VIEWPORT, Insets::ZERO, 0.0));
        assert!(in_viewport(
            bounds,
            VIEWPORT,
            Insets::new(0.0, 0.0, 0.0, -50.0),
            0.0
        ));
    }

    #[test]
    fn non_finite_geometry_is_not_visible() {
        let nan = Rect::new(f64::NAN, 0.0, 100.0, 50.0);
        let inf = Rect::new(0.0, 0.0, f64::INFINITY, 50.0);
        assert!(!in_viewport(nan, VIEWPORT, Insets::ZERO, 0.0));
        assert!(!in_viewport(inf, VIEWPORT, Insets::ZERO, 0.0));

        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let viewport = Size::new(f64::NAN, 600.0);
        assert!(!in_viewport(bounds, viewport, Insets::ZERO, 0.0));
    }
}
