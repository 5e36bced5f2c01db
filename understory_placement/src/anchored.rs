// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item-anchored placement, mimicking a native select.

use kurbo::Rect;

use crate::overflow::{Overflow, detect_overflow};
use crate::types::keep_in_view;

/// Geometry for [`place_anchored`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchoredInput {
    /// Reference (trigger) rectangle in viewport coordinates.
    pub reference: Rect,
    /// Viewport rectangle.
    pub viewport: Rect,
    /// Rectangle of the anchored item in the floating element's content
    /// coordinates, i.e. `y0` is its offset from the top of the content.
    pub item: Rect,
    /// Number of items in the list.
    pub item_count: usize,
    /// Full, unscrolled height of the floating element's content.
    pub content_height: f64,
    /// Top border/inset of the floating element.
    pub client_top: f64,
    /// Caller-chosen offset that moves the element up (positive) or down
    /// (negative) relative to the aligned position.
    pub offset: f64,
}

/// Tuning for [`place_anchored`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchoredOptions {
    /// Padding kept between the floating element and the viewport edges.
    pub padding: f64,
    /// Minimum number of items that must remain visible for the placement to
    /// be acceptable.
    pub min_items_visible: usize,
    /// How close (in units) the reference may come to the padded viewport edge
    /// before anchoring is considered infeasible.
    pub reference_overflow_threshold: f64,
}

impl Default for AnchoredOptions {
    fn default() -> Self {
        Self {
            padding: 10.0,
            min_items_visible: 4,
            reference_overflow_threshold: 20.0,
        }
    }
}

/// Result of [`place_anchored`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchoredPlacement {
    /// Visible floating rectangle after trimming to the padded viewport.
    pub rect: Rect,
    /// Height cap for the floating element; equal to `rect.height()`.
    pub max_height: f64,
    /// Scroll offset the content must be set to so the anchored item stays
    /// aligned after trimming the top.
    pub scroll_top: f64,
    /// Overflow of `rect` against the padded viewport. An edge at (or within
    /// half a unit of) zero means the element already touches that edge.
    pub overflow: Overflow,
    /// Whether the placement keeps enough items visible and the reference far
    /// enough from the viewport edges.
    pub fits: bool,
}

/// Places the floating element so that `input.item` sits centred over the
/// reference.
///
/// The element is first positioned at full content height. Whatever would cross
/// the top of the padded viewport is trimmed and compensated by scrolling the
/// content by the same amount; whatever would cross the bottom is trimmed by
/// capping the height. The placement is rejected (`fits == false`) when the
/// remaining height shows fewer than `min_items_visible` items (bounded by the
/// item count minus one), or when the reference itself is within
/// `reference_overflow_threshold` of the top or bottom padded edge.
///
/// A trimmed element that would still lie entirely outside the viewport, such
/// as one under a reference scrolled off to the side, is pulled back in with
/// [`keep_in_view`](crate::keep_in_view).
#[must_use]
pub fn place_anchored(input: &AnchoredInput, options: &AnchoredOptions) -> AnchoredPlacement {
    let reference = input.reference;
    let item_height = input.item.height();
    let y = reference.center().y
        - input.item.y0
        - input.client_top
        - item_height / 2.0
        - input.offset;
    let x = reference.x0;
    let width = reference.width();

    let full = Rect::new(x, y, x + width, y + input.content_height);
    let overflow = detect_overflow(full, input.viewport, options.padding);
    let reference_overflow = detect_overflow(reference, input.viewport, options.padding);

    let diff_y = overflow.top.max(0.0);
    let max_height = (input.content_height - diff_y - overflow.bottom.max(0.0)).max(0.0);
    let rect = keep_in_view(
        Rect::new(x, y + diff_y, x + width, y + diff_y + max_height),
        input.viewport,
    );

    let min_items = options.min_items_visible.min(input.item_count.saturating_sub(1));
    let threshold = -options.reference_overflow_threshold;
    let fits = max_height >= item_height * min_items as f64 - 1.0
        && reference_overflow.top < threshold
        && reference_overflow.bottom < threshold;

    AnchoredPlacement {
        rect,
        max_height,
        scroll_top: diff_y,
        overflow: detect_overflow(rect, input.viewport, options.padding),
        fits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(reference: Rect, index: usize) -> AnchoredInput {
        AnchoredInput {
            reference,
            viewport: Rect::new(0.0, 0.0, 400.0, 800.0),
            item: Rect::new(0.0, index as f64 * 30.0, 160.0, index as f64 * 30.0 + 30.0),
            item_count: 10,
            content_height: 300.0,
            client_top: 0.0,
            offset: 0.0,
        }
    }

    #[test]
    fn item_is_centred_on_reference() {
        let reference = Rect::new(20.0, 400.0, 180.0, 430.0);
        let p = place_anchored(&input(reference, 3), &AnchoredOptions::default());
        // Item 3 spans 90..120 in content; its centre must land on 415.
        assert_eq!(p.rect.y0 + 105.0 - p.scroll_top, 415.0);
        assert_eq!(p.rect.x0, 20.0);
        assert_eq!(p.rect.width(), 160.0);
        assert_eq!(p.scroll_top, 0.0);
        assert!(p.fits);
    }

    #[test]
    fn top_overflow_is_trimmed_and_scrolled() {
        // Anchoring the last item puts the list start well above the viewport.
        let reference = Rect::new(20.0, 100.0, 180.0, 130.0);
        let p = place_anchored(&input(reference, 9), &AnchoredOptions::default());
        // y = 115 - 270 - 15 = -170, padded top is 10.
        assert_eq!(p.scroll_top, 180.0);
        assert_eq!(p.rect.y0, 10.0);
        assert_eq!(p.max_height, 120.0);
        assert_eq!(p.rect.height(), 120.0);
        assert!(p.overflow.top.abs() < 0.5);
    }

    #[test]
    fn bottom_overflow_caps_height() {
        let reference = Rect::new(20.0, 600.0, 180.0, 630.0);
        let p = place_anchored(&input(reference, 0), &AnchoredOptions::default());
        // y = 615 - 15 = 600; padded bottom is 790.
        assert_eq!(p.rect.y0, 600.0);
        assert_eq!(p.max_height, 190.0);
        assert!(p.fits);
    }

    #[test]
    fn too_few_visible_items_rejects() {
        let reference = Rect::new(20.0, 700.0, 180.0, 730.0);
        let options = AnchoredOptions {
            min_items_visible: 5,
            ..AnchoredOptions::default()
        };
        let p = place_anchored(&input(reference, 0), &options);
        // 790 - 700 = 90px visible, fewer than 5 * 30 - 1.
        assert_eq!(p.max_height, 90.0);
        assert!(!p.fits);
    }

    #[test]
    fn detached_reference_still_lands_in_viewport() {
        let reference = Rect::new(500.0, 300.0, 660.0, 330.0);
        let p = place_anchored(&input(reference, 0), &AnchoredOptions::default());
        assert_eq!(p.rect, Rect::new(240.0, 300.0, 400.0, 600.0));
        assert_eq!(p.max_height, 300.0);
    }

    #[test]
    fn reference_near_edge_rejects() {
        let reference = Rect::new(20.0, 15.0, 180.0, 45.0);
        let p = place_anchored(&input(reference, 0), &AnchoredOptions::default());
        // Reference top overflow is 10 - 15 = -5, within the 20 unit threshold.
        assert!(!p.fits);
    }

    #[test]
    fn single_item_lists_only_check_reference() {
        let reference = Rect::new(20.0, 400.0, 180.0, 430.0);
        let mut i = input(reference, 0);
        i.item_count = 1;
        i.content_height = 30.0;
        let p = place_anchored(&i, &AnchoredOptions::default());
        assert!(p.fits);
    }

    #[test]
    fn offset_moves_element_up() {
        let reference = Rect::new(20.0, 400.0, 180.0, 430.0);
        let mut i = input(reference, 0);
        let base = place_anchored(&i, &AnchoredOptions::default());
        i.offset = 25.0;
        let moved = place_anchored(&i, &AnchoredOptions::default());
        assert_eq!(moved.rect.y0, base.rect.y0 - 25.0);
    }
}
