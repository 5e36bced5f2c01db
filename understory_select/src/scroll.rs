// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll arrow visibility and scroll-into-view.

use kurbo::Rect;

/// Visibility of the scroll arrow affordances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrollArrows {
    /// Content is hidden above the visible area.
    pub up: bool,
    /// Content is hidden below the visible area.
    pub down: bool,
}

impl ScrollArrows {
    /// Derives arrow visibility from the list's scroll metrics.
    ///
    /// Both arrows are hidden while closed. An arrow shows once more than
    /// `threshold` of content is hidden on its side.
    #[must_use]
    pub fn derive(
        open: bool,
        scroll_top: f64,
        scroll_height: f64,
        client_height: f64,
        threshold: f64,
    ) -> Self {
        Self {
            up: open && scroll_top > threshold,
            down: open && scroll_top < scroll_height - client_height - threshold,
        }
    }
}

/// Returns the scroll offset that brings `item` into view with minimal movement.
///
/// `item` is in content coordinates. The offset is unchanged if the item is
/// already fully visible; otherwise the nearest edge of the item is aligned
/// with the nearest edge of the visible area.
#[must_use]
pub fn scroll_into_view_nearest(scroll_top: f64, client_height: f64, item: Rect) -> f64 {
    let next = if item.y0 < scroll_top {
        item.y0
    } else if item.y1 > scroll_top + client_height {
        item.y1 - client_height
    } else {
        scroll_top
    };
    next.max(0.0)
}
