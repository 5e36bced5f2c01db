// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// How far a rectangle crosses each edge of a padded viewport.
///
/// Positive values mean the rectangle overflows that edge by the given amount.
/// Zero means it touches the padded edge exactly, and negative values mean
/// there is that much room left before it would overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overflow {
    /// Overflow past the top edge.
    pub top: f64,
    /// Overflow past the bottom edge.
    pub bottom: f64,
    /// Overflow past the left edge.
    pub left: f64,
    /// Overflow past the right edge.
    pub right: f64,
}

impl Overflow {
    /// Returns `true` if no edge overflows.
    #[must_use]
    pub fn fits(&self) -> bool {
        self.top <= 0.0 && self.bottom <= 0.0 && self.left <= 0.0 && self.right <= 0.0
    }
}

/// Measures `rect` against `viewport` shrunk by `padding` on every side.
#[must_use]
pub fn detect_overflow(rect: Rect, viewport: Rect, padding: f64) -> Overflow {
    Overflow {
        top: (viewport.y0 + padding) - rect.y0,
        bottom: rect.y1 - (viewport.y1 - padding),
        left: (viewport.x0 + padding) - rect.x0,
        right: rect.x1 - (viewport.x1 - padding),
    }
}
