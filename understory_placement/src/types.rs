// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// CSS-style positioning scheme a placement is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Positioning {
    /// Coordinates relative to the nearest positioned ancestor.
    Absolute,
    /// Coordinates relative to the viewport.
    ///
    /// All placements produced by this crate use this scheme.
    #[default]
    Fixed,
}

/// Which side of the reference a floating element ended up on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Below the reference, growing downwards.
    #[default]
    Below,
    /// Above the reference, growing upwards.
    Above,
}

/// Final placement of a floating element.
///
/// The origin is the top-left corner in viewport coordinates. The element is
/// expected to be sized to `width` and to scroll its content past `max_height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Top-left corner of the floating element.
    pub origin: Point,
    /// Positioning scheme for `origin`.
    pub positioning: Positioning,
    /// Largest height the element may take before scrolling.
    pub max_height: f64,
    /// Width the element should take, matching the reference.
    pub width: f64,
}

impl Placement {
    /// Horizontal position.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.origin.x
    }

    /// Vertical position.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.origin.y
    }

    /// Visible height for content of the given total height.
    #[must_use]
    pub fn visible_height(&self, content_height: f64) -> f64 {
        content_height.min(self.max_height).max(0.0)
    }

    /// Rectangle covered by the element when it holds `content_height` of content.
    #[must_use]
    pub fn rect(&self, content_height: f64) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.visible_height(content_height),
        )
    }
}

/// Moves `rect` so that it overlaps `viewport`, if it does not already.
///
/// Rectangles that already intersect the viewport are returned unchanged, so a
/// partially clipped placement is never disturbed. Rectangles entirely outside
/// are clamped against the nearest edge, keeping their size.
#[must_use]
pub fn keep_in_view(rect: Rect, viewport: Rect) -> Rect {
    let overlaps = rect.x0 < viewport.x1
        && rect.x1 > viewport.x0
        && rect.y0 < viewport.y1
        && rect.y1 > viewport.y0;
    if overlaps {
        return rect;
    }
    let x = clamp_start(rect.x0, rect.width(), viewport.x0, viewport.x1);
    let y = clamp_start(rect.y0, rect.height(), viewport.y0, viewport.y1);
    Rect::new(x, y, x + rect.width(), y + rect.height())
}

/// Clamps the start of a span of `len` into `[min, max - len]`, preferring `min`
/// when the span is longer than the range.
pub(crate) fn clamp_start(start: f64, len: f64, min: f64, max: f64) -> f64 {
    let upper = max - len;
    if upper < min { min } else { start.clamp(min, upper) }
}
