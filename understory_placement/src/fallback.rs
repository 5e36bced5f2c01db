// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Below-the-reference placement with flip or shift.

use kurbo::Rect;

use crate::types::{Side, clamp_start, keep_in_view};

/// What to do when the floating element does not fit below the reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FallbackBehavior {
    /// Flip above the reference when that side has room (or more room).
    #[default]
    Flip,
    /// Stay on the bottom side and slide along both axes into the padded
    /// viewport, possibly covering the reference.
    ///
    /// Suited to touch input, where the reference is not needed as a hover
    /// target once the list is open.
    Shift,
}

/// Geometry for [`place_fallback`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallbackInput {
    /// Reference (trigger) rectangle in viewport coordinates.
    pub reference: Rect,
    /// Viewport rectangle.
    pub viewport: Rect,
    /// Full, unscrolled height of the floating element's content.
    pub content_height: f64,
    /// Width of the floating element.
    pub width: f64,
}

/// Tuning for [`place_fallback`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallbackOptions {
    /// Gap between the reference and the floating element.
    pub gap: f64,
    /// Padding kept between the floating element and the viewport edges.
    pub padding: f64,
    /// Flip or shift when the bottom side is too small.
    pub behavior: FallbackBehavior,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            gap: 5.0,
            padding: 8.0,
            behavior: FallbackBehavior::Flip,
        }
    }
}

/// Result of [`place_fallback`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallbackPlacement {
    /// Floating rectangle, already limited to `max_height`.
    pub rect: Rect,
    /// Side of the reference the element was placed on.
    pub side: Side,
    /// Height cap for the floating element.
    pub max_height: f64,
}

/// Places the floating element below the reference, left-aligned with it.
///
/// With [`FallbackBehavior::Flip`], the element moves above the reference when
/// the content does not fit below but does fit above; when it fits on neither
/// side the roomier side wins (ties go below). The height is then capped to the
/// room on the chosen side.
///
/// With [`FallbackBehavior::Shift`], the element stays on the bottom side and is
/// clamped into the padded viewport on both axes.
#[must_use]
pub fn place_fallback(input: &FallbackInput, options: &FallbackOptions) -> FallbackPlacement {
    let FallbackInput {
        reference,
        viewport,
        content_height,
        width,
    } = *input;
    let top_limit = viewport.y0 + options.padding;
    let bottom_limit = viewport.y1 - options.padding;

    match options.behavior {
        FallbackBehavior::Flip => {
            let below = bottom_limit - (reference.y1 + options.gap);
            let above = (reference.y0 - options.gap) - top_limit;
            let side = if content_height <= below {
                Side::Below
            } else if content_height <= above || above > below {
                Side::Above
            } else {
                Side::Below
            };
            let (room, rect) = match side {
                Side::Below => {
                    let height = content_height.min(below.max(0.0));
                    let y = reference.y1 + options.gap;
                    (below, Rect::new(reference.x0, y, reference.x0 + width, y + height))
                }
                Side::Above => {
                    let height = content_height.min(above.max(0.0));
                    let y = reference.y0 - options.gap - height;
                    (above, Rect::new(reference.x0, y, reference.x0 + width, y + height))
                }
            };
            FallbackPlacement {
                rect: keep_in_view(rect, viewport),
                side,
                max_height: room.max(0.0),
            }
        }
        FallbackBehavior::Shift => {
            let available = (bottom_limit - top_limit).max(0.0);
            let height = content_height.min(available);
            let y = clamp_start(reference.y1 + options.gap, height, top_limit, bottom_limit);
            let x = clamp_start(
                reference.x0,
                width,
                viewport.x0 + options.padding,
                viewport.x1 - options.padding,
            );
            FallbackPlacement {
                rect: Rect::new(x, y, x + width, y + height),
                side: Side::Below,
                max_height: (bottom_limit - y).max(0.0),
            }
        }
    }
}
