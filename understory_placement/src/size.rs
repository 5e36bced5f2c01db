// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::types::Side;

/// Size constraints for a floating element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeFit {
    /// Width to apply, matching the reference.
    pub width: f64,
    /// Largest height that keeps the element inside the padded viewport.
    pub max_height: f64,
}

/// Computes the width and the height cap for a floating element at `floating`.
///
/// For elements on the bottom side the room is measured from the element's top
/// to the padded viewport bottom; for elements on the top side from its bottom
/// to the padded viewport top. Either way the cap never exceeds the padded
/// viewport height and never goes negative.
#[must_use]
pub fn fit_size(
    reference: Rect,
    floating: Rect,
    side: Side,
    viewport: Rect,
    padding: f64,
) -> SizeFit {
    let top_limit = viewport.y0 + padding;
    let bottom_limit = viewport.y1 - padding;
    let room = match side {
        Side::Below => bottom_limit - floating.y0,
        Side::Above => floating.y1 - top_limit,
    };
    SizeFit {
        width: reference.width(),
        max_height: room.min(bottom_limit - top_limit).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_measures_to_bottom_edge() {
        let viewport = Rect::new(0.0, 0.0, 400.0, 800.0);
        let reference = Rect::new(0.0, 0.0, 120.0, 30.0);
        let fit = fit_size(
            reference,
            Rect::new(0.0, 600.0, 120.0, 700.0),
            Side::Below,
            viewport,
            8.0,
        );
        assert_eq!(fit.width, 120.0);
        assert_eq!(fit.max_height, 192.0);
    }

    #[test]
    fn above_measures_to_top_edge() {
        let viewport = Rect::new(0.0, 0.0, 400.0, 800.0);
        let reference = Rect::new(0.0, 0.0, 120.0, 30.0);
        let fit = fit_size(
            reference,
            Rect::new(0.0, 100.0, 120.0, 300.0),
            Side::Above,
            viewport,
            8.0,
        );
        assert_eq!(fit.max_height, 292.0);
    }

    #[test]
    fn never_negative() {
        let viewport = Rect::new(0.0, 0.0, 400.0, 800.0);
        let reference = Rect::new(0.0, 0.0, 120.0, 30.0);
        let fit = fit_size(
            reference,
            Rect::new(0.0, 900.0, 120.0, 950.0),
            Side::Below,
            viewport,
            8.0,
        );
        assert_eq!(fit.max_height, 0.0);
    }
}
