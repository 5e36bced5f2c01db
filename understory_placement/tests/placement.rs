// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-strategy tests for `understory_placement`.
//!
//! These walk a reference down a fixed viewport and check that the anchored
//! strategy gives way exactly where the fallback strategy takes over cleanly.

use kurbo::Rect;
use understory_placement::{
    AnchoredInput, AnchoredOptions, FallbackBehavior, FallbackInput, FallbackOptions, Side,
    fit_size, place_anchored, place_fallback,
};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 600.0, 800.0);
const ITEM: f64 = 30.0;
const COUNT: usize = 12;

fn reference_at(y: f64) -> Rect {
    Rect::new(40.0, y, 240.0, y + 32.0)
}

fn anchored(reference: Rect, index: usize, min_items_visible: usize) -> bool {
    let top = index as f64 * ITEM;
    place_anchored(
        &AnchoredInput {
            reference,
            viewport: VIEWPORT,
            item: Rect::new(0.0, top, 200.0, top + ITEM),
            item_count: COUNT,
            content_height: ITEM * COUNT as f64,
            client_top: 0.0,
            offset: 0.0,
        },
        &AnchoredOptions {
            min_items_visible,
            ..AnchoredOptions::default()
        },
    )
    .fits
}

#[test]
fn anchored_gives_way_near_the_bottom_edge() {
    let mut last_fit = None;
    let mut y = 40.0;
    while y < 760.0 {
        if anchored(reference_at(y), 0, 5) {
            last_fit = Some(y);
        }
        y += 10.0;
    }
    // Item 0 is anchored at the reference, so at least 5 * 30 - 1 units must
    // remain between the reference and the padded bottom edge.
    let last_fit = last_fit.expect("some position must fit");
    assert!(last_fit + 16.0 - 15.0 + 149.0 <= 790.0);
    assert!(!anchored(reference_at(last_fit + 10.0), 0, 5));
}

#[test]
fn touch_minimum_is_stricter_than_precise() {
    let reference = reference_at(520.0);
    assert!(anchored(reference, 0, 4));
    assert!(!anchored(reference, 0, 10));
}

#[test]
fn fallback_below_reports_full_room_to_size_fit() {
    let reference = reference_at(200.0);
    let content_height = ITEM * COUNT as f64;
    let p = place_fallback(
        &FallbackInput {
            reference,
            viewport: VIEWPORT,
            content_height,
            width: reference.width(),
        },
        &FallbackOptions::default(),
    );
    assert_eq!(p.side, Side::Below);
    let fit = fit_size(reference, p.rect, p.side, VIEWPORT, 8.0);
    assert_eq!(fit.max_height, p.max_height);
    assert_eq!(fit.width, 200.0);
}

#[test]
fn every_fallback_stays_inside_the_padded_viewport() {
    for behavior in [FallbackBehavior::Flip, FallbackBehavior::Shift] {
        let mut y = 0.0;
        while y < 770.0 {
            let reference = reference_at(y);
            let p = place_fallback(
                &FallbackInput {
                    reference,
                    viewport: VIEWPORT,
                    content_height: ITEM * COUNT as f64,
                    width: reference.width(),
                },
                &FallbackOptions {
                    behavior,
                    ..FallbackOptions::default()
                },
            );
            assert!(p.rect.y0 >= 8.0 - 1e-9, "{behavior:?} at {y}: {:?}", p.rect);
            assert!(p.rect.y1 <= 792.0 + 1e-9, "{behavior:?} at {y}: {:?}", p.rect);
            y += 25.0;
        }
    }
}
