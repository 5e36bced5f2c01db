// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: placement math for floating overlays.
//!
//! This crate computes where a floating element (a popup list, a menu, a
//! dropdown) should sit relative to a reference element and a viewport. It is
//! pure and stateless: every function takes rectangles in a single device
//! coordinate space and returns rectangles plus metadata. Deciding _which_
//! strategy to run, and remembering the decision, is left to higher layers.
//!
//! Two strategies are provided:
//!
//! - [`place_anchored`]: aligns one item of the floating list over the
//!   reference, the way a native `<select>` opens on top of its current value.
//!   The result reports whether the placement is acceptable ([`AnchoredPlacement::fits`]);
//!   callers typically fall back to the second strategy when it is not.
//! - [`place_fallback`]: places the floating element below the reference with a
//!   small gap and either flips it above ([`FallbackBehavior::Flip`]) or shifts it
//!   into view ([`FallbackBehavior::Shift`]) when there is not enough room.
//!
//! Independent of the strategy, [`fit_size`] caps the height of the floating
//! element to the space left in the padded viewport and reports the reference
//! width so the list can match its trigger.
//!
//! Overflow is measured with [`detect_overflow`], which returns an [`Overflow`]:
//! positive values mean the rectangle crosses the padded viewport edge by that
//! many units, negative values mean there is still room left.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_placement::{
//!     AnchoredInput, AnchoredOptions, FallbackBehavior, FallbackInput, FallbackOptions,
//!     place_anchored, place_fallback,
//! };
//!
//! let viewport = Rect::new(0.0, 0.0, 400.0, 800.0);
//! let reference = Rect::new(20.0, 300.0, 180.0, 330.0);
//!
//! // Ten 30px items; align item 2 over the trigger.
//! let anchored = place_anchored(
//!     &AnchoredInput {
//!         reference,
//!         viewport,
//!         item: Rect::new(0.0, 60.0, 160.0, 90.0),
//!         item_count: 10,
//!         content_height: 300.0,
//!         client_top: 0.0,
//!         offset: 0.0,
//!     },
//!     &AnchoredOptions::default(),
//! );
//! assert!(anchored.fits);
//! assert_eq!(anchored.rect.center().y, reference.center().y + 150.0 - 75.0);
//!
//! // The same list below the trigger, flipping if needed.
//! let fallback = place_fallback(
//!     &FallbackInput { reference, viewport, content_height: 300.0, width: reference.width() },
//!     &FallbackOptions { behavior: FallbackBehavior::Flip, ..FallbackOptions::default() },
//! );
//! assert_eq!(fallback.rect.y0, reference.y1 + 5.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod anchored;
mod fallback;
mod overflow;
mod size;
mod types;

pub use anchored::{AnchoredInput, AnchoredOptions, AnchoredPlacement, place_anchored};
pub use fallback::{
    FallbackBehavior, FallbackInput, FallbackOptions, FallbackPlacement, place_fallback,
};
pub use overflow::{Overflow, detect_overflow};
pub use size::{SizeFit, fit_size};
pub use types::{Placement, Positioning, Side, keep_in_view};
