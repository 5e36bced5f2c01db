// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_select --heading-base-level=0

//! Understory Select: a headless select/combobox controller.
//!
//! This crate owns the interaction model of a select widget: a trigger plus a
//! floating list of options. It decides where the list goes, which option is
//! highlighted and which is committed, when the list closes, and which scroll
//! arrows show. It does not render anything and does not know about a
//! particular UI framework; the host reports input as [`SelectEvent`]s and
//! applies the returned [`Response`].
//!
//! The pieces:
//!
//! - [`SelectController`]: the state machine. It owns the single
//!   [`SelectionState`] record and is the only thing that mutates it.
//! - [`PositioningEngine`]: runs the placement strategies from
//!   `understory_placement` for the active [`Strategy`].
//! - [`ScrollArrows`]: scroll arrow visibility, derived in the same turn as the
//!   scroll that changed it.
//! - [`SelectHost`]: the seam through which the controller asks for option
//!   labels and geometry.
//! - [`SelectTrace`]: an optional sink explaining what a turn did.
//!
//! ## Placement strategies
//!
//! Every open starts with [`Strategy::Anchored`]: the committed option is laid
//! over the trigger, like a native select. When that leaves too few options
//! visible (four with a precise pointer, ten on touch) or the trigger sits too
//! close to a viewport edge, the session switches to [`Strategy::Fallback`],
//! which places the list below the trigger and flips it above (or, on touch,
//! shifts it into view). A session never switches back; the next open starts
//! anchored again.
//!
//! ## Turns
//!
//! Each call to [`SelectController::handle`] is one turn. Time is a host
//! supplied monotonic `u64` in milliseconds; timers (the selection delay after
//! opening, the touch selection block) are fired at the start of the next turn
//! whose `now` reaches them. Hosts with no pending input should send
//! [`SelectEvent::Tick`] at [`SelectController::next_deadline`].
//!
//! A close requested during a turn is applied at the end of that turn, so later
//! events in the same batch still see the open session's values.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_select::{
//!     Key, Modality, Modifiers, Notice, SelectController, SelectEvent, SelectHost,
//! };
//!
//! struct Fruits;
//!
//! impl SelectHost for Fruits {
//!     fn option_count(&self) -> usize { 3 }
//!     fn label(&self, index: usize) -> Option<&str> {
//!         ["Apple", "Apricot", "Banana"].get(index).copied()
//!     }
//!     fn item_rect(&self, index: usize) -> Option<Rect> {
//!         let y = index as f64 * 30.0;
//!         Some(Rect::new(0.0, y, 160.0, y + 30.0))
//!     }
//!     fn content_height(&self) -> f64 { 90.0 }
//!     fn viewport(&self) -> Rect { Rect::new(0.0, 0.0, 400.0, 800.0) }
//!     fn reference(&self) -> Option<Rect> { Some(Rect::new(20.0, 300.0, 180.0, 330.0)) }
//!     fn modality(&self) -> Modality { Modality::Precise }
//! }
//!
//! let mut select = SelectController::new();
//!
//! // Typing on a closed trigger preselects without opening.
//! let typed = SelectEvent::TriggerKeyDown {
//!     key: Key::Character('b'),
//!     modifiers: Modifiers::empty(),
//! };
//! select.handle(&Fruits, 0, typed);
//! assert_eq!(select.state().selected_index(), Some(2));
//!
//! // Opening highlights the committed option and places the list.
//! let response = select.handle(&Fruits, 1000, SelectEvent::TriggerPointerDown);
//! assert!(response.has(&Notice::OpenChanged(true)));
//! assert_eq!(select.state().active_index(), Some(2));
//! assert!(select.placement().is_some());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std` and the other Understory crates.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod engine;
mod event;
mod host;
mod props;
mod scroll;
mod state;
mod trace;

pub use config::{
    ConfigError, FALLBACK_GAP, INNER_PADDING, MIN_ITEMS_VISIBLE_PRECISE, MIN_ITEMS_VISIBLE_TOUCH,
    Modality, OVERLAY_Z_INDEX, REFERENCE_OVERFLOW_THRESHOLD, SCROLL_ARROW_THRESHOLD, SELECT_DELAY,
    SelectConfig, TOUCH_BLOCK_DELAY, TYPEAHEAD_TIMEOUT, WINDOW_PADDING,
};
pub use controller::SelectController;
pub use engine::{PositionUpdate, PositioningEngine};
pub use event::{GlobalListeners, Key, Modifiers, Notice, Response, SelectEvent};
pub use host::{ArrowDirection, SelectHost};
pub use props::{FloatingProps, ItemProps, PopupKind, Presentation, Role, TriggerProps};
pub use scroll::{ScrollArrows, scroll_into_view_nearest};
pub use state::{Phase, SelectionState, SessionId, Strategy};
pub use trace::{NoTrace, SelectTrace, TraceLog, TraceRecord, TransitionCause};

pub use understory_event_state::typeahead::WrapMatch;
pub use understory_placement::{Placement, Positioning};
