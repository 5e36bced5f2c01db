// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: Common event state managers for UI interactions.
//!
//! This crate provides small, focused helpers for UI interactions that need
//! state or geometry across multiple events. Each module handles a specific
//! interaction pattern:
//!
//! - [`typeahead`]: Accumulate printable keystrokes and match them against item labels
//! - [`dismiss`]: Classify presses against a popup made of possibly disjoint pieces
//!
//! ## Design Philosophy
//!
//! Each helper is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Stateful but simple**: Track just enough state to compute outcomes
//! - **Clock-agnostic**: Time is passed in by the caller as a monotonic `u64`
//! - **Generic**: Accept application-specific keys and item collections
//!
//! The crate does not assume any particular UI framework, event system, or scene
//! graph structure. Callers feed in pre-computed information (pointer positions,
//! key characters, item labels) and interpret the results.
//!
//! ## Usage Patterns
//!
//! ### Typeahead
//!
//! Use [`typeahead::TypeaheadState`] to jump to items by typing their label:
//!
//! ```rust
//! # #[cfg(feature = "typeahead")]
//! # fn example() {
//! use understory_event_state::typeahead::{TypeaheadResult, TypeaheadState};
//!
//! let labels = ["Cherry", "Citrus", "Date"];
//! let mut typeahead = TypeaheadState::new(750);
//!
//! assert_eq!(typeahead.on_char('c', 0, &labels[..]), TypeaheadResult::Matched(0));
//! assert_eq!(typeahead.on_char('i', 100, &labels[..]), TypeaheadResult::Matched(1));
//! # }
//! ```
//!
//! ### Outside Press Detection
//!
//! Use [`dismiss::DismissRegion`] to decide whether a press should close a popup:
//!
//! ```rust
//! # #[cfg(feature = "dismiss")]
//! # fn example() {
//! use kurbo::{Point, Rect};
//! use understory_event_state::dismiss::DismissRegion;
//!
//! let mut region = DismissRegion::new();
//! region.push("popup", Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! assert!(region.classify(Point::new(200.0, 50.0)).is_outside());
//! # }
//! ```
//!
//! ## Integration with Understory
//!
//! These helpers are building blocks for higher-level widget controllers such
//! as `understory_select`, which owns the widget state and feeds typeahead
//! matches and dismiss decisions into its own transitions.
//!
//! ## Features
//!
//! - `typeahead`: Enable typeahead matching
//! - `dismiss`: Enable dismiss regions (requires `kurbo` and `smallvec`)
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

#[cfg(feature = "dismiss")]
pub mod dismiss;

#[cfg(feature = "typeahead")]
pub mod typeahead;
