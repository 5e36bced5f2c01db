// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability helpers for controller turns.
//!
//! The controller keeps no history of why it changed state. For embedders
//! debugging an overlay it is useful to answer questions like "why did the list
//! close?" or "when did it give up on anchoring?".
//!
//! This module provides a minimal, additive hook:
//! [`SelectController::handle_with_trace`](crate::SelectController::handle_with_trace)
//! calls into a [`SelectTrace`] sink as the turn progresses. [`TraceLog`] records
//! every callback in order.

use alloc::vec::Vec;

use understory_placement::Placement;

use crate::state::{Phase, SessionId, Strategy};

/// Why the controller changed [`Phase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionCause {
    /// A pointer press on the trigger.
    TriggerPress,
    /// A key on the trigger or the list.
    Key,
    /// An option was committed.
    Commit,
    /// A press outside the list and its arrows.
    OutsidePress,
    /// A pointer release after the pointer left the list.
    OutsideRelease,
    /// Anchored placement could not keep enough options visible.
    Fallback,
    /// [`SelectEvent::SetOpen`](crate::SelectEvent::SetOpen).
    Programmatic,
}

/// A callback sink for controller turns.
///
/// Every method has an empty default so sinks only implement what they need.
pub trait SelectTrace {
    /// Called when the phase changes.
    fn transition(&mut self, from: Phase, to: Phase, cause: TransitionCause) {
        let _ = (from, to, cause);
    }

    /// Called after every placement computation.
    fn placement(&mut self, strategy: Strategy, placement: Option<Placement>) {
        let _ = (strategy, placement);
    }

    /// Called when a timer fires for a session that already ended.
    fn timer_discarded(&mut self, session: SessionId) {
        let _ = session;
    }

    /// Called when indices were clamped to a shrunken option collection.
    fn indices_clamped(&mut self, option_count: usize) {
        let _ = option_count;
    }
}

/// A sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl SelectTrace for NoTrace {}

/// One recorded callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceRecord {
    /// See [`SelectTrace::transition`].
    Transition {
        /// Phase before.
        from: Phase,
        /// Phase after.
        to: Phase,
        /// Cause.
        cause: TransitionCause,
    },
    /// See [`SelectTrace::placement`].
    Placement {
        /// Strategy used.
        strategy: Strategy,
        /// Result.
        placement: Option<Placement>,
    },
    /// See [`SelectTrace::timer_discarded`].
    TimerDiscarded(SessionId),
    /// See [`SelectTrace::indices_clamped`].
    IndicesClamped(usize),
}

/// Records every callback in order.
#[derive(Clone, Debug, Default)]
pub struct TraceLog {
    records: Vec<TraceRecord>,
}

impl TraceLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded callbacks, oldest first.
    #[must_use]
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Forgets all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Recorded phase transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = (Phase, Phase, TransitionCause)> + '_ {
        self.records.iter().filter_map(|r| match *r {
            TraceRecord::Transition { from, to, cause } => Some((from, to, cause)),
            _ => None,
        })
    }

    /// Number of placement computations recorded.
    #[must_use]
    pub fn placements(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, TraceRecord::Placement { .. }))
            .count()
    }
}

impl SelectTrace for TraceLog {
    fn transition(&mut self, from: Phase, to: Phase, cause: TransitionCause) {
        self.records.push(TraceRecord::Transition { from, to, cause });
    }

    fn placement(&mut self, strategy: Strategy, placement: Option<Placement>) {
        self.records.push(TraceRecord::Placement {
            strategy,
            placement,
        });
    }

    fn timer_discarded(&mut self, session: SessionId) {
        self.records.push(TraceRecord::TimerDiscarded(session));
    }

    fn indices_clamped(&mut self, option_count: usize) {
        self.records.push(TraceRecord::IndicesClamped(option_count));
    }
}
