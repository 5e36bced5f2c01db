// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single interaction record owned by the controller.

/// Identifies one open/close cycle.
///
/// A new session starts every time the list opens. Deferred work is tagged
/// with the session that scheduled it and is dropped if the session ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub(crate) u64);

impl SessionId {
    /// Raw session counter.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Active positioning strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    /// The option at `index` is aligned over the trigger; `offset` moves the
    /// list up (positive) or down (negative) from that alignment.
    Anchored {
        /// Anchored option.
        index: usize,
        /// Scroll-driven offset.
        offset: f64,
    },
    /// The list sits below the trigger and flips or shifts when short of room.
    Fallback,
}

impl Strategy {
    pub(crate) const fn anchored(index: usize) -> Self {
        Self::Anchored { index, offset: 0.0 }
    }
}

/// Coarse open state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The list is not shown.
    Closed,
    /// The list is shown with [`Strategy::Anchored`].
    OpenAnchored,
    /// The list is shown with [`Strategy::Fallback`].
    OpenFallback,
}

/// Interaction state of one select widget.
///
/// Only [`SelectController`](crate::SelectController) mutates this record;
/// everybody else reads it through [`SelectController::state`](crate::SelectController::state).
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionState {
    pub(crate) open: bool,
    pub(crate) active_index: Option<usize>,
    pub(crate) selected_index: Option<usize>,
    pub(crate) scroll_top: f64,
    pub(crate) strategy: Strategy,
    pub(crate) controlled_scrolling: bool,
    pub(crate) block_selection: bool,
    pub(crate) is_mouse_outside: bool,
    pub(crate) allow_select: bool,
    pub(crate) allow_mouse_up: bool,
    pub(crate) session: SessionId,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            open: false,
            active_index: None,
            selected_index: None,
            scroll_top: 0.0,
            strategy: Strategy::anchored(0),
            controlled_scrolling: false,
            block_selection: false,
            is_mouse_outside: false,
            allow_select: false,
            allow_mouse_up: true,
            session: SessionId::default(),
        }
    }
}

impl SelectionState {
    /// Whether the list is open.
    #[must_use]
    pub fn open(&self) -> bool {
        self.open
    }

    /// Highlighted option.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Committed option.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Scroll offset of the list content.
    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Active positioning strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether the fallback strategy is active.
    #[must_use]
    pub fn fallback(&self) -> bool {
        matches!(self.strategy, Strategy::Fallback)
    }

    /// Scroll-driven offset of the anchored strategy; zero in fallback.
    #[must_use]
    pub fn inner_offset(&self) -> f64 {
        match self.strategy {
            Strategy::Anchored { offset, .. } => offset,
            Strategy::Fallback => 0.0,
        }
    }

    /// Whether the last interaction was keyboard navigation.
    #[must_use]
    pub fn controlled_scrolling(&self) -> bool {
        self.controlled_scrolling
    }

    /// Whether commits are temporarily blocked.
    #[must_use]
    pub fn block_selection(&self) -> bool {
        self.block_selection
    }

    /// Whether the pointer left the list while open.
    #[must_use]
    pub fn is_mouse_outside(&self) -> bool {
        self.is_mouse_outside
    }

    /// Whether pointer releases and clicks may commit.
    #[must_use]
    pub fn allow_select(&self) -> bool {
        self.allow_select
    }

    /// Current (or last) open session.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Coarse open state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.open, self.strategy) {
            (false, _) => Phase::Closed,
            (true, Strategy::Anchored { .. }) => Phase::OpenAnchored,
            (true, Strategy::Fallback) => Phase::OpenFallback,
        }
    }

    /// Checks the closed-state resets and index bounds against `option_count`.
    #[must_use]
    pub fn is_consistent(&self, option_count: usize) -> bool {
        let in_bounds = |i: Option<usize>| i.is_none_or(|i| i < option_count);
        let closed_ok = self.open
            || (self.scroll_top == 0.0
                && !self.fallback()
                && self.inner_offset() == 0.0
                && self.active_index.is_none()
                && !self.controlled_scrolling
                && !self.block_selection
                && !self.is_mouse_outside);
        closed_ok && in_bounds(self.active_index) && in_bounds(self.selected_index)
    }

    /// Clamps indices that point past the end of a shrunken collection.
    ///
    /// Returns `true` if anything changed.
    pub(crate) fn clamp_indices(&mut self, option_count: usize) -> bool {
        let clamp = |i: Option<usize>| match option_count {
            0 => None,
            n => i.map(|i| i.min(n - 1)),
        };
        let active = clamp(self.active_index);
        let selected = clamp(self.selected_index);
        let mut changed = active != self.active_index || selected != self.selected_index;
        self.active_index = active;
        self.selected_index = selected;
        if let Strategy::Anchored { index, offset } = self.strategy {
            let anchored = index.min(option_count.saturating_sub(1));
            if anchored != index {
                self.strategy = Strategy::Anchored {
                    index: anchored,
                    offset,
                };
                changed = true;
            }
        }
        changed
    }

    /// Clears per-session fields after the list closed.
    pub(crate) fn reset_after_close(&mut self) {
        self.scroll_top = 0.0;
        self.strategy = Strategy::anchored(self.selected_index.unwrap_or(0));
        self.active_index = None;
        self.controlled_scrolling = false;
        self.block_selection = false;
        self.is_mouse_outside = false;
        self.allow_select = false;
        self.allow_mouse_up = true;
    }
}
