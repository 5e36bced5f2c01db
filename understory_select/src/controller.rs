// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The select state machine.

use smallvec::SmallVec;
use understory_event_state::dismiss::DismissRegion;
use understory_event_state::typeahead::{TypeaheadResult, TypeaheadState};
use understory_placement::Placement;
use understory_timing::TimerQueue;

use crate::config::{ConfigError, Modality, SelectConfig};
use crate::engine::PositioningEngine;
use crate::event::{GlobalListeners, Key, Modifiers, Notice, Response, SelectEvent};
use crate::host::{ArrowDirection, Labels, SelectHost};
use crate::props::{FloatingProps, ItemProps, PopupKind, Presentation, Role, TriggerProps};
use crate::scroll::{ScrollArrows, scroll_into_view_nearest};
use crate::state::{Phase, SelectionState, SessionId, Strategy};
use crate::trace::{NoTrace, SelectTrace, TransitionCause};

/// Work scheduled for later in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    AllowSelect(SessionId),
    Unblock(SessionId),
}

/// Pieces of the "inside" region for outside-press dismissal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    List,
    Arrow(ArrowDirection),
}

/// Values compared at the end of a turn to produce notices.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Snapshot {
    open: bool,
    active: Option<usize>,
    selected: Option<usize>,
    fallback: bool,
    controlled_scrolling: bool,
    placement: Option<Placement>,
    scroll_top: f64,
    arrows: ScrollArrows,
}

/// Per-turn scratch.
struct Turn<'t, T: ?Sized> {
    trace: &'t mut T,
    now: u64,
    prevent_default: bool,
    committed: SmallVec<[usize; 1]>,
    reset_pending: bool,
    host_scroll: Option<f64>,
}

/// Headless controller for one select widget.
///
/// Feed every host input through [`handle`](Self::handle) (or
/// [`handle_batch`](Self::handle_batch) for inputs that arrive together) and
/// apply the returned [`Response`]. Between turns, read the
/// [`state`](Self::state) and the prop getters.
///
/// A turn runs in a fixed order: due timers fire, events apply, a pending
/// close resets the per-session fields, placement recomputes at most once
/// (twice when anchoring gives way to the fallback strategy), keyboard
/// navigation scrolls the highlighted option into view, and scroll arrows are
/// derived from the final scroll offset.
#[derive(Clone, Debug)]
pub struct SelectController {
    config: SelectConfig,
    state: SelectionState,
    engine: PositioningEngine,
    typeahead: TypeaheadState,
    timers: TimerQueue<Deferred>,
    arrows: ScrollArrows,
    listening: bool,
}

impl Default for SelectController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectController {
    /// Creates a closed controller with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(SelectConfig::default())
    }

    /// Creates a closed controller with a custom configuration.
    pub fn with_config(config: SelectConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SelectConfig) -> Self {
        Self {
            typeahead: TypeaheadState::new(config.typeahead_timeout)
                .with_wrap(config.typeahead_wrap),
            config,
            state: SelectionState::default(),
            engine: PositioningEngine::new(),
            timers: TimerQueue::new(),
            arrows: ScrollArrows::default(),
            listening: false,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Placement engine, for inspection.
    #[must_use]
    pub fn engine(&self) -> &PositioningEngine {
        &self.engine
    }

    /// Current placement of the floating element.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.engine.placement()
    }

    /// Current scroll arrow visibility.
    #[must_use]
    pub fn arrows(&self) -> ScrollArrows {
        self.arrows
    }

    /// Whether a typeahead search is in progress at `now`.
    #[must_use]
    pub fn is_typing(&self, now: u64) -> bool {
        self.typeahead.is_typing(now)
    }

    /// Earliest time at which a [`SelectEvent::Tick`] would change something.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Handles one event as a turn.
    pub fn handle<H>(&mut self, host: &H, now: u64, event: SelectEvent) -> Response
    where
        H: SelectHost + ?Sized,
    {
        self.handle_batch_with_trace(host, now, [event], &mut NoTrace)
    }

    /// Handles one event as a turn, reporting progress to `trace`.
    pub fn handle_with_trace<H, T>(
        &mut self,
        host: &H,
        now: u64,
        event: SelectEvent,
        trace: &mut T,
    ) -> Response
    where
        H: SelectHost + ?Sized,
        T: SelectTrace + ?Sized,
    {
        self.handle_batch_with_trace(host, now, [event], trace)
    }

    /// Handles several events that arrived together as a single turn.
    ///
    /// Placement is computed once, after all events applied.
    pub fn handle_batch<H>(
        &mut self,
        host: &H,
        now: u64,
        events: impl IntoIterator<Item = SelectEvent>,
    ) -> Response
    where
        H: SelectHost + ?Sized,
    {
        self.handle_batch_with_trace(host, now, events, &mut NoTrace)
    }

    /// Like [`handle_batch`](Self::handle_batch), reporting progress to `trace`.
    pub fn handle_batch_with_trace<H, T>(
        &mut self,
        host: &H,
        now: u64,
        events: impl IntoIterator<Item = SelectEvent>,
        trace: &mut T,
    ) -> Response
    where
        H: SelectHost + ?Sized,
        T: SelectTrace + ?Sized,
    {
        let before = self.snapshot();
        let count = host.option_count();
        if self.state.clamp_indices(count) {
            trace.indices_clamped(count);
        }

        let mut turn = Turn {
            trace,
            now,
            prevent_default: false,
            committed: SmallVec::new(),
            reset_pending: false,
            host_scroll: None,
        };
        self.fire_timers(&mut turn);
        for event in events {
            self.apply(host, event, &mut turn);
        }
        if turn.reset_pending {
            self.finish_close();
        }
        self.place(host, &mut turn);
        self.reveal_active(host, &before);

        let content_height = host.content_height();
        self.arrows = ScrollArrows::derive(
            self.state.open,
            self.state.scroll_top,
            content_height,
            self.engine.client_height(content_height),
            self.config.scroll_arrow_threshold,
        );

        self.respond(&before, turn)
    }

    /// Attributes for the trigger element.
    #[must_use]
    pub fn trigger_props(&self) -> TriggerProps {
        TriggerProps {
            has_popup: PopupKind::Listbox,
            expanded: self.state.open,
            active_descendant: self.state.active_index.filter(|_| self.state.open),
            tab_index: 0,
        }
    }

    /// Attributes for the floating element.
    #[must_use]
    pub fn floating_props<H>(&self, host: &H) -> FloatingProps
    where
        H: SelectHost + ?Sized,
    {
        let open = self.state.open;
        let sheet = host.render_as_sheet();
        let placement = if sheet { None } else { self.engine.placement() };
        FloatingProps {
            role: Role::Listbox,
            visible: open && (sheet || placement.is_some()),
            presentation: if sheet {
                Presentation::Sheet
            } else {
                Presentation::Floating
            },
            placement,
            active_descendant: self.state.active_index,
            lock_scroll: open && host.modality() != Modality::Touch,
            pointer_events: open,
            z_index: self.config.z_index,
            hide_scrollbar: true,
            can_scroll_up: self.arrows.up,
            can_scroll_down: self.arrows.down,
        }
    }

    /// Attributes for the option at `index`.
    #[must_use]
    pub fn item_props<H>(&self, host: &H, index: usize) -> ItemProps
    where
        H: SelectHost + ?Sized,
    {
        let active = self.state.active_index == Some(index);
        ItemProps {
            role: Role::Option,
            active,
            selected: self.state.selected_index == Some(index),
            disabled: host.is_disabled(index),
            tab_index: if active { 0 } else { -1 },
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            open: self.state.open,
            active: self.state.active_index,
            selected: self.state.selected_index,
            fallback: self.state.fallback(),
            controlled_scrolling: self.state.controlled_scrolling,
            placement: self.engine.placement(),
            scroll_top: self.state.scroll_top,
            arrows: self.arrows,
        }
    }

    fn is_current(&self, session: SessionId) -> bool {
        self.state.open && self.state.session == session
    }

    fn fire_timers<T: SelectTrace + ?Sized>(&mut self, turn: &mut Turn<'_, T>) {
        while let Some(expired) = self.timers.pop_due(turn.now) {
            match expired.payload {
                Deferred::AllowSelect(session) if self.is_current(session) => {
                    self.state.allow_select = true;
                }
                Deferred::Unblock(session) if self.is_current(session) => {
                    self.state.block_selection = false;
                }
                Deferred::AllowSelect(session) | Deferred::Unblock(session) => {
                    turn.trace.timer_discarded(session);
                }
            }
        }
    }

    fn apply<H, T>(&mut self, host: &H, event: SelectEvent, turn: &mut Turn<'_, T>)
    where
        H: SelectHost + ?Sized,
        T: SelectTrace + ?Sized,
    {
        let open = self.state.open;
        match event {
            SelectEvent::TriggerPointerDown => {
                if open {
                    self.close(turn, TransitionCause::TriggerPress);
                } else {
                    self.open(turn, TransitionCause::TriggerPress);
                }
            }
            SelectEvent::TriggerKeyDown { key, modifiers } => {
                self.on_key(host, key, modifiers, turn);
            }
            SelectEvent::FloatingKeyDown { key, modifiers } => {
                if open {
                    self.state.controlled_scrolling = true;
                    self.on_key(host, key, modifiers, turn);
                }
            }
            SelectEvent::FloatingPointerEnter | SelectEvent::FloatingPointerMove => {
                if open {
                    self.state.controlled_scrolling = false;
                    self.state.is_mouse_outside = false;
                }
            }
            SelectEvent::FloatingPointerLeave => {
                if open {
                    self.state.is_mouse_outside = true;
                }
            }
            SelectEvent::FloatingScroll { scroll_top } => {
                if open {
                    self.state.scroll_top = scroll_top.max(0.0);
                    turn.host_scroll = Some(self.state.scroll_top);
                }
            }
            SelectEvent::FloatingWheel { delta_y, modifiers } => {
                // Ctrl+wheel is pinch zoom.
                if open
                    && !modifiers.contains(Modifiers::CTRL)
                    && self.grow_anchored(host, delta_y)
                {
                    turn.prevent_default = true;
                }
            }
            SelectEvent::ItemPointerEnter(index) | SelectEvent::ItemPointerMove(index) => {
                if open && !self.state.controlled_scrolling && self.is_enabled(host, index) {
                    self.state.active_index = Some(index);
                }
            }
            SelectEvent::ItemPointerUp(index) => {
                if !open || !self.state.allow_mouse_up {
                    return;
                }
                if self.state.allow_select {
                    self.commit(host, index, turn);
                } else {
                    // The release that belonged to the opening press was
                    // swallowed; the next one may commit.
                    let session = self.state.session;
                    self.timers.cancel_where(|d| matches!(d, Deferred::AllowSelect(_)));
                    self.timers.schedule(turn.now, Deferred::AllowSelect(session));
                }
            }
            SelectEvent::ItemClick(index) => {
                if open && self.state.allow_select {
                    self.commit(host, index, turn);
                }
            }
            SelectEvent::ItemTouchStart(_) => {
                if open {
                    self.state.allow_select = true;
                    self.state.allow_mouse_up = false;
                }
            }
            SelectEvent::ArrowScroll { direction, amount } => {
                if open {
                    let delta = match direction {
                        ArrowDirection::Up => -amount,
                        ArrowDirection::Down => amount,
                    };
                    if !self.grow_anchored(host, delta) {
                        let content_height = host.content_height();
                        let max =
                            (content_height - self.engine.client_height(content_height)).max(0.0);
                        self.state.scroll_top = (self.state.scroll_top + delta).clamp(0.0, max);
                    }
                }
            }
            SelectEvent::ArrowHidden(_) => {
                if open && host.modality() == Modality::Touch {
                    let session = self.state.session;
                    self.state.block_selection = true;
                    self.timers.cancel_where(|d| matches!(d, Deferred::Unblock(_)));
                    self.timers.schedule(
                        turn.now.saturating_add(self.config.touch_block_delay),
                        Deferred::Unblock(session),
                    );
                }
            }
            SelectEvent::DocumentPointerDown { position } => {
                if open
                    && !host.render_as_sheet()
                    && self.dismiss_region(host).classify(position).is_outside()
                {
                    self.state.controlled_scrolling = false;
                    self.close(turn, TransitionCause::OutsidePress);
                }
            }
            SelectEvent::DocumentPointerUp => {
                if open && self.state.is_mouse_outside {
                    self.close(turn, TransitionCause::OutsideRelease);
                }
            }
            SelectEvent::Resize => {
                if open {
                    self.engine.invalidate();
                }
            }
            SelectEvent::SetOpen(true) => self.open(turn, TransitionCause::Programmatic),
            SelectEvent::SetOpen(false) => self.close(turn, TransitionCause::Programmatic),
            SelectEvent::SetSelected(selected) => {
                let selected = selected.filter(|&i| i < host.option_count());
                self.state.selected_index = selected;
                if let Strategy::Anchored { offset, .. } = self.state.strategy {
                    self.state.strategy = Strategy::Anchored {
                        index: selected.unwrap_or(0),
                        offset,
                    };
                    if open {
                        self.engine.invalidate();
                    }
                }
            }
            SelectEvent::Tick => {}
        }
    }

    fn on_key<H, T>(&mut self, host: &H, key: Key, modifiers: Modifiers, turn: &mut Turn<'_, T>)
    where
        H: SelectHost + ?Sized,
        T: SelectTrace + ?Sized,
    {
        let open = self.state.open;
        match key {
            Key::Character(ch) if !modifiers.intersects(Modifiers::SHORTCUT) => {
                if ch == ' ' && !self.typeahead.is_typing(turn.now) {
                    turn.prevent_default = true;
                    self.activate(host, turn);
                    return;
                }
                match self.typeahead.on_char(ch, turn.now, &Labels(host)) {
                    TypeaheadResult::Matched(index) => {
                        turn.prevent_default = true;
                        if open {
                            self.state.active_index = Some(index);
                            self.state.controlled_scrolling = true;
                        } else {
                            self.state.selected_index = Some(index);
                            self.state.strategy = Strategy::anchored(index);
                        }
                    }
                    TypeaheadResult::NoMatch => turn.prevent_default = ch == ' ',
                    TypeaheadResult::Ignored => {}
                }
            }
            Key::Character(_) | Key::Other => {}
            Key::Enter => {
                turn.prevent_default = true;
                self.activate(host, turn);
            }
            Key::Escape => {
                if open {
                    turn.prevent_default = true;
                    self.close(turn, TransitionCause::Key);
                }
            }
            Key::ArrowDown | Key::ArrowUp => {
                turn.prevent_default = true;
                let down = key == Key::ArrowDown;
                if !open {
                    self.open(turn, TransitionCause::Key);
                    if self.state.active_index.is_none() {
                        self.state.active_index = self.step(host, None, down);
                    }
                } else {
                    self.state.active_index = self.step(host, self.state.active_index, down);
                }
                self.state.controlled_scrolling = true;
            }
            Key::Home | Key::End => {
                if open {
                    turn.prevent_default = true;
                    self.state.active_index = self.step(host, None, key == Key::Home);
                    self.state.controlled_scrolling = true;
                }
            }
            Key::Tab => {
                if open {
                    self.close(turn, TransitionCause::Key);
                }
            }
        }
    }

    /// Opens a closed list, or commits the highlighted option of an open one.
    fn activate<H, T>(&mut self, host: &H, turn: &mut Turn<'_, T>)
    where
        H: SelectHost + ?Sized,
        T: SelectTrace + ?Sized,
    {
        if !self.state.open {
            self.open(turn, TransitionCause::Key);
        } else if let Some(active) = self.state.active_index {
            self.commit(host, active, turn);
        }
    }

    fn open<T: SelectTrace + ?Sized>(&mut self, turn: &mut Turn<'_, T>, cause: TransitionCause) {
        if self.state.open {
            return;
        }
        if turn.reset_pending {
            turn.reset_pending = false;
            self.finish_close();
        }
        let from = self.state.phase();
        let session = SessionId(self.state.session.0.wrapping_add(1));
        let state = &mut self.state;
        state.session = session;
        state.open = true;
        state.strategy = Strategy::anchored(state.selected_index.unwrap_or(0));
        state.scroll_top = 0.0;
        state.block_selection = false;
        state.allow_select = false;
        state.allow_mouse_up = true;
        state.is_mouse_outside = false;
        state.active_index = state.selected_index;
        self.timers.schedule(
            turn.now.saturating_add(self.config.select_delay),
            Deferred::AllowSelect(session),
        );
        self.engine.invalidate();
        turn.trace.transition(from, self.state.phase(), cause);
    }

    /// Closes the list. The per-session fields are reset at the end of the turn.
    fn close<T: SelectTrace + ?Sized>(&mut self, turn: &mut Turn<'_, T>, cause: TransitionCause) {
        if !self.state.open {
            return;
        }
        let from = self.state.phase();
        self.state.open = false;
        turn.reset_pending = true;
        self.timers.clear();
        self.typeahead.reset();
        turn.trace.transition(from, Phase::Closed, cause);
    }

    fn finish_close(&mut self) {
        self.state.reset_after_close();
        self.engine.reset();
    }

    fn commit<H, T>(&mut self, host: &H, index: usize, turn: &mut Turn<'_, T>)
    where
        H: SelectHost + ?Sized,
        T: SelectTrace + ?Sized,
    {
        if !self.state.open || self.state.block_selection || !self.is_enabled(host, index) {
            return;
        }
        self.state.selected_index = Some(index);
        turn.committed.push(index);
        self.close(turn, TransitionCause::Commit);
    }

    fn is_enabled<H: SelectHost + ?Sized>(&self, host: &H, index: usize) -> bool {
        index < host.option_count() && !host.is_disabled(index)
    }

    /// Next enabled option from `from` in the given direction.
    ///
    /// From `None`, returns the first (or last) enabled option. Stays put at the
    /// ends unless looping is configured.
    fn step<H: SelectHost + ?Sized>(
        &self,
        host: &H,
        from: Option<usize>,
        down: bool,
    ) -> Option<usize> {
        let count = host.option_count();
        let enabled = |i: &usize| !host.is_disabled(*i);
        let found = match (from, down) {
            (None, true) => (0..count).find(enabled),
            (None, false) => (0..count).rev().find(enabled),
            (Some(i), true) => (i + 1..count).find(enabled).or_else(|| {
                if self.config.loop_navigation {
                    (0..i).find(enabled)
                } else {
                    None
                }
            }),
            (Some(i), false) => (0..i).rev().find(enabled).or_else(|| {
                if self.config.loop_navigation {
                    (i + 1..count).rev().find(enabled)
                } else {
                    None
                }
            }),
        };
        found.or(from)
    }

    /// Moves an anchored list towards the viewport edge instead of scrolling its
    /// content, while it does not touch that edge yet.
    ///
    /// Returns `true` if the offset changed.
    fn grow_anchored<H: SelectHost + ?Sized>(&mut self, host: &H, delta: f64) -> bool {
        let Strategy::Anchored { index, offset } = self.state.strategy else {
            return false;
        };
        let Some(overflow) = self.engine.anchored_overflow() else {
            return false;
        };
        let content_height = host.content_height();
        let remaining = content_height - self.engine.client_height(content_height);
        if remaining <= 0.0 {
            return false;
        }
        let at_top = overflow.top >= -0.5;
        let at_bottom = overflow.bottom >= -0.5;
        if (!at_top && delta > 0.0) || (!at_bottom && delta < 0.0) {
            let delta = if delta < 0.0 {
                delta.max(-remaining)
            } else {
                delta.min(remaining)
            };
            self.state.strategy = Strategy::Anchored {
                index,
                offset: offset + delta,
            };
            self.engine.invalidate();
            return true;
        }
        false
    }

    fn dismiss_region<H: SelectHost + ?Sized>(&self, host: &H) -> DismissRegion<Part> {
        let mut region = DismissRegion::new();
        if let Some(placement) = self.engine.placement() {
            region.push(Part::List, placement.rect(host.content_height()));
        }
        for direction in [ArrowDirection::Up, ArrowDirection::Down] {
            if let Some(rect) = host.arrow_rect(direction) {
                region.push(Part::Arrow(direction), rect);
            }
        }
        region
    }

    fn place<H, T>(&mut self, host: &H, turn: &mut Turn<'_, T>)
    where
        H: SelectHost + ?Sized,
        T: SelectTrace + ?Sized,
    {
        if !self.state.open || !self.engine.is_pending() {
            return;
        }
        let update = self.engine.recompute(&self.state, &self.config, host);
        turn.trace.placement(self.state.strategy, update.placement);
        if !update.fallback_requested {
            if let Some(scroll_top) = update.scroll_top {
                self.state.scroll_top = scroll_top;
            }
            return;
        }

        let from = self.state.phase();
        self.state.strategy = Strategy::Fallback;
        turn.trace.transition(from, Phase::OpenFallback, TransitionCause::Fallback);
        self.engine.clear_height_cap();
        let update = self.engine.recompute(&self.state, &self.config, host);
        turn.trace.placement(self.state.strategy, update.placement);

        self.state.scroll_top = 0.0;
        let selected = self.state.selected_index.and_then(|i| host.item_rect(i));
        if let Some(item) = selected {
            let client_height = self.engine.client_height(host.content_height());
            self.state.scroll_top = scroll_into_view_nearest(0.0, client_height, item);
        }
    }

    /// Keeps the highlighted option visible while navigating by keyboard.
    fn reveal_active<H: SelectHost + ?Sized>(&mut self, host: &H, before: &Snapshot) {
        let active = self.state.active_index;
        if !self.state.open || !self.state.controlled_scrolling {
            return;
        }
        if active == before.active && before.controlled_scrolling {
            return;
        }
        let Some(item) = active.and_then(|i| host.item_rect(i)) else {
            return;
        };
        let client_height = self.engine.client_height(host.content_height());
        self.state.scroll_top =
            scroll_into_view_nearest(self.state.scroll_top, client_height, item);
    }

    fn respond<T: SelectTrace + ?Sized>(
        &mut self,
        before: &Snapshot,
        turn: Turn<'_, T>,
    ) -> Response {
        let after = self.snapshot();
        let mut notices = SmallVec::new();
        if after.open != before.open {
            notices.push(Notice::OpenChanged(after.open));
        }
        if after.active != before.active {
            notices.push(Notice::ActiveChanged(after.active));
        }
        if after.selected != before.selected {
            notices.push(Notice::SelectedChanged(after.selected));
        }
        notices.extend(turn.committed.into_iter().map(Notice::Committed));
        if after.fallback != before.fallback {
            notices.push(Notice::FallbackChanged(after.fallback));
        }
        if after.placement != before.placement {
            notices.push(Notice::PlacementChanged(after.placement));
        }
        if after.open
            && after.scroll_top != before.scroll_top
            && turn.host_scroll != Some(after.scroll_top)
        {
            notices.push(Notice::ScrollTo(after.scroll_top));
        }
        if after.arrows != before.arrows {
            notices.push(Notice::ArrowsChanged(after.arrows));
        }
        if after.open != self.listening {
            self.listening = after.open;
            notices.push(if after.open {
                Notice::Listen(GlobalListeners::all())
            } else {
                Notice::Unlisten(GlobalListeners::all())
            });
        }
        Response {
            prevent_default: turn.prevent_default,
            notices,
        }
    }
}
