// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs to and outputs of a controller turn.

use kurbo::Point;
use smallvec::SmallVec;
use understory_placement::Placement;

use crate::host::ArrowDirection;
use crate::scroll::ScrollArrows;

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Windows.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Modifiers that turn a printable key into a shortcut.
    pub const SHORTCUT: Self = Self::CTRL.union(Self::ALT).union(Self::META);
}

bitflags::bitflags! {
    /// Document and window listeners the host must install while the list is open.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GlobalListeners: u8 {
        /// Document pointer-down, reported as [`SelectEvent::DocumentPointerDown`].
        const POINTER_DOWN = 1 << 0;
        /// Document pointer-up, reported as [`SelectEvent::DocumentPointerUp`].
        const POINTER_UP = 1 << 1;
        /// Window resize, reported as [`SelectEvent::Resize`].
        const RESIZE = 1 << 2;
    }
}

/// Logical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character, including space.
    Character(char),
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Tab.
    Tab,
    /// Anything else; ignored.
    Other,
}

/// One host input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectEvent {
    /// Pointer pressed on the trigger.
    TriggerPointerDown,
    /// Key pressed while the trigger has focus.
    TriggerKeyDown {
        /// Pressed key.
        key: Key,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// Key pressed while the list has focus.
    FloatingKeyDown {
        /// Pressed key.
        key: Key,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// Pointer entered the list.
    FloatingPointerEnter,
    /// Pointer left the list.
    FloatingPointerLeave,
    /// Pointer moved over the list.
    FloatingPointerMove,
    /// The list content scrolled.
    FloatingScroll {
        /// New scroll offset.
        scroll_top: f64,
    },
    /// Wheel over the list.
    FloatingWheel {
        /// Vertical wheel delta; positive scrolls towards the end.
        delta_y: f64,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// Pointer entered an option.
    ItemPointerEnter(usize),
    /// Pointer moved over an option.
    ItemPointerMove(usize),
    /// Pointer released over an option.
    ItemPointerUp(usize),
    /// An option was clicked.
    ItemClick(usize),
    /// A touch started on an option.
    ItemTouchStart(usize),
    /// A scroll arrow requested scrolling.
    ArrowScroll {
        /// Which arrow.
        direction: ArrowDirection,
        /// Distance to scroll.
        amount: f64,
    },
    /// A scroll arrow disappeared.
    ArrowHidden(ArrowDirection),
    /// Pointer pressed anywhere in the document.
    DocumentPointerDown {
        /// Press position in viewport coordinates.
        position: Point,
    },
    /// Pointer released anywhere in the document.
    DocumentPointerUp,
    /// The viewport changed size.
    Resize,
    /// Open or close programmatically.
    SetOpen(bool),
    /// Change the committed option programmatically.
    SetSelected(Option<usize>),
    /// No input; only fires due timers.
    Tick,
}

/// Something the host should observe or act on after a turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Notice {
    /// The list opened or closed.
    OpenChanged(bool),
    /// The committed option changed.
    SelectedChanged(Option<usize>),
    /// The highlighted option changed.
    ActiveChanged(Option<usize>),
    /// The option at this index was committed by the user.
    Committed(usize),
    /// The fallback strategy was entered or left.
    FallbackChanged(bool),
    /// The floating element moved or resized; `None` means it must not render.
    PlacementChanged(Option<Placement>),
    /// Set the list content's scroll offset.
    ScrollTo(f64),
    /// Scroll arrow visibility changed.
    ArrowsChanged(ScrollArrows),
    /// Install these global listeners.
    Listen(GlobalListeners),
    /// Remove these global listeners.
    Unlisten(GlobalListeners),
}

/// Result of a controller turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    /// Whether the host should suppress the default action of the input.
    pub prevent_default: bool,
    /// Observable changes, in a stable order.
    pub notices: SmallVec<[Notice; 4]>,
}

impl Response {
    /// Returns `true` if `notice` was emitted.
    #[must_use]
    pub fn has(&self, notice: &Notice) -> bool {
        self.notices.contains(notice)
    }

    /// Returns the index committed during the turn, if any.
    #[must_use]
    pub fn committed(&self) -> Option<usize> {
        self.notices.iter().find_map(|n| match n {
            Notice::Committed(i) => Some(*i),
            _ => None,
        })
    }
}
