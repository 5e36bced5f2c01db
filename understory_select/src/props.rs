// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute sets for the trigger, the floating list, and its options.
//!
//! These are plain data; the presentation layer maps them onto its own
//! accessibility and style vocabulary.

use understory_placement::Placement;

/// Kind of popup the trigger controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PopupKind {
    /// A list box of options.
    #[default]
    Listbox,
}

/// Accessible role of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The floating list.
    Listbox,
    /// One option in the list.
    Option,
}

/// How the list is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// A floating element positioned next to the trigger.
    Floating,
    /// A full-screen sheet; no placement is computed.
    Sheet,
}

/// Attributes for the trigger element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerProps {
    /// Kind of popup the trigger opens.
    pub has_popup: PopupKind,
    /// Whether the popup is open.
    pub expanded: bool,
    /// Option the trigger's focus is logically on, while open.
    pub active_descendant: Option<usize>,
    /// Tab order; the trigger is always focusable.
    pub tab_index: i32,
}

/// Attributes for the floating element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingProps {
    /// Accessible role.
    pub role: Role,
    /// Whether the element should render at all.
    pub visible: bool,
    /// Floating element or sheet.
    pub presentation: Presentation,
    /// Where to put the element; `None` means do not render it yet.
    pub placement: Option<Placement>,
    /// Highlighted option.
    pub active_descendant: Option<usize>,
    /// Whether page scrolling should be locked while open.
    pub lock_scroll: bool,
    /// Whether the element receives pointer events.
    pub pointer_events: bool,
    /// Stacking order.
    pub z_index: i32,
    /// The list scrolls through its arrows; its native scrollbar stays hidden.
    pub hide_scrollbar: bool,
    /// Whether the up arrow should show.
    pub can_scroll_up: bool,
    /// Whether the down arrow should show.
    pub can_scroll_down: bool,
}

/// Attributes for one option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemProps {
    /// Accessible role.
    pub role: Role,
    /// Whether the option is highlighted.
    pub active: bool,
    /// Whether the option is committed.
    pub selected: bool,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// Roving tab order: `0` for the highlighted option, `-1` otherwise.
    pub tab_index: i32,
}
