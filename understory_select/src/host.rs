// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: what the controller asks the presentation layer for.

use kurbo::Rect;
use understory_event_state::typeahead::TypeaheadSource;

use crate::config::Modality;

/// Which scroll arrow affordance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    /// Above the list, scrolls towards the first option.
    Up,
    /// Below the list, scrolls towards the last option.
    Down,
}

/// Geometry and option data supplied by the host.
///
/// The controller queries the host during every turn and never caches the
/// answers across turns, so the host is free to change anything while the list
/// is closed. While the list is open the option order must stay stable.
///
/// Rectangles other than [`item_rect`](Self::item_rect) are in viewport
/// coordinates.
pub trait SelectHost {
    /// Number of options.
    fn option_count(&self) -> usize;

    /// Label used for typeahead matching.
    fn label(&self, index: usize) -> Option<&str>;

    /// Whether the option at `index` can be highlighted and committed.
    fn is_disabled(&self, index: usize) -> bool {
        let _ = index;
        false
    }

    /// Rectangle of the option in the list's content coordinates, or `None`
    /// before it has been measured.
    fn item_rect(&self, index: usize) -> Option<Rect>;

    /// Full, unscrolled height of the list content.
    fn content_height(&self) -> f64;

    /// Top border/inset of the floating element.
    fn client_top(&self) -> f64 {
        0.0
    }

    /// Viewport rectangle.
    fn viewport(&self) -> Rect;

    /// Trigger rectangle, or `None` before it can be measured.
    fn reference(&self) -> Option<Rect>;

    /// Rectangle of a scroll arrow affordance, if one is rendered.
    fn arrow_rect(&self, direction: ArrowDirection) -> Option<Rect> {
        let _ = direction;
        None
    }

    /// Current input modality.
    fn modality(&self) -> Modality;

    /// Whether the list is presented as a full-screen sheet instead of a
    /// floating element.
    fn render_as_sheet(&self) -> bool {
        false
    }
}

/// Adapts a [`SelectHost`] to the typeahead matcher.
pub(crate) struct Labels<'a, H: ?Sized>(pub(crate) &'a H);

impl<H: SelectHost + ?Sized> TypeaheadSource for Labels<'_, H> {
    fn item_count(&self) -> usize {
        self.0.option_count()
    }

    fn label(&self, index: usize) -> Option<&str> {
        self.0.label(index)
    }

    fn is_disabled(&self, index: usize) -> bool {
        self.0.is_disabled(index)
    }
}
