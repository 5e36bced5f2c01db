// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismiss region helper: decide whether a press lands inside a popup.
//!
//! Popups frequently consist of more than one disjoint piece: the popup body
//! plus affordances such as scroll arrows that are laid out elsewhere. A press
//! anywhere outside _all_ of those pieces usually dismisses the popup.
//!
//! [`DismissRegion`] collects the pieces as rectangles tagged with a
//! caller-chosen key, and classifies a pointer position with
//! [`DismissRegion::classify`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_event_state::dismiss::{DismissRegion, Press};
//!
//! #[derive(Copy, Clone, Debug, PartialEq)]
//! enum Part { Body, ScrollUp }
//!
//! let mut region = DismissRegion::new();
//! region.push(Part::Body, Rect::new(0.0, 20.0, 100.0, 200.0));
//! region.push(Part::ScrollUp, Rect::new(0.0, 0.0, 100.0, 20.0));
//!
//! assert_eq!(region.classify(Point::new(50.0, 10.0)), Press::Inside(Part::ScrollUp));
//! assert_eq!(region.classify(Point::new(150.0, 10.0)), Press::Outside);
//! ```

use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Classification of a pointer press against a [`DismissRegion`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press<K> {
    /// The press landed on the part with this key.
    Inside(K),
    /// The press landed outside every part.
    Outside,
}

impl<K> Press<K> {
    /// Returns `true` for [`Press::Outside`].
    #[must_use]
    pub fn is_outside(&self) -> bool {
        matches!(self, Self::Outside)
    }
}

/// A set of possibly disjoint rectangles treated as one "inside" region.
#[derive(Clone, Debug)]
pub struct DismissRegion<K> {
    parts: SmallVec<[(K, Rect); 3]>,
}

impl<K> Default for DismissRegion<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DismissRegion<K> {
    /// Creates an empty region. Every press is outside an empty region.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: SmallVec::new(),
        }
    }

    /// Adds a part to the region.
    ///
    /// Parts added later win when they overlap earlier ones.
    pub fn push(&mut self, key: K, rect: Rect) {
        self.parts.push((key, rect));
    }

    /// Removes all parts.
    pub fn clear(&mut self) {
        self.parts.clear();
    }

    /// Returns `true` if the region has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns the rectangle registered for `key`.
    #[must_use]
    pub fn rect(&self, key: &K) -> Option<Rect>
    where
        K: PartialEq,
    {
        self.parts.iter().find(|(k, _)| k == key).map(|(_, r)| *r)
    }

    /// Returns `true` if `pos` lies inside any part.
    #[must_use]
    pub fn contains(&self, pos: Point) -> bool {
        self.parts.iter().any(|(_, r)| r.contains(pos))
    }
}

impl<K: Copy> DismissRegion<K> {
    /// Classifies a press at `pos`.
    #[must_use]
    pub fn classify(&self, pos: Point) -> Press<K> {
        self.parts
            .iter()
            .rev()
            .find(|(_, r)| r.contains(pos))
            .map_or(Press::Outside, |(k, _)| Press::Inside(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_region_is_all_outside() {
        let region = DismissRegion::<u8>::new();
        assert!(region.is_empty());
        assert!(region.classify(Point::new(0.0, 0.0)).is_outside());
    }

    #[test]
    fn disjoint_parts_count_as_inside() {
        let mut region = DismissRegion::new();
        region.push(1_u8, Rect::new(0.0, 0.0, 10.0, 10.0));
        region.push(2_u8, Rect::new(100.0, 100.0, 110.0, 110.0));
        assert_eq!(region.classify(Point::new(5.0, 5.0)), Press::Inside(1));
        assert_eq!(region.classify(Point::new(105.0, 105.0)), Press::Inside(2));
        assert_eq!(region.classify(Point::new(50.0, 50.0)), Press::Outside);
        assert!(region.contains(Point::new(105.0, 105.0)));
        assert_eq!(region.len(), 2);
    }

    #[test]
    fn later_parts_win_on_overlap() {
        let mut region = DismissRegion::new();
        region.push('a', Rect::new(0.0, 0.0, 100.0, 100.0));
        region.push('b', Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(region.classify(Point::new(50.0, 5.0)), Press::Inside('b'));
        assert_eq!(region.classify(Point::new(50.0, 50.0)), Press::Inside('a'));
    }

    #[test]
    fn rect_lookup_and_clear() {
        let mut region = DismissRegion::new();
        region.push(7_u32, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(region.rect(&7), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(region.rect(&8), None);
        region.clear();
        assert!(region.is_empty());
    }
}
