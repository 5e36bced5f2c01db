// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable constants for [`SelectController`](crate::SelectController).

use core::fmt;

use understory_event_state::typeahead::WrapMatch;
use understory_placement::{AnchoredOptions, FallbackBehavior, FallbackOptions};

/// Padding between the floating list and the viewport for size fitting,
/// flipping, and shifting.
pub const WINDOW_PADDING: f64 = 8.0;

/// Padding between the floating list and the viewport for anchored placement.
pub const INNER_PADDING: f64 = 10.0;

/// How close the trigger may get to the padded viewport edge before anchored
/// placement gives way to the fallback strategy.
pub const REFERENCE_OVERFLOW_THRESHOLD: f64 = 20.0;

/// Minimum visible options for anchored placement with a precise pointer.
pub const MIN_ITEMS_VISIBLE_PRECISE: usize = 4;

/// Minimum visible options for anchored placement with touch input.
pub const MIN_ITEMS_VISIBLE_TOUCH: usize = 10;

/// Gap between trigger and list in the fallback strategy.
pub const FALLBACK_GAP: f64 = 5.0;

/// Scroll distance from either end before a scroll arrow appears.
pub const SCROLL_ARROW_THRESHOLD: f64 = 8.0;

/// Milliseconds after opening before a pointer release may commit.
pub const SELECT_DELAY: u64 = 300;

/// Milliseconds selection stays blocked after a scroll arrow hides on touch.
pub const TOUCH_BLOCK_DELAY: u64 = 400;

/// Milliseconds between keystrokes before a typeahead search restarts.
pub const TYPEAHEAD_TIMEOUT: u64 = 750;

/// Stacking order of the floating overlay.
pub const OVERLAY_Z_INDEX: i32 = 1000;

/// Input modality reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Mouse, pen, or another pointer with hover.
    #[default]
    Precise,
    /// Touch input without hover.
    Touch,
}

/// Configuration for a [`SelectController`](crate::SelectController).
///
/// Times are in the host's clock units (milliseconds by convention); lengths
/// are in the host's device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectConfig {
    /// See [`WINDOW_PADDING`].
    pub window_padding: f64,
    /// See [`INNER_PADDING`].
    pub inner_padding: f64,
    /// See [`REFERENCE_OVERFLOW_THRESHOLD`].
    pub reference_overflow_threshold: f64,
    /// See [`MIN_ITEMS_VISIBLE_PRECISE`].
    pub min_items_visible_precise: usize,
    /// See [`MIN_ITEMS_VISIBLE_TOUCH`].
    pub min_items_visible_touch: usize,
    /// See [`FALLBACK_GAP`].
    pub fallback_gap: f64,
    /// See [`SCROLL_ARROW_THRESHOLD`].
    pub scroll_arrow_threshold: f64,
    /// See [`SELECT_DELAY`].
    pub select_delay: u64,
    /// See [`TOUCH_BLOCK_DELAY`].
    pub touch_block_delay: u64,
    /// See [`TYPEAHEAD_TIMEOUT`].
    pub typeahead_timeout: u64,
    /// Where typeahead searches start.
    pub typeahead_wrap: WrapMatch,
    /// Whether arrow navigation wraps from the last option to the first and back.
    pub loop_navigation: bool,
    /// See [`OVERLAY_Z_INDEX`].
    pub z_index: i32,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            window_padding: WINDOW_PADDING,
            inner_padding: INNER_PADDING,
            reference_overflow_threshold: REFERENCE_OVERFLOW_THRESHOLD,
            min_items_visible_precise: MIN_ITEMS_VISIBLE_PRECISE,
            min_items_visible_touch: MIN_ITEMS_VISIBLE_TOUCH,
            fallback_gap: FALLBACK_GAP,
            scroll_arrow_threshold: SCROLL_ARROW_THRESHOLD,
            select_delay: SELECT_DELAY,
            touch_block_delay: TOUCH_BLOCK_DELAY,
            typeahead_timeout: TYPEAHEAD_TIMEOUT,
            typeahead_wrap: WrapMatch::FromStart,
            loop_navigation: false,
            z_index: OVERLAY_Z_INDEX,
        }
    }
}

impl SelectConfig {
    /// Minimum visible options for anchored placement under `modality`.
    #[must_use]
    pub fn min_items_visible(&self, modality: Modality) -> usize {
        match modality {
            Modality::Precise => self.min_items_visible_precise,
            Modality::Touch => self.min_items_visible_touch,
        }
    }

    /// Checks that every length is finite and non-negative, that minimum item
    /// counts are non-zero, and that the typeahead timeout is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("window_padding", self.window_padding),
            ("inner_padding", self.inner_padding),
            ("reference_overflow_threshold", self.reference_overflow_threshold),
            ("fallback_gap", self.fallback_gap),
            ("scroll_arrow_threshold", self.scroll_arrow_threshold),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLength { field, value });
            }
        }
        for modality in [Modality::Precise, Modality::Touch] {
            if self.min_items_visible(modality) == 0 {
                return Err(ConfigError::ZeroMinItems { modality });
            }
        }
        if self.typeahead_timeout == 0 {
            return Err(ConfigError::ZeroTypeaheadTimeout);
        }
        Ok(())
    }

    pub(crate) fn anchored_options(&self, modality: Modality) -> AnchoredOptions {
        AnchoredOptions {
            padding: self.inner_padding,
            min_items_visible: self.min_items_visible(modality),
            reference_overflow_threshold: self.reference_overflow_threshold,
        }
    }

    pub(crate) fn fallback_options(&self, modality: Modality) -> FallbackOptions {
        FallbackOptions {
            gap: self.fallback_gap,
            padding: self.window_padding,
            behavior: match modality {
                Modality::Precise => FallbackBehavior::Flip,
                Modality::Touch => FallbackBehavior::Shift,
            },
        }
    }
}

/// Error returned by [`SelectConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A length is negative, infinite, or NaN.
    InvalidLength {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A minimum-visible-items count is zero.
    ZeroMinItems {
        /// Modality whose minimum is zero.
        modality: Modality,
    },
    /// The typeahead timeout is zero, which would end every search immediately.
    ZeroTypeaheadTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { field, value } => {
                write!(f, "`{field}` must be finite and non-negative, got {value}")
            }
            Self::ZeroMinItems { modality } => {
                write!(f, "minimum visible items for {modality:?} input must be at least 1")
            }
            Self::ZeroTypeaheadTimeout => f.write_str("typeahead timeout must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn defaults_validate() {
        assert_eq!(SelectConfig::default().validate(), Ok(()));
    }

    #[test]
    fn negative_padding_is_rejected() {
        let config = SelectConfig {
            window_padding: -1.0,
            ..SelectConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLength {
                field: "window_padding",
                value: -1.0
            })
        );
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = SelectConfig {
            scroll_arrow_threshold: f64::NAN,
            ..SelectConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLength {
                field: "scroll_arrow_threshold",
                ..
            })
        ));
    }

    #[test]
    fn zero_minimums_and_timeouts_are_rejected() {
        let config = SelectConfig {
            min_items_visible_touch: 0,
            ..SelectConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroMinItems {
                modality: Modality::Touch
            })
        );
        let config = SelectConfig {
            typeahead_timeout: 0,
            ..SelectConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTypeaheadTimeout));
    }

    #[test]
    fn modality_picks_strategy_options() {
        let config = SelectConfig::default();
        assert_eq!(config.anchored_options(Modality::Touch).min_items_visible, 10);
        assert_eq!(config.anchored_options(Modality::Precise).min_items_visible, 4);
        assert_eq!(
            config.fallback_options(Modality::Touch).behavior,
            FallbackBehavior::Shift
        );
        assert_eq!(
            config.fallback_options(Modality::Precise).behavior,
            FallbackBehavior::Flip
        );
    }

    #[test]
    fn errors_display() {
        let err = ConfigError::ZeroMinItems {
            modality: Modality::Precise,
        };
        assert_eq!(
            err.to_string(),
            "minimum visible items for Precise input must be at least 1"
        );
    }
}
