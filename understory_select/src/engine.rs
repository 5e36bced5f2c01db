// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runs the placement strategies for the active [`Strategy`].

use kurbo::{Point, Rect};
use understory_placement::{
    AnchoredInput, FallbackInput, Overflow, Placement, Positioning, Side, fit_size,
    place_anchored, place_fallback,
};

use crate::config::SelectConfig;
use crate::host::SelectHost;
use crate::state::{SelectionState, Strategy};

/// Outcome of [`PositioningEngine::recompute`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionUpdate {
    /// New placement; `None` when the list must not render as a floating element.
    pub placement: Option<Placement>,
    /// Scroll offset the anchored strategy needs to keep its option aligned.
    pub scroll_top: Option<f64>,
    /// Anchored placement cannot keep enough options visible.
    pub fallback_requested: bool,
}

/// Placement cache for one select.
///
/// The engine never decides the strategy itself. It computes placements for
/// whatever strategy the state names and reports when anchoring fails; the
/// controller flips the strategy and asks again.
#[derive(Clone, Debug, Default)]
pub struct PositioningEngine {
    placement: Option<Placement>,
    anchored_overflow: Option<Overflow>,
    height_cap: Option<f64>,
    pending: bool,
    computations: u64,
}

impl PositioningEngine {
    /// Creates an engine with nothing placed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current placement.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Overflow of the last anchored placement against the padded viewport.
    #[must_use]
    pub fn anchored_overflow(&self) -> Option<Overflow> {
        self.anchored_overflow
    }

    /// Height cap applied by the anchored strategy, if any.
    #[must_use]
    pub fn height_cap(&self) -> Option<f64> {
        self.height_cap
    }

    /// Whether a recomputation is queued.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of placement computations since creation.
    #[must_use]
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Visible height of the list for the current placement.
    #[must_use]
    pub fn client_height(&self, content_height: f64) -> f64 {
        self.placement
            .map_or(content_height, |p| p.visible_height(content_height))
    }

    /// Queues a recomputation. Repeated calls before the next
    /// [`recompute`](Self::recompute) coalesce.
    pub fn invalidate(&mut self) {
        self.pending = true;
    }

    /// Forgets the placement after the list closed.
    pub fn reset(&mut self) {
        self.placement = None;
        self.anchored_overflow = None;
        self.height_cap = None;
        self.pending = false;
    }

    /// Drops the anchored height cap ahead of a fallback placement.
    pub fn clear_height_cap(&mut self) {
        self.height_cap = None;
        self.anchored_overflow = None;
    }

    /// Computes the placement for the state's strategy.
    ///
    /// Closed lists are never placed. Sheets and unmeasured triggers yield a
    /// `None` placement and stay pending, so the next turn tries again.
    pub fn recompute<H>(
        &mut self,
        state: &SelectionState,
        config: &SelectConfig,
        host: &H,
    ) -> PositionUpdate
    where
        H: SelectHost + ?Sized,
    {
        self.pending = false;
        let mut update = PositionUpdate {
            placement: None,
            scroll_top: None,
            fallback_requested: false,
        };
        if !state.open() {
            return update;
        }
        self.computations += 1;

        let reference = host.reference();
        let (Some(reference), false) = (reference, host.render_as_sheet()) else {
            self.placement = None;
            self.pending = true;
            return update;
        };
        let viewport = host.viewport();
        let content_height = host.content_height();
        let modality = host.modality();

        match state.strategy() {
            Strategy::Anchored { index, offset } => {
                let Some(item) = host.item_rect(index) else {
                    let origin = Point::new(reference.x0, reference.y1);
                    let floating =
                        Rect::from_origin_size(origin, (reference.width(), content_height));
                    let fit = fit_size(
                        reference,
                        floating,
                        Side::Below,
                        viewport,
                        config.window_padding,
                    );
                    update.placement = Some(Placement {
                        origin,
                        positioning: Positioning::Fixed,
                        max_height: fit.max_height,
                        width: fit.width,
                    });
                    self.placement = update.placement;
                    return update;
                };
                let anchored = place_anchored(
                    &AnchoredInput {
                        reference,
                        viewport,
                        item,
                        item_count: host.option_count(),
                        content_height,
                        client_top: host.client_top(),
                        offset,
                    },
                    &config.anchored_options(modality),
                );
                self.anchored_overflow = Some(anchored.overflow);
                if !anchored.fits {
                    update.fallback_requested = true;
                }
                let fit = fit_size(
                    reference,
                    anchored.rect,
                    Side::Below,
                    viewport,
                    config.window_padding,
                );
                let max_height = anchored.max_height.min(fit.max_height);
                self.height_cap = Some(max_height);
                update.scroll_top = Some(anchored.scroll_top);
                update.placement = Some(Placement {
                    origin: anchored.rect.origin(),
                    positioning: Positioning::Fixed,
                    max_height,
                    width: fit.width,
                });
            }
            Strategy::Fallback => {
                self.clear_height_cap();
                let fallback = place_fallback(
                    &FallbackInput {
                        reference,
                        viewport,
                        content_height,
                        width: reference.width(),
                    },
                    &config.fallback_options(modality),
                );
                let fit = fit_size(
                    reference,
                    fallback.rect,
                    fallback.side,
                    viewport,
                    config.window_padding,
                );
                update.placement = Some(Placement {
                    origin: fallback.rect.origin(),
                    positioning: Positioning::Fixed,
                    max_height: fit.max_height.min(fallback.max_height),
                    width: fit.width,
                });
            }
        }
        self.placement = update.placement;
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Modality;
    use crate::state::SessionId;

    struct Host {
        reference: Option<Rect>,
        sheet: bool,
        measured: bool,
    }

    impl SelectHost for Host {
        fn option_count(&self) -> usize {
            10
        }
        fn label(&self, _: usize) -> Option<&str> {
            None
        }
        fn item_rect(&self, index: usize) -> Option<Rect> {
            let y = index as f64 * 30.0;
            self.measured.then(|| Rect::new(0.0, y, 160.0, y + 30.0))
        }
        fn content_height(&self) -> f64 {
            300.0
        }
        fn viewport(&self) -> Rect {
            Rect::new(0.0, 0.0, 400.0, 800.0)
        }
        fn reference(&self) -> Option<Rect> {
            self.reference
        }
        fn modality(&self) -> Modality {
            Modality::Precise
        }
        fn render_as_sheet(&self) -> bool {
            self.sheet
        }
    }

    fn open_state(strategy: Strategy) -> SelectionState {
        SelectionState {
            open: true,
            strategy,
            session: SessionId(1),
            ..SelectionState::default()
        }
    }

    fn host(reference: Rect) -> Host {
        Host {
            reference: Some(reference),
            sheet: false,
            measured: true,
        }
    }

    #[test]
    fn closed_state_is_never_placed() {
        let mut engine = PositioningEngine::new();
        engine.invalidate();
        let update = engine.recompute(
            &SelectionState::default(),
            &SelectConfig::default(),
            &host(Rect::new(20.0, 300.0, 180.0, 330.0)),
        );
        assert_eq!(update.placement, None);
        assert_eq!(engine.computations(), 0);
        assert!(!engine.is_pending());
    }

    #[test]
    fn anchored_centres_option_on_trigger() {
        let mut engine = PositioningEngine::new();
        let reference = Rect::new(20.0, 300.0, 180.0, 330.0);
        let update = engine.recompute(
            &open_state(Strategy::anchored(2)),
            &SelectConfig::default(),
            &host(reference),
        );
        let placement = update.placement.unwrap();
        assert!(!update.fallback_requested);
        assert_eq!(placement.positioning, Positioning::Fixed);
        assert_eq!(placement.width, 160.0);
        // Option 2 spans 60..90; its centre lands on the trigger centre.
        assert_eq!(placement.y() + 75.0, 315.0);
        assert_eq!(update.scroll_top, Some(0.0));
        assert_eq!(engine.height_cap(), Some(300.0));
    }

    #[test]
    fn anchored_near_bottom_requests_fallback() {
        let mut engine = PositioningEngine::new();
        let update = engine.recompute(
            &open_state(Strategy::anchored(0)),
            &SelectConfig::default(),
            &host(Rect::new(20.0, 760.0, 180.0, 790.0)),
        );
        assert!(update.fallback_requested);
    }

    #[test]
    fn fallback_clears_height_cap() {
        let mut engine = PositioningEngine::new();
        let reference = Rect::new(20.0, 300.0, 180.0, 330.0);
        let config = SelectConfig::default();
        engine.recompute(&open_state(Strategy::anchored(2)), &config, &host(reference));
        assert!(engine.height_cap().is_some());
        let update = engine.recompute(&open_state(Strategy::Fallback), &config, &host(reference));
        assert_eq!(engine.height_cap(), None);
        assert_eq!(engine.anchored_overflow(), None);
        let placement = update.placement.unwrap();
        assert_eq!(placement.y(), 335.0);
        assert_eq!(placement.max_height, 792.0 - 335.0);
    }

    #[test]
    fn sheet_and_unmeasured_trigger_are_not_placed() {
        let mut engine = PositioningEngine::new();
        let config = SelectConfig::default();
        let state = open_state(Strategy::anchored(0));
        let mut h = host(Rect::new(20.0, 300.0, 180.0, 330.0));
        h.sheet = true;
        assert_eq!(engine.recompute(&state, &config, &h).placement, None);
        h.sheet = false;
        h.reference = None;
        assert_eq!(engine.recompute(&state, &config, &h).placement, None);
        assert_eq!(engine.placement(), None);
        assert!(engine.is_pending());

        h.reference = Some(Rect::new(20.0, 300.0, 180.0, 330.0));
        assert!(engine.recompute(&state, &config, &h).placement.is_some());
        assert!(!engine.is_pending());
    }

    #[test]
    fn unmeasured_option_places_below_trigger() {
        let mut engine = PositioningEngine::new();
        let mut h = host(Rect::new(20.0, 300.0, 180.0, 330.0));
        h.measured = false;
        let update = engine.recompute(
            &open_state(Strategy::anchored(0)),
            &SelectConfig::default(),
            &h,
        );
        let placement = update.placement.unwrap();
        assert!(!update.fallback_requested);
        assert_eq!(placement.origin, Point::new(20.0, 330.0));
        assert_eq!(placement.max_height, 792.0 - 330.0);
    }
}
