//! Property-based invariant tests for the placement engine.
//!
//! These verify structural invariants of `compute_placement`:
//!
//! 1. The tooltip box never violates the viewport edge margin
//! 2. The arrow offset stays inside the tooltip box inset bounds
//! 3. An explicit cardinal position is always honored
//! 4. Auto placement returns the first preferred side with room
//! 5. Determinism: equal requests yield equal placements

use hovertip_core::geometry::{Rect, Size, Viewport};
use hovertip_core::placement::{
    ARROW_INSET, EDGE_MARGIN, PlacementRequest, Position, compute_placement,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (300.0f64..2000.0, 300.0f64..1500.0, 0.0f64..5000.0, 0.0f64..5000.0)
        .prop_map(|(w, h, sx, sy)| Viewport::new(w, h).scrolled(sx, sy))
}

/// Trigger somewhere inside a 300x300 safe core of the viewport so that
/// every strategy-produced rect is on-screen.
fn trigger_strategy() -> impl Strategy<Value = Rect> {
    (0.0f64..280.0, 0.0f64..280.0, 1.0f64..20.0, 1.0f64..20.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn tooltip_strategy() -> impl Strategy<Value = Size> {
    (30.0f64..260.0, 20.0f64..200.0).prop_map(|(w, h)| Size::new(w, h))
}

fn position_strategy() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::Top),
        Just(Position::Bottom),
        Just(Position::Left),
        Just(Position::Right),
        Just(Position::Auto),
    ]
}

fn request_strategy() -> impl Strategy<Value = PlacementRequest> {
    (
        trigger_strategy(),
        tooltip_strategy(),
        viewport_strategy(),
        position_strategy(),
        0.0f64..24.0,
    )
        .prop_map(|(trigger, tooltip, viewport, position, offset)| PlacementRequest {
            trigger,
            tooltip,
            viewport,
            position,
            offset,
        })
}

proptest! {
    #[test]
    fn tooltip_box_respects_viewport_margin(req in request_strategy()) {
        let placement = compute_placement(&req).expect("non-degenerate request");
        let vp = req.viewport;

        prop_assert!(placement.left >= vp.page_left() + EDGE_MARGIN - 1e-9);
        prop_assert!(
            placement.left + req.tooltip.width <= vp.page_right() - EDGE_MARGIN + 1e-9,
            "left={} width={} page_right={}",
            placement.left,
            req.tooltip.width,
            vp.page_right(),
        );
        prop_assert!(placement.top >= vp.page_top() + EDGE_MARGIN - 1e-9);
        prop_assert!(placement.top + req.tooltip.height <= vp.page_bottom() - EDGE_MARGIN + 1e-9);
    }

    #[test]
    fn arrow_stays_inside_tooltip_box(req in request_strategy()) {
        let placement = compute_placement(&req).expect("non-degenerate request");
        let extent = if placement.side.is_vertical() {
            req.tooltip.width
        } else {
            req.tooltip.height
        };
        prop_assert!(placement.arrow_offset >= ARROW_INSET - 1e-9);
        // When the extent is too small for both insets the lower bound wins.
        let upper = (extent - ARROW_INSET).max(ARROW_INSET);
        prop_assert!(placement.arrow_offset <= upper + 1e-9);
    }

    #[test]
    fn explicit_side_is_honored(
        trigger in trigger_strategy(),
        tooltip in tooltip_strategy(),
        viewport in viewport_strategy(),
        offset in 0.0f64..24.0,
    ) {
        for position in [Position::Top, Position::Bottom, Position::Left, Position::Right] {
            let req = PlacementRequest { trigger, tooltip, viewport, position, offset };
            let placement = compute_placement(&req).expect("non-degenerate request");
            prop_assert_eq!(Position::from(placement.side), position);
        }
    }

    #[test]
    fn auto_picks_first_preferred_side_with_room(req in request_strategy()) {
        let req = PlacementRequest { position: Position::Auto, ..req };
        let placement = compute_placement(&req).expect("non-degenerate request");

        let space_above = req.trigger.top();
        let space_below = req.viewport.height - req.trigger.bottom();
        let space_right = req.viewport.width - req.trigger.right();
        let needed_v = req.tooltip.height + req.offset;
        let needed_h = req.tooltip.width + req.offset;

        if space_below >= needed_v {
            prop_assert_eq!(placement.side, hovertip_core::Side::Bottom);
        } else if space_above >= needed_v {
            prop_assert_eq!(placement.side, hovertip_core::Side::Top);
        } else if space_right >= needed_h {
            prop_assert_eq!(placement.side, hovertip_core::Side::Right);
        }
    }

    #[test]
    fn placement_is_deterministic(req in request_strategy()) {
        prop_assert_eq!(compute_placement(&req), compute_placement(&req));
    }
}
