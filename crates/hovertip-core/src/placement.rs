// SPDX-License-Identifier: MIT

//! Viewport-aware tooltip placement.
//!
//! [`compute_placement`] turns live measurements (trigger rectangle,
//! tooltip size, viewport metrics) into page coordinates for the tooltip
//! box and its arrow. It handles:
//!
//! - **Auto-detection**: when the desired position is [`Position::Auto`],
//!   the first of below, above, right, left with enough free space wins;
//!   if none fits, whichever of below/above has more room (tie goes
//!   below).
//! - **Clamping**: both axes are kept inside the viewport with an
//!   [`EDGE_MARGIN`] page-edge margin; clamping shifts coordinates but
//!   never flips the chosen side.
//! - **Arrow tracking**: the arrow keeps pointing at the trigger center
//!   after clamping, itself clamped to stay [`ARROW_INSET`] away from the
//!   tooltip's corners.
//!
//! The function is pure and deterministic; callers recompute on every
//! trigger/viewport change rather than patching previous results.

#![forbid(unsafe_code)]

use crate::geometry::{Rect, Size, Viewport};

/// Margin kept between the tooltip and the viewport edge, in pixels.
pub const EDGE_MARGIN: f64 = 8.0;

/// Minimum distance between the arrow and the tooltip's corners, in
/// pixels. Keeps the arrow clear of rounded corners when the tooltip
/// has been clamped far from its ideal spot.
pub const ARROW_INSET: f64 = 12.0;

/// Desired tooltip position relative to the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// Above the trigger.
    Top,
    /// Below the trigger.
    Bottom,
    /// To the left of the trigger.
    Left,
    /// To the right of the trigger.
    Right,
    /// Pick the best side based on available space.
    #[default]
    Auto,
}

impl Position {
    /// The concrete side this position names, or `None` for auto.
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Top => Some(Side::Top),
            Self::Bottom => Some(Side::Bottom),
            Self::Left => Some(Side::Left),
            Self::Right => Some(Side::Right),
            Self::Auto => None,
        }
    }
}

/// The side of the trigger a tooltip actually ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Whether the placement axis is vertical (above/below the trigger).
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl From<Side> for Position {
    fn from(side: Side) -> Self {
        match side {
            Side::Top => Self::Top,
            Side::Bottom => Self::Bottom,
            Side::Left => Self::Left,
            Side::Right => Self::Right,
        }
    }
}

/// Inputs for one placement calculation.
///
/// Immutable per calculation; build a fresh request from live
/// measurements whenever the trigger or viewport changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Trigger bounding rectangle, viewport-relative.
    pub trigger: Rect,
    /// Measured tooltip size.
    pub tooltip: Size,
    /// Viewport metrics including scroll offsets.
    pub viewport: Viewport,
    /// Desired position.
    pub position: Position,
    /// Gap between trigger and tooltip along the placement axis, in pixels.
    pub offset: f64,
}

/// The outcome of one placement calculation, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// The side the tooltip was actually placed on.
    pub side: Side,
    /// Page-coordinate top of the tooltip box, after clamping.
    pub top: f64,
    /// Page-coordinate left of the tooltip box, after clamping.
    pub left: f64,
    /// Arrow distance from the tooltip's leading edge along the cross
    /// axis (left edge for vertical placements, top edge for horizontal
    /// ones).
    pub arrow_offset: f64,
}

/// Compute where the tooltip should go.
///
/// Returns `None` when the trigger or tooltip has a collapsed dimension
/// (not yet attached or not yet laid out); callers keep whatever
/// placement they had rather than treating that as an error.
pub fn compute_placement(req: &PlacementRequest) -> Option<Placement> {
    if req.trigger.is_empty() || req.tooltip.is_empty() {
        return None;
    }

    let side = match req.position.side() {
        Some(side) => side,
        None => detect_best_side(req),
    };

    let (ideal_top, ideal_left) = ideal_anchor(side, req);
    let (top, left) = clamp_to_viewport(ideal_top, ideal_left, req);
    let arrow_offset = arrow_offset(side, left, top, req);

    Some(Placement {
        side,
        top,
        left,
        arrow_offset,
    })
}

/// Pick the best side for an auto-positioned tooltip.
///
/// Preference order: bottom, top, right, left — the first side whose
/// free space covers the tooltip extent plus the offset. When nothing
/// fits, fall back to whichever of below/above has more room, with ties
/// going below.
fn detect_best_side(req: &PlacementRequest) -> Side {
    let space_above = req.trigger.top();
    let space_below = req.viewport.height - req.trigger.bottom();
    let space_left = req.trigger.left();
    let space_right = req.viewport.width - req.trigger.right();

    let needed_vertical = req.tooltip.height + req.offset;
    let needed_horizontal = req.tooltip.width + req.offset;

    if space_below >= needed_vertical {
        Side::Bottom
    } else if space_above >= needed_vertical {
        Side::Top
    } else if space_right >= needed_horizontal {
        Side::Right
    } else if space_left >= needed_horizontal {
        Side::Left
    } else if space_below >= space_above {
        Side::Bottom
    } else {
        Side::Top
    }
}

/// Ideal (unclamped) anchor for the chosen side, in page coordinates:
/// centered on the trigger's cross axis, pushed out by the offset along
/// the placement axis.
fn ideal_anchor(side: Side, req: &PlacementRequest) -> (f64, f64) {
    let trigger_top = req.trigger.top() + req.viewport.scroll_y;
    let trigger_bottom = req.trigger.bottom() + req.viewport.scroll_y;
    let trigger_left = req.trigger.left() + req.viewport.scroll_x;
    let trigger_right = req.trigger.right() + req.viewport.scroll_x;
    let center_x = req.trigger.center_x() + req.viewport.scroll_x;
    let center_y = req.trigger.center_y() + req.viewport.scroll_y;

    match side {
        Side::Top => (
            trigger_top - req.tooltip.height - req.offset,
            center_x - req.tooltip.width / 2.0,
        ),
        Side::Bottom => (trigger_bottom + req.offset, center_x - req.tooltip.width / 2.0),
        Side::Left => (
            center_y - req.tooltip.height / 2.0,
            trigger_left - req.tooltip.width - req.offset,
        ),
        Side::Right => (center_y - req.tooltip.height / 2.0, trigger_right + req.offset),
    }
}

/// Clamp both axes into the viewport with the page-edge margin.
///
/// The lower bound wins when the viewport is too small to honor both
/// bounds, so coordinates never go further off-page than the margin.
fn clamp_to_viewport(top: f64, left: f64, req: &PlacementRequest) -> (f64, f64) {
    let min_left = req.viewport.page_left() + EDGE_MARGIN;
    let max_left = req.viewport.page_right() - req.tooltip.width - EDGE_MARGIN;
    let min_top = req.viewport.page_top() + EDGE_MARGIN;
    let max_top = req.viewport.page_bottom() - req.tooltip.height - EDGE_MARGIN;

    (min_top.max(top.min(max_top)), min_left.max(left.min(max_left)))
}

/// Arrow offset relative to the tooltip's clamped edge so the arrow
/// still points at the trigger center, kept inside
/// `[ARROW_INSET, extent - ARROW_INSET]` of the tooltip box.
fn arrow_offset(side: Side, clamped_left: f64, clamped_top: f64, req: &PlacementRequest) -> f64 {
    if side.is_vertical() {
        let trigger_center = req.trigger.center_x() + req.viewport.scroll_x;
        let raw = trigger_center - clamped_left;
        raw.min(req.tooltip.width - ARROW_INSET).max(ARROW_INSET)
    } else {
        let trigger_center = req.trigger.center_y() + req.viewport.scroll_y;
        let raw = trigger_center - clamped_top;
        raw.min(req.tooltip.height - ARROW_INSET).max(ARROW_INSET)
    }
}
