#![forbid(unsafe_code)]

//! Core types for hovertip: pixel geometry, the viewport-aware
//! placement engine, and configuration resolution.
//!
//! Everything here is host-agnostic and side-effect free; the stateful
//! machinery lives in `hovertip-runtime` and host wiring in
//! `hovertip-host`.

pub mod config;
pub mod geometry;
pub mod placement;

pub use config::{ConfigResolver, ConfigStore, DarkMode, PartialConfig, TooltipConfig, Trigger};
pub use geometry::{Rect, Size, Viewport};
pub use placement::{
    ARROW_INSET, EDGE_MARGIN, Placement, PlacementRequest, Position, Side, compute_placement,
};
