#![forbid(unsafe_code)]

//! Stateful tooltip machinery: the debounced visibility controller, the
//! trigger binding (listeners + ARIA), and the per-instance controller
//! that orchestrates configuration, timing, and measurement.
//!
//! Everything is driven by the host's event loop — events and `now`
//! instants flow in, effects and deadlines flow out. Nothing here
//! registers callbacks or spawns threads.

pub mod binder;
pub mod controller;
pub mod visibility;

pub use binder::{Action, TriggerBinding};
pub use controller::{Effect, TooltipController};
pub use visibility::{Phase, Transition, VisibilityController};
