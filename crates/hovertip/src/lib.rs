#![forbid(unsafe_code)]

//! hovertip public facade.
//!
//! Re-exports the commonly used types from the internal crates, hosts
//! the process-wide global configuration, and provides the directive
//! surface for attaching tooltips to arbitrary host elements.

use std::fmt;
use std::sync::{Arc, OnceLock};

pub mod directive;

// --- Core re-exports -------------------------------------------------------

pub use hovertip_core::config::{
    ConfigResolver, ConfigStore, DarkMode, PartialConfig, TooltipConfig, Trigger,
};
pub use hovertip_core::geometry::{Rect, Size, Viewport};
pub use hovertip_core::placement::{
    ARROW_INSET, EDGE_MARGIN, Placement, PlacementRequest, Position, Side, compute_placement,
};

// --- Host re-exports -------------------------------------------------------

pub use hovertip_host::{
    ARIA_DESCRIBEDBY, ARIA_EXPANDED, ElementHandle, HostWindow, InteractionEvent, Listener,
    WindowEvent,
};

#[cfg(feature = "test-helpers")]
pub use hovertip_host::fake::{FakeElement, FakeWindow};

// --- Runtime re-exports ----------------------------------------------------

pub use hovertip_runtime::{
    Action, Effect, Phase, TooltipController, Transition, TriggerBinding, VisibilityController,
};

pub use directive::{DirectiveRegistry, DirectiveValue, Modifiers};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hovertip APIs.
#[derive(Debug)]
pub enum Error {
    /// The host integration reported a failure (teardown, mounting).
    Host(String),
    /// A directive modifier name was not recognized.
    UnknownModifier(String),
    /// An operation hit a controller that was already disposed.
    Disposed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(msg) => write!(f, "host error: {msg}"),
            Self::UnknownModifier(name) => write!(f, "unknown tooltip modifier: {name}"),
            Self::Disposed => write!(f, "tooltip instance already disposed"),
        }
    }
}

impl std::error::Error for Error {}

/// Standard result type for hovertip APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Global configuration --------------------------------------------------

static GLOBAL_CONFIG: OnceLock<Arc<ConfigStore>> = OnceLock::new();

/// The process-wide configuration store shared by all tooltips that were
/// not given their own store.
///
/// Tests should prefer injecting a fresh [`ConfigStore`] per case; this
/// accessor exists for production wiring where one store per process is
/// the point.
pub fn global_config() -> Arc<ConfigStore> {
    Arc::clone(GLOBAL_CONFIG.get_or_init(|| Arc::new(ConfigStore::new())))
}

/// Replace the global configuration wholesale.
///
/// Keys omitted from `config` revert to unset — repeated calls never
/// merge.
pub fn set_global_config(config: PartialConfig) {
    global_config().set(config);
}

/// A copy of the current global configuration.
pub fn get_global_config() -> PartialConfig {
    global_config().get()
}

/// Clear the global configuration back to empty.
pub fn reset_global_config() {
    global_config().reset();
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ConfigStore, DirectiveRegistry, DirectiveValue, Effect, ElementHandle, Error,
        InteractionEvent, Modifiers, PartialConfig, Placement, Position, Result, Side, Size,
        TooltipConfig, TooltipController, Trigger, Viewport, WindowEvent,
    };

    pub use crate::{core, host, runtime};
}

pub use hovertip_core as core;
pub use hovertip_host as host;
pub use hovertip_runtime as runtime;
