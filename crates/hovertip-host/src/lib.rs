#![forbid(unsafe_code)]

//! Host abstraction seam for hovertip.
//!
//! The tooltip machinery never talks to a concrete UI host. Instead it
//! goes through two small traits — [`ElementHandle`] for per-element
//! measurement, attributes, and listener bookkeeping, and [`HostWindow`]
//! for viewport metrics — and receives interactions as plain
//! [`InteractionEvent`]/[`WindowEvent`] values pushed in by the host's
//! event loop.
//!
//! A deterministic in-memory implementation lives in [`fake`] behind the
//! `test-helpers` feature.

pub mod events;
#[cfg(feature = "test-helpers")]
pub mod fake;

pub use events::{InteractionEvent, WindowEvent};

use bitflags::bitflags;

use hovertip_core::config::Trigger;
use hovertip_core::geometry::{Rect, Viewport};

/// Attribute name the binder sets while the tooltip is visible.
pub const ARIA_DESCRIBEDBY: &str = "aria-describedby";

/// Attribute name mirroring visibility for click-triggered tooltips.
pub const ARIA_EXPANDED: &str = "aria-expanded";

bitflags! {
    /// The set of listeners a binding keeps attached to its trigger.
    ///
    /// Real hosts map each flag to an actual listener registration
    /// (`addEventListener`-style); the flags exist so bindings can prove
    /// attach/detach symmetry and tests can assert nothing leaked.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Listener: u8 {
        const POINTER_ENTER = 1 << 0;
        const POINTER_LEAVE = 1 << 1;
        const FOCUS_IN = 1 << 2;
        const FOCUS_OUT = 1 << 3;
        const CLICK = 1 << 4;
        const KEY_DOWN = 1 << 5;
    }
}

impl Listener {
    /// The listener set a trigger type needs.
    ///
    /// Keyboard is always wired so Escape can dismiss a visible tooltip
    /// regardless of how it was opened.
    pub fn for_trigger(trigger: Trigger) -> Self {
        let hover = Self::POINTER_ENTER | Self::POINTER_LEAVE;
        let focus = Self::FOCUS_IN | Self::FOCUS_OUT;
        let base = match trigger {
            Trigger::Hover => hover,
            Trigger::Focus => focus,
            Trigger::Both => hover | focus,
            Trigger::Click => Self::CLICK,
        };
        base | Self::KEY_DOWN
    }
}

/// A handle to a host element (trigger or tooltip surface).
///
/// Handles are cheap clones of the same underlying element; identity is
/// tested with [`ptr_eq`](Self::ptr_eq), not `PartialEq`.
pub trait ElementHandle: Clone {
    /// Viewport-relative bounding rectangle.
    fn rect(&self) -> Rect;

    /// Set an attribute on the element.
    fn set_attribute(&self, name: &str, value: &str);

    /// Remove an attribute from the element.
    fn remove_attribute(&self, name: &str);

    /// Whether `other` is this element or inside its subtree.
    fn contains(&self, other: &Self) -> bool;

    /// Whether two handles refer to the same element.
    fn ptr_eq(&self, other: &Self) -> bool;

    /// Record a listener registration on the element.
    fn add_listeners(&self, listeners: Listener);

    /// Remove a previously recorded listener registration.
    fn remove_listeners(&self, listeners: Listener);
}

/// Viewport metrics provider.
pub trait HostWindow {
    /// Current visible size and scroll offsets.
    fn viewport(&self) -> Viewport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_trigger_listener_set() {
        let set = Listener::for_trigger(Trigger::Hover);
        assert!(set.contains(Listener::POINTER_ENTER | Listener::POINTER_LEAVE));
        assert!(set.contains(Listener::KEY_DOWN));
        assert!(!set.contains(Listener::FOCUS_IN));
        assert!(!set.contains(Listener::CLICK));
    }

    #[test]
    fn both_trigger_is_union_of_hover_and_focus() {
        let both = Listener::for_trigger(Trigger::Both);
        assert_eq!(
            both,
            Listener::for_trigger(Trigger::Hover) | Listener::for_trigger(Trigger::Focus)
        );
    }

    #[test]
    fn click_trigger_still_listens_for_keys() {
        let set = Listener::for_trigger(Trigger::Click);
        assert_eq!(set, Listener::CLICK | Listener::KEY_DOWN);
    }
}
