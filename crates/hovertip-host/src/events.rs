#![forbid(unsafe_code)]

//! Interaction events the host pushes into the tooltip machinery.
//!
//! The host event loop translates its native events (DOM events, winit
//! events, terminal input) into these and feeds them to the runtime;
//! the runtime never registers callbacks with the host.

/// An event observed on the trigger element itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// Pointer entered the trigger.
    PointerEnter,
    /// Pointer left the trigger.
    PointerLeave,
    /// Trigger (or a descendant) gained focus.
    FocusIn,
    /// Trigger (or a descendant) lost focus.
    FocusOut,
    /// Trigger was clicked.
    Click,
    /// Escape pressed while the trigger had key focus.
    Escape,
}

/// An event observed at the window/document level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent<E> {
    /// The window was resized; layout must settle before re-measuring.
    Resize,
    /// Any ancestor scrolled (capture phase).
    Scroll,
    /// A click landed somewhere in the document. `None` means the
    /// target could not be resolved and counts as outside everything.
    DocumentClick { target: Option<E> },
}
