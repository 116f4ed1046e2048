// SPDX-License-Identifier: MIT

//! Trigger binding: listener wiring, event interpretation, and ARIA
//! sync for one trigger element.
//!
//! A [`TriggerBinding`] owns at most one bound element at a time.
//! Rebinding fully detaches listeners and ARIA state from the old
//! element before touching the new one, so dynamic-target hosts never
//! leak listeners. Events are interpreted into [`Action`]s; applying
//! them (delays, disabled handling) is the controller's job.

#![forbid(unsafe_code)]

use hovertip_core::config::Trigger;
use hovertip_host::{
    ARIA_DESCRIBEDBY, ARIA_EXPANDED, ElementHandle, InteractionEvent, Listener, WindowEvent,
};

/// What an interaction means for the visibility machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Request a (delayed) show.
    Show,
    /// Request a (delayed) hide.
    Hide,
    /// Toggle between show and hide.
    Toggle,
    /// Recompute placement after layout settles.
    Reposition,
}

/// Listeners and ARIA state attached to one trigger element.
#[derive(Debug)]
pub struct TriggerBinding<E: ElementHandle> {
    trigger: Option<E>,
    kind: Trigger,
    tooltip_id: String,
}

impl<E: ElementHandle> TriggerBinding<E> {
    /// Create an unbound binding for a tooltip with the given id.
    pub fn new(tooltip_id: impl Into<String>, kind: Trigger) -> Self {
        Self {
            trigger: None,
            kind,
            tooltip_id: tooltip_id.into(),
        }
    }

    /// The bound trigger element, if any.
    pub fn trigger(&self) -> Option<&E> {
        self.trigger.as_ref()
    }

    /// The trigger behavior currently wired.
    pub fn kind(&self) -> Trigger {
        self.kind
    }

    /// The tooltip id used for `aria-describedby`.
    pub fn tooltip_id(&self) -> &str {
        &self.tooltip_id
    }

    /// Bind to an element, detaching from any previous one first.
    ///
    /// The old element loses its listeners and ARIA attributes before
    /// the new one gains anything.
    pub fn bind(&mut self, element: E) {
        if let Some(old) = &self.trigger {
            if old.ptr_eq(&element) {
                return;
            }
        }
        self.unbind();
        element.add_listeners(Listener::for_trigger(self.kind));
        self.trigger = Some(element);
    }

    /// Detach listeners and ARIA attributes from the bound element.
    pub fn unbind(&mut self) {
        if let Some(element) = self.trigger.take() {
            element.remove_listeners(Listener::for_trigger(self.kind));
            element.remove_attribute(ARIA_DESCRIBEDBY);
            element.remove_attribute(ARIA_EXPANDED);
        }
    }

    /// Swap the trigger behavior, rewiring listeners in place.
    pub fn set_kind(&mut self, kind: Trigger) {
        if kind == self.kind {
            return;
        }
        if let Some(element) = &self.trigger {
            element.remove_listeners(Listener::for_trigger(self.kind));
            element.add_listeners(Listener::for_trigger(kind));
            // A non-click trigger must not keep a stale aria-expanded.
            if kind != Trigger::Click {
                element.remove_attribute(ARIA_EXPANDED);
            }
        }
        self.kind = kind;
    }

    /// Interpret an element-level event under the current trigger type.
    pub fn interpret(&self, event: InteractionEvent, visible: bool) -> Option<Action> {
        match event {
            InteractionEvent::PointerEnter
                if matches!(self.kind, Trigger::Hover | Trigger::Both) =>
            {
                Some(Action::Show)
            }
            InteractionEvent::PointerLeave
                if matches!(self.kind, Trigger::Hover | Trigger::Both) =>
            {
                Some(Action::Hide)
            }
            InteractionEvent::FocusIn if matches!(self.kind, Trigger::Focus | Trigger::Both) => {
                Some(Action::Show)
            }
            InteractionEvent::FocusOut if matches!(self.kind, Trigger::Focus | Trigger::Both) => {
                Some(Action::Hide)
            }
            InteractionEvent::Click if self.kind == Trigger::Click => Some(Action::Toggle),
            InteractionEvent::Escape if visible => Some(Action::Hide),
            _ => None,
        }
    }

    /// Interpret a window/document-level event.
    ///
    /// `tooltip_surface` is the rendered tooltip element, used for the
    /// outside-click containment test; a click whose target cannot be
    /// resolved counts as outside.
    pub fn interpret_window(
        &self,
        event: &WindowEvent<E>,
        visible: bool,
        tooltip_surface: Option<&E>,
    ) -> Option<Action> {
        match event {
            WindowEvent::Resize if visible => Some(Action::Reposition),
            WindowEvent::Scroll if visible && self.kind != Trigger::Click => Some(Action::Hide),
            WindowEvent::DocumentClick { target }
                if visible && self.kind == Trigger::Click =>
            {
                let inside = target.as_ref().is_some_and(|t| {
                    self.trigger.as_ref().is_some_and(|el| el.contains(t))
                        || tooltip_surface.is_some_and(|el| el.contains(t))
                });
                if inside { None } else { Some(Action::Hide) }
            }
            _ => None,
        }
    }

    /// Mirror visibility into ARIA attributes on the trigger.
    ///
    /// While visible the trigger is described by the tooltip; click
    /// triggers additionally expose `aria-expanded`.
    pub fn sync_aria(&self, visible: bool) {
        let Some(element) = &self.trigger else {
            return;
        };
        if visible {
            element.set_attribute(ARIA_DESCRIBEDBY, &self.tooltip_id);
        } else {
            element.remove_attribute(ARIA_DESCRIBEDBY);
        }
        if self.kind == Trigger::Click {
            element.set_attribute(ARIA_EXPANDED, if visible { "true" } else { "false" });
        } else {
            element.remove_attribute(ARIA_EXPANDED);
        }
    }
}

impl<E: ElementHandle> Drop for TriggerBinding<E> {
    fn drop(&mut self) {
        self.unbind();
    }
}
