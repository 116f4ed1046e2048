// SPDX-License-Identifier: MIT

//! Orchestration for one tooltip instance.
//!
//! [`TooltipController`] ties the pieces together: the configuration
//! resolver feeds delays and the disabled flag into the visibility
//! machine, interactions are routed through the trigger binding, and
//! visibility changes drive ARIA sync plus a measure-after-frame
//! handshake with the host.
//!
//! # Host contract
//!
//! The host event loop:
//!
//! 1. translates its native events into
//!    [`handle_interaction`](TooltipController::handle_interaction) /
//!    [`handle_window_event`](TooltipController::handle_window_event)
//!    calls;
//! 2. calls [`poll`](TooltipController::poll) when
//!    [`next_deadline`](TooltipController::next_deadline) passes;
//! 3. on [`Effect::ShownAwaitingFrame`], commits the render, waits one
//!    frame so layout settles, then calls
//!    [`measure`](TooltipController::measure) with the tooltip's size
//!    and the live viewport;
//! 4. applies [`placement`](TooltipController::placement) to the
//!    tooltip surface.
//!
//! [`dispose`](TooltipController::dispose) cancels any pending deadline
//! and unbinds unconditionally; nothing fires afterwards.

#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use web_time::Instant;

use hovertip_core::config::{ConfigResolver, ConfigStore, PartialConfig, TooltipConfig};
use hovertip_core::geometry::{Size, Viewport};
use hovertip_core::placement::{Placement, PlacementRequest, compute_placement};
use hovertip_host::{ElementHandle, InteractionEvent, WindowEvent};

use crate::binder::{Action, TriggerBinding};
use crate::visibility::{Transition, VisibilityController};

static NEXT_TOOLTIP_ID: AtomicU64 = AtomicU64::new(1);

fn allocate_tooltip_id() -> String {
    let n = NEXT_TOOLTIP_ID.fetch_add(1, Ordering::Relaxed);
    format!("hovertip-{n}")
}

/// What the host must do after a [`poll`](TooltipController::poll).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The tooltip became visible. Render it, wait one frame, then call
    /// [`measure`](TooltipController::measure).
    ShownAwaitingFrame,
    /// The tooltip became hidden; ARIA state was already cleared.
    Hidden,
}

/// One tooltip instance: configuration, visibility, binding, placement.
#[derive(Debug)]
pub struct TooltipController<E: ElementHandle> {
    resolver: ConfigResolver,
    visibility: VisibilityController,
    binding: TriggerBinding<E>,
    tooltip_surface: Option<E>,
    content: Option<String>,
    placement: Option<Placement>,
    awaiting_measure: bool,
    disposed: bool,
}

impl<E: ElementHandle> TooltipController<E> {
    /// Create a controller with the given explicit overrides, reading
    /// everything else from the shared store.
    pub fn new(explicit: PartialConfig, store: Arc<ConfigStore>) -> Self {
        Self::with_resolver(ConfigResolver::new(explicit, store))
    }

    /// Create a controller around a prepared resolver (the directive
    /// passes one carrying its own defaults table).
    pub fn with_resolver(resolver: ConfigResolver) -> Self {
        let kind = resolver.trigger();
        Self {
            resolver,
            visibility: VisibilityController::new(),
            binding: TriggerBinding::new(allocate_tooltip_id(), kind),
            tooltip_surface: None,
            content: None,
            placement: None,
            awaiting_measure: false,
            disposed: false,
        }
    }

    /// The id the tooltip surface must carry for `aria-describedby`.
    pub fn tooltip_id(&self) -> &str {
        self.binding.tooltip_id()
    }

    /// Plain-text content, if any (rich content stays host-side).
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Set the plain-text content.
    pub fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }

    /// Bind (or rebind) the trigger element.
    pub fn attach_trigger(&mut self, element: E) {
        self.binding.bind(element);
        self.binding.sync_aria(self.visibility.is_visible());
    }

    /// Tell the controller which element renders the tooltip surface,
    /// for the outside-click containment test.
    pub fn set_tooltip_surface(&mut self, element: Option<E>) {
        self.tooltip_surface = element;
    }

    /// Replace the instance's explicit overrides.
    pub fn set_explicit_config(&mut self, explicit: PartialConfig) {
        self.resolver.set_explicit(explicit);
        self.refresh_from_config();
    }

    /// The full effective configuration as of this read.
    pub fn effective_config(&self) -> TooltipConfig {
        self.resolver.resolve()
    }

    /// Whether the tooltip is currently visible.
    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// The last computed placement, if any.
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Whether the host owes the controller a post-frame [`measure`](Self::measure).
    pub fn awaiting_measure(&self) -> bool {
        self.awaiting_measure
    }

    /// When the host next needs to [`poll`](Self::poll), if ever.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.disposed {
            None
        } else {
            self.visibility.next_deadline()
        }
    }

    /// Route an element-level interaction.
    pub fn handle_interaction(&mut self, event: InteractionEvent, now: Instant) {
        if self.disposed {
            return;
        }
        self.refresh_from_config();
        if let Some(action) = self.binding.interpret(event, self.visibility.is_visible()) {
            self.apply(action, now);
        }
    }

    /// Route a window/document-level event.
    pub fn handle_window_event(&mut self, event: &WindowEvent<E>, now: Instant) {
        if self.disposed {
            return;
        }
        self.refresh_from_config();
        let action = self.binding.interpret_window(
            event,
            self.visibility.is_visible(),
            self.tooltip_surface.as_ref(),
        );
        if let Some(action) = action {
            self.apply(action, now);
        }
    }

    /// Fire a due deadline and report what the host must do next.
    pub fn poll(&mut self, now: Instant) -> Option<Effect> {
        if self.disposed {
            return None;
        }
        match self.visibility.poll(now)? {
            Transition::Shown => {
                self.awaiting_measure = true;
                self.binding.sync_aria(true);
                Some(Effect::ShownAwaitingFrame)
            }
            Transition::Hidden => {
                self.binding.sync_aria(false);
                Some(Effect::Hidden)
            }
        }
    }

    /// Recompute placement from live measurements.
    ///
    /// Reads the trigger rectangle from the bound element. A collapsed
    /// measurement keeps the previous placement rather than erroring.
    /// Also used on resize, after the host's one-frame wait.
    pub fn measure(&mut self, tooltip: Size, viewport: Viewport) -> Option<&Placement> {
        let trigger = self.binding.trigger()?.rect();
        let request = PlacementRequest {
            trigger,
            tooltip,
            viewport,
            position: self.resolver.position(),
            offset: self.resolver.offset(),
        };
        if let Some(placement) = compute_placement(&request) {
            tracing::trace!(side = ?placement.side, "placement updated");
            self.placement = Some(placement);
            self.awaiting_measure = false;
        }
        self.placement.as_ref()
    }

    /// Show immediately, bypassing delays (programmatic control).
    pub fn show_now(&mut self) -> Option<Effect> {
        if self.disposed {
            return None;
        }
        self.visibility.cancel_pending();
        if self.visibility.show_immediate() {
            self.awaiting_measure = true;
            self.binding.sync_aria(true);
            Some(Effect::ShownAwaitingFrame)
        } else {
            None
        }
    }

    /// Hide immediately, bypassing delays (programmatic control).
    pub fn hide_now(&mut self) -> Option<Effect> {
        if self.disposed {
            return None;
        }
        self.visibility.cancel_pending();
        if self.visibility.hide_immediate() {
            self.binding.sync_aria(false);
            Some(Effect::Hidden)
        } else {
            None
        }
    }

    /// Tear down: cancel any pending deadline and unbind the trigger.
    ///
    /// Idempotent; no deadline fires and no event is routed afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.visibility.cancel_pending();
        self.binding.unbind();
        tracing::debug!(tooltip_id = %self.binding.tooltip_id(), "tooltip disposed");
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Pull the latest disabled flag and trigger kind out of the
    /// resolver; both are reactive to global-config writes.
    fn refresh_from_config(&mut self) {
        self.visibility.set_disabled(self.resolver.disabled());
        let kind = self.resolver.trigger();
        if kind != self.binding.kind() {
            self.binding.set_kind(kind);
            self.binding.sync_aria(self.visibility.is_visible());
        }
    }

    fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Show => self.visibility.show(now, self.resolver.show_delay()),
            Action::Hide => self.visibility.hide(now, self.resolver.hide_delay()),
            Action::Toggle => self.visibility.toggle(
                now,
                self.resolver.show_delay(),
                self.resolver.hide_delay(),
            ),
            Action::Reposition => {
                // Placement is stale after a resize; the host re-measures
                // once layout has settled.
                self.awaiting_measure = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use hovertip_core::config::Trigger;
    use hovertip_core::geometry::Rect;
    use hovertip_core::placement::Side;
    use hovertip_host::fake::FakeElement;

    const MS: Duration = Duration::from_millis(1);

    fn controller(explicit: PartialConfig) -> (TooltipController<FakeElement>, FakeElement) {
        let store = Arc::new(ConfigStore::new());
        let mut ctl = TooltipController::new(explicit, store);
        let trigger = FakeElement::new(Rect::new(390.0, 290.0, 20.0, 20.0));
        ctl.attach_trigger(trigger.clone());
        (ctl, trigger)
    }

    #[test]
    fn tooltip_ids_are_unique() {
        let (a, _) = controller(PartialConfig::new());
        let (b, _) = controller(PartialConfig::new());
        assert_ne!(a.tooltip_id(), b.tooltip_id());
        assert!(a.tooltip_id().starts_with("hovertip-"));
    }

    #[test]
    fn hover_show_flow_with_measure() {
        let t0 = Instant::now();
        let (mut ctl, trigger) = controller(PartialConfig::new());

        ctl.handle_interaction(InteractionEvent::PointerEnter, t0);
        assert!(!ctl.is_visible());
        assert_eq!(ctl.poll(t0 + 100 * MS), Some(Effect::ShownAwaitingFrame));
        assert!(ctl.is_visible());
        assert!(ctl.awaiting_measure());
        assert_eq!(
            trigger.attribute("aria-describedby").as_deref(),
            Some(ctl.tooltip_id())
        );

        let placement = ctl
            .measure(Size::new(100.0, 40.0), Viewport::new(800.0, 600.0))
            .copied()
            .unwrap();
        assert_eq!(placement.side, Side::Bottom);
        assert!(!ctl.awaiting_measure());
    }

    #[test]
    fn hover_jitter_still_hides_and_clears_aria() {
        let t0 = Instant::now();
        let (mut ctl, trigger) = controller(PartialConfig::new());
        ctl.show_now();

        // Leave, re-enter inside the hide window, leave again.
        ctl.handle_interaction(InteractionEvent::PointerLeave, t0);
        ctl.handle_interaction(InteractionEvent::PointerEnter, t0 + 50 * MS);
        ctl.handle_interaction(InteractionEvent::PointerLeave, t0 + 80 * MS);

        // Still visible (and interpretable as such) through the jitter.
        assert!(ctl.is_visible());
        assert_eq!(
            trigger.attribute("aria-describedby").as_deref(),
            Some(ctl.tooltip_id())
        );

        // The final leave's deadline fires a real Hidden effect.
        assert_eq!(ctl.poll(t0 + Duration::from_secs(10)), Some(Effect::Hidden));
        assert!(!ctl.is_visible());
        assert_eq!(trigger.attribute("aria-describedby"), None);
    }

    #[test]
    fn hide_flow_clears_aria() {
        let t0 = Instant::now();
        let (mut ctl, trigger) = controller(PartialConfig::new());
        ctl.show_now();

        ctl.handle_interaction(InteractionEvent::PointerLeave, t0);
        assert!(ctl.is_visible());
        assert_eq!(ctl.poll(t0 + 100 * MS), Some(Effect::Hidden));
        assert_eq!(trigger.attribute("aria-describedby"), None);
    }

    #[test]
    fn zero_size_measurement_keeps_previous_placement() {
        let (mut ctl, _) = controller(PartialConfig::new());
        ctl.show_now();
        let first = ctl
            .measure(Size::new(100.0, 40.0), Viewport::new(800.0, 600.0))
            .copied()
            .unwrap();

        // Tooltip momentarily unmeasurable; the old placement survives.
        let kept = ctl
            .measure(Size::new(0.0, 0.0), Viewport::new(800.0, 600.0))
            .copied()
            .unwrap();
        assert_eq!(first, kept);
    }

    #[test]
    fn measure_without_trigger_returns_none() {
        let store = Arc::new(ConfigStore::new());
        let mut ctl: TooltipController<FakeElement> =
            TooltipController::new(PartialConfig::new(), store);
        assert!(
            ctl.measure(Size::new(100.0, 40.0), Viewport::new(800.0, 600.0))
                .is_none()
        );
    }

    #[test]
    fn resize_requests_remeasure_only_while_visible() {
        let t0 = Instant::now();
        let (mut ctl, _) = controller(PartialConfig::new());

        ctl.handle_window_event(&WindowEvent::Resize, t0);
        assert!(!ctl.awaiting_measure());

        ctl.show_now();
        ctl.measure(Size::new(100.0, 40.0), Viewport::new(800.0, 600.0));
        ctl.handle_window_event(&WindowEvent::Resize, t0);
        assert!(ctl.awaiting_measure());
    }

    #[test]
    fn scroll_hides_hover_tooltip() {
        let t0 = Instant::now();
        let (mut ctl, _) = controller(PartialConfig::new());
        ctl.show_now();

        ctl.handle_window_event(&WindowEvent::Scroll, t0);
        assert_eq!(ctl.poll(t0 + 100 * MS), Some(Effect::Hidden));
    }

    #[test]
    fn click_trigger_toggles_and_outside_click_hides() {
        let t0 = Instant::now();
        let (mut ctl, _trigger) =
            controller(PartialConfig::new().trigger(Trigger::Click).show_delay(10 * MS));

        ctl.handle_interaction(InteractionEvent::Click, t0);
        assert_eq!(ctl.poll(t0 + 10 * MS), Some(Effect::ShownAwaitingFrame));

        let outside = FakeElement::new(Rect::new(700.0, 500.0, 10.0, 10.0));
        ctl.handle_window_event(
            &WindowEvent::DocumentClick {
                target: Some(outside),
            },
            t0 + 20 * MS,
        );
        assert_eq!(ctl.poll(t0 + 200 * MS), Some(Effect::Hidden));
    }

    #[test]
    fn disabled_via_global_store_blocks_show() {
        let t0 = Instant::now();
        let store = Arc::new(ConfigStore::new());
        let mut ctl = TooltipController::new(PartialConfig::new(), Arc::clone(&store));
        ctl.attach_trigger(FakeElement::new(Rect::new(0.0, 0.0, 10.0, 10.0)));

        // Written after mount; the next interaction observes it.
        store.set(PartialConfig::new().disabled(true));
        ctl.handle_interaction(InteractionEvent::PointerEnter, t0);
        assert_eq!(ctl.poll(t0 + 500 * MS), None);
        assert!(!ctl.is_visible());
    }

    #[test]
    fn trigger_kind_change_in_global_store_rewires_binding() {
        let t0 = Instant::now();
        let store = Arc::new(ConfigStore::new());
        let mut ctl = TooltipController::new(PartialConfig::new(), Arc::clone(&store));
        let trigger = FakeElement::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        ctl.attach_trigger(trigger.clone());

        store.set(PartialConfig::new().trigger(Trigger::Click));
        // Hover events stop meaning anything once the kind flips.
        ctl.handle_interaction(InteractionEvent::PointerEnter, t0);
        assert_eq!(ctl.poll(t0 + 500 * MS), None);
        ctl.handle_interaction(InteractionEvent::Click, t0);
        assert!(ctl.next_deadline().is_some());
        assert_eq!(
            trigger.listeners(),
            hovertip_host::Listener::for_trigger(Trigger::Click)
        );
    }

    #[test]
    fn show_now_and_hide_now_bypass_delays() {
        let (mut ctl, trigger) = controller(PartialConfig::new());
        assert_eq!(ctl.show_now(), Some(Effect::ShownAwaitingFrame));
        assert!(ctl.is_visible());
        assert!(trigger.attribute("aria-describedby").is_some());
        // Idempotent.
        assert_eq!(ctl.show_now(), None);

        assert_eq!(ctl.hide_now(), Some(Effect::Hidden));
        assert!(!ctl.is_visible());
        assert_eq!(ctl.hide_now(), None);
    }

    #[test]
    fn dispose_cancels_everything() {
        let t0 = Instant::now();
        let (mut ctl, trigger) = controller(PartialConfig::new());
        ctl.handle_interaction(InteractionEvent::PointerEnter, t0);
        assert!(ctl.next_deadline().is_some());

        ctl.dispose();
        assert!(ctl.is_disposed());
        assert_eq!(ctl.next_deadline(), None);
        assert_eq!(ctl.poll(t0 + Duration::from_secs(10)), None);
        assert!(!trigger.has_listeners());

        // Events after disposal are ignored.
        ctl.handle_interaction(InteractionEvent::PointerEnter, t0);
        assert_eq!(ctl.poll(t0 + Duration::from_secs(10)), None);

        // Idempotent.
        ctl.dispose();
    }

    #[test]
    fn content_roundtrip() {
        let (mut ctl, _) = controller(PartialConfig::new());
        assert_eq!(ctl.content(), None);
        ctl.set_content(Some("Hi".to_string()));
        assert_eq!(ctl.content(), Some("Hi"));
    }
}
