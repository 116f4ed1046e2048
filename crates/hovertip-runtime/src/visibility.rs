// SPDX-License-Identifier: MIT

//! Debounced show/hide state machine.
//!
//! [`VisibilityController`] tracks whether the tooltip is on screen
//! separately from the single armed deadline, so visibility survives
//! pointer jitter: a show during a pending hide keeps the tooltip
//! visible, and a later hide still fires its [`Transition::Hidden`].
//! At most one deadline is armed at any instant, and an armed deadline
//! always points away from the current visibility (a show deadline
//! while hidden, a hide deadline while visible).
//!
//! Deadlines are plain data: the host drives the machine by passing
//! `now` into [`show`](VisibilityController::show) /
//! [`hide`](VisibilityController::hide) and then calling
//! [`poll`](VisibilityController::poll) from its loop, sleeping until
//! [`next_deadline`](VisibilityController::next_deadline). Nothing runs
//! as a callback, so cancellation is a field write and no transition
//! can fire after [`cancel_pending`](VisibilityController::cancel_pending).
//!
//! The last show/hide call within a delay window wins: arming one
//! direction always disarms the opposite one first.

#![forbid(unsafe_code)]

use web_time::{Duration, Instant};

/// Which way the armed deadline moves visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Show(Instant),
    Hide(Instant),
}

/// Where the machine currently is, as a derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not visible, nothing pending. Initial and terminal state.
    Hidden,
    /// Show requested; becomes visible when the deadline passes.
    PendingShow(Instant),
    /// Visible, nothing pending.
    Visible,
    /// Hide requested; still visible until the deadline passes.
    PendingHide(Instant),
}

/// A transition reported by [`VisibilityController::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The tooltip just became visible; the host should render, wait a
    /// frame, and re-measure.
    Shown,
    /// The tooltip just became hidden.
    Hidden,
}

/// Timer-debounced visibility state machine for one tooltip.
#[derive(Debug)]
pub struct VisibilityController {
    visible: bool,
    pending: Option<Pending>,
    disabled: bool,
}

impl VisibilityController {
    /// Create a controller in the hidden state.
    pub fn new() -> Self {
        Self {
            visible: false,
            pending: None,
            disabled: false,
        }
    }

    /// Block or unblock show/hide/toggle requests.
    ///
    /// Disabling does not hide an already-visible tooltip and does not
    /// cancel a pending deadline; it only makes new requests no-ops.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self.pending {
            Some(Pending::Show(at)) => Phase::PendingShow(at),
            Some(Pending::Hide(at)) => Phase::PendingHide(at),
            None if self.visible => Phase::Visible,
            None => Phase::Hidden,
        }
    }

    /// Whether the tooltip is currently on screen.
    ///
    /// True during a pending hide (the deadline has not passed yet) and
    /// through any show/hide jitter before that deadline fires.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Request a show after `delay`.
    ///
    /// No-op when disabled or when a show is already pending
    /// (idempotent). While visible this only cancels a pending hide:
    /// the tooltip never left the screen, so nothing needs to fire.
    pub fn show(&mut self, now: Instant, delay: Duration) {
        if self.disabled || matches!(self.pending, Some(Pending::Show(_))) {
            return;
        }
        if self.visible {
            if self.pending.take().is_some() {
                tracing::trace!("hide cancelled; still visible");
            }
        } else {
            tracing::trace!(?delay, "arming show deadline");
            self.pending = Some(Pending::Show(now + delay));
        }
    }

    /// Request a hide after `delay`.
    ///
    /// No-op when disabled or already hidden with nothing pending.
    /// While visible the hide deadline is armed, re-arming any earlier
    /// one (last call wins). A pending show is cancelled; since the
    /// tooltip never appeared there is nothing to hide, so the machine
    /// drops straight back to hidden without reporting a transition.
    pub fn hide(&mut self, now: Instant, delay: Duration) {
        if self.disabled {
            return;
        }
        if self.visible {
            tracing::trace!(?delay, "arming hide deadline");
            self.pending = Some(Pending::Hide(now + delay));
        } else if self.pending.take().is_some() {
            tracing::trace!("show cancelled before it fired");
        }
    }

    /// Hide when visible, show otherwise. No-op when disabled.
    pub fn toggle(&mut self, now: Instant, show_delay: Duration, hide_delay: Duration) {
        if self.disabled {
            return;
        }
        if self.visible {
            self.hide(now, hide_delay);
        } else {
            self.show(now, show_delay);
        }
    }

    /// Become visible right now, bypassing delays and `disabled`.
    ///
    /// Cancels any pending deadline. Returns `true` if visibility
    /// actually changed.
    pub fn show_immediate(&mut self) -> bool {
        self.pending = None;
        !std::mem::replace(&mut self.visible, true)
    }

    /// Become hidden right now, bypassing delays and `disabled`.
    ///
    /// Cancels any pending deadline. Returns `true` if visibility
    /// actually changed.
    pub fn hide_immediate(&mut self) -> bool {
        self.pending = None;
        std::mem::replace(&mut self.visible, false)
    }

    /// Fire the armed deadline if it has passed.
    ///
    /// At most one transition per call; deadlines fire in order because
    /// only one can be armed.
    pub fn poll(&mut self, now: Instant) -> Option<Transition> {
        match self.pending {
            Some(Pending::Show(at)) if now >= at => {
                self.pending = None;
                self.visible = true;
                Some(Transition::Shown)
            }
            Some(Pending::Hide(at)) if now >= at => {
                self.pending = None;
                self.visible = false;
                Some(Transition::Hidden)
            }
            _ => None,
        }
    }

    /// When the host next needs to call [`poll`](Self::poll), if ever.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.pending {
            Some(Pending::Show(at) | Pending::Hide(at)) => Some(at),
            None => None,
        }
    }

    /// Disarm any pending deadline unconditionally, keeping the current
    /// visibility. Used at teardown; no transition fires afterwards.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new()
    }
}
