//! Menu click debounce.
//!
//! A fingertip hovering over the menu reports a hit on every frame. The
//! debouncer turns that stream into discrete clicks:
//!
//! - A hit on a new button cancels any pending click and arms a deadline
//!   one window from now.
//! - Further hits on the already-pending button keep the existing deadline.
//! - When the deadline passes the pending click fires exactly once. If the
//!   finger is still on that button it stays latched, so holding does not
//!   repeat the click; moving off (or onto another button) releases it.
//!
//! Time is the detector's monotonic frame timestamp in milliseconds.

use sw_core::hit::{ButtonAction, ButtonId, UiButton};

/// A click waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingClick {
    pub button: ButtonId,
    pub action: ButtonAction,
    pub deadline_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ClickDebouncer {
    window_ms: u64,
    pending: Option<PendingClick>,
    /// Button currently under the fingertip, if any.
    hovering: Option<ButtonId>,
    /// Button that already fired and is still being held.
    latched: Option<ButtonId>,
}

impl ClickDebouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
            hovering: None,
            latched: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn pending(&self) -> Option<&PendingClick> {
        self.pending.as_ref()
    }

    /// Report a hit on `button` at `now_ms`.
    ///
    /// Returns `true` when this hit armed a new deadline.
    pub fn submit(&mut self, button: &UiButton, now_ms: u64) -> bool {
        self.hovering = Some(button.id);
        if self.latched == Some(button.id) {
            return false;
        }
        self.latched = None;
        if self.pending.is_some_and(|p| p.button == button.id) {
            return false;
        }
        if let Some(old) = self.pending.take() {
            log::debug!("click on {:?} superseded by {:?}", old.button, button.id);
        }
        self.pending = Some(PendingClick {
            button: button.id,
            action: button.action,
            deadline_ms: now_ms.saturating_add(self.window_ms),
        });
        true
    }

    /// The fingertip is over no button this frame.
    pub fn release(&mut self) {
        self.hovering = None;
        self.latched = None;
    }

    /// Drop any pending click and forget hover state.
    pub fn cancel(&mut self) {
        if let Some(p) = self.pending.take() {
            log::debug!("pending click on {:?} cancelled", p.button);
        }
        self.hovering = None;
        self.latched = None;
    }

    /// Fire the pending click if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<PendingClick> {
        let due = self.pending.filter(|p| now_ms >= p.deadline_ms)?;
        self.pending = None;
        if self.hovering == Some(due.button) {
            self.latched = Some(due.button);
        }
        Some(due)
    }
}
