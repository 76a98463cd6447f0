//! Escape-key subscriptions
//!
//! An open editor holds a [`Subscription`]; dropping it releases the listener
//! and cancels its token, so a callback that is already queued can tell it is
//! stale.

use std::cell::Cell;
use std::rc::Rc;

/// Releases a listener registered with an [`EscapeHub`]
pub type Release = Box<dyn FnOnce()>;

/// Source of Escape key presses
pub trait EscapeHub {
    /// Calls `on_escape` on every Escape press until the returned release runs.
    fn subscribe_escape(&self, on_escape: Box<dyn Fn()>) -> Release;
}

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Live Escape listener; released on drop
pub struct Subscription {
    token: CancelToken,
    release: Option<Release>,
}

impl Subscription {
    /// Registers `on_escape` with `hub`, guarded by a fresh token.
    pub fn escape(hub: &dyn EscapeHub, on_escape: impl Fn() + 'static) -> Self {
        let token = CancelToken::new();
        let guard = token.clone();
        let release = hub.subscribe_escape(Box::new(move || {
            if !guard.is_cancelled() {
                on_escape();
            }
        }));
        Self {
            token,
            release: Some(release),
        }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
