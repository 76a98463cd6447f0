//! Browser bindings for the presenter core

use std::time::Duration;

use futures::future::LocalBoxFuture;
use leptos_keyscope::KeyScope;

use crate::escape::{EscapeHub, Release};
use crate::gate::Clock;

/// Wall clock from `Date.now()`, timers from gloo
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }
}

/// Escape presses from the document keyboard scope
#[derive(Clone, Default)]
pub struct BrowserKeys {
    scope: KeyScope,
}

impl BrowserKeys {
    pub fn new(scope: KeyScope) -> Self {
        Self { scope }
    }
}

impl EscapeHub for BrowserKeys {
    fn subscribe_escape(&self, on_escape: Box<dyn Fn()>) -> Release {
        let guard = self.scope.subscribe("Escape", on_escape);
        Box::new(move || drop(guard))
    }
}
