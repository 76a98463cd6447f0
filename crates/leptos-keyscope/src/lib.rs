//! Leptos KeyScope
//!
//! Scoped keyboard subscriptions for Leptos apps. A single document-level
//! `keydown` listener is bound on first use; handlers register for one key
//! and stay active only while their [`KeyGuard`] is alive.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type Handler = Rc<dyn Fn()>;

/// Handlers by subscription id, in registration order
#[derive(Default)]
struct Registry {
    next: u64,
    handlers: BTreeMap<u64, (String, Handler)>,
    bound: bool,
}

impl Registry {
    fn insert(&mut self, key: &str, handler: Handler) -> u64 {
        let id = self.next;
        self.next += 1;
        self.handlers.insert(id, (normalize_key(key).to_string(), handler));
        id
    }

    fn remove(&mut self, id: u64) {
        self.handlers.remove(&id);
    }

    /// Handlers registered for `key`, snapshotted so they may unsubscribe
    fn matching(&self, key: &str) -> Vec<Handler> {
        let key = normalize_key(key);
        self.handlers
            .values()
            .filter(|(k, _)| k == key)
            .map(|(_, h)| h.clone())
            .collect()
    }
}

/// Old browsers report `Esc` for the Escape key.
pub fn normalize_key(key: &str) -> &str {
    match key {
        "Esc" => "Escape",
        other => other,
    }
}

/// Document keyboard registry; clones share one listener
#[derive(Clone, Default)]
pub struct KeyScope {
    registry: Rc<RefCell<Registry>>,
}

impl KeyScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `handler` on every `key` press until the guard drops.
    pub fn subscribe(&self, key: &str, handler: impl Fn() + 'static) -> KeyGuard {
        self.ensure_bound();
        let id = self.registry.borrow_mut().insert(key, Rc::new(handler));
        KeyGuard {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of live subscriptions
    pub fn active(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    /// Runs every handler registered for `key`.
    pub fn dispatch(&self, key: &str) {
        let handlers = self.registry.borrow().matching(key);
        for handler in handlers {
            handler();
        }
    }

    fn ensure_bound(&self) {
        if self.registry.borrow().bound {
            return;
        }
        let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
            return;
        };
        let scope = self.clone();
        let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |ev: web_sys::KeyboardEvent| scope.dispatch(&ev.key()),
        );
        if doc
            .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
            .is_ok()
        {
            self.registry.borrow_mut().bound = true;
        }
        on_keydown.forget();
    }
}

/// Live subscription; unregisters on drop
pub struct KeyGuard {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
        }
    }
}
