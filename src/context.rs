//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::presenter::{BoardHandle, Gesture};
use crate::store::SurfaceStore;

/// What every board component needs: the views to render and the queue
/// to send gestures to
#[derive(Clone)]
pub struct AppContext {
    pub store: SurfaceStore,
    handle: BoardHandle,
}

impl AppContext {
    pub fn new(store: SurfaceStore, handle: BoardHandle) -> Self {
        Self { store, handle }
    }

    pub fn send(&self, gesture: Gesture) {
        self.handle.send(gesture);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
