//! Filter selection

use std::cell::Cell;

use crate::models::{FilterKind, Notification, UpdateKind};
use crate::source::{FilterSource, Observer, Observers};

/// Active filter; every `set_filter` notifies, even when unchanged
#[derive(Default)]
pub struct FilterModel {
    current: Cell<FilterKind>,
    observers: Observers,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FilterSource for FilterModel {
    fn filter(&self) -> FilterKind {
        self.current.get()
    }

    fn set_filter(&self, kind: UpdateKind, filter: FilterKind) {
        log::debug!("[MODEL] Filter set to {}", filter.as_str());
        self.current.set(filter);
        self.observers.notify(&Notification::bare(kind));
    }

    fn subscribe(&self, observer: Observer) {
        self.observers.add(observer);
    }
}
