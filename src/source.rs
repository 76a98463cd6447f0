//! Data Source Interfaces
//!
//! The board reads points and the active filter from these collaborators and
//! hears about every committed change through their observers. Sources must
//! call observers in commit order; the board processes them in arrival order
//! and drops duplicates it can recognise.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::models::{Catalog, FilterKind, Notification, Point, UpdateKind};

/// Callback receiving change notifications
pub type Observer = Box<dyn Fn(&Notification)>;

/// Remote-backed point collection
///
/// Each mutation takes the `UpdateKind` to emit once it commits. A failed
/// mutation returns `Err` and emits nothing.
#[async_trait(?Send)]
pub trait PointSource {
    /// Current points, in data source order
    fn points(&self) -> Vec<Point>;

    /// Destinations and offers the points refer to. Empty until loaded.
    fn catalog(&self) -> Catalog;

    async fn update_point(&self, kind: UpdateKind, point: Point) -> SourceResult<()>;

    async fn add_point(&self, kind: UpdateKind, point: Point) -> SourceResult<()>;

    async fn delete_point(&self, kind: UpdateKind, point: Point) -> SourceResult<()>;

    fn subscribe(&self, observer: Observer);
}

/// Active filter selection
pub trait FilterSource {
    fn filter(&self) -> FilterKind;

    /// Stores `filter` and notifies observers with `kind`
    fn set_filter(&self, kind: UpdateKind, filter: FilterKind);

    fn subscribe(&self, observer: Observer);
}

/// Observer list shared by the concrete models
#[derive(Clone, Default)]
pub struct Observers(Rc<RefCell<Vec<Rc<dyn Fn(&Notification)>>>>);

impl Observers {
    pub fn add(&self, observer: Observer) {
        self.0.borrow_mut().push(Rc::from(observer));
    }

    pub fn notify(&self, notification: &Notification) {
        // Snapshot so an observer may subscribe more without a borrow panic.
        let observers: Vec<_> = self.0.borrow().iter().cloned().collect();
        for observer in observers {
            observer(notification);
        }
    }
}
