//! Point collection
//!
//! Local copy of the host's points. Every mutation goes to the host first;
//! the local copy changes and observers are notified only once it commits.

use std::cell::RefCell;

use async_trait::async_trait;

use crate::error::{SourceError, SourceResult};
use crate::models::{Catalog, Destination, Notification, OfferGroup, Point, UpdateKind};
use crate::source::{Observer, Observers, PointSource};

/// Remote transport for points
#[async_trait(?Send)]
pub trait PointsApi {
    async fn list_points(&self) -> SourceResult<Vec<Point>>;
    async fn list_destinations(&self) -> SourceResult<Vec<Destination>>;
    async fn list_offers(&self) -> SourceResult<Vec<OfferGroup>>;
    /// Returns the host's copy of the updated point
    async fn update_point(&self, point: &Point) -> SourceResult<Point>;
    /// Returns the stored point with its assigned id
    async fn add_point(&self, point: &Point) -> SourceResult<Point>;
    async fn delete_point(&self, id: &str) -> SourceResult<()>;
}

pub struct PointsModel<A> {
    api: A,
    points: RefCell<Vec<Point>>,
    catalog: RefCell<Catalog>,
    observers: Observers,
}

impl<A: PointsApi> PointsModel<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            points: RefCell::new(Vec::new()),
            catalog: RefCell::new(Catalog::default()),
            observers: Observers::default(),
        }
    }

    /// Initial fetch of the points and both catalogs. Notifies `Init` once
    /// all three arrive and `Error` if any of them fails.
    pub async fn load(&self) {
        let fetched = futures::try_join!(
            self.api.list_points(),
            self.api.list_destinations(),
            self.api.list_offers(),
        );
        match fetched {
            Ok((points, destinations, offers)) => {
                log::info!(
                    "[MODEL] Loaded {} points, {} destinations, {} offer groups",
                    points.len(),
                    destinations.len(),
                    offers.len()
                );
                *self.points.borrow_mut() = points;
                *self.catalog.borrow_mut() = Catalog {
                    destinations,
                    offers,
                };
                self.observers.notify(&Notification::bare(UpdateKind::Init));
            }
            Err(e) => {
                log::warn!("[MODEL] Failed to load points: {}", e);
                self.observers.notify(&Notification::bare(UpdateKind::Error));
            }
        }
    }
}

#[async_trait(?Send)]
impl<A: PointsApi> PointSource for PointsModel<A> {
    fn points(&self) -> Vec<Point> {
        self.points.borrow().clone()
    }

    fn catalog(&self) -> Catalog {
        self.catalog.borrow().clone()
    }

    async fn update_point(&self, kind: UpdateKind, point: Point) -> SourceResult<()> {
        if !self.points.borrow().iter().any(|p| p.id == point.id) {
            return Err(SourceError::NotFound(point.id));
        }
        let saved = self.api.update_point(&point).await?;
        {
            let mut points = self.points.borrow_mut();
            let slot = points
                .iter_mut()
                .find(|p| p.id == saved.id)
                .ok_or_else(|| SourceError::NotFound(saved.id.clone()))?;
            *slot = saved.clone();
        }
        self.observers.notify(&Notification::new(kind, Some(saved)));
        Ok(())
    }

    async fn add_point(&self, kind: UpdateKind, point: Point) -> SourceResult<()> {
        let saved = self.api.add_point(&point).await?;
        self.points.borrow_mut().insert(0, saved.clone());
        self.observers.notify(&Notification::new(kind, Some(saved)));
        Ok(())
    }

    async fn delete_point(&self, kind: UpdateKind, point: Point) -> SourceResult<()> {
        self.api.delete_point(&point.id).await?;
        self.points.borrow_mut().retain(|p| p.id != point.id);
        self.observers.notify(&Notification::bare(kind));
        Ok(())
    }

    fn subscribe(&self, observer: Observer) {
        self.observers.add(observer);
    }
}
