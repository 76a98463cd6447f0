//! Filter predicate table

use chrono::{DateTime, Utc};

use crate::models::{FilterKind, Point};

impl FilterKind {
    /// Whether `point` passes this filter at instant `now`
    pub fn matches(&self, point: &Point, now: DateTime<Utc>) -> bool {
        match self {
            FilterKind::Everything => true,
            FilterKind::Future => point.date_from > now,
            FilterKind::Present => point.date_from <= now && point.date_to >= now,
            FilterKind::Past => point.date_to < now,
        }
    }
}

/// Points passing `filter`, in their original order
pub fn filter_points(points: &[Point], filter: FilterKind, now: DateTime<Utc>) -> Vec<Point> {
    points
        .iter()
        .filter(|point| filter.matches(point, now))
        .cloned()
        .collect()
}

/// Whether any point passes `filter` (the filter bar disables empty criteria)
pub fn has_matches(points: &[Point], filter: FilterKind, now: DateTime<Utc>) -> bool {
    points.iter().any(|point| filter.matches(point, now))
}
