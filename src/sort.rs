//! Point ordering
//!
//! All comparators are used with the stable `sort_by`, so points that compare
//! equal keep the order the data source delivered them in.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::filter::filter_points;
use crate::models::{FilterKind, Point, SortKind};

pub fn by_day(a: &Point, b: &Point) -> Ordering {
    a.date_from.cmp(&b.date_from)
}

pub fn by_time(a: &Point, b: &Point) -> Ordering {
    a.duration().cmp(&b.duration())
}

pub fn by_price(a: &Point, b: &Point) -> Ordering {
    a.base_price.cmp(&b.base_price)
}

/// Comparator for `kind`, if it has one
pub fn comparator(kind: SortKind) -> Option<fn(&Point, &Point) -> Ordering> {
    match kind {
        SortKind::Day => Some(by_day),
        SortKind::Time => Some(by_time),
        SortKind::Price => Some(by_price),
        SortKind::Event | SortKind::Offers => None,
    }
}

pub fn sort_points(points: &mut [Point], kind: SortKind) {
    if let Some(compare) = comparator(kind) {
        points.sort_by(compare);
    }
}

/// The sequence the board renders: filter first, then sort.
pub fn visible_points(
    points: &[Point],
    filter: FilterKind,
    sort: SortKind,
    now: DateTime<Utc>,
) -> Vec<Point> {
    let mut visible = filter_points(points, filter, now);
    sort_points(&mut visible, sort);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn point(id: &str, day: u32, hours: i64, price: u32) -> Point {
        let from = Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();
        Point {
            id: id.to_string(),
            date_from: from,
            date_to: from + Duration::hours(hours),
            base_price: price,
            ..Point::blank(from)
        }
    }

    fn ids(points: &[Point]) -> Vec<&str> {
        points.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_sort_by_start_date() {
        let points = vec![point("c", 3, 1, 10), point("a", 1, 1, 10), point("b", 2, 1, 10)];
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let visible = visible_points(&points, FilterKind::Everything, SortKind::Day, now);
        assert_eq!(ids(&visible), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_time_and_price_sorts_are_stable() {
        let mut points = vec![
            point("long", 1, 5, 30),
            point("short-1", 2, 1, 10),
            point("short-2", 3, 1, 30),
        ];
        sort_points(&mut points, SortKind::Time);
        assert_eq!(ids(&points), vec!["short-1", "short-2", "long"]);

        sort_points(&mut points, SortKind::Price);
        assert_eq!(ids(&points), vec!["short-1", "short-2", "long"]);
    }

    #[test]
    fn test_criteria_without_comparator_keep_order() {
        let mut points = vec![point("b", 2, 1, 10), point("a", 1, 1, 5)];
        sort_points(&mut points, SortKind::Offers);
        assert_eq!(ids(&points), vec!["b", "a"]);
        assert!(comparator(SortKind::Event).is_none());
    }
}
