//! Board Models
//!
//! Trip points and the small value types the presenters pass around.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, stable point identifier assigned by the data source
pub type PointId = String;

/// A single trip event (matches the host payload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    #[serde(rename = "type")]
    pub point_type: String,
    pub destination: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub offers: Vec<String>,
}

impl Point {
    /// Blank point seeding the creation form. The id stays empty until the
    /// data source assigns one.
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: PointId::new(),
            point_type: "flight".to_string(),
            destination: String::new(),
            date_from: now,
            date_to: now,
            base_price: 0,
            is_favorite: false,
            offers: Vec::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.date_to - self.date_from
    }

    /// Copy with the favorite flag flipped
    pub fn toggled_favorite(&self) -> Self {
        Self {
            is_favorite: !self.is_favorite,
            ..self.clone()
        }
    }

    /// Selects `offer_id`, or deselects it if already selected
    pub fn toggle_offer(&mut self, offer_id: &str) {
        match self.offers.iter().position(|id| id == offer_id) {
            Some(index) => {
                self.offers.remove(index);
            }
            None => self.offers.push(offer_id.to_string()),
        }
    }

    /// Switches the event type. Offers belong to a type, so the selection
    /// is cleared.
    pub fn set_type(&mut self, point_type: String) {
        if self.point_type != point_type {
            self.point_type = point_type;
            self.offers.clear();
        }
    }
}

// ========================
// Catalogs
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub src: String,
    #[serde(default)]
    pub description: String,
}

/// A place a point can lead to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<Picture>,
}

/// An add-on a point of some type can include
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub price: u32,
}

/// Offers available to one event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferGroup {
    #[serde(rename = "type")]
    pub point_type: String,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

/// Destinations and offers, loaded once next to the points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub destinations: Vec<Destination>,
    pub offers: Vec<OfferGroup>,
}

impl Catalog {
    pub fn destination(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    /// Name to show for a point's destination; unknown ids are shown as is
    pub fn destination_name<'a>(&'a self, point: &'a Point) -> &'a str {
        self.destination(&point.destination)
            .map(|d| d.name.as_str())
            .unwrap_or(point.destination.as_str())
    }

    pub fn offers_for(&self, point_type: &str) -> &[Offer] {
        self.offers
            .iter()
            .find(|group| group.point_type == point_type)
            .map(|group| group.offers.as_slice())
            .unwrap_or(&[])
    }

    /// The point's selected offers that exist for its type, in catalog order
    pub fn selected_offers(&self, point: &Point) -> Vec<&Offer> {
        self.offers_for(&point.point_type)
            .iter()
            .filter(|offer| point.offers.contains(&offer.id))
            .collect()
    }
}

/// Granularity of a remote-confirmed change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    /// One point changed; re-render only that item
    Patch,
    /// List membership or count changed
    Minor,
    /// Full reset (filter change, creation entry)
    Major,
    /// Initial load finished
    Init,
    /// Initial load failed
    Error,
}

/// Observer payload emitted by the data and filter sources
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: UpdateKind,
    pub point: Option<Point>,
}

impl Notification {
    pub fn new(kind: UpdateKind, point: Option<Point>) -> Self {
        Self { kind, point }
    }

    pub fn bare(kind: UpdateKind) -> Self {
        Self { kind, point: None }
    }
}

/// Whether an item shows its card or its edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Default,
    Editing,
}

/// Transient flags overlaid on an open edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationState {
    pub saving: bool,
    pub deleting: bool,
    pub disabled: bool,
}

impl MutationState {
    pub fn saving() -> Self {
        Self {
            saving: true,
            deleting: false,
            disabled: true,
        }
    }

    pub fn deleting() -> Self {
        Self {
            saving: false,
            deleting: true,
            disabled: true,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.saving || self.deleting || self.disabled
    }
}

/// Sort criteria offered by the sort bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    #[default]
    Day,
    Event,
    Time,
    Price,
    Offers,
}

impl SortKind {
    /// Sort bar order
    pub const ALL: [SortKind; 5] = [
        SortKind::Day,
        SortKind::Event,
        SortKind::Time,
        SortKind::Price,
        SortKind::Offers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKind::Day => "day",
            SortKind::Event => "event",
            SortKind::Time => "time",
            SortKind::Price => "price",
            SortKind::Offers => "offers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKind::Day => "Day",
            SortKind::Event => "Event",
            SortKind::Time => "Time",
            SortKind::Price => "Price",
            SortKind::Offers => "Offers",
        }
    }

    /// Event and Offers have no comparator; they render disabled.
    pub fn is_enabled(&self) -> bool {
        matches!(self, SortKind::Day | SortKind::Time | SortKind::Price)
    }
}

/// Filter criteria offered by the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Everything,
    Future,
    Present,
    Past,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Everything,
        FilterKind::Future,
        FilterKind::Present,
        FilterKind::Past,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Everything => "everything",
            FilterKind::Future => "future",
            FilterKind::Present => "present",
            FilterKind::Past => "past",
        }
    }

    /// Text shown when the filter leaves nothing to render
    pub fn empty_message(&self) -> &'static str {
        match self {
            FilterKind::Everything => "Click New Event to create your first point",
            FilterKind::Future => "There are no future events now",
            FilterKind::Present => "There are no present events now",
            FilterKind::Past => "There are no past events now",
        }
    }
}
