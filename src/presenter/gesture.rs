//! Gestures and the handle views use to send them

use futures::channel::mpsc::UnboundedSender;

use crate::models::{FilterKind, Point, PointId, SortKind};

/// Identifies an item presenter within one render pass
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub id: PointId,
    pub epoch: u64,
}

/// Identifies one opening of the creation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreationKey(pub u64);

/// Owner of an edit form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorKey {
    Item(ItemKey),
    Creation(CreationKey),
}

/// User input, funnelled through the board's queue
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    OpenEditor(ItemKey),
    CloseEditor(ItemKey),
    Escape(EditorKey),
    SubmitEdit(ItemKey, Point),
    Delete(ItemKey),
    ToggleFavorite(ItemKey),
    OpenCreation,
    CancelCreation(CreationKey),
    SubmitCreation(CreationKey, Point),
    Sort(SortKind),
    Filter(FilterKind),
}

/// Cloneable sender for [`Gesture`]s
#[derive(Debug, Clone)]
pub struct BoardHandle {
    gestures: UnboundedSender<Gesture>,
}

impl BoardHandle {
    pub(crate) fn new(gestures: UnboundedSender<Gesture>) -> Self {
        Self { gestures }
    }

    pub fn send(&self, gesture: Gesture) {
        if self.gestures.unbounded_send(gesture).is_err() {
            log::warn!("[BOARD] Gesture dropped, board is gone");
        }
    }
}
