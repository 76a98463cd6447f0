//! Presenters
//!
//! - board: owns every item presenter, reconciles notifications
//! - point: one list item (card + edit form)
//! - creation: the form for a not-yet-saved point
//! - session: view/edit toggle of one item

mod board;
mod creation;
mod gesture;
mod point;
mod session;

pub use board::{BoardDeps, BoardPresenter};
pub use creation::CreationPresenter;
pub use gesture::{BoardHandle, CreationKey, EditorKey, Gesture, ItemKey};
pub use point::ItemPresenter;
pub use session::ItemEditSession;

use crate::escape::EscapeHub;
use crate::surface::Surface;

/// What a presenter may touch while it renders
pub struct RenderCtx<'a> {
    pub surface: &'a mut dyn Surface,
    pub keys: &'a dyn EscapeHub,
    pub handle: &'a BoardHandle,
    /// Set after a fatal load error; closing the creation form then leaves
    /// the create trigger disabled.
    pub create_locked: bool,
}
