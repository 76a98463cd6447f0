//! Rendering Primitives
//!
//! The presenters never touch the DOM. They describe views with [`ViewSpec`]
//! and move them around through a [`Surface`], which owns the actual nodes.

use crate::models::{Catalog, FilterKind, MutationState, Point, SortKind};
use crate::presenter::{EditorKey, ItemKey};

/// Handle to a view created by a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// Where a view is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// The board section: sort bar, messages, point list
    Board,
    /// The point list: cards and edit forms
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    AfterBegin,
    BeforeEnd,
}

/// Content of an edit form
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub point: Point,
    pub state: MutationState,
    pub is_new: bool,
}

/// Everything a surface needs to build a view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewSpec {
    Loading,
    LoadError,
    Empty { filter: FilterKind },
    SortBar { active: SortKind },
    PointList,
    Card { key: ItemKey, point: Point },
    Editor { key: EditorKey, form: EditForm },
}

/// Blocking indicator levels driven by the concurrency gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Unblocked,
    /// Input is ignored but nothing is shown yet
    Blocked,
    /// The visible indicator is up
    Indicated,
}

/// Receiver of gate state changes
pub trait BlockIndicator {
    fn set_block_state(&mut self, state: BlockState);
}

/// Rendering backend used by every presenter.
///
/// `unmount` discards the view and is a no-op for unknown ids, so presenters
/// may call it on views that were already removed. `swap` puts `new` where
/// `old` is mounted and detaches `old` without discarding it.
pub trait Surface: BlockIndicator {
    fn create(&mut self, spec: ViewSpec) -> ViewId;
    /// Rebuild an existing view from an updated spec
    fn update(&mut self, view: ViewId, spec: ViewSpec);
    fn mount(&mut self, view: ViewId, container: Container, position: Position);
    fn swap(&mut self, new: ViewId, old: ViewId);
    fn unmount(&mut self, view: ViewId);
    /// Play the transient failure animation
    fn shake(&mut self, view: ViewId);
    fn set_create_enabled(&mut self, enabled: bool);
    /// Active filter and the filters that would match anything, for the
    /// filter bar
    fn show_filter(&mut self, active: FilterKind, available: &[FilterKind]);
    /// Destinations and offers that cards and forms look names up in
    fn show_catalog(&mut self, catalog: Catalog);
}
