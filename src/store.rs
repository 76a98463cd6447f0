//! Board View Store
//!
//! The concrete `Surface`: presenters write views into a reactive_stores
//! store and the Leptos components render whatever it holds.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Catalog, FilterKind};
use crate::surface::{BlockIndicator, BlockState, Container, Position, Surface, ViewId, ViewSpec};

/// A created view and how often it was asked to shake
#[derive(Clone, Debug, PartialEq)]
pub struct ViewEntry {
    pub id: ViewId,
    pub spec: ViewSpec,
    pub shakes: u32,
}

/// Everything the board components render, with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct SurfaceState {
    /// Every created view, mounted or not
    pub views: Vec<ViewEntry>,
    /// Children of the board section, in order
    pub board: Vec<ViewId>,
    /// Children of the point list, in order
    pub list: Vec<ViewId>,
    pub create_enabled: bool,
    pub block: BlockState,
    pub filter: FilterKind,
    /// Filters with at least one matching point
    pub available_filters: Vec<FilterKind>,
    pub catalog: Catalog,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            views: Vec::new(),
            board: Vec::new(),
            list: Vec::new(),
            create_enabled: true,
            block: BlockState::Unblocked,
            filter: FilterKind::Everything,
            available_filters: FilterKind::ALL.to_vec(),
            catalog: Catalog::default(),
        }
    }
}

/// Type alias for the store
pub type SurfaceStore = Store<SurfaceState>;

// ========================
// Store Helper Functions
// ========================

/// Spec of a view, tracked
pub fn store_view(store: &SurfaceStore, id: ViewId) -> Option<ViewEntry> {
    store.views().read().iter().find(|v| v.id == id).cloned()
}

fn store_children(store: &SurfaceStore, container: Container) -> Vec<ViewId> {
    match container {
        Container::Board => store.board().get(),
        Container::List => store.list().get(),
    }
}

/// Mounted board children, tracked
pub fn store_board(store: &SurfaceStore) -> Vec<ViewId> {
    store_children(store, Container::Board)
}

/// Mounted list children, tracked
pub fn store_list(store: &SurfaceStore) -> Vec<ViewId> {
    store_children(store, Container::List)
}

// ========================
// Surface
// ========================

/// `Surface` backed by a [`SurfaceStore`]
pub struct LeptosSurface {
    store: SurfaceStore,
    next: u64,
}

impl LeptosSurface {
    pub fn new(store: SurfaceStore) -> Self {
        Self { store, next: 0 }
    }

    fn with_children(&self, container: Container, f: impl FnOnce(&mut Vec<ViewId>)) {
        match container {
            Container::Board => f(&mut self.store.board().write()),
            Container::List => f(&mut self.store.list().write()),
        }
    }
}

impl BlockIndicator for LeptosSurface {
    fn set_block_state(&mut self, state: BlockState) {
        self.store.block().set(state);
    }
}

impl Surface for LeptosSurface {
    fn create(&mut self, spec: ViewSpec) -> ViewId {
        self.next += 1;
        let id = ViewId(self.next);
        self.store.views().write().push(ViewEntry { id, spec, shakes: 0 });
        id
    }

    fn update(&mut self, view: ViewId, spec: ViewSpec) {
        let field = self.store.views();
        let mut views = field.write();
        match views.iter_mut().find(|v| v.id == view) {
            Some(entry) => entry.spec = spec,
            None => log::warn!("[SURFACE] Update of unknown view {:?}", view),
        }
    }

    fn mount(&mut self, view: ViewId, container: Container, position: Position) {
        self.with_children(container, |children| {
            children.retain(|id| *id != view);
            match position {
                Position::AfterBegin => children.insert(0, view),
                Position::BeforeEnd => children.push(view),
            }
        });
    }

    fn swap(&mut self, new: ViewId, old: ViewId) {
        for container in [Container::Board, Container::List] {
            let mut swapped = false;
            self.with_children(container, |children| {
                if let Some(slot) = children.iter_mut().find(|id| **id == old) {
                    *slot = new;
                    swapped = true;
                }
            });
            if swapped {
                return;
            }
        }
        log::warn!("[SURFACE] Swap out of unmounted view {:?}", old);
    }

    fn unmount(&mut self, view: ViewId) {
        self.with_children(Container::Board, |children| children.retain(|id| *id != view));
        self.with_children(Container::List, |children| children.retain(|id| *id != view));
        self.store.views().write().retain(|v| v.id != view);
    }

    fn shake(&mut self, view: ViewId) {
        let field = self.store.views();
        let mut views = field.write();
        if let Some(entry) = views.iter_mut().find(|v| v.id == view) {
            entry.shakes += 1;
        }
    }

    fn set_create_enabled(&mut self, enabled: bool) {
        self.store.create_enabled().set(enabled);
    }

    fn show_filter(&mut self, active: FilterKind, available: &[FilterKind]) {
        self.store.filter().set(active);
        self.store.available_filters().set(available.to_vec());
    }

    fn show_catalog(&mut self, catalog: Catalog) {
        self.store.catalog().set(catalog);
    }
}
