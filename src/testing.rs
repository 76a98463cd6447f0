//! In-memory collaborators for presenter tests

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::future::LocalBoxFuture;

use crate::config::BoardConfig;
use crate::error::{SourceError, SourceResult};
use crate::escape::{EscapeHub, Release};
use crate::gate::Clock;
use crate::models::{Catalog, FilterKind, Notification, Point, PointId, UpdateKind};
use crate::presenter::{BoardDeps, BoardHandle, BoardPresenter, EditorKey, Gesture, RenderCtx};
use crate::source::{FilterSource, Observer, Observers, PointSource};
use crate::surface::{
    BlockIndicator, BlockState, Container, EditForm, Position, Surface, ViewId, ViewSpec,
};

/// One-hour point starting at 09:00 on 2024-01-`day`
pub fn point_on(id: &str, day: u32) -> Point {
    let from = Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();
    Point {
        id: id.to_string(),
        point_type: "taxi".to_string(),
        destination: format!("dest-{}", id),
        date_from: from,
        date_to: from + chrono::Duration::hours(1),
        base_price: 100,
        is_favorite: false,
        offers: Vec::new(),
    }
}

// ========================
// Surface
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceModel {
    next: u64,
    pub views: BTreeMap<ViewId, ViewSpec>,
    pub board: Vec<ViewId>,
    pub list: Vec<ViewId>,
    pub shakes: Vec<ViewId>,
    pub blocks: Vec<BlockState>,
    pub create_enabled: bool,
    pub filter: FilterKind,
    pub available_filters: Vec<FilterKind>,
    pub catalog: Catalog,
}

impl Default for SurfaceModel {
    fn default() -> Self {
        Self {
            next: 0,
            views: BTreeMap::new(),
            board: Vec::new(),
            list: Vec::new(),
            shakes: Vec::new(),
            blocks: Vec::new(),
            create_enabled: true,
            filter: FilterKind::default(),
            available_filters: Vec::new(),
            catalog: Catalog::default(),
        }
    }
}

/// Records what the presenters render
#[derive(Debug, Clone, Default)]
pub struct FakeSurface(Rc<RefCell<SurfaceModel>>);

impl FakeSurface {
    pub fn snapshot(&self) -> SurfaceModel {
        self.0.borrow().clone()
    }

    pub fn exists(&self, view: ViewId) -> bool {
        self.0.borrow().views.contains_key(&view)
    }

    pub fn view_count(&self) -> usize {
        self.0.borrow().views.len()
    }

    pub fn board_specs(&self) -> Vec<ViewSpec> {
        let model = self.0.borrow();
        model.board.iter().map(|id| model.views[id].clone()).collect()
    }

    pub fn has_board_view(&self, matches: impl Fn(&ViewSpec) -> bool) -> bool {
        self.board_specs().iter().any(matches)
    }

    pub fn list_specs(&self) -> Vec<ViewSpec> {
        let model = self.0.borrow();
        model.list.iter().map(|id| model.views[id].clone()).collect()
    }

    /// Point ids of the mounted cards and item forms, in list order
    pub fn list_ids(&self) -> Vec<String> {
        self.list_specs()
            .into_iter()
            .filter_map(|spec| match spec {
                ViewSpec::Card { key, .. } => Some(key.id),
                ViewSpec::Editor {
                    key: EditorKey::Item(key),
                    ..
                } => Some(key.id),
                _ => None,
            })
            .collect()
    }

    /// The point shown by the card for `id`, mounted or not
    pub fn card_point(&self, id: &str) -> Option<Point> {
        self.0.borrow().views.values().find_map(|spec| match spec {
            ViewSpec::Card { key, point } if key.id == id => Some(point.clone()),
            _ => None,
        })
    }

    pub fn editor_form(&self, id: &str) -> Option<EditForm> {
        self.0.borrow().views.values().find_map(|spec| match spec {
            ViewSpec::Editor {
                key: EditorKey::Item(key),
                form,
            } if key.id == id => Some(form.clone()),
            _ => None,
        })
    }

    pub fn creation_form(&self) -> Option<EditForm> {
        self.0.borrow().views.values().find_map(|spec| match spec {
            ViewSpec::Editor {
                key: EditorKey::Creation(_),
                form,
            } => Some(form.clone()),
            _ => None,
        })
    }

    pub fn shakes(&self) -> Vec<ViewId> {
        self.0.borrow().shakes.clone()
    }

    pub fn block_states(&self) -> Vec<BlockState> {
        self.0.borrow().blocks.clone()
    }

    pub fn create_enabled(&self) -> bool {
        self.0.borrow().create_enabled
    }

    pub fn filter(&self) -> FilterKind {
        self.0.borrow().filter
    }

    pub fn available_filters(&self) -> Vec<FilterKind> {
        self.0.borrow().available_filters.clone()
    }

    pub fn catalog(&self) -> Catalog {
        self.0.borrow().catalog.clone()
    }
}

impl BlockIndicator for FakeSurface {
    fn set_block_state(&mut self, state: BlockState) {
        self.0.borrow_mut().blocks.push(state);
    }
}

impl Surface for FakeSurface {
    fn create(&mut self, spec: ViewSpec) -> ViewId {
        let mut model = self.0.borrow_mut();
        model.next += 1;
        let id = ViewId(model.next);
        model.views.insert(id, spec);
        id
    }

    fn update(&mut self, view: ViewId, spec: ViewSpec) {
        let mut model = self.0.borrow_mut();
        assert!(model.views.contains_key(&view), "update of unknown view {:?}", view);
        model.views.insert(view, spec);
    }

    fn mount(&mut self, view: ViewId, container: Container, position: Position) {
        let mut model = self.0.borrow_mut();
        assert!(model.views.contains_key(&view), "mount of unknown view {:?}", view);
        let children = match container {
            Container::Board => &mut model.board,
            Container::List => &mut model.list,
        };
        assert!(!children.contains(&view), "view {:?} mounted twice", view);
        match position {
            Position::AfterBegin => children.insert(0, view),
            Position::BeforeEnd => children.push(view),
        }
    }

    fn swap(&mut self, new: ViewId, old: ViewId) {
        let mut model = self.0.borrow_mut();
        assert!(model.views.contains_key(&new), "swap in of unknown view {:?}", new);
        let model = &mut *model;
        for children in [&mut model.board, &mut model.list] {
            if let Some(slot) = children.iter_mut().find(|id| **id == old) {
                *slot = new;
                return;
            }
        }
        panic!("swap out of unmounted view {:?}", old);
    }

    fn unmount(&mut self, view: ViewId) {
        let mut model = self.0.borrow_mut();
        model.views.remove(&view);
        model.board.retain(|id| *id != view);
        model.list.retain(|id| *id != view);
    }

    fn shake(&mut self, view: ViewId) {
        self.0.borrow_mut().shakes.push(view);
    }

    fn set_create_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().create_enabled = enabled;
    }

    fn show_filter(&mut self, active: FilterKind, available: &[FilterKind]) {
        let mut model = self.0.borrow_mut();
        model.filter = active;
        model.available_filters = available.to_vec();
    }

    fn show_catalog(&mut self, catalog: Catalog) {
        self.0.borrow_mut().catalog = catalog;
    }
}

// ========================
// Keys
// ========================

/// Escape hub the tests press by hand
#[derive(Clone, Default)]
pub struct FakeKeys {
    next: Rc<Cell<u64>>,
    listeners: Rc<RefCell<BTreeMap<u64, Rc<dyn Fn()>>>>,
}

impl FakeKeys {
    pub fn press_escape(&self) {
        for callback in self.callbacks() {
            callback();
        }
    }

    pub fn active(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn callbacks(&self) -> Vec<Rc<dyn Fn()>> {
        self.listeners.borrow().values().cloned().collect()
    }
}

impl EscapeHub for FakeKeys {
    fn subscribe_escape(&self, on_escape: Box<dyn Fn()>) -> Release {
        let id = self.next.get();
        self.next.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::from(on_escape));
        let listeners = self.listeners.clone();
        Box::new(move || {
            listeners.borrow_mut().remove(&id);
        })
    }
}

// ========================
// Clock
// ========================

/// Clock on tokio's (pausable) time
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

// ========================
// Sources
// ========================

/// Point source with scripted failures and latencies
#[derive(Default)]
pub struct FakeSource {
    points: RefCell<Vec<Point>>,
    catalog: RefCell<Catalog>,
    observers: Observers,
    failing: Cell<bool>,
    delays: RefCell<HashMap<PointId, Duration>>,
    calls: RefCell<Vec<String>>,
    created: Cell<u64>,
}

impl FakeSource {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points: RefCell::new(points),
            ..Self::default()
        }
    }

    pub fn set_catalog(&self, catalog: Catalog) {
        *self.catalog.borrow_mut() = catalog;
    }

    pub fn emit(&self, notification: Notification) {
        self.observers.notify(&notification);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn set_delay(&self, id: &str, delay: Duration) {
        self.delays.borrow_mut().insert(id.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    async fn round_trip(&self, op: &str, id: &str) -> SourceResult<()> {
        self.calls.borrow_mut().push(format!("{}:{}:start", op, id));
        let delay = self.delays.borrow().get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.get() {
            self.calls.borrow_mut().push(format!("{}:{}:failed", op, id));
            return Err(SourceError::Rejected(format!("{} {}", op, id)));
        }
        self.calls.borrow_mut().push(format!("{}:{}:done", op, id));
        Ok(())
    }
}

#[async_trait(?Send)]
impl PointSource for FakeSource {
    fn points(&self) -> Vec<Point> {
        self.points.borrow().clone()
    }

    fn catalog(&self) -> Catalog {
        self.catalog.borrow().clone()
    }

    async fn update_point(&self, kind: UpdateKind, point: Point) -> SourceResult<()> {
        self.round_trip("update", &point.id).await?;
        {
            let mut points = self.points.borrow_mut();
            let slot = points
                .iter_mut()
                .find(|p| p.id == point.id)
                .ok_or_else(|| SourceError::NotFound(point.id.clone()))?;
            *slot = point.clone();
        }
        self.emit(Notification::new(kind, Some(point)));
        Ok(())
    }

    async fn add_point(&self, kind: UpdateKind, mut point: Point) -> SourceResult<()> {
        self.round_trip("add", &point.id).await?;
        self.created.set(self.created.get() + 1);
        point.id = format!("new-{}", self.created.get());
        self.points.borrow_mut().insert(0, point.clone());
        self.emit(Notification::new(kind, Some(point)));
        Ok(())
    }

    async fn delete_point(&self, kind: UpdateKind, point: Point) -> SourceResult<()> {
        self.round_trip("delete", &point.id).await?;
        self.points.borrow_mut().retain(|p| p.id != point.id);
        self.emit(Notification::bare(kind));
        Ok(())
    }

    fn subscribe(&self, observer: Observer) {
        self.observers.add(observer);
    }
}

#[derive(Default)]
pub struct FakeFilters {
    current: Cell<FilterKind>,
    observers: Observers,
}

impl FilterSource for FakeFilters {
    fn filter(&self) -> FilterKind {
        self.current.get()
    }

    fn set_filter(&self, kind: UpdateKind, filter: FilterKind) {
        self.current.set(filter);
        self.observers.notify(&Notification::bare(kind));
    }

    fn subscribe(&self, observer: Observer) {
        self.observers.add(observer);
    }
}

// ========================
// Fixtures
// ========================

/// Surface, keys and a gesture queue for driving single presenters
pub struct Harness {
    pub surface: FakeSurface,
    pub keys: FakeKeys,
    pub handle: BoardHandle,
    gestures: UnboundedReceiver<Gesture>,
}

impl Harness {
    pub fn new() -> Self {
        let (tx, gestures) = mpsc::unbounded();
        Self {
            surface: FakeSurface::default(),
            keys: FakeKeys::default(),
            handle: BoardHandle::new(tx),
            gestures,
        }
    }

    pub fn cx(&mut self) -> RenderCtx<'_> {
        RenderCtx {
            surface: &mut self.surface,
            keys: &self.keys,
            handle: &self.handle,
            create_locked: false,
        }
    }

    pub fn take_gestures(&mut self) -> Vec<Gesture> {
        let mut taken = Vec::new();
        while let Ok(gesture) = self.gestures.try_recv() {
            taken.push(gesture);
        }
        taken
    }
}

/// A board wired to fake collaborators
pub struct BoardFixture {
    pub board: BoardPresenter<FakeSurface>,
    pub surface: FakeSurface,
    pub source: Rc<FakeSource>,
    pub filters: Rc<FakeFilters>,
    pub keys: Rc<FakeKeys>,
}

impl BoardFixture {
    pub fn new(points: Vec<Point>) -> Self {
        let surface = FakeSurface::default();
        let source = Rc::new(FakeSource::new(points));
        let filters = Rc::new(FakeFilters::default());
        let keys = Rc::new(FakeKeys::default());
        let deps = BoardDeps {
            source: source.clone(),
            filters: filters.clone(),
            keys: keys.clone(),
            clock: Rc::new(TokioClock::new()),
        };
        let board = BoardPresenter::new(surface.clone(), deps, &BoardConfig::default());
        Self {
            board,
            surface,
            source,
            filters,
            keys,
        }
    }
}
