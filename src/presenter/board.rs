//! Board Presenter
//!
//! Owns every item presenter and the creation form, renders the loading,
//! error, empty and list states, and reconciles source notifications.
//!
//! All input reaches the board through two queues: gestures from the views
//! and notifications from the sources. Only the board's own task drains them,
//! so the id -> presenter map is never touched re-entrantly. Notifications
//! are drained first, and a mutation drains the ones it caused before its
//! rollback runs and before the gate unblocks.

use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;

use crate::config::BoardConfig;
use crate::escape::EscapeHub;
use crate::gate::{Clock, ConcurrencyGate};
use crate::models::{FilterKind, Mode, Notification, Point, PointId, SortKind, UpdateKind};
use crate::filter::has_matches;
use crate::sort::visible_points;
use crate::source::{FilterSource, PointSource};
use crate::surface::{Container, Position, Surface, ViewId, ViewSpec};

use super::{
    BoardHandle, CreationKey, CreationPresenter, EditorKey, Gesture, ItemKey, ItemPresenter,
    RenderCtx,
};

/// Collaborators the board borrows but does not own
#[derive(Clone)]
pub struct BoardDeps {
    pub source: Rc<dyn PointSource>,
    pub filters: Rc<dyn FilterSource>,
    pub keys: Rc<dyn EscapeHub>,
    pub clock: Rc<dyn Clock>,
}

enum Inbound {
    Notification(Option<Notification>),
    Gesture(Option<Gesture>),
}

pub struct BoardPresenter<S: Surface> {
    surface: S,
    source: Rc<dyn PointSource>,
    filters: Rc<dyn FilterSource>,
    keys: Rc<dyn EscapeHub>,
    gate: ConcurrencyGate,
    handle: BoardHandle,
    gestures: UnboundedReceiver<Gesture>,
    notifications: UnboundedReceiver<Notification>,

    presenters: HashMap<PointId, ItemPresenter>,
    creation: CreationPresenter,
    sort: SortKind,
    /// Bumped on every list rebuild, so gestures can tell which pass they
    /// were issued in.
    epoch: u64,
    loading: bool,
    failed: bool,

    list_view: Option<ViewId>,
    sort_view: Option<ViewId>,
    loading_view: Option<ViewId>,
    empty_view: Option<ViewId>,
    error_view: Option<ViewId>,
}

impl<S: Surface> BoardPresenter<S> {
    /// Builds the board and subscribes it to both sources.
    pub fn new(surface: S, deps: BoardDeps, config: &BoardConfig) -> Self {
        let (gesture_tx, gestures) = mpsc::unbounded();
        let (notification_tx, notifications) = mpsc::unbounded();

        deps.source.subscribe(forward_to(notification_tx.clone()));
        deps.filters.subscribe(forward_to(notification_tx));

        Self {
            surface,
            gate: ConcurrencyGate::from_config(deps.clock, config),
            source: deps.source,
            filters: deps.filters,
            keys: deps.keys,
            handle: BoardHandle::new(gesture_tx),
            gestures,
            notifications,
            presenters: HashMap::new(),
            creation: CreationPresenter::new(),
            sort: SortKind::default(),
            epoch: 0,
            loading: true,
            failed: false,
            list_view: None,
            sort_view: None,
            loading_view: None,
            empty_view: None,
            error_view: None,
        }
    }

    pub fn handle(&self) -> BoardHandle {
        self.handle.clone()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn sort(&self) -> SortKind {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn presenter(&self, id: &str) -> Option<&ItemPresenter> {
        self.presenters.get(id)
    }

    pub fn creation(&self) -> &CreationPresenter {
        &self.creation
    }

    /// Ids with a live presenter, sorted
    pub fn presenter_ids(&self) -> Vec<PointId> {
        let mut ids: Vec<_> = self.presenters.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn editing_count(&self) -> usize {
        self.presenters
            .values()
            .filter(|p| p.mode() == Mode::Editing)
            .count()
    }

    /// First render (the loading state until Init arrives).
    pub fn init(&mut self) {
        self.render_board();
    }

    /// Processes queued input forever. Spawn this on the UI task.
    pub async fn run(mut self) {
        loop {
            self.pump();
            let inbound = {
                let notifications = &mut self.notifications;
                let gestures = &mut self.gestures;
                futures::select_biased! {
                    n = notifications.next() => Inbound::Notification(n),
                    g = gestures.next() => Inbound::Gesture(g),
                }
            };
            match inbound {
                Inbound::Notification(Some(n)) => self.handle_notification(n),
                Inbound::Gesture(Some(g)) => self.handle_gesture(g).await,
                Inbound::Notification(None) | Inbound::Gesture(None) => break,
            }
        }
    }

    /// Handles every queued notification, then every queued gesture.
    pub async fn drain(&mut self) {
        loop {
            self.pump();
            match self.gestures.try_recv() {
                Ok(gesture) => self.handle_gesture(gesture).await,
                Err(_) => break,
            }
        }
    }

    /// Handles every queued notification. Returns how many there were.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(notification) = self.notifications.try_recv() {
            self.handle_notification(notification);
            handled += 1;
        }
        handled
    }

    // ========================
    // Notifications
    // ========================

    pub fn handle_notification(&mut self, notification: Notification) {
        let Notification { kind, point } = notification;
        log::debug!("[BOARD] Notification {:?}", kind);

        if self.failed {
            log::debug!("[BOARD] Ignoring {:?} after load failure", kind);
            return;
        }

        match kind {
            UpdateKind::Init => {
                if !self.loading {
                    log::debug!("[BOARD] Ignoring duplicate Init");
                    return;
                }
                self.loading = false;
                self.surface.show_catalog(self.source.catalog());
                self.render_board();
            }
            UpdateKind::Error => {
                log::warn!("[BOARD] Initial load failed");
                self.loading = false;
                self.failed = true;
                self.surface.set_create_enabled(false);
                self.render_board();
            }
            _ if self.loading => {
                log::debug!("[BOARD] Ignoring {:?} before Init", kind);
            }
            UpdateKind::Patch => self.apply_patch(point),
            UpdateKind::Minor => {
                self.remove_sort();
                self.render_board();
            }
            UpdateKind::Major => {
                self.sort = SortKind::default();
                self.render_board();
            }
        }
    }

    fn apply_patch(&mut self, point: Option<Point>) {
        let Some(point) = point else {
            log::warn!("[BOARD] Patch without a point");
            return;
        };
        let (mut cx, presenters, _) = self.split();
        let Some(presenter) = presenters.get_mut(&point.id) else {
            log::debug!("[BOARD] Patch for {} which is not rendered", point.id);
            return;
        };
        if presenter.mode() == Mode::Default && presenter.point() == Some(&point) {
            log::debug!("[BOARD] Duplicate patch for {}", point.id);
            return;
        }
        presenter.init(point, &mut cx);
    }

    // ========================
    // Gestures
    // ========================

    pub async fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::OpenEditor(key) => self.open_editor(key),
            Gesture::CloseEditor(key) | Gesture::Escape(EditorKey::Item(key)) => {
                self.close_editor(key)
            }
            Gesture::Escape(EditorKey::Creation(key)) | Gesture::CancelCreation(key) => {
                self.cancel_creation(key)
            }
            Gesture::SubmitEdit(key, draft) => self.submit_edit(key, draft).await,
            Gesture::Delete(key) => self.delete(key).await,
            Gesture::ToggleFavorite(key) => self.toggle_favorite(key).await,
            Gesture::OpenCreation => self.open_creation(),
            Gesture::SubmitCreation(key, draft) => self.submit_creation(key, draft).await,
            Gesture::Sort(kind) => self.change_sort(kind),
            Gesture::Filter(kind) => self.change_filter(kind),
        }
    }

    fn open_editor(&mut self, key: ItemKey) {
        if !self.is_live(&key) {
            return;
        }
        self.broadcast_mode_change(Some(&key.id));
        let (mut cx, presenters, _) = self.split();
        expect_presenter(presenters, &key.id).open_editor(&mut cx);
        debug_assert!(self.editing_count() <= 1);
    }

    fn close_editor(&mut self, key: ItemKey) {
        if !self.is_live(&key) {
            return;
        }
        let (mut cx, presenters, _) = self.split();
        expect_presenter(presenters, &key.id).reset_view(&mut cx);
    }

    /// Resets every item editor but `except` and closes the creation form.
    fn broadcast_mode_change(&mut self, except: Option<&PointId>) {
        let (mut cx, presenters, creation) = self.split();
        creation.destroy(&mut cx);
        for (id, presenter) in presenters.iter_mut() {
            if Some(id) != except {
                presenter.reset_view(&mut cx);
            }
        }
    }

    async fn submit_edit(&mut self, key: ItemKey, draft: Point) {
        if !self.is_live(&key) || !self.accepts_form_action(&key.id) {
            return;
        }
        let mut window = self.gate.block(&mut self.surface);
        {
            let (mut cx, presenters, _) = self.split();
            let presenter = expect_presenter(presenters, &key.id);
            presenter.set_draft(draft.clone());
            presenter.set_saving(&mut cx);
        }

        let source = self.source.clone();
        let result = self
            .gate
            .wait(&mut window, &mut self.surface, source.update_point(UpdateKind::Minor, draft))
            .await;
        self.pump();
        if let Err(e) = result {
            log::warn!("[BOARD] Update of {} failed: {}", key.id, e);
            self.abort_item(&key.id);
        }
        self.gate.unblock(window, &mut self.surface).await;
    }

    async fn toggle_favorite(&mut self, key: ItemKey) {
        if !self.is_live(&key) {
            return;
        }
        let mut window = self.gate.block(&mut self.surface);
        let update = {
            let (mut cx, presenters, _) = self.split();
            let presenter = expect_presenter(presenters, &key.id);
            presenter.set_saving(&mut cx);
            presenter.point().map(Point::toggled_favorite)
        };

        let result = match update {
            Some(update) => {
                let source = self.source.clone();
                self.gate
                    .wait(&mut window, &mut self.surface, source.update_point(UpdateKind::Minor, update))
                    .await
            }
            None => Ok(()),
        };
        self.pump();
        if let Err(e) = result {
            log::warn!("[BOARD] Favorite toggle of {} failed: {}", key.id, e);
            self.abort_item(&key.id);
        }
        self.gate.unblock(window, &mut self.surface).await;
    }

    async fn delete(&mut self, key: ItemKey) {
        if !self.is_live(&key) || !self.accepts_form_action(&key.id) {
            return;
        }
        let mut window = self.gate.block(&mut self.surface);
        let target = {
            let (mut cx, presenters, _) = self.split();
            let presenter = expect_presenter(presenters, &key.id);
            presenter.set_deleting(&mut cx);
            presenter.point().cloned()
        };

        let result = match target {
            Some(target) => {
                let source = self.source.clone();
                self.gate
                    .wait(&mut window, &mut self.surface, source.delete_point(UpdateKind::Minor, target))
                    .await
            }
            None => Ok(()),
        };
        self.pump();
        if let Err(e) = result {
            log::warn!("[BOARD] Delete of {} failed: {}", key.id, e);
            self.abort_item(&key.id);
        }
        self.gate.unblock(window, &mut self.surface).await;
    }

    /// Submit and delete come from the edit form, so they only count while
    /// that form is open and idle.
    fn accepts_form_action(&self, id: &PointId) -> bool {
        let Some(presenter) = self.presenters.get(id) else {
            return false;
        };
        if presenter.mode() != Mode::Editing {
            log::debug!("[BOARD] Editor of {} is closed, form action dropped", id);
            return false;
        }
        if presenter.state().is_busy() {
            log::debug!("[BOARD] Editor of {} is busy, form action dropped", id);
            return false;
        }
        true
    }

    /// Rollback after a failed mutation. The item may have been removed by a
    /// notification that arrived meanwhile.
    fn abort_item(&mut self, id: &PointId) {
        let (mut cx, presenters, _) = self.split();
        match presenters.get_mut(id) {
            Some(presenter) => presenter.set_aborting(&mut cx),
            None => log::debug!("[BOARD] {} is gone, nothing to roll back", id),
        }
    }

    fn open_creation(&mut self) {
        if self.loading || self.failed || self.creation.is_active() {
            log::debug!("[BOARD] Creation form not available");
            return;
        }
        self.broadcast_mode_change(None);
        self.sort = SortKind::default();
        self.filters.set_filter(UpdateKind::Major, FilterKind::Everything);
        self.pump();

        if let Some(view) = self.empty_view.take() {
            self.surface.unmount(view);
        }
        let (mut cx, _, creation) = self.split();
        creation.init(Point::blank(Utc::now()), &mut cx);
    }

    fn cancel_creation(&mut self, key: CreationKey) {
        if self.creation.key() != Some(key) {
            log::debug!("[BOARD] Stale creation gesture");
            return;
        }
        let (mut cx, _, creation) = self.split();
        creation.destroy(&mut cx);
        if self.presenters.is_empty() {
            self.render_board();
        }
    }

    async fn submit_creation(&mut self, key: CreationKey, draft: Point) {
        if self.creation.key() != Some(key) {
            log::debug!("[BOARD] Stale creation gesture");
            return;
        }
        let mut window = self.gate.block(&mut self.surface);
        {
            let (mut cx, _, creation) = self.split();
            creation.set_draft(draft.clone());
            creation.set_saving(&mut cx);
        }

        let source = self.source.clone();
        let result = self
            .gate
            .wait(&mut window, &mut self.surface, source.add_point(UpdateKind::Minor, draft))
            .await;
        self.pump();
        if let Err(e) = result {
            log::warn!("[BOARD] Creation failed: {}", e);
            if self.creation.key() == Some(key) {
                let (mut cx, _, creation) = self.split();
                creation.set_aborting(&mut cx);
            }
        }
        self.gate.unblock(window, &mut self.surface).await;
    }

    fn change_sort(&mut self, kind: SortKind) {
        if self.loading || self.failed || kind == self.sort {
            return;
        }
        if !kind.is_enabled() {
            log::debug!("[BOARD] Sort by {} has no ordering, ignored", kind.as_str());
            return;
        }
        self.sort = kind;
        self.render_board();
    }

    fn change_filter(&mut self, kind: FilterKind) {
        if self.loading || self.failed {
            return;
        }
        self.filters.set_filter(UpdateKind::Major, kind);
        self.pump();
    }

    // ========================
    // Rendering
    // ========================

    fn render_board(&mut self) {
        self.clear_list();

        if self.loading {
            self.loading_view = Some(self.mount_board(ViewSpec::Loading, Position::AfterBegin));
            return;
        }
        if self.failed {
            self.error_view = Some(self.mount_board(ViewSpec::LoadError, Position::AfterBegin));
            return;
        }

        let now = Utc::now();
        let all = self.source.points();
        let filter = self.filters.filter();
        let available: Vec<_> = FilterKind::ALL
            .into_iter()
            .filter(|kind| has_matches(&all, *kind, now))
            .collect();
        self.surface.show_filter(filter, &available);
        self.render_sort();

        let points = visible_points(&all, filter, self.sort, now);
        if points.is_empty() {
            self.empty_view = Some(self.mount_board(ViewSpec::Empty { filter }, Position::BeforeEnd));
            self.remove_sort();
        } else {
            for point in points {
                self.render_point(point);
            }
        }

        if self.list_view.is_none() {
            self.list_view = Some(self.mount_board(ViewSpec::PointList, Position::BeforeEnd));
        }
    }

    fn render_point(&mut self, point: Point) {
        if self.presenters.contains_key(&point.id) {
            log::warn!("[BOARD] Duplicate point {} in source, skipped", point.id);
            return;
        }
        let key = ItemKey {
            id: point.id.clone(),
            epoch: self.epoch,
        };
        let mut presenter = ItemPresenter::new(key);
        let (mut cx, presenters, _) = self.split();
        presenter.init(point, &mut cx);
        presenters.insert(presenter.key().id.clone(), presenter);
    }

    fn render_sort(&mut self) {
        self.remove_sort();
        self.sort_view = Some(self.mount_board(ViewSpec::SortBar { active: self.sort }, Position::AfterBegin));
    }

    fn remove_sort(&mut self) {
        if let Some(view) = self.sort_view.take() {
            self.surface.unmount(view);
        }
    }

    /// Destroys every presenter and the creation form, drops the messages
    /// and starts a new epoch.
    fn clear_list(&mut self) {
        let (mut cx, presenters, creation) = self.split();
        for presenter in presenters.values_mut() {
            presenter.destroy(&mut cx);
        }
        presenters.clear();
        creation.destroy(&mut cx);

        for view in [
            self.loading_view.take(),
            self.empty_view.take(),
            self.error_view.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.surface.unmount(view);
        }
        self.epoch += 1;
    }

    fn mount_board(&mut self, spec: ViewSpec, position: Position) -> ViewId {
        let view = self.surface.create(spec);
        self.surface.mount(view, Container::Board, position);
        view
    }

    /// Whether an item gesture still has a target. Gestures queued before a
    /// rebuild follow their point to its new presenter; a point that is gone
    /// makes them stale.
    fn is_live(&self, key: &ItemKey) -> bool {
        if self.presenters.contains_key(&key.id) {
            if key.epoch != self.epoch {
                log::debug!("[BOARD] Gesture for {} re-targeted to pass {}", key.id, self.epoch);
            }
            return true;
        }
        if key.epoch < self.epoch {
            log::debug!("[BOARD] Stale gesture for {} from pass {}", key.id, key.epoch);
            return false;
        }
        log::error!("[BOARD] No presenter for {} in the current pass", key.id);
        panic!("no presenter for point {} in the current render pass", key.id);
    }

    fn split(&mut self) -> (RenderCtx<'_>, &mut HashMap<PointId, ItemPresenter>, &mut CreationPresenter) {
        let cx = RenderCtx {
            surface: &mut self.surface,
            keys: &*self.keys,
            handle: &self.handle,
            create_locked: self.failed,
        };
        (cx, &mut self.presenters, &mut self.creation)
    }
}

fn forward_to(tx: UnboundedSender<Notification>) -> crate::source::Observer {
    Box::new(move |notification: &Notification| {
        if tx.unbounded_send(notification.clone()).is_err() {
            log::debug!("[BOARD] Notification after board shutdown");
        }
    })
}

fn expect_presenter<'a>(
    presenters: &'a mut HashMap<PointId, ItemPresenter>,
    id: &PointId,
) -> &'a mut ItemPresenter {
    match presenters.get_mut(id) {
        Some(presenter) => presenter,
        None => panic!("no presenter for point {}", id),
    }
}
