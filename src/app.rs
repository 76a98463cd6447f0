//! Trip Board App
//!
//! Wires the models, the board presenter and the Leptos views together.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_keyscope::KeyScope;
use reactive_stores::Store;

use crate::browser::{BrowserClock, BrowserKeys};
use crate::commands::TauriPointsApi;
use crate::components::{BoardView, FilterBar, NewEventButton};
use crate::config::BoardConfig;
use crate::context::AppContext;
use crate::model::{FilterModel, PointsModel};
use crate::presenter::{BoardDeps, BoardPresenter};
use crate::store::{LeptosSurface, SurfaceState, SurfaceStateStoreFields};
use crate::surface::BlockState;

#[component]
pub fn App(config: BoardConfig) -> impl IntoView {
    let store = Store::new(SurfaceState::default());
    let points = Rc::new(PointsModel::new(TauriPointsApi));
    let deps = BoardDeps {
        source: points.clone(),
        filters: Rc::new(FilterModel::new()),
        keys: Rc::new(BrowserKeys::new(KeyScope::new())),
        clock: Rc::new(BrowserClock),
    };

    let mut board = BoardPresenter::new(LeptosSurface::new(store), deps, &config);
    board.init();
    provide_context(AppContext::new(store, board.handle()));

    spawn_local(board.run());
    spawn_local(async move {
        log::info!("[APP] Loading points");
        points.load().await;
    });

    let page_class = move || match store.block().get() {
        BlockState::Unblocked => "page-body",
        BlockState::Blocked => "page-body ui-blocker--blocked",
        BlockState::Indicated => "page-body ui-blocker--on",
    };

    view! {
        <div class=page_class>
            <header class="page-header">
                <div class="trip-main">
                    <div class="trip-main__trip-controls trip-controls">
                        <div class="trip-controls__filters">
                            <h2 class="visually-hidden">"Filter events"</h2>
                            <FilterBar />
                        </div>
                    </div>
                    <NewEventButton />
                </div>
            </header>
            <main class="page-main">
                <BoardView />
            </main>
        </div>
    }
}
