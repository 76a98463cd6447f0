//! Board View Component
//!
//! Renders the views the presenters placed in the store.

use leptos::prelude::*;

use super::messages::{EmptyMessage, Message, LOADING_TEXT, LOAD_ERROR_TEXT};
use super::{PointCard, PointEditor, SortBar};
use crate::context::use_app_context;
use crate::store::{store_board, store_list, store_view};
use crate::surface::{ViewId, ViewSpec};

/// The board section: sort bar, messages and the point list
#[component]
pub fn BoardView() -> impl IntoView {
    let store = use_app_context().store;

    view! {
        <section class="trip-events">
            <h2 class="visually-hidden">"Trip events"</h2>
            <For
                each=move || store_board(&store)
                key=|id| *id
                children=|id| view! { <ViewSlot id=id /> }
            />
        </section>
    }
}

#[component]
fn PointList() -> impl IntoView {
    let store = use_app_context().store;

    view! {
        <ul class="trip-events__list">
            <For
                each=move || store_list(&store)
                key=|id| *id
                children=|id| view! { <ViewSlot id=id /> }
            />
        </ul>
    }
}

/// One view, re-rendered when its spec changes. Type-erased, since the
/// point list nests slots inside a slot.
#[component]
fn ViewSlot(id: ViewId) -> AnyView {
    let store = use_app_context().store;
    let spec = Memo::new(move |_| store_view(&store, id).map(|entry| entry.spec));
    let shakes = Signal::derive(move || store_view(&store, id).map_or(0, |entry| entry.shakes));

    (move || match spec.get() {
        Some(ViewSpec::Loading) => view! { <Message text=LOADING_TEXT /> }.into_any(),
        Some(ViewSpec::LoadError) => view! { <Message text=LOAD_ERROR_TEXT /> }.into_any(),
        Some(ViewSpec::Empty { filter }) => view! { <EmptyMessage filter=filter /> }.into_any(),
        Some(ViewSpec::SortBar { active }) => view! { <SortBar active=active /> }.into_any(),
        Some(ViewSpec::PointList) => view! { <PointList /> }.into_any(),
        Some(ViewSpec::Card { key, point }) => {
            view! { <PointCard item_key=key point=point shakes=shakes /> }.into_any()
        }
        Some(ViewSpec::Editor { key, form }) => {
            view! { <PointEditor editor=key form=form shakes=shakes /> }.into_any()
        }
        None => ().into_any(),
    })
    .into_any()
}
