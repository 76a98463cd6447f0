//! New Event Button Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::presenter::Gesture;
use crate::store::SurfaceStateStoreFields;

/// Opens the creation form; disabled while it is open or after a load error
#[component]
pub fn NewEventButton() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    view! {
        <button
            class="trip-main__event-add-btn btn btn--big btn--yellow"
            type="button"
            disabled=move || !store.create_enabled().get()
            on:click=move |_| ctx.send(Gesture::OpenCreation)
        >
            "New event"
        </button>
    }
}
