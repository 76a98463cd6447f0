//! Filter Bar Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::FilterKind;
use crate::presenter::Gesture;
use crate::store::SurfaceStateStoreFields;

/// Filter radios; a filter without matching points is disabled
#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    view! {
        <form class="trip-filters" action="#" method="get">
            {FilterKind::ALL.into_iter().map(|kind| {
                let ctx = ctx.clone();
                let id = format!("filter-{}", kind.as_str());
                view! {
                    <div class="trip-filters__filter">
                        <input
                            id=id.clone()
                            class="trip-filters__filter-input visually-hidden"
                            type="radio"
                            name="trip-filter"
                            value=kind.as_str()
                            prop:checked=move || store.filter().get() == kind
                            disabled=move || !store.available_filters().read().contains(&kind)
                            on:change=move |_| ctx.send(Gesture::Filter(kind))
                        />
                        <label class="trip-filters__filter-label" for=id>{kind.as_str()}</label>
                    </div>
                }
            }).collect_view()}
        </form>
    }
}
