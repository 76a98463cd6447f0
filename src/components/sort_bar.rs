//! Sort Bar Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::SortKind;
use crate::presenter::Gesture;

/// Sort radios. Criteria without an ordering are shown but disabled.
#[component]
pub fn SortBar(active: SortKind) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <form class="trip-events__trip-sort trip-sort" action="#" method="get">
            {SortKind::ALL.into_iter().map(|kind| {
                let ctx = ctx.clone();
                let id = format!("sort-{}", kind.as_str());
                view! {
                    <div class=format!("trip-sort__item trip-sort__item--{}", kind.as_str())>
                        <input
                            id=id.clone()
                            class="trip-sort__input visually-hidden"
                            type="radio"
                            name="trip-sort"
                            value=id.clone()
                            checked=kind == active
                            disabled=!kind.is_enabled()
                            on:change=move |_| ctx.send(Gesture::Sort(kind))
                        />
                        <label class="trip-sort__btn" for=id>{kind.label()}</label>
                    </div>
                }
            }).collect_view()}
        </form>
    }
}
