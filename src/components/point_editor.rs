//! Point Editor Component
//!
//! Edit form shared by existing points and the creation form.

use chrono::{DateTime, NaiveDateTime, Utc};
use leptos::prelude::*;

use super::shake::use_shake;
use crate::context::use_app_context;
use crate::presenter::{EditorKey, Gesture};
use crate::store::SurfaceStateStoreFields;
use crate::surface::EditForm;

/// Event types offered by the type selector
pub const POINT_TYPES: &[&str] = &[
    "taxi",
    "bus",
    "train",
    "ship",
    "drive",
    "flight",
    "check-in",
    "sightseeing",
    "restaurant",
];

const INPUT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Value for a `datetime-local` input
pub fn format_input_date(date: DateTime<Utc>) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

pub fn parse_input_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, INPUT_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[component]
pub fn PointEditor(editor: EditorKey, form: EditForm, shakes: Signal<u32>) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let shaking = use_shake(shakes);
    let EditForm { point, state, is_new } = form;
    let (draft, set_draft) = signal(point);
    let point_type = Memo::new(move |_| draft.with(|p| p.point_type.clone()));
    let destination = Memo::new(move |_| draft.with(|p| p.destination.clone()));

    let destination_options = move || {
        store.catalog().with(|catalog| {
            catalog
                .destinations
                .iter()
                .map(|d| {
                    let id = d.id.clone();
                    let option_id = id.clone();
                    view! {
                        <option value=id selected=move || destination.get() == option_id>
                            {d.name.clone()}
                        </option>
                    }
                })
                .collect_view()
        })
    };

    let offer_choices = move || {
        let point_type = point_type.get();
        store.catalog().with(|catalog| {
            catalog
                .offers_for(&point_type)
                .iter()
                .map(|offer| {
                    let input_id = format!("event-offer-{}", offer.id);
                    let checked_id = offer.id.clone();
                    let toggle_id = offer.id.clone();
                    view! {
                        <div class="event__offer-selector">
                            <input
                                class="event__offer-checkbox visually-hidden"
                                id=input_id.clone()
                                type="checkbox"
                                prop:checked=move || draft.with(|p| p.offers.contains(&checked_id))
                                on:change=move |_| set_draft.update(|p| p.toggle_offer(&toggle_id))
                            />
                            <label class="event__offer-label" for=input_id>
                                <span class="event__offer-title">{offer.title.clone()}</span>
                                " +€ "
                                <span class="event__offer-price">{offer.price}</span>
                            </label>
                        </div>
                    }
                })
                .collect_view()
        })
    };

    let destination_details = move || {
        let id = destination.get();
        store.catalog().with(|catalog| {
            catalog.destination(&id).map(|d| view! {
                <section class="event__section event__section--destination">
                    <h3 class="event__section-title event__section-title--destination">"Destination"</h3>
                    <p class="event__destination-description">{d.description.clone()}</p>
                    <div class="event__photos-tape">
                        {d.pictures.iter().map(|picture| view! {
                            <img
                                class="event__photo"
                                src=picture.src.clone()
                                alt=picture.description.clone()
                            />
                        }).collect_view()}
                    </div>
                </section>
            })
        })
    };

    let submit_ctx = ctx.clone();
    let submit_key = editor.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = draft.get_untracked();
        match &submit_key {
            EditorKey::Item(key) => submit_ctx.send(Gesture::SubmitEdit(key.clone(), draft)),
            EditorKey::Creation(key) => submit_ctx.send(Gesture::SubmitCreation(*key, draft)),
        }
    };

    let reset_ctx = ctx.clone();
    let reset_key = editor.clone();
    let on_reset = move |_: web_sys::MouseEvent| match &reset_key {
        EditorKey::Item(key) => reset_ctx.send(Gesture::Delete(key.clone())),
        EditorKey::Creation(key) => reset_ctx.send(Gesture::CancelCreation(*key)),
    };

    let save_label = if state.saving { "Saving..." } else { "Save" };
    let reset_label = match (is_new, state.deleting) {
        (true, _) => "Cancel",
        (false, true) => "Deleting...",
        (false, false) => "Delete",
    };

    let rollup = match editor {
        EditorKey::Item(key) => Some(view! {
            <button
                class="event__rollup-btn"
                type="button"
                disabled=state.disabled
                on:click=move |_| ctx.send(Gesture::CloseEditor(key.clone()))
            >
                <span class="visually-hidden">"Close event"</span>
            </button>
        }),
        EditorKey::Creation(_) => None,
    };

    view! {
        <li class="trip-events__item">
            <form
                class=move || if shaking.get() { "event event--edit shake" } else { "event event--edit" }
                action="#"
                method="post"
                on:submit=on_submit
            >
                <fieldset class="event__header" disabled=state.disabled>
                    <select
                        class="event__type-select"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_draft.update(|p| p.set_type(value));
                        }
                    >
                        {POINT_TYPES.iter().map(|&kind| view! {
                            <option value=kind selected=move || point_type.get() == kind>
                                {kind}
                            </option>
                        }).collect_view()}
                    </select>
                    <select
                        class="event__input event__input--destination"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_draft.update(|p| p.destination = value);
                        }
                    >
                        <option value="" selected=move || destination.get().is_empty()>
                            "Choose destination"
                        </option>
                        {destination_options}
                    </select>
                    <input
                        class="event__input event__input--time"
                        type="datetime-local"
                        prop:value=move || format_input_date(draft.get().date_from)
                        on:change=move |ev| {
                            if let Some(date) = parse_input_date(&event_target_value(&ev)) {
                                set_draft.update(|p| p.date_from = date);
                            }
                        }
                    />
                    <input
                        class="event__input event__input--time"
                        type="datetime-local"
                        prop:value=move || format_input_date(draft.get().date_to)
                        on:change=move |ev| {
                            if let Some(date) = parse_input_date(&event_target_value(&ev)) {
                                set_draft.update(|p| p.date_to = date);
                            }
                        }
                    />
                    <input
                        class="event__input event__input--price"
                        type="number"
                        min="0"
                        prop:value=move || draft.get().base_price.to_string()
                        on:input=move |ev| {
                            if let Ok(price) = event_target_value(&ev).parse::<u32>() {
                                set_draft.update(|p| p.base_price = price);
                            }
                        }
                    />
                    <button class="event__save-btn btn btn--blue" type="submit">{save_label}</button>
                    <button class="event__reset-btn" type="button" on:click=on_reset>{reset_label}</button>
                    {rollup}
                </fieldset>
                <fieldset class="event__details" disabled=state.disabled>
                    <section class="event__section event__section--offers">
                        <h3 class="event__section-title event__section-title--offers">"Offers"</h3>
                        <div class="event__available-offers">{offer_choices}</div>
                    </section>
                    {destination_details}
                </fieldset>
            </form>
        </li>
    }
}
