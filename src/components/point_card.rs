//! Point Card Component
//!
//! Read-only row for one point.

use chrono::Duration;
use leptos::prelude::*;

use super::shake::use_shake;
use crate::context::use_app_context;
use crate::models::Point;
use crate::presenter::{Gesture, ItemKey};
use crate::store::SurfaceStateStoreFields;

/// `01D 02H 30M`, dropping leading zero units
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    let (days, hours, mins) = (minutes / (24 * 60), minutes / 60 % 24, minutes % 60);
    if days > 0 {
        format!("{:02}D {:02}H {:02}M", days, hours, mins)
    } else if hours > 0 {
        format!("{:02}H {:02}M", hours, mins)
    } else {
        format!("{:02}M", mins)
    }
}

#[component]
pub fn PointCard(item_key: ItemKey, point: Point, shakes: Signal<u32>) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let shaking = use_shake(shakes);

    let title_point = point.clone();
    let title = move || {
        store.catalog().with(|catalog| {
            format!("{} {}", title_point.point_type, catalog.destination_name(&title_point))
        })
    };
    let offers_point = point.clone();
    let offers = move || {
        store.catalog().with(|catalog| {
            catalog
                .selected_offers(&offers_point)
                .into_iter()
                .map(|offer| view! {
                    <li class="event__offer">
                        <span class="event__offer-title">{offer.title.clone()}</span>
                        " +€ "
                        <span class="event__offer-price">{offer.price}</span>
                    </li>
                })
                .collect_view()
        })
    };

    let favorite_ctx = ctx.clone();
    let favorite_key = item_key.clone();
    let favorite_class = if point.is_favorite {
        "event__favorite-btn event__favorite-btn--active"
    } else {
        "event__favorite-btn"
    };

    view! {
        <li class="trip-events__item">
            <div class=move || if shaking.get() { "event shake" } else { "event" }>
                <time class="event__date" datetime=point.date_from.format("%Y-%m-%d").to_string()>
                    {point.date_from.format("%b %d").to_string()}
                </time>
                <h3 class="event__title">{title}</h3>
                <div class="event__schedule">
                    <p class="event__time">
                        <time class="event__start-time">{point.date_from.format("%H:%M").to_string()}</time>
                        " - "
                        <time class="event__end-time">{point.date_to.format("%H:%M").to_string()}</time>
                    </p>
                    <p class="event__duration">{format_duration(point.duration())}</p>
                </div>
                <p class="event__price">
                    "€ " <span class="event__price-value">{point.base_price}</span>
                </p>
                <ul class="event__selected-offers">{offers}</ul>
                <button
                    class=favorite_class
                    type="button"
                    on:click=move |_| favorite_ctx.send(Gesture::ToggleFavorite(favorite_key.clone()))
                >
                    <span class="visually-hidden">"Add to favorite"</span>
                    "★"
                </button>
                <button
                    class="event__rollup-btn"
                    type="button"
                    on:click=move |_| ctx.send(Gesture::OpenEditor(item_key.clone()))
                >
                    <span class="visually-hidden">"Open event"</span>
                </button>
            </div>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(45)), "45M");
        assert_eq!(format_duration(Duration::minutes(150)), "02H 30M");
        assert_eq!(format_duration(Duration::minutes(24 * 60 + 5)), "01D 00H 05M");
        assert_eq!(format_duration(Duration::minutes(-10)), "00M");
    }
}
