//! Board Messages
//!
//! Loading, load-error and empty-list notices.

use leptos::prelude::*;

use crate::models::FilterKind;

pub const LOADING_TEXT: &str = "Loading...";
pub const LOAD_ERROR_TEXT: &str = "Failed to load latest route information";

#[component]
pub fn Message(#[prop(into)] text: String) -> impl IntoView {
    view! { <p class="trip-events__msg">{text}</p> }
}

/// Notice for a filter that leaves nothing to show
#[component]
pub fn EmptyMessage(filter: FilterKind) -> impl IntoView {
    view! { <Message text=filter.empty_message() /> }
}
