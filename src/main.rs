//! Trip Board Frontend Entry Point

mod app;
mod browser;
mod commands;
mod components;
mod config;
mod context;
mod error;
mod escape;
mod filter;
mod gate;
mod logger;
mod model;
mod models;
mod presenter;
mod sort;
mod source;
mod store;
mod surface;
#[cfg(test)]
mod testing;

use app::App;
use config::BoardConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = BoardConfig::from_window();
    logger::init(config.level_filter());
    mount_to_body(move || view! { <App config=config /> });
}
