//! Catalog Admin Frontend Entry Point

mod api;
mod app;
mod cache;
mod components;
mod config;
mod context;
mod listing;
mod models;
mod pages;
mod queries;
mod query_state;
mod storage;
mod store;
mod token;
mod validation;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::error_1(&format!("[APP] Logger init failed: {}", e).into());
    }

    log::info!("[APP] Starting against {}", config::config().api_base_url);
    mount_to_body(App);
}
