#![allow(warnings)]
//! Cloud Docs Frontend Entry Point

mod api;
mod app;
mod bulk;
mod comments;
mod components;
mod config;
mod desktop;
mod dialog;
mod error;
mod explorer;
mod modal;
mod models;
mod nav;
mod page;
mod reconcile;
mod router;
mod session;
mod settings;
mod store;
mod toast;
mod updater;

use app::App;
use config::CloudConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = CloudConfig::load();
    if let Err(e) = console_log::init_with_level(config.log_level()) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    log::info!("[app] starting against {}", config.base_url);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
