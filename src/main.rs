//! Aim.Link Mind-Map Frontend Entry Point

mod logger;
mod session;
mod tasks;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    mount_to_body(App);
}
