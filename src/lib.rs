pub mod admin;
pub mod app;
pub mod auth;
pub mod backend;
pub mod catalog;
pub mod components;
pub mod connectivity;
pub mod migration;
pub mod models;
pub mod profile;
pub mod utils;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    utils::panic_hook::init();

    leptos::mount_to_body(App);
}
