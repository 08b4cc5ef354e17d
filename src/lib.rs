//! # backoffice-web
//!
//! Leptos + WASM front-end for the commerce/finance back office.
//!
//! This crate contains the session store, the route- and role-level access
//! guards, the bearer-authenticated REST client, and the pages that sit
//! behind them. Business data (clients, purchases, invoices, billets,
//! combined scores) lives behind the REST API.

pub mod app;
pub mod components;
pub mod config;
pub mod guard;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: hydrate the server-rendered `App`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already initialised");
    }
    leptos::mount::hydrate_body(app::App);
}
