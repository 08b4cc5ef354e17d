//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves the Leptos app with SSR, its compiled WASM/CSS bundle under `/pkg`,
//! and a health probe. The business REST API is a separate service; the
//! front-end reaches it through its configured base URL.

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// API-free app router: SSR routes, static bundle, health probe.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn app(config: &ServerConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(backoffice_web::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || backoffice_web::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root = config
        .site_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(leptos_options.site_root.as_ref()));
    tracing::info!(site_root = %site_root.display(), "serving static bundle");

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
