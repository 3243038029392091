//! HTTP surface of the blog backend.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;

use axum::{middleware::from_fn, routing::get, Router};

use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Builds the full router: `/health` plus the `/api` tree.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api::routes())
        .layer(from_fn(middleware::log_request))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
