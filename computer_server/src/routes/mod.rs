//! HTTP routes — the computer pages plus system endpoints.

pub mod computers;

use std::sync::Arc;

use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use axum::Router;

use crate::flash::FlashSigner;
use crate::store::{CompanyRepository, ComputerRepository};

/// Shared state for route handlers.
#[derive(Clone)]
pub struct AppState {
    pub computers: Arc<dyn ComputerRepository>,
    pub companies: Arc<dyn CompanyRepository>,
    pub flash: FlashSigner,
}

/// Build the application's Axum router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        // Computers
        .route("/computers", get(computers::list).post(computers::save))
        .route("/computers/new", get(computers::create))
        .route("/computers/{id}", get(computers::edit).post(computers::update))
        .route(
            "/computers/{id}/delete",
            get(computers::delete).post(computers::delete),
        )
        // System
        .route("/health", get(health))
        .route("/version", get(version))
        .with_state(state)
}

async fn index() -> Redirect {
    Redirect::to(computers::HOME)
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
