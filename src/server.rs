//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::api;
use crate::models::AppConfig;
use crate::services::Converter;

/// Largest accepted PNG upload.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkshot API",
        description = "Converts rendered screenshots into BMP files for e-ink displays",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_convert, api::handle_palettes),
    components(schemas(api::ErrorResponse, api::PalettesResponse, api::PanelInfo)),
    tags((name = "Conversion", description = "PNG to BMP conversion"))
)]
pub struct ApiDoc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<Converter>,
}

/// Create application state from configuration.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let converter = Converter::new(Arc::new(config))
        .map_err(|e| anyhow::anyhow!("Failed to create converter: {e}"))?;

    Ok(AppState {
        converter: Arc::new(converter),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/convert", post(api::handle_convert))
        .route("/palettes", get(api::handle_palettes))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state.converter)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
