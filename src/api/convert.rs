use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ConvertParams;
use crate::services::Converter;

/// Error response for all endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error message
    pub error: String,
}

/// Convert a PNG to BMP
///
/// The request body is the PNG. Query parameters override the named device
/// profile, which overrides the built-in defaults.
#[utoipa::path(
    post,
    path = "/convert",
    request_body(content = Vec<u8>, content_type = "image/png", description = "PNG image"),
    responses(
        (status = 200, description = "BMP image", content_type = "image/bmp"),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Unknown device or panel", body = ErrorResponse),
        (status = 415, description = "Body is not a decodable PNG", body = ErrorResponse),
    ),
    params(ConvertParams),
    tag = "Conversion"
)]
pub async fn handle_convert(
    State(converter): State<Arc<Converter>>,
    query: Result<Query<ConvertParams>, QueryRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    tracing::debug!(
        size_bytes = body.len(),
        device = ?params.device,
        bits = ?params.bits,
        "Convert request received"
    );

    // Quantization is CPU-bound
    let image = tokio::task::spawn_blocking(move || converter.convert(&body, &params))
        .await
        .map_err(|e| ApiError::Internal(format!("Task error: {e}")))??;

    let len = image.len().to_string();
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, image.content_type()),
            (header::CONTENT_LENGTH, len.as_str()),
        ],
        Bytes::from(image.into_bytes()),
    )
        .into_response())
}

/// A configured panel palette
#[derive(Debug, Serialize, ToSchema)]
pub struct PanelInfo {
    /// Colors the panel shows, as hex
    pub colors: Vec<String>,
    /// Colors written to the file, as hex
    pub device_colors: Vec<String>,
}

/// Configured panels, devices and aliases
#[derive(Debug, Serialize, ToSchema)]
pub struct PalettesResponse {
    pub panels: BTreeMap<String, PanelInfo>,
    pub devices: Vec<String>,
    pub aliases: BTreeMap<String, String>,
}

/// List configured palettes
///
/// Panels are listed after parsing, so invalid panels are left out.
#[utoipa::path(
    get,
    path = "/palettes",
    responses(
        (status = 200, description = "Configured panels and devices", body = PalettesResponse),
    ),
    tag = "Conversion"
)]
pub async fn handle_palettes(State(converter): State<Arc<Converter>>) -> Json<PalettesResponse> {
    let config = converter.config();
    let panels = config
        .panels
        .keys()
        .filter_map(|name| {
            let palette = converter.panel(name)?;
            Some((
                name.clone(),
                PanelInfo {
                    colors: palette.colors().iter().map(|c| c.to_string()).collect(),
                    device_colors: palette
                        .device_colors()
                        .iter()
                        .map(|c| c.to_string())
                        .collect(),
                },
            ))
        })
        .collect();

    Json(PalettesResponse {
        panels,
        devices: config.devices.keys().cloned().collect(),
        aliases: config.aliases.clone(),
    })
}
