use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use eink_bmp::BmpError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request body is empty")]
    EmptyBody,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParam { name: &'static str, message: String },

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Unknown panel: {0}")]
    UnknownPanel(String),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error(transparent)]
    Bmp(#[from] BmpError),
}

impl ConvertError {
    pub fn invalid_param(name: &'static str, message: impl ToString) -> Self {
        ConvertError::InvalidParam {
            name,
            message: message.to_string(),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ConvertError::InvalidParam { .. } | ConvertError::Bmp(_) => StatusCode::BAD_REQUEST,
            ConvertError::UnknownDevice(_) | ConvertError::UnknownPanel(_) => StatusCode::NOT_FOUND,
            ConvertError::PngDecode(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

impl From<png::DecodingError> for ConvertError {
    fn from(e: png::DecodingError) -> Self {
        ConvertError::PngDecode(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::EmptyBody | ApiError::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Convert(e) => (e.status(), e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
