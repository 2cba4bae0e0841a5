use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiError;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const COULD_NOT_SEND_MESSAGE: &str = "Failed to send message. Please try again later.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

pub fn error(code: StatusCode, error: impl Into<String>) -> Response {
    (code, Json(ApiError::new(error))).into_response()
}
