use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// At least one reading has never been fetched successfully.
    #[error("Unable to fetch required data. Please try again later.")]
    DataUnavailable,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            AppError::DataUnavailable => {
                tracing::warn!("Conditions requested before both readings were available");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}
