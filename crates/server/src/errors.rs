use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// HTTP error rendered as `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Submission not found")
    }

    fn internal(context: &str, e: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: {e}"))
    }

    pub fn save_failed(e: ServiceError) -> Self {
        Self::internal("Failed to save submission", e)
    }

    pub fn list_failed(e: ServiceError) -> Self {
        Self::internal("Failed to retrieve submissions", e)
    }

    /// Lookup errors keep not-found distinct from storage failures.
    pub fn get_failed(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::not_found(),
            other => Self::internal("Failed to retrieve submission", other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = %self.detail, "request failed");
        }
        (self.status, Json(serde_json::json!({"detail": self.detail}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_embed_raw_text() {
        let e = ApiError::save_failed(ServiceError::Storage("Permission denied (os error 13)".into()));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.detail, "Failed to save submission: Permission denied (os error 13)");

        let e = ApiError::list_failed(ServiceError::Storage("boom".into()));
        assert_eq!(e.detail, "Failed to retrieve submissions: boom");
    }

    #[test]
    fn lookup_maps_not_found_to_404() {
        assert_eq!(ApiError::get_failed(ServiceError::not_found("submission")), ApiError::not_found());
        let e = ApiError::get_failed(ServiceError::Storage("bad json".into()));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.detail, "Failed to retrieve submission: bad json");
    }
}
