//! Error types for the API, rendered in the response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tapline_auth::Denial;
use thiserror::Error;

/// Errors a route handler can answer with. Every variant renders as
/// `{"success": false, "error": <status>, "message": <text>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested record (or any record at all) does not exist.
    #[error("Resource not found")]
    NotFound,

    /// Request body missing or unusable, or the write was rejected.
    #[error("unprocessable")]
    Unprocessable,

    /// Route exists but not for this HTTP method.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Authorization gate denied the request.
    #[error("{}", .0.message)]
    Denied(Denial),

    /// Anything the caller cannot act on.
    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<Denial> for ApiError {
    fn from(denial: Denial) -> Self {
        ApiError::Denied(denial)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Denied(denial) => StatusCode::from_u16(denial.status)
                .unwrap_or(StatusCode::UNAUTHORIZED),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!("internal error: {err:#}");
        }

        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapline_auth::AuthError;

    #[test]
    fn test_denial_keeps_gate_status() {
        let err = ApiError::from(Denial::from(AuthError::Unauthorized));
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let err = ApiError::from(Denial::from(AuthError::AuthorizationHeaderMissing));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_route_error_statuses() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unprocessable.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
