use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::questions::generator::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(e) => {
                let (status, code) = match e {
                    GenerationError::MissingCredential => {
                        (StatusCode::UNAUTHORIZED, "MISSING_CREDENTIAL")
                    }
                    GenerationError::TransportFailure(_) => {
                        (StatusCode::BAD_GATEWAY, "TRANSPORT_FAILURE")
                    }
                    GenerationError::ApiError { status, .. } => {
                        (upstream_status(*status), "UPSTREAM_ERROR")
                    }
                    GenerationError::MalformedResponse(_) => {
                        (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE")
                    }
                    GenerationError::InvalidResponseShape(_) => {
                        (StatusCode::BAD_GATEWAY, "INVALID_RESPONSE_SHAPE")
                    }
                };
                (status, code, e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Upstream auth and rate-limit rejections keep their meaning; everything else is a bad gateway.
fn upstream_status(status: u16) -> StatusCode {
    match status {
        401 | 403 => StatusCode::UNAUTHORIZED,
        429 => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_unauthorized() {
        let response = AppError::from(GenerationError::MissingCredential).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_upstream_failures_are_bad_gateway() {
        let errors = [
            GenerationError::ApiError {
                status: 500,
                message: "upstream exploded".to_string(),
            },
            GenerationError::MalformedResponse("eof".to_string()),
            GenerationError::InvalidResponseShape("missing `questions`".to_string()),
        ];
        for e in errors {
            let response = AppError::from(e).into_response();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::Validation("no skills".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_status_carried_for_auth_and_rate_limit() {
        let cases = [
            (401, StatusCode::UNAUTHORIZED),
            (403, StatusCode::UNAUTHORIZED),
            (429, StatusCode::TOO_MANY_REQUESTS),
            (503, StatusCode::BAD_GATEWAY),
        ];
        for (upstream, expected) in cases {
            let error = GenerationError::ApiError {
                status: upstream,
                message: "rejected".to_string(),
            };
            assert_eq!(AppError::from(error).into_response().status(), expected);
        }
    }
}
