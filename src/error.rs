// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::credentials::CredentialError;
use crate::auth::TokenError;
use crate::types::FieldError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{0}")]
    BadRequest(String),
    #[error("{message}")]
    ValidationError {
        message: String,
        details: Vec<FieldError>,
    },

    // 401 Unauthorized
    #[error("{0}")]
    Unauthorized(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // 500 Internal Server Error
    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, details } => json!({
                "error": message,
                "details": details,
            }),
            _ => json!({ "error": self.message() }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid(_) | TokenError::Expired => ApiError::unauthorized("Invalid token"),
            TokenError::MissingSecret | TokenError::Encoding(_) => {
                // Never expose signing problems to clients
                tracing::error!("Token service error: {}", err);
                ApiError::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        tracing::error!("Credential verification error: {}", err);
        ApiError::internal_server_error("Internal server error")
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_details() {
        let err = ApiError::validation_error(
            "Invalid input",
            vec![FieldError::new("email", "Invalid email format")],
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_json();
        assert_eq!(body["error"], "Invalid input");
        assert_eq!(body["details"][0]["message"], "Invalid email format");
    }

    #[test]
    fn signing_failures_are_hidden_from_clients() {
        let err: ApiError = TokenError::MissingSecret.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");

        let err: ApiError = TokenError::Expired.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
