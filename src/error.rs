// HTTP API Error Types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::SupplierAuthError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
            "code": self.error_code()
        })
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
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

impl From<SupplierAuthError> for ApiError {
    fn from(err: SupplierAuthError) -> Self {
        match err {
            SupplierAuthError::Unauthenticated | SupplierAuthError::Unauthorized => {
                ApiError::unauthorized(err.to_string())
            }
            SupplierAuthError::NotFound => ApiError::not_found(err.to_string()),
            SupplierAuthError::Store(store_err) => {
                // Log the real error but return generic message
                tracing::error!("Supplier store error: {}", store_err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            SupplierAuthError::Session(session_err) => {
                tracing::error!("Session error: {}", session_err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::StoreError;

    #[test]
    fn unauthenticated_and_not_found_differ() {
        let unauthenticated = ApiError::from(SupplierAuthError::Unauthenticated);
        let not_found = ApiError::from(SupplierAuthError::NotFound);

        assert_eq!(unauthenticated.status_code(), 401);
        assert_eq!(not_found.status_code(), 404);
        assert_ne!(unauthenticated.message(), not_found.message());
        assert!(not_found.message().contains("contact support"));
    }

    #[test]
    fn store_errors_are_not_echoed() {
        let err = ApiError::from(SupplierAuthError::Store(StoreError::Unavailable(
            "connection refused at 10.0.0.5:5432".to_string(),
        )));

        assert_eq!(err.status_code(), 500);
        assert!(!err.to_json().to_string().contains("10.0.0.5"));
    }

    #[test]
    fn error_body_shape() {
        let body = ApiError::from(SupplierAuthError::Unauthorized).to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["error"], "Invalid email or password");
    }
}
