//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cart::{CartError, FailureCause};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// A cart operation failed.
    Cart(CartError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg),
            ApiError::Cart(err) => {
                let status = cart_error_status(&err);
                if status.is_server_error() {
                    tracing::error!(error = %err, "cart operation failed");
                }
                (status, err.user_message(), err.to_string())
            }
        };

        let body = serde_json::json!({ "error": message, "detail": detail });
        (status, axum::Json(body)).into_response()
    }
}

fn cart_error_status(err: &CartError) -> StatusCode {
    match err {
        CartError::StockExceeded { .. } => StatusCode::CONFLICT,
        _ => match err.cause() {
            Some(FailureCause::NotInCart) => StatusCode::NOT_FOUND,
            Some(FailureCause::Lookup(_)) => StatusCode::BAD_GATEWAY,
            Some(FailureCause::Storage(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        ApiError::Cart(err)
    }
}
