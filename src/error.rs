use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Pizza or Restaurant not found")]
    PizzaOrRestaurantNotFound,
    #[error("validation errors")]
    ValidationFailed,
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            ApiError::RestaurantNotFound => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            ApiError::PizzaOrRestaurantNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "errors": [self.to_string()] }),
            ),
            ApiError::ValidationFailed => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": [self.to_string()] }),
            ),
            ApiError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Error payload with a single message
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

/// Error payload with a collection of messages
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorsResponse {
    /// Error messages
    pub errors: Vec<String>,
}
