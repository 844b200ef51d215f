use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    MissingUserId,
    InvalidUserId(String),
    AggregationFailed { user_id: String, details: String },
}

#[derive(Serialize)]
struct BadRequestBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<String>,
}

#[derive(Serialize)]
struct AggregationFailureBody {
    success: bool,
    error: String,
    details: String,
    #[serde(rename = "userId")]
    user_id: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingUserId => (
                StatusCode::BAD_REQUEST,
                Json(BadRequestBody {
                    error: "Missing userId parameter".to_string(),
                    usage: Some("GET /visits?userId=<numeric Roblox user id>".to_string()),
                }),
            )
                .into_response(),
            ApiError::InvalidUserId(user_id) => (
                StatusCode::BAD_REQUEST,
                Json(BadRequestBody {
                    error: format!("Invalid userId {:?}: must be decimal digits only", user_id),
                    usage: None,
                }),
            )
                .into_response(),
            ApiError::AggregationFailed { user_id, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AggregationFailureBody {
                    success: false,
                    error: "Failed to aggregate visit counts".to_string(),
                    details,
                    user_id,
                }),
            )
                .into_response(),
        }
    }
}
