use axum::Json;
use axum::http::StatusCode;

use crate::api::models::{ErrorResponse, SummarizeResponse};

pub fn success(summary: String) -> (StatusCode, Json<SummarizeResponse>) {
    (StatusCode::OK, Json(SummarizeResponse { summary }))
}

pub fn error(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
