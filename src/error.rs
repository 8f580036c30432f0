use axum::{
    extract::rejection::BytesRejection,
    response::{IntoResponse, Response},
    http::{header, StatusCode},
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Misconfigured: {0}")]
    Misconfigured(String),

    #[error("Upstream call failed with status {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Could not extract a summary: {0}")]
    ExtractionFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Misconfigured(_)
            | AppError::UpstreamError { .. }
            | AppError::ExtractionFailed(_)
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed message returned to the caller. Details stay in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed(_) => "Only POST requests allowed.",
            AppError::InvalidInput(_) => "Text content is required.",
            AppError::PayloadTooLarge(_) => "Request body is too large.",
            AppError::Misconfigured(_) => "API key is not configured.",
            AppError::ExtractionFailed(_) => "Failed to generate summary from the API.",
            AppError::UpstreamError { .. }
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => "Internal server error during summarization.",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "summarize request failed");
        } else {
            tracing::warn!(error = %self, "summarize request rejected");
        }

        let mut res = response::error(status, self.client_message()).into_response();
        if matches!(self, AppError::MethodNotAllowed(_)) {
            res.headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
        }
        res
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // the request URL carries the API key
        AppError::InternalError(err.without_url().to_string())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::InvalidInput(rejection.body_text())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
