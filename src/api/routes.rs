use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::Method,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::models::SummarizeRequest;
use crate::api::response;
use crate::error::{AppError, Result};
use crate::summarize::summarize_text;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.config.max_body_bytes;
    Router::new()
        // every method reaches the handler so a rejected method still gets a JSON body
        .route("/api/summarize", any(summarize_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

pub async fn summarize_handler(
    State(state): State<AppState>,
    method: Method,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let start_time = std::time::Instant::now();
    let result = process_summarize_request(&state, &method, body).await;
    tracing::info!(
        %method,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        ok = result.is_ok(),
        "summarize request processed"
    );

    match result {
        Ok(summary) => response::success(summary).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn process_summarize_request(
    state: &AppState,
    method: &Method,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<String> {
    if state.config.strict_method_check && *method != Method::POST {
        return Err(AppError::MethodNotAllowed(method.to_string()));
    }

    let body = body?;
    let text = SummarizeRequest::from_body(&body)?.into_text()?;
    tracing::debug!(chars = text.chars().count(), "received text");

    summarize_text(&state.config, state.upstream.as_ref(), &text).await
}
