//! Error boundary: the one place 500 responses are rendered, verbose or generic by deployment mode.

use crate::config::DeploymentMode;
use crate::error::{AppError, ErrorBody, ServerFailure, GENERIC_SERVER_ERROR};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;

/// Rewrites responses tagged with [`ServerFailure`], and the body limit's plain-text
/// 413, into the JSON error shape. Everything else passes through.
pub async fn error_boundary(State(mode): State<DeploymentMode>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json(&response) {
        tracing::debug!(%method, %uri, "request body over limit");
        return AppError::PayloadTooLarge.into_response();
    }
    let Some(failure) = response.extensions().get::<ServerFailure>().cloned() else {
        return response;
    };
    tracing::error!(%method, %uri, error = %failure.message, detail = %failure.detail, "request failed");
    render_failure(mode, failure)
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

pub fn render_failure(mode: DeploymentMode, failure: ServerFailure) -> Response {
    if mode.is_production() {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(GENERIC_SERVER_ERROR)),
        )
            .into_response()
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "message": failure.message,
                "error": failure.detail,
            })),
        )
            .into_response()
    }
}

/// Turns a handler panic into a tagged 500 for the boundary.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    ServerFailure {
        detail: format!("panic: {}", message),
        message,
    }
    .into_response()
}
