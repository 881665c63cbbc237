//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("duplicate {kind}: {value}")]
    Duplicate { kind: &'static str, value: String },
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
}

/// Failures raised by a [`crate::service::ResourceStore`]. Never interpreted by handlers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("null value in column \"{column}\" of relation \"{table}\" violates not-null constraint")]
    NotNull { table: String, column: String },
    #[error("insert or update on table \"{table}\" violates foreign key constraint on \"{column}\": key {value} is not present in \"{references}\"")]
    ForeignKey {
        table: String,
        column: String,
        value: String,
        references: String,
    },
    #[error("invalid input value for column \"{column}\"")]
    InvalidValue { column: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("request entity too large")]
    PayloadTooLarge,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            error: ErrorDetail {
                message: message.into(),
            },
        }
    }
}

/// Attached to 500 responses so the error boundary can render them for the
/// current deployment mode.
#[derive(Clone, Debug)]
pub struct ServerFailure {
    pub message: String,
    pub detail: String,
}

impl ServerFailure {
    /// Generic 500 carrying the failure as a response extension.
    pub fn into_response(self) -> Response {
        let mut response = (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(GENERIC_SERVER_ERROR)),
        )
            .into_response();
        response.extensions_mut().insert(self);
        response
    }
}

pub const GENERIC_SERVER_ERROR: &str = "server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Store(_) => {
                return ServerFailure {
                    message: self.to_string(),
                    detail: format!("{:?}", self),
                }
                .into_response();
            }
        };
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_render_message_only() {
        let response = AppError::NotFound("Notice doesn't exist".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ServerFailure>().is_none());

        let response = AppError::Validation("Missing 'name' in request body".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_are_tagged_for_the_boundary() {
        let err = AppError::from(StoreError::InvalidValue {
            column: "user_id".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let failure = response.extensions().get::<ServerFailure>().cloned();
        let failure = failure.expect("failure extension");
        assert_eq!(failure.message, "invalid input value for column \"user_id\"");
        assert!(failure.detail.contains("InvalidValue"));
    }
}
