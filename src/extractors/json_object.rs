//! Request body as a JSON object.

use crate::error::AppError;
use crate::service::Row;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// JSON object body. A request without a JSON content type reads as an empty object,
/// so create and update report their usual missing-field messages.
#[derive(Clone, Debug)]
pub struct JsonObject(pub Row);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(map))) => Ok(JsonObject(map)),
            Ok(Json(_)) => Err(AppError::BadRequest("Request body must be a JSON object".into())),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(JsonObject(Row::new())),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::PayloadTooLarge)
            }
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
